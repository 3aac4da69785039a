// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! Passport value types exchanged with the platform.
//!
//! The encrypted shapes ([`EncryptedCredentials`], [`EncryptedPassportElement`])
//! arrive inside the `passport_data` object of an update. The decrypted
//! [`Credentials`] carry one secret/hash pair per submitted data field or file,
//! which is what the data and file decryptors consume.
//!
//! Fields that the decryptors require are `Option`s so that an absent field
//! is reported as [`Error::MissingArgument`] naming it, rather than as a
//! generic deserialization failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// Credentials as delivered by the platform: all three fields are base64.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EncryptedCredentials {
    /// Encrypted JSON serialized [`Credentials`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// SHA-256 of the padded credentials, used for decryption and verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Secret encrypted with the bot's public RSA key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl EncryptedCredentials {
    pub fn new(
        data: impl Into<String>,
        hash: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            data: Some(data.into()),
            hash: Some(hash.into()),
            secret: Some(secret.into()),
        }
    }

    /// Returns `(data, secret, hash)`, checked in that order.
    pub(crate) fn parts(&self) -> Result<(&str, &str, &str)> {
        let data = required("data", &self.data)?;
        let secret = required("secret", &self.secret)?;
        let hash = required("hash", &self.hash)?;
        Ok((data, secret, hash))
    }
}

/// Decrypted credentials.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Credentials {
    /// Credentials for encrypted data
    pub secure_data: SecureData,

    /// Bot-specified nonce, to be compared with the one sent in the request
    pub nonce: String,
}

/// Kinds of Passport elements.
#[derive(
    EnumString, AsRefStr, Display, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ElementType {
    PersonalDetails,
    Passport,
    InternalPassport,
    DriverLicense,
    IdentityCard,
    Address,
    UtilityBill,
    BankStatement,
    RentalAgreement,
    PassportRegistration,
    TemporaryRegistration,
    PhoneNumber,
    Email,
}

/// Credentials of every element the user shared. Elements that were not
/// shared stay `None` and are not serialized.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SecureData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_details: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_passport: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_license: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_card: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility_bill: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_statement: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_agreement: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_registration: Option<SecureValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_registration: Option<SecureValue>,
}

impl SecureData {
    /// Credentials of the element of type `kind`, if it was shared.
    pub fn get(&self, kind: ElementType) -> Option<&SecureValue> {
        match kind {
            ElementType::PersonalDetails => self.personal_details.as_ref(),
            ElementType::Passport => self.passport.as_ref(),
            ElementType::InternalPassport => self.internal_passport.as_ref(),
            ElementType::DriverLicense => self.driver_license.as_ref(),
            ElementType::IdentityCard => self.identity_card.as_ref(),
            ElementType::Address => self.address.as_ref(),
            ElementType::UtilityBill => self.utility_bill.as_ref(),
            ElementType::BankStatement => self.bank_statement.as_ref(),
            ElementType::RentalAgreement => self.rental_agreement.as_ref(),
            ElementType::PassportRegistration => self.passport_registration.as_ref(),
            ElementType::TemporaryRegistration => self.temporary_registration.as_ref(),
            // not encrypted, never part of the secure data
            ElementType::PhoneNumber | ElementType::Email => None,
        }
    }

    /// All shared elements, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (ElementType, &SecureValue)> {
        [
            ElementType::PersonalDetails,
            ElementType::Passport,
            ElementType::InternalPassport,
            ElementType::DriverLicense,
            ElementType::IdentityCard,
            ElementType::Address,
            ElementType::UtilityBill,
            ElementType::BankStatement,
            ElementType::RentalAgreement,
            ElementType::PassportRegistration,
            ElementType::TemporaryRegistration,
        ]
        .into_iter()
        .filter_map(move |kind| self.get(kind).map(|value| (kind, value)))
    }
}

/// Credentials of one element. Which fields are set depends on the element
/// type and on what the bot requested (selfie, translation, ...).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SecureValue {
    /// Credentials for the encrypted element data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_side: Option<FileCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_side: Option<FileCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selfie: Option<FileCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec<FileCredentials>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileCredentials>>,
}

impl SecureValue {
    /// Every file credential of this element: front side, reverse side,
    /// selfie, translations, then files.
    pub fn file_credentials(&self) -> impl Iterator<Item = &FileCredentials> {
        self.front_side
            .iter()
            .chain(self.reverse_side.iter())
            .chain(self.selfie.iter())
            .chain(self.translation.iter().flatten())
            .chain(self.files.iter().flatten())
    }
}

/// Secret and hash needed to decrypt one encrypted file. The secret is
/// already unwrapped, no RSA step is involved.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct FileCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl FileCredentials {
    pub fn new(file_hash: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            file_hash: Some(file_hash.into()),
            secret: Some(secret.into()),
        }
    }

    /// Returns `(secret, file_hash)`, checked in that order.
    pub(crate) fn parts(&self) -> Result<(&str, &str)> {
        let secret = required("secret", &self.secret)?;
        let file_hash = required("file_hash", &self.file_hash)?;
        Ok((secret, file_hash))
    }
}

impl fmt::Debug for FileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCredentials")
            .field("file_hash", &self.file_hash)
            .field("secret", &redacted(&self.secret))
            .finish()
    }
}

/// Secret and hash needed to decrypt the data of one element.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct DataCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl DataCredentials {
    pub fn new(data_hash: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            data_hash: Some(data_hash.into()),
            secret: Some(secret.into()),
        }
    }

    /// Returns `(secret, data_hash)`, checked in that order.
    pub(crate) fn parts(&self) -> Result<(&str, &str)> {
        let secret = required("secret", &self.secret)?;
        let data_hash = required("data_hash", &self.data_hash)?;
        Ok((secret, data_hash))
    }
}

impl fmt::Debug for DataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCredentials")
            .field("data_hash", &self.data_hash)
            .field("secret", &redacted(&self.secret))
            .finish()
    }
}

/// One element of `passport_data` as sent by the platform. Only the fields
/// relevant to decryption are kept; files are referenced by id and fetched
/// through the file download API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EncryptedPassportElement {
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Base64 encrypted element data, decrypted with the element's
    /// [`DataCredentials`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Plain phone number, for `phone_number` elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Plain email, for `email` elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Element hash, used with `PassportElementError`
    pub hash: String,
}

fn required<'a>(name: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingArgument { name })
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}
