// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! Decrypted payloads of Passport element data.

use serde::{Deserialize, Serialize};

/// Data of a `personal_details` element.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Date of birth in DD.MM.YYYY format
    pub birth_date: String,
    /// `male` or `female`
    pub gender: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    /// ISO 3166-1 alpha-2
    pub residence_country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name_native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name_native: Option<String>,
}

/// Data of an identity document: passport, internal passport, driver
/// license or identity card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdDocumentData {
    pub document_no: String,
    /// Date of expiry in DD.MM.YYYY format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// Data of an `address` element.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResidentialAddress {
    pub street_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    pub post_code: String,
}
