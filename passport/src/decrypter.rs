// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! # Decrypter
//!
//! Opening Passport data is a two step process:
//! 1. [`Decrypter::decrypt_credentials`] unwraps the credentials secret with
//!    the bot's private key and decrypts the [`Credentials`]. They hold a
//!    secret/hash pair for every shared data field and file.
//! 2. Those pairs are handed to [`Decrypter::decrypt_data`] for the `data`
//!    of an [`crate::EncryptedPassportElement`], and to
//!    [`Decrypter::decrypt_file`] or [`Decrypter::decrypt_file_stream`] for
//!    files downloaded from the platform. No RSA operation is involved here.
//!
//! All checks that need no key material run first, in a fixed order, so that
//! a malformed input is always reported the same way.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto::rsa::PrivateKey;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite};

use crate::{
    cipher::{
        check_ciphertext, decode_base64, decrypt_and_verify, decrypt_and_verify_raw, HASH_SIZE,
    },
    config::DecrypterConfig,
    credentials::{Credentials, DataCredentials, EncryptedCredentials, FileCredentials},
    stream,
    unwrap::unwrap_secret_with_padding,
    Error, Result,
};

#[async_trait]
pub trait Decrypter: Send + Sync {
    /// Decrypt the credentials of a `passport_data` update with the bot's
    /// private `key`.
    fn decrypt_credentials(
        &self,
        encrypted_credentials: &EncryptedCredentials,
        key: &PrivateKey,
    ) -> Result<Credentials>;

    /// Decrypt the base64 `encrypted_data` of a Passport element and return
    /// the JSON document it contains.
    fn decrypt_data(&self, encrypted_data: &str, credentials: &DataCredentials) -> Result<Vec<u8>>;

    /// Decrypt the `encrypted_data` of a Passport element into `T`, e.g.
    /// [`crate::PersonalDetails`].
    fn decrypt_data_as<T: DeserializeOwned>(
        &self,
        encrypted_data: &str,
        credentials: &DataCredentials,
    ) -> Result<T>
    where
        Self: Sized,
    {
        let plaintext = self.decrypt_data(encrypted_data, credentials)?;
        serde_json::from_slice(&plaintext).map_err(|source| Error::InvalidPayload { source })
    }

    /// Decrypt a downloaded Passport file held in memory.
    fn decrypt_file(
        &self,
        encrypted_content: &[u8],
        credentials: &FileCredentials,
    ) -> Result<Vec<u8>>;

    /// Decrypt a Passport file from `source` into `destination`. `source`
    /// may be forward-only; nothing is written to `destination` unless the
    /// whole file verified.
    async fn decrypt_file_stream(
        &self,
        source: &mut (dyn AsyncRead + Unpin + Send),
        credentials: &FileCredentials,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<()>;
}

/// The default [`Decrypter`].
///
/// It holds no key material. One instance can be shared by any number of
/// concurrent calls, as can the [`PrivateKey`] passed to it.
#[derive(Clone, Debug, Default)]
pub struct PassportDecrypter {
    config: DecrypterConfig,
}

impl PassportDecrypter {
    pub fn new(config: DecrypterConfig) -> Result<Self> {
        config.validate().map_err(|source| Error::InvalidConfig { source })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecrypterConfig {
        &self.config
    }

    /// Like [`Decrypter::decrypt_file_stream`], for a seekable `source`. The
    /// file is read from the current position of `source`, which is not
    /// rewound. An empty `source` is rejected before anything is read.
    pub async fn decrypt_seekable_file_stream<R, W>(
        &self,
        source: R,
        credentials: &FileCredentials,
        destination: W,
    ) -> Result<()>
    where
        R: AsyncRead + AsyncSeek + Unpin,
        W: AsyncWrite + Unpin,
    {
        stream::decrypt_seekable_file_stream(source, credentials, destination, &self.config).await
    }
}

#[async_trait]
impl Decrypter for PassportDecrypter {
    fn decrypt_credentials(
        &self,
        encrypted_credentials: &EncryptedCredentials,
        key: &PrivateKey,
    ) -> Result<Credentials> {
        let (data, secret, hash) = encrypted_credentials.parts()?;
        let data = STANDARD.decode(data).map_err(|source| Error::MalformedEncoding {
            field: "data",
            source,
        })?;
        check_ciphertext("data", &data)?;

        let encrypted_secret = decode_base64("secret", secret)?;
        let expected_hash = decode_base64("hash", hash)?;
        if expected_hash.len() != HASH_SIZE {
            return Err(Error::HashLengthInvalid {
                length: expected_hash.len(),
            });
        }

        let secret = unwrap_secret_with_padding(&encrypted_secret, key, self.config.rsa_padding)
            .inspect_err(|_| warn!("unwrap credentials secret failed, is the key right?"))?;

        let plaintext = decrypt_and_verify_raw(&data, &secret, &expected_hash)?;
        debug!("decrypted credentials of {} bytes", plaintext.len());

        serde_json::from_slice(&plaintext).map_err(|source| Error::InvalidCredentials { source })
    }

    fn decrypt_data(&self, encrypted_data: &str, credentials: &DataCredentials) -> Result<Vec<u8>> {
        let (secret, data_hash) = credentials.parts()?;
        let data = STANDARD.decode(encrypted_data).map_err(|source| Error::MalformedEncoding {
            field: "data",
            source,
        })?;
        check_ciphertext("data", &data)?;

        decrypt_and_verify(&data, secret, data_hash)
    }

    fn decrypt_file(
        &self,
        encrypted_content: &[u8],
        credentials: &FileCredentials,
    ) -> Result<Vec<u8>> {
        let (secret, file_hash) = credentials.parts()?;
        check_ciphertext("encrypted_content", encrypted_content)?;

        let plaintext = decrypt_and_verify(encrypted_content, secret, file_hash)?;
        debug!(
            "decrypted file of {} bytes into {} bytes",
            encrypted_content.len(),
            plaintext.len()
        );
        Ok(plaintext)
    }

    async fn decrypt_file_stream(
        &self,
        source: &mut (dyn AsyncRead + Unpin + Send),
        credentials: &FileCredentials,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<()> {
        stream::decrypt_file_stream(source, credentials, destination, &self.config).await
    }
}
