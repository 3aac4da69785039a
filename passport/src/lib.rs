// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! # Passport
//!
//! Decryption of the identity documents a user shares with a bot through
//! Passport. The platform delivers everything end-to-end encrypted: a
//! credentials object whose secret is wrapped with the bot's RSA public key,
//! plus element data and files encrypted with per-field secrets listed in
//! those credentials.
//!
//! ```no_run
//! # async fn example(pem: &str, creds: passport::EncryptedCredentials, selfie: Vec<u8>) -> passport::Result<()> {
//! use passport::{Decrypter, PassportDecrypter};
//!
//! let key = passport::load_private_key(pem)?;
//! let decrypter = PassportDecrypter::default();
//!
//! let credentials = decrypter.decrypt_credentials(&creds, &key)?;
//! if let Some(license) = &credentials.secure_data.driver_license {
//!     if let Some(selfie_credentials) = &license.selfie {
//!         let photo = decrypter.decrypt_file(&selfie, selfie_credentials)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! - `rust-crypto` (default): RSA and AES from the RustCrypto crates.
//! - `openssl`: RSA and AES from openssl.

#[macro_use]
extern crate strum;

pub mod cipher;
pub use cipher::{decrypt_and_verify, decrypt_and_verify_raw, PassportCipher};

pub mod config;
pub use config::DecrypterConfig;

pub mod credentials;
pub use credentials::*;

pub mod decrypter;
pub use decrypter::{Decrypter, PassportDecrypter};

pub mod elements;
pub use elements::*;

pub mod error;
pub use error::*;

pub mod stream;

pub mod unwrap;
pub use unwrap::{load_private_key, unwrap_secret, unwrap_secret_with_padding};

pub use crypto::rsa::{PaddingMode, PrivateKey};
