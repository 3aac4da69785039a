// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! # Crypto
//!
//! This crate encapsulates the primitive operations needed to open
//! Passport data, in both purely rust and openssl (native). Features can
//! be enabled to determine which underlying implementation is used:
//! - `rust-crypto`: Use purely rust.
//! - `openssl`: Use openssl. If `rust-crypto` and `openssl` are both
//!   enabled, use `openssl`.
//!
//! ## Components
//!
//! This crate include the following public submodules:
//! - `symmetric`: Unpadded AES-256-CBC block decryption
//! - `rsa`: The operator's private key, used to unwrap secrets

#[macro_use]
extern crate strum;

#[cfg(feature = "openssl")]
mod native;
#[cfg(all(feature = "rust-crypto", not(feature = "openssl")))]
mod rust;

mod symmetric;
pub use symmetric::*;

mod asymmetric;
pub use asymmetric::*;
