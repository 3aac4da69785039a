// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! RSA layer of Passport encryption: the credentials secret is encrypted
//! with the bot's public key.

use crypto::rsa::{PaddingMode, PrivateKey};
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Load the bot's private key from PEM, PKCS#1 or PKCS#8.
pub fn load_private_key(pem: &str) -> Result<PrivateKey> {
    PrivateKey::from_pem(pem).map_err(|source| Error::InvalidPrivateKey { source })
}

/// Recover the credentials secret with the padding Passport clients use.
pub fn unwrap_secret(encrypted_secret: &[u8], key: &PrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    unwrap_secret_with_padding(encrypted_secret, key, PaddingMode::default())
}

/// Recover the credentials secret. Every failure, whether the blob has the
/// wrong size, was made for another key or has broken padding, means the
/// blob and the key do not belong together.
pub fn unwrap_secret_with_padding(
    encrypted_secret: &[u8],
    key: &PrivateKey,
    padding: PaddingMode,
) -> Result<Zeroizing<Vec<u8>>> {
    key.decrypt(padding, encrypted_secret)
        .map_err(|source| Error::KeyMismatch { source })
}
