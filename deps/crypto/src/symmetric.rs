// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! APIs for symmetric keys

use anyhow::{bail, Result};

#[cfg(feature = "openssl")]
pub use crate::native::aes256cbc::Aes256CbcDecryptor;

#[cfg(all(feature = "rust-crypto", not(feature = "openssl")))]
pub use crate::rust::aes256cbc::Aes256CbcDecryptor;

pub const AES_256_KEY_SIZE: usize = 32;

pub const AES_BLOCK_SIZE: usize = 16;

pub(crate) fn check_key_iv(key: &[u8], iv: &[u8]) -> Result<()> {
    if key.len() != AES_256_KEY_SIZE {
        bail!(
            "invalid key length of {} bytes; need {} bytes",
            key.len(),
            AES_256_KEY_SIZE
        );
    }
    if iv.len() != AES_BLOCK_SIZE {
        bail!(
            "invalid iv length of {} bytes; need {} bytes",
            iv.len(),
            AES_BLOCK_SIZE
        );
    }
    Ok(())
}

pub(crate) fn check_block_aligned(data: &[u8]) -> Result<()> {
    if data.len() % AES_BLOCK_SIZE != 0 {
        bail!(
            "aes-256-cbc input of {} bytes is not a multiple of the block size",
            data.len()
        );
    }
    Ok(())
}
