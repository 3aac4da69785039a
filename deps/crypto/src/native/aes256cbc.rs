// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! This mod implements unpadded aes-256-cbc decryption.

use anyhow::*;
use openssl::symm::{Cipher, Crypter, Mode};
use zeroize::Zeroizing;

use crate::symmetric::{check_block_aligned, check_key_iv, AES_BLOCK_SIZE};

/// AES-256-CBC decryption state. Input may be fed in any number of
/// block-aligned pieces; the chaining value carries over between calls.
pub struct Aes256CbcDecryptor {
    crypter: Crypter,
}

impl Aes256CbcDecryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        check_key_iv(key, iv)?;
        let mut crypter = Crypter::new(Cipher::aes_256_cbc(), Mode::Decrypt, key, Some(iv))
            .map_err(|e| anyhow!(e.to_string()))?;
        crypter.pad(false);
        Ok(Self { crypter })
    }

    /// Decrypt `data` in place.
    pub fn decrypt_blocks(&mut self, data: &mut [u8]) -> Result<()> {
        check_block_aligned(data)?;

        // openssl requires one spare block of output space
        let mut out = Zeroizing::new(vec![0; data.len() + AES_BLOCK_SIZE]);
        let written = self
            .crypter
            .update(data, &mut out)
            .map_err(|e| anyhow!(e.to_string()))?;
        if written != data.len() {
            bail!(
                "aes-256-cbc produced {} bytes for {} bytes of input",
                written,
                data.len()
            );
        }

        data.copy_from_slice(&out[..written]);
        Ok(())
    }
}
