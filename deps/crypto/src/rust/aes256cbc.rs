// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! This mod implements unpadded aes-256-cbc decryption.

use aes::Aes256;
use anyhow::*;
use cbc::cipher::{generic_array::GenericArray, BlockDecryptMut, KeyIvInit};

use crate::symmetric::{check_block_aligned, check_key_iv, AES_BLOCK_SIZE};

/// AES-256-CBC decryption state. Input may be fed in any number of
/// block-aligned pieces; the chaining value carries over between calls.
/// The key schedule is wiped on drop.
pub struct Aes256CbcDecryptor {
    cipher: cbc::Decryptor<Aes256>,
}

impl Aes256CbcDecryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        check_key_iv(key, iv)?;
        let cipher = cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|e| anyhow!("aes-256-cbc init failed: {:?}", e))?;
        Ok(Self { cipher })
    }

    /// Decrypt `data` in place.
    pub fn decrypt_blocks(&mut self, data: &mut [u8]) -> Result<()> {
        check_block_aligned(data)?;
        for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            self.cipher
                .decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        Ok(())
    }
}
