// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! Symmetric layer of Passport encryption.
//!
//! Every encrypted Passport payload (credentials, element data, files) is
//! produced the same way by the client:
//!
//! ```text
//! padded     = len(padding) || random padding || payload     (32..=255 bytes of padding)
//! hash       = SHA-256(padded)
//! digest     = SHA-512(secret || hash)
//! ciphertext = AES-256-CBC(key = digest[0..32], iv = digest[32..48], padded)
//! ```
//!
//! Decryption reverses this and only hands out the payload once the hash
//! over the whole decrypted buffer matches.

use base64::{engine::general_purpose::STANDARD, Engine};
use crypto::{Aes256CbcDecryptor, AES_256_KEY_SIZE, AES_BLOCK_SIZE};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, Zeroizing};

use crate::{Error, Result};

/// Size of the integrity hash (SHA-256).
pub const HASH_SIZE: usize = 32;

/// Smallest random padding a client prepends.
pub const MIN_PADDING_LENGTH: usize = 32;

/// Decrypts one Passport payload. Ciphertext can be fed in chunks of any
/// size; it is decrypted as soon as whole blocks are available and the
/// hash is computed along the way.
pub struct PassportCipher {
    decryptor: Aes256CbcDecryptor,
    hasher: Sha256,
    expected_hash: [u8; HASH_SIZE],
    buffer: Zeroizing<Vec<u8>>,
    decrypted: usize,
}

impl PassportCipher {
    /// Derive the AES key and IV from a raw (already unwrapped) `secret` and
    /// the raw `expected_hash`.
    pub fn new(secret: &[u8], expected_hash: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::EmptyInput { name: "secret" });
        }
        let expected_hash: [u8; HASH_SIZE] =
            expected_hash.try_into().map_err(|_| Error::HashLengthInvalid {
                length: expected_hash.len(),
            })?;

        let mut digest = Sha512::new()
            .chain_update(secret)
            .chain_update(expected_hash)
            .finalize();
        let decryptor = Aes256CbcDecryptor::new(
            &digest[..AES_256_KEY_SIZE],
            &digest[AES_256_KEY_SIZE..AES_256_KEY_SIZE + AES_BLOCK_SIZE],
        );
        digest.as_mut_slice().zeroize();

        Ok(Self {
            decryptor: decryptor.map_err(|source| Error::Cipher { source })?,
            hasher: Sha256::new(),
            expected_hash,
            buffer: Zeroizing::new(Vec::new()),
            decrypted: 0,
        })
    }

    /// Reserve room for `additional` more bytes of ciphertext.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.buffer.len() + additional;
        if required <= self.buffer.capacity() {
            return;
        }

        // Never let the allocator move decrypted bytes: they would be left
        // behind in freed memory. Copy them into a fresh buffer instead, the
        // old one is wiped on drop.
        let capacity = required.max(self.buffer.capacity() * 2);
        let mut grown = Zeroizing::new(Vec::with_capacity(capacity));
        grown.extend_from_slice(&self.buffer);
        self.buffer = grown;
    }

    /// Number of ciphertext bytes fed so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn update(&mut self, ciphertext: &[u8]) -> Result<()> {
        self.reserve(ciphertext.len());
        self.buffer.extend_from_slice(ciphertext);

        let pending = self.buffer.len() - self.decrypted;
        let end = self.decrypted + pending - pending % AES_BLOCK_SIZE;
        let blocks = &mut self.buffer[self.decrypted..end];
        self.decryptor
            .decrypt_blocks(blocks)
            .map_err(|source| Error::Cipher { source })?;
        self.hasher.update(&*blocks);
        self.decrypted = end;

        Ok(())
    }

    /// Verify the hash and padding, and return the payload with the padding
    /// stripped.
    pub fn finalize(mut self) -> Result<Vec<u8>> {
        if self.buffer.is_empty() {
            return Err(Error::EmptyInput { name: "ciphertext" });
        }
        if self.decrypted != self.buffer.len() {
            return Err(Error::DataLengthInvalid {
                length: self.buffer.len(),
            });
        }

        let hash = self.hasher.finalize();
        if let Some(offset) = hash
            .iter()
            .zip(self.expected_hash.iter())
            .position(|(actual, expected)| actual != expected)
        {
            return Err(Error::HashMismatch { offset });
        }

        let padding_length = self.buffer[0];
        let padding = padding_length as usize;
        if padding < MIN_PADDING_LENGTH || padding > self.buffer.len() {
            return Err(Error::PaddingInvalid { padding_length });
        }

        // the remaining padding is wiped when `self.buffer` drops
        Ok(self.buffer.split_off(padding))
    }
}

/// Decrypt `ciphertext` with a base64 `secret` and base64 `expected_hash`,
/// verify it and strip the padding.
pub fn decrypt_and_verify(
    ciphertext: &[u8],
    secret: &str,
    expected_hash: &str,
) -> Result<Vec<u8>> {
    check_ciphertext("ciphertext", ciphertext)?;
    let secret = decode_base64("secret", secret)?;
    let expected_hash = decode_base64("hash", expected_hash)?;
    decrypt_and_verify_raw(ciphertext, &secret, &expected_hash)
}

/// Same as [`decrypt_and_verify`] with `secret` and `expected_hash` already
/// decoded.
pub fn decrypt_and_verify_raw(
    ciphertext: &[u8],
    secret: &[u8],
    expected_hash: &[u8],
) -> Result<Vec<u8>> {
    check_ciphertext("ciphertext", ciphertext)?;
    let mut cipher = PassportCipher::new(secret, expected_hash)?;
    cipher.reserve(ciphertext.len());
    cipher.update(ciphertext)?;
    cipher.finalize()
}

/// Cheap structural checks, run before any key material is touched.
pub(crate) fn check_ciphertext(name: &'static str, ciphertext: &[u8]) -> Result<()> {
    if ciphertext.is_empty() {
        return Err(Error::EmptyInput { name });
    }
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(Error::DataLengthInvalid {
            length: ciphertext.len(),
        });
    }
    Ok(())
}

pub(crate) fn decode_base64(field: &'static str, value: &str) -> Result<Zeroizing<Vec<u8>>> {
    STANDARD
        .decode(value)
        .map(Zeroizing::new)
        .map_err(|source| Error::MalformedEncoding { field, source })
}
