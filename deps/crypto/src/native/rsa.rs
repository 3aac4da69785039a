// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

use anyhow::*;
use openssl::{
    pkey::{PKey, Private},
    rsa::{Padding, Rsa},
};
use zeroize::Zeroizing;

use crate::rsa::PaddingMode;

/// The bot operator's private key. It is never mutated after loading, so a
/// single instance may be shared by concurrent decryptions.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    private_key: Rsa<Private>,
}

impl PrivateKey {
    pub fn from_pkcs1_pem(pem: &str) -> Result<Self> {
        let private_key = Rsa::<Private>::private_key_from_pem(pem.as_bytes())?;
        Ok(Self { private_key })
    }

    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private_key = PKey::private_key_from_pem(pem.as_bytes())?.rsa()?;
        Ok(Self { private_key })
    }

    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let private_key = Rsa::<Private>::private_key_from_der(der)?;
        Ok(Self { private_key })
    }

    pub fn size(&self) -> usize {
        self.private_key.size() as usize
    }

    pub fn decrypt(&self, mode: PaddingMode, cipher_text: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        // `private_decrypt` wants room for a whole modulus
        let mut plaintext = Zeroizing::new(vec![0; self.size()]);
        match mode {
            // openssl's OAEP is fixed to SHA-1, which is exactly what Passport uses.
            PaddingMode::OAEP => {
                let decrypted_size = self
                    .private_key
                    .private_decrypt(cipher_text, &mut plaintext, Padding::PKCS1_OAEP)
                    .map_err(|e| anyhow!("RSA key decrypt OAEP failed: {:?}", e))?;
                plaintext.truncate(decrypted_size);
            }
            // OpenSSL 3 answers an invalid PKCS#1 v1.5 block with a synthetic
            // plaintext instead of an error (implicit rejection). The padding is
            // checked here so that a wrong key fails like it does with `rsa`.
            PaddingMode::PKCS1v15 => {
                let decrypted_size = self
                    .private_key
                    .private_decrypt(cipher_text, &mut plaintext, Padding::NONE)
                    .map_err(|e| anyhow!("RSA key pkcs1v15 decrypt failed: {:?}", e))?;
                plaintext.truncate(decrypted_size);
                let start = pkcs1v15_message_start(&plaintext)
                    .ok_or_else(|| anyhow!("RSA key pkcs1v15 decrypt failed: invalid padding"))?;
                plaintext.drain(..start);
            }
        }

        Ok(plaintext)
    }
}

/// Index of the message inside an RSAES-PKCS1-v1_5 encoded block
/// `0x00 || 0x02 || PS || 0x00 || M`, where `PS` is at least 8 non-zero bytes.
fn pkcs1v15_message_start(encoded: &[u8]) -> Option<usize> {
    if encoded.len() < 11 {
        return None;
    }

    // scan the whole block whatever the result
    let mut separator = None;
    for (index, byte) in encoded.iter().enumerate().skip(2) {
        if *byte == 0 && separator.is_none() {
            separator = Some(index);
        }
    }

    match separator {
        Some(index) if encoded[0] == 0 && encoded[1] == 2 && index >= 10 => Some(index + 1),
        _ => None,
    }
}
