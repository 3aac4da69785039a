// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! RSA private key backed by the `rsa` crate

use anyhow::*;
use rsa::{
    pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, traits::PublicKeyParts, Oaep,
    Pkcs1v15Encrypt, RsaPrivateKey,
};
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::rsa::PaddingMode;

/// The bot operator's private key. It is never mutated after loading, so a
/// single instance may be shared by concurrent decryptions.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    private_key: RsaPrivateKey,
}

impl PrivateKey {
    pub fn from_pkcs1_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(pem)?;
        Ok(Self { private_key })
    }

    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)?;
        Ok(Self { private_key })
    }

    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_der(der)?;
        Ok(Self { private_key })
    }

    /// Modulus length in bytes, which is also the length of every valid
    /// ciphertext block.
    pub fn size(&self) -> usize {
        self.private_key.size()
    }

    pub fn decrypt(&self, mode: PaddingMode, cipher_text: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let plaintext = match mode {
            PaddingMode::OAEP => self
                .private_key
                .decrypt(Oaep::new::<Sha1>(), cipher_text)
                .map_err(|e| anyhow!("RSA key decrypt OAEP failed: {:?}", e))?,
            PaddingMode::PKCS1v15 => self
                .private_key
                .decrypt(Pkcs1v15Encrypt, cipher_text)
                .map_err(|e| anyhow!("RSA key pkcs1v15 decrypt failed: {:?}", e))?,
        };

        Ok(Zeroizing::new(plaintext))
    }
}
