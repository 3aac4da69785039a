// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

pub mod rsa {
    use anyhow::Result;
    use serde::{Deserialize, Serialize};

    #[cfg(feature = "openssl")]
    pub use crate::native::rsa::*;

    #[cfg(all(feature = "rust-crypto", not(feature = "openssl")))]
    pub use crate::rust::rsa::*;

    /// Definations of different Padding mode for decryption. Refer to
    /// <https://datatracker.ietf.org/doc/html/rfc7518#section-4.1> for
    /// more information.
    #[derive(EnumString, AsRefStr, Display, Serialize, Deserialize)]
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub enum PaddingMode {
        /// OAEP with SHA-1 for both the label hash and MGF1. This is what
        /// Passport clients use to wrap the credentials secret.
        #[default]
        #[strum(serialize = "RSA-OAEP")]
        #[serde(rename = "RSA-OAEP")]
        OAEP,

        #[strum(serialize = "RSA1_5")]
        #[serde(rename = "RSA1_5")]
        PKCS1v15,
    }

    pub const PKCS1_PEM_LABEL: &str = "RSA PRIVATE KEY";

    impl PrivateKey {
        /// Load a PEM encoded private key, either PKCS#1 (`RSA PRIVATE KEY`)
        /// or PKCS#8 (`PRIVATE KEY`).
        pub fn from_pem(pem: &str) -> Result<Self> {
            if pem.contains(&format!("BEGIN {PKCS1_PEM_LABEL}")) {
                Self::from_pkcs1_pem(pem)
            } else {
                Self::from_pkcs8_pem(pem)
            }
        }
    }

}
