// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

use std::{fs, path::Path, str::FromStr};

use anyhow::{bail, Context};
use crypto::rsa::PaddingMode;
use serde::Deserialize;

/// Default upper bound for an encrypted document read from a stream.
/// Passport files are capped well below this by the platform.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Default number of bytes requested from a source stream per read.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Tunables of a [`crate::PassportDecrypter`].
///
/// Can be loaded from TOML, e.g.
///
/// ```toml
/// rsa_padding = "RSA-OAEP"
/// max_file_size = 10485760
/// chunk_size = 16384
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DecrypterConfig {
    /// Padding of the RSA wrapped credentials secret.
    ///
    /// This defaults to `RSA-OAEP`, which is what Passport clients use.
    #[serde(default)]
    pub rsa_padding: PaddingMode,

    /// Streams delivering more ciphertext than this are rejected.
    ///
    /// This defaults to [`DEFAULT_MAX_FILE_SIZE`].
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Read buffer size of the streaming decryptor.
    ///
    /// This defaults to [`DEFAULT_CHUNK_SIZE`].
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

macro_rules! __default_deserialization_value {
    ($name: ident, $type: ident, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

__default_deserialization_value!(default_max_file_size, u64, DEFAULT_MAX_FILE_SIZE);
__default_deserialization_value!(default_chunk_size, usize, DEFAULT_CHUNK_SIZE);

impl Default for DecrypterConfig {
    fn default() -> Self {
        Self {
            rsa_padding: PaddingMode::default(),
            max_file_size: default_max_file_size(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl DecrypterConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        content.parse()
    }

    /// Reject values the decrypter cannot work with. Loading from TOML
    /// already does this; configs built in code are checked by
    /// [`crate::PassportDecrypter::new`].
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chunk_size == 0 {
            bail!("`chunk_size` must be greater than zero");
        }
        if self.max_file_size == 0 {
            bail!("`max_file_size` must be greater than zero");
        }
        Ok(())
    }
}

impl FromStr for DecrypterConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: DecrypterConfig = toml::from_str(s).context("parse decrypter config")?;
        config.validate()?;
        Ok(config)
    }
}
