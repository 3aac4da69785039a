// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("required argument `{name}` is missing")]
    MissingArgument { name: &'static str },

    #[error("`{name}` is empty")]
    EmptyInput { name: &'static str },

    #[error("source stream is empty")]
    EmptySource,

    #[error("base64 decoding failed for `{field}`")]
    MalformedEncoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("data length {length} is not a multiple of 16")]
    DataLengthInvalid { length: usize },

    #[error("hash length {length} is invalid, expected 32")]
    HashLengthInvalid { length: usize },

    #[error("unwrap secret failed, the private key does not match the encrypted secret")]
    KeyMismatch {
        #[source]
        source: anyhow::Error,
    },

    #[error("data padding length {padding_length} is invalid")]
    PaddingInvalid { padding_length: u8 },

    #[error("data hash mismatch at byte {offset}")]
    HashMismatch { offset: usize },

    #[error("decrypted credentials do not match the credentials schema")]
    InvalidCredentials {
        #[source]
        source: serde_json::Error,
    },

    #[error("decrypted element data does not match the requested type")]
    InvalidPayload {
        #[source]
        source: serde_json::Error,
    },

    #[error("load private key failed")]
    InvalidPrivateKey {
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid decrypter config")]
    InvalidConfig {
        #[source]
        source: anyhow::Error,
    },

    #[error("encrypted file of {length} bytes exceeds the limit of {limit} bytes")]
    FileTooLarge { length: u64, limit: u64 },

    #[error("i/o failed when {context}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("cipher backend failure")]
    Cipher {
        #[source]
        source: anyhow::Error,
    },
}
