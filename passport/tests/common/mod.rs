// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

use std::{
    collections::HashMap,
    io,
    pin::Pin,
    task::{Context, Poll},
};

use passport::{
    load_private_key, Credentials, EncryptedCredentials, EncryptedPassportElement, FileCredentials,
    PrivateKey,
};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// Fixtures were produced by an independent implementation of the Passport
/// client side encryption.
pub const PRIVATE_KEY: &str = include_str!("../fixtures/private_key.pem");
pub const PRIVATE_KEY_PKCS8: &str = include_str!("../fixtures/private_key_pkcs8.pem");
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_private_key.pem");
pub const CREDENTIALS: &str = include_str!("../fixtures/credentials.json");
pub const CREDENTIALS_PLAIN: &str = include_str!("../fixtures/credentials_plain.json");
pub const ELEMENTS: &str = include_str!("../fixtures/passport_elements.json");
pub const SELFIE: &[u8] = include_bytes!("../fixtures/selfie.enc");
/// `RSA1_5` wrapped secret for [`OTHER_PRIVATE_KEY`], numerically below the
/// modulus of [`PRIVATE_KEY`].
pub const SECRET_OTHER_KEY_PKCS1V15: &str =
    include_str!("../fixtures/secret_other_key_pkcs1v15.b64");

pub fn private_key() -> PrivateKey {
    load_private_key(PRIVATE_KEY).expect("load fixture key")
}

pub fn encrypted_credentials() -> EncryptedCredentials {
    serde_json::from_str(CREDENTIALS).expect("parse fixture credentials")
}

pub fn expected_credentials() -> Credentials {
    serde_json::from_str(CREDENTIALS_PLAIN).expect("parse fixture plain credentials")
}

pub fn elements() -> HashMap<String, EncryptedPassportElement> {
    serde_json::from_str(ELEMENTS).expect("parse fixture elements")
}

/// Credentials of the encrypted `selfie.enc` fixture.
pub fn selfie_credentials() -> FileCredentials {
    expected_credentials()
        .secure_data
        .driver_license
        .and_then(|license| license.selfie.clone())
        .expect("selfie credentials in fixture")
}

/// Content of `selfie.enc` once decrypted.
pub fn selfie_plaintext() -> Vec<u8> {
    (0..10000u32).map(|i| ((i * 7 + 3) % 251) as u8).collect()
}

/// A forward-only reader handing out at most `chunk` bytes per read.
pub struct ChunkedReader {
    data: Vec<u8>,
    position: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(data: &[u8], chunk: usize) -> Self {
        Self {
            data: data.to_vec(),
            position: 0,
            chunk,
        }
    }
}

impl AsyncRead for ChunkedReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let len = this
            .chunk
            .min(buf.remaining())
            .min(this.data.len() - this.position);
        buf.put_slice(&this.data[this.position..this.position + len]);
        this.position += len;
        Poll::Ready(Ok(()))
    }
}

/// A reader failing after `fail_after` bytes.
pub struct BrokenReader {
    inner: ChunkedReader,
    fail_after: usize,
}

impl BrokenReader {
    pub fn new(data: &[u8], fail_after: usize) -> Self {
        Self {
            inner: ChunkedReader::new(data, 16),
            fail_after,
        }
    }
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.inner.position >= self.fail_after {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

/// A writer rejecting every write.
pub struct BrokenWriter;

impl AsyncWrite for BrokenWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
