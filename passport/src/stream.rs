// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! Streaming file decryption.
//!
//! The hash covers the whole file and the padding sits at its start, so no
//! plaintext can be trusted before the last block was read. Ciphertext is
//! decrypted while it arrives, but the destination only receives data once
//! the whole file verified. A failed call never writes to the destination.

use std::io::SeekFrom;

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};
use zeroize::Zeroizing;

use crate::{
    cipher::{decode_base64, PassportCipher},
    config::DecrypterConfig,
    credentials::FileCredentials,
    Error, Result,
};

/// Decrypt a file read from a forward-only `source` into `destination`.
pub async fn decrypt_file_stream<R, W>(
    mut source: R,
    credentials: &FileCredentials,
    mut destination: W,
    config: &DecrypterConfig,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    check_config(config)?;
    let (secret, file_hash) = credentials.parts()?;
    let cipher = open(secret, file_hash)?;

    let plaintext = read_to_plaintext(&mut source, cipher, config).await?;
    write_plaintext(&mut destination, &plaintext).await
}

/// Decrypt a file read from a seekable `source` into `destination`.
///
/// The ciphertext is read from the current position of `source` to its end;
/// the caller is responsible for positioning it at the start of the file.
/// The length is checked before anything is read.
pub async fn decrypt_seekable_file_stream<R, W>(
    mut source: R,
    credentials: &FileCredentials,
    mut destination: W,
    config: &DecrypterConfig,
) -> Result<()>
where
    R: AsyncRead + AsyncSeek + Unpin,
    W: AsyncWrite + Unpin,
{
    check_config(config)?;
    let (secret, file_hash) = credentials.parts()?;

    let length = remaining_length(&mut source).await?;
    if length > config.max_file_size {
        return Err(Error::FileTooLarge {
            length,
            limit: config.max_file_size,
        });
    }
    // the whole file is held in memory
    let length = usize::try_from(length).map_err(|_| Error::FileTooLarge {
        length,
        limit: usize::MAX as u64,
    })?;
    if length % crypto::AES_BLOCK_SIZE != 0 {
        return Err(Error::DataLengthInvalid { length });
    }

    let mut cipher = open(secret, file_hash)?;
    cipher.reserve(length);

    let plaintext = read_to_plaintext(&mut source, cipher, config).await?;
    write_plaintext(&mut destination, &plaintext).await
}

/// Bytes left between the current position and the end. The position is
/// restored afterwards.
async fn remaining_length<R: AsyncSeek + Unpin>(source: &mut R) -> Result<u64> {
    let position = source.stream_position().await.map_err(|source| Error::Io {
        context: "query source position",
        source,
    })?;
    let end = source.seek(SeekFrom::End(0)).await.map_err(|source| Error::Io {
        context: "seek to the end of source",
        source,
    })?;
    source.seek(SeekFrom::Start(position)).await.map_err(|source| Error::Io {
        context: "restore source position",
        source,
    })?;

    if end == 0 {
        return Err(Error::EmptySource);
    }
    Ok(end.saturating_sub(position))
}

fn check_config(config: &DecrypterConfig) -> Result<()> {
    config.validate().map_err(|source| Error::InvalidConfig { source })
}

fn open(secret: &str, file_hash: &str) -> Result<PassportCipher> {
    let secret = decode_base64("secret", secret)?;
    let file_hash = decode_base64("file_hash", file_hash)?;
    PassportCipher::new(&secret, &file_hash)
}

async fn read_to_plaintext<R: AsyncRead + Unpin>(
    source: &mut R,
    mut cipher: PassportCipher,
    config: &DecrypterConfig,
) -> Result<Zeroizing<Vec<u8>>> {
    let mut chunk = vec![0; config.chunk_size];
    loop {
        let read = source.read(&mut chunk).await.map_err(|source| Error::Io {
            context: "read source stream",
            source,
        })?;
        if read == 0 {
            break;
        }

        let length = (cipher.len() + read) as u64;
        if length > config.max_file_size {
            return Err(Error::FileTooLarge {
                length,
                limit: config.max_file_size,
            });
        }
        cipher.update(&chunk[..read])?;
    }

    if cipher.is_empty() {
        return Err(Error::EmptyInput { name: "source" });
    }

    debug!("decrypting streamed file of {} bytes", cipher.len());
    cipher.finalize().map(Zeroizing::new)
}

async fn write_plaintext<W: AsyncWrite + Unpin>(
    destination: &mut W,
    plaintext: &[u8],
) -> Result<()> {
    destination.write_all(plaintext).await.map_err(|source| Error::Io {
        context: "write destination stream",
        source,
    })?;
    destination.flush().await.map_err(|source| Error::Io {
        context: "flush destination stream",
        source,
    })
}
