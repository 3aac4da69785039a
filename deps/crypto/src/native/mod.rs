// Copyright (c) 2024 The Passport Authors
//
// SPDX-License-Identifier: Apache-2.0
//

//! Crypto suites implemented by openssl

pub mod aes256cbc;
pub mod rsa;
