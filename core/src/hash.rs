// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.

use crate::Error;
use hmac::Hmac;
use hmac::Mac;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;

/// Hex encoded SHA1 hash over `content` followed by `secret`.
///
/// This is the secret-suffix digest used by the UCloud API signature.
pub fn hex_sha1_with_secret(content: &[u8], secret: &[u8]) -> String {
    let mut h = Sha1::new();
    h.update(content);
    h.update(secret);

    hex::encode(h.finalize().as_slice())
}

/// Hex encoded HMAC with SHA1 hash.
pub fn hex_hmac_sha1(key: &[u8], content: &[u8]) -> crate::Result<String> {
    let mut h = Hmac::<Sha1>::new_from_slice(key).map_err(|e| {
        Error::signing_failed("initialize hmac-sha1 failed").with_source(anyhow::anyhow!("{e}"))
    })?;
    h.update(content);

    Ok(hex::encode(h.finalize().into_bytes()))
}

/// Hex encoded HMAC with SHA256 hash.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> crate::Result<String> {
    let mut h = Hmac::<Sha256>::new_from_slice(key).map_err(|e| {
        Error::signing_failed("initialize hmac-sha256 failed").with_source(anyhow::anyhow!("{e}"))
    })?;
    h.update(content);

    Ok(hex::encode(h.finalize().into_bytes()))
}
