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

//! UCloud API request signer.
use async_trait::async_trait;
use log::debug;
use ucloud_core::hash::{hex_hmac_sha1, hex_hmac_sha256, hex_sha1_with_secret};
use ucloud_core::utils::redact_query_param;
use ucloud_core::{
    query_unescape, Context, Error, ParameterSet, Result, SignRequest, SignedRequest, ToParams,
    SIGNATURE_PARAM,
};

use crate::constants::*;
use crate::{Config, Credential};

/// Keyed digest used to compute the `Signature` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMethod {
    /// `hex(sha1(string_to_sign + private_key))`, what the UCloud API verifies.
    #[default]
    Sha1,
    /// `hex(hmac_sha1(private_key, string_to_sign))`.
    HmacSha1,
    /// `hex(hmac_sha256(private_key, string_to_sign))`.
    HmacSha256,
}

impl SignatureMethod {
    /// Compute the signature of `string_to_sign` with `private_key`.
    pub fn sign(&self, string_to_sign: &str, private_key: &str) -> Result<String> {
        match self {
            SignatureMethod::Sha1 => Ok(hex_sha1_with_secret(
                string_to_sign.as_bytes(),
                private_key.as_bytes(),
            )),
            SignatureMethod::HmacSha1 => {
                hex_hmac_sha1(private_key.as_bytes(), string_to_sign.as_bytes())
            }
            SignatureMethod::HmacSha256 => {
                hex_hmac_sha256(private_key.as_bytes(), string_to_sign.as_bytes())
            }
        }
    }
}

/// RequestSigner implements the UCloud API request signature.
///
/// - [API signature](https://docs.ucloud.cn/api/summary/signature)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    base_url: String,
    project_id: Option<String>,
    method: SignatureMethod,
}

impl RequestSigner {
    /// Create a signer targeting `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            project_id: None,
            method: SignatureMethod::default(),
        }
    }

    /// Create a signer from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            project_id: config.project_id.clone(),
            method: SignatureMethod::default(),
        }
    }

    /// Set the project every request is scoped to.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the signature method.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.method = method;
        self
    }

    /// Build the signed request for `params` with `cred`.
    ///
    /// Common parameters are applied first, so `params` may override them.
    pub fn build(&self, params: &ParameterSet, cred: &Credential) -> Result<SignedRequest> {
        self.check_base_url()?;
        if cred.private_key.is_empty() {
            return Err(Error::credential_invalid("private key is empty"));
        }

        let common = CommonParams {
            public_key: &cred.public_key,
            project_id: self.project_id.as_deref(),
        };
        let params = ParameterSet::merged(&common, params);

        let encoded = params.encode();
        let string_to_sign = string_to_sign(&encoded)?;
        let signature = self
            .method
            .sign(&string_to_sign, &cred.private_key)
            .map_err(|e| Error::signing_failed("generate signature failed").with_source(e))?;

        let req = SignedRequest::build(&self.base_url, params, &encoded, signature)?;
        debug!(
            "signed request url: {}",
            redact_query_param(req.url(), SIGNATURE_PARAM)
        );
        Ok(req)
    }

    fn check_base_url(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config_invalid("missing endpoint: base url is not set"));
        }
        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn validate(&self) -> Result<()> {
        self.check_base_url()
    }

    async fn sign_request(
        &self,
        _ctx: &Context,
        params: &ParameterSet,
        credential: Option<&Self::Credential>,
    ) -> Result<SignedRequest> {
        let k = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        self.build(params, k)
    }
}

/// Parameters shared by every request.
struct CommonParams<'a> {
    public_key: &'a str,
    project_id: Option<&'a str>,
}

impl ToParams for CommonParams<'_> {
    fn to_params(&self, params: &mut ParameterSet) {
        params.insert(PUBLIC_KEY, self.public_key);
        params.insert(PROJECT_ID, self.project_id);
    }
}

/// Construct string to sign
///
/// ## Format
///
/// The encoded query is percent decoded, then every literal `=` and `&` is
/// removed:
///
/// ```text
/// Action=DescribeImage&Name=a+b%26c&Region=cn-bj2
///   => ActionDescribeImageNamea bcRegioncn-bj2
/// ```
///
/// Separators inside decoded values are removed as well. The result is not a
/// query string anymore and is only meant to be digested.
fn string_to_sign(encoded: &str) -> Result<String> {
    let decoded = query_unescape(encoded)?;
    let s = decoded.replace(['=', '&'], "");

    debug!("string to sign: {}", &s);
    Ok(s)
}
