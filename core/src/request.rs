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

use std::fmt::{Debug, Formatter};

use crate::utils::Redact;
use crate::{Error, ParameterSet, Result};

/// Name of the query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// SignedRequest is a fully assembled request url.
///
/// It's built once per outbound call and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    base_url: String,
    params: ParameterSet,
    signature: String,
    url: String,
}

impl SignedRequest {
    /// Assemble the final url.
    ///
    /// ```shell
    /// base_url + "?" + encoded params + "&Signature=" + escaped signature
    /// ```
    ///
    /// `encoded` must be the exact query string the signature was computed
    /// from.
    pub fn build(
        base_url: &str,
        mut params: ParameterSet,
        encoded: &str,
        signature: String,
    ) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::config_invalid("missing endpoint: base url is not set"));
        }

        let escaped: String = form_urlencoded::byte_serialize(signature.as_bytes()).collect();
        let url = format!("{base_url}?{encoded}&{SIGNATURE_PARAM}={escaped}");
        params.insert(SIGNATURE_PARAM, &signature);

        Ok(Self {
            base_url: base_url.to_string(),
            params,
            signature,
            url,
        })
    }

    /// The endpoint this request targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parameters sent with this request, including the signature.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The computed signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The fully qualified url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build a GET request for this url.
    pub fn to_http_request<B: Default>(&self) -> Result<http::Request<B>> {
        Ok(http::Request::get(self.url.as_str()).body(B::default())?)
    }
}

impl Debug for SignedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("base_url", &self.base_url)
            .field("params", &self.params)
            .field("signature", &Redact::from(&self.signature))
            .finish()
    }
}
