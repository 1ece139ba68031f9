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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use ucloud_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads UCloud credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `UCLOUD_PUBLIC_KEY`: The UCloud public key
/// - `UCLOUD_PRIVATE_KEY`: The UCloud private key
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let public_key = envs.get(UCLOUD_PUBLIC_KEY);
        let private_key = envs.get(UCLOUD_PRIVATE_KEY);

        match (public_key, private_key) {
            (Some(pk), Some(sk)) => Ok(Some(Credential::new(pk.clone(), sk.clone()))),
            _ => Ok(None),
        }
    }
}
