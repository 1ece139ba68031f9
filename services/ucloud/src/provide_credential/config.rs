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

use async_trait::async_trait;
use std::sync::Arc;
use ucloud_core::{Context, ProvideCredential, Result};

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider will load credential from config.
///
/// Unset fields fall back to the environment.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new provider via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        if let (Some(pk), Some(sk)) = (&config.public_key, &config.private_key) {
            return Ok(Some(Credential::new(pk.clone(), sk.clone())));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use ucloud_core::OsEnv;

    #[test]
    fn test_config_provider_with_os_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        temp_env::with_vars(
            vec![
                (UCLOUD_PUBLIC_KEY, Some("public_key")),
                (UCLOUD_PRIVATE_KEY, Some("private_key")),
            ],
            || {
                tokio::runtime::Runtime::new().unwrap().block_on(async {
                    let ctx = Context::new().with_env(OsEnv);
                    let loader = ConfigCredentialProvider::new(Arc::new(Config::default()));

                    let x = loader
                        .provide_credential(&ctx)
                        .await
                        .expect("load must succeed");
                    let x = x.expect("must load succeed");
                    assert_eq!("public_key", x.public_key);
                    assert_eq!("private_key", x.private_key);
                })
            },
        );
    }

    #[tokio::test]
    async fn test_config_provider_prefers_config() -> anyhow::Result<()> {
        let config = Config::new()
            .with_public_key("config_public")
            .with_private_key("config_private");
        let loader = ConfigCredentialProvider::new(Arc::new(config));

        let cred = loader.provide_credential(&Context::new()).await?.unwrap();
        assert_eq!(cred, Credential::new("config_public", "config_private"));
        Ok(())
    }
}
