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

use crate::{
    Context, Error, ParameterSet, ProvideCredential, Result, SignRequest, SignedRequest,
    SigningCredential,
};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign requests.
///
/// The credential is loaded on first use and reused while it stays valid.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the given parameters into a request url.
    ///
    /// The builder is validated first, so a misconfigured builder fails
    /// without touching the credential loader.
    pub async fn sign(&self, params: &ParameterSet) -> Result<SignedRequest> {
        self.builder.validate()?;

        let credential = self.cached_credential()?;
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self
                .credential
                .lock()
                .map_err(|_| Error::unexpected("credential lock poisoned"))? = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, params, credential.as_ref())
            .await
    }

    fn cached_credential(&self) -> Result<Option<K>> {
        self.credential
            .lock()
            .map(|v| v.clone())
            .map_err(|_| Error::unexpected("credential lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug, Default)]
    struct CountingLoader(Arc<AtomicUsize>);

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential("secret".to_string())))
        }
    }

    #[derive(Debug)]
    struct EchoBuilder;

    #[async_trait]
    impl SignRequest for EchoBuilder {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            params: &ParameterSet,
            credential: Option<&TestCredential>,
        ) -> Result<SignedRequest> {
            let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
            let encoded = params.encode();
            SignedRequest::build("https://example.com", params.clone(), &encoded, cred.0.clone())
        }
    }

    #[tokio::test]
    async fn test_signer_caches_credential() -> Result<()> {
        let loads = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(Context::new(), CountingLoader(loads.clone()), EchoBuilder);

        let mut params = ParameterSet::new();
        params.insert("Action", "DescribeImage");

        let first = signer.sign(&params).await?;
        let second = signer.sign(&params).await?;

        assert_eq!(first, second);
        assert_eq!(first.signature(), "secret");
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[derive(Debug)]
    struct UnconfiguredBuilder;

    #[async_trait]
    impl SignRequest for UnconfiguredBuilder {
        type Credential = TestCredential;

        fn validate(&self) -> Result<()> {
            Err(Error::config_invalid("missing endpoint"))
        }

        async fn sign_request(
            &self,
            _: &Context,
            _: &ParameterSet,
            _: Option<&TestCredential>,
        ) -> Result<SignedRequest> {
            unreachable!("validate must fail first")
        }
    }

    #[tokio::test]
    async fn test_signer_validates_before_loading() {
        let loads = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingLoader(loads.clone()),
            UnconfiguredBuilder,
        );

        let err = signer.sign(&ParameterSet::new()).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ConfigInvalid);
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }
}
