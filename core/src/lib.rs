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

//! Core components for building signed UCloud API requests.
//!
//! This crate provides the service-agnostic pieces of the request pipeline:
//!
//! - **Parameters**: [`ToParams`] lists the fields of a typed parameter
//!   structure and [`ParameterSet`] collects them in canonical key order,
//!   skipping absent and empty values.
//! - **Signing**: [`SignRequest`] turns a [`ParameterSet`] plus a credential
//!   into a [`SignedRequest`]; [`Signer`] loads credentials through
//!   [`ProvideCredential`] and drives the builder.
//! - **Context**: a container that holds implementations for HTTP sending and
//!   environment access.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use ucloud_core::{
//!     Context, ParameterSet, ProvideCredential, Result, SignRequest, SignedRequest, Signer,
//!     SigningCredential,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-private-key".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _params: &ParameterSet,
//!         _cred: Option<&Self::Credential>,
//!     ) -> Result<SignedRequest> {
//!         // Build your signed request here
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::default(), MyLoader, MyBuilder);
//!
//! let mut params = ParameterSet::new();
//! params.insert("Action", "DescribeImage");
//! let req = signer.sign(&params).await?;
//! println!("{}", req.url());
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod params;
pub use params::{query_unescape, ParamValue, ParameterSet, ToParams};

mod request;
pub use request::{SignedRequest, SIGNATURE_PARAM};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};

mod chain;
pub use chain::ProvideCredentialChain;

mod signer;
pub use signer::Signer;
