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

//! Signed requests for the UCloud API.
//!
//! ## Example
//!
//! ```no_run
//! use ucloud::uhost::DescribeImage;
//! use ucloud::{Client, Config};
//! use ucloud_core::{Context, OsEnv, Result};
//! use ucloud_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::new(ctx, Config::new().with_project_id("org-xxx"));
//!
//! let images = client
//!     .describe_image(&DescribeImage {
//!         region: "cn-bj2".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} images", images.total_count);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{RequestSigner, SignatureMethod};

mod client;
pub use client::{Client, CommonResponse, Operation};

pub mod uhost;
