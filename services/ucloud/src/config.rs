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
use std::time::Duration;

use log::warn;
use ucloud_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the UCloud API.
#[derive(Clone, Default)]
pub struct Config {
    /// `public_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UCLOUD_PUBLIC_KEY`]
    pub public_key: Option<String>,
    /// `private_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UCLOUD_PRIVATE_KEY`]
    pub private_key: Option<String>,
    /// `project_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UCLOUD_PROJECT_ID`]
    pub project_id: Option<String>,
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UCLOUD_BASE_URL`]
    /// - default to [`DEFAULT_BASE_URL`] via [`Config::base_url`]
    pub base_url: Option<String>,
    /// `timeout` bounds every request. Loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UCLOUD_TIMEOUT`] in seconds
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set public_key
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Set private_key
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set project_id
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(UCLOUD_PUBLIC_KEY) {
            self.public_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UCLOUD_PRIVATE_KEY) {
            self.private_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UCLOUD_PROJECT_ID) {
            self.project_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UCLOUD_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if self.timeout.is_none() {
            if let Some(v) = ctx.env_var(UCLOUD_TIMEOUT) {
                match v.parse::<u64>() {
                    Ok(secs) => self.timeout = Some(Duration::from_secs(secs)),
                    Err(e) => warn!("ignore invalid {UCLOUD_TIMEOUT} {v:?}: {e}"),
                }
            }
        }

        self
    }

    /// The endpoint requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &self.public_key.as_ref().map(Redact::from))
            .field("private_key", &self.private_key.as_ref().map(Redact::from))
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
