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

use ucloud_core::{utils::Redact, SigningCredential};

/// Credential for the UCloud API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Public key, sent with every request as `PublicKey`.
    pub public_key: String,
    /// Private key, used to sign requests and never sent.
    pub private_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("public_key", &Redact::from(&self.public_key))
            .field("private_key", &Redact::from(&self.private_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}
