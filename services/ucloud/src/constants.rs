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

// Env values used in ucloud.
pub const UCLOUD_PUBLIC_KEY: &str = "UCLOUD_PUBLIC_KEY";
pub const UCLOUD_PRIVATE_KEY: &str = "UCLOUD_PRIVATE_KEY";
pub const UCLOUD_PROJECT_ID: &str = "UCLOUD_PROJECT_ID";
pub const UCLOUD_BASE_URL: &str = "UCLOUD_BASE_URL";
pub const UCLOUD_TIMEOUT: &str = "UCLOUD_TIMEOUT";

/// Default endpoint of the UCloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.ucloud.cn";

// Common parameter names.
pub const ACTION: &str = "Action";
pub const PUBLIC_KEY: &str = "PublicKey";
pub const PROJECT_ID: &str = "ProjectId";
