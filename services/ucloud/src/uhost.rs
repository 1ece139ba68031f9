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

//! UHost (cloud host) actions.

use serde::{Deserialize, Deserializer};
use ucloud_core::{ParameterSet, Result, ToParams};

use crate::client::{Client, CommonResponse, Operation};

/// Parameters of `CreateUHostInstance`.
///
/// - [CreateUHostInstance](https://docs.ucloud.cn/api/uhost-api/create_uhost_instance)
#[derive(Debug, Clone, Default)]
pub struct CreateUHostInstance {
    /// Region, e.g. `cn-bj2`.
    pub region: String,
    /// Image to boot from.
    pub image_id: String,
    /// `Password` or `KeyPair`.
    pub login_mode: String,
    pub password: Option<String>,
    pub key_pair: Option<String>,
    /// CPU cores.
    pub cpu: Option<u32>,
    /// Memory in MB.
    pub memory: Option<u32>,
    /// Data disk size in GB.
    pub disk_space: Option<u32>,
    pub name: Option<String>,
    pub network_id: Option<String>,
    pub security_group_id: Option<String>,
    /// `Year`, `Month`, `Dynamic`...
    pub charge_type: Option<String>,
    /// Purchase duration.
    pub quantity: Option<u32>,
    /// Number of hosts to create.
    pub count: Option<u32>,
    pub uhost_type: Option<String>,
    pub net_capability: Option<String>,
    /// Business group.
    pub tag: Option<String>,
    pub coupon_id: Option<String>,
}

impl CreateUHostInstance {
    /// Create parameters with the required fields set.
    pub fn new(
        region: impl Into<String>,
        image_id: impl Into<String>,
        login_mode: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            image_id: image_id.into(),
            login_mode: login_mode.into(),
            ..Default::default()
        }
    }
}

impl ToParams for CreateUHostInstance {
    fn to_params(&self, params: &mut ParameterSet) {
        params.insert("Region", &self.region);
        params.insert("ImageId", &self.image_id);
        params.insert("LoginMode", &self.login_mode);
        params.insert("Password", &self.password);
        params.insert("KeyPair", &self.key_pair);
        params.insert("CPU", self.cpu);
        params.insert("Memory", self.memory);
        params.insert("DiskSpace", self.disk_space);
        params.insert("Name", &self.name);
        params.insert("NetworkId", &self.network_id);
        params.insert("SecurityGroupId", &self.security_group_id);
        params.insert("ChargeType", &self.charge_type);
        params.insert("Quantity", self.quantity);
        params.insert("Count", self.count);
        params.insert("UHostType", &self.uhost_type);
        params.insert("NetCapability", &self.net_capability);
        params.insert("Tag", &self.tag);
        params.insert("CouponId", &self.coupon_id);
    }
}

/// Response of `CreateUHostInstance`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateUHostInstanceResponse {
    #[serde(flatten)]
    pub common: CommonResponse,
    /// Ids of the created hosts.
    pub host_ids: Vec<String>,
}

impl AsRef<CommonResponse> for CreateUHostInstanceResponse {
    fn as_ref(&self) -> &CommonResponse {
        &self.common
    }
}

impl Operation for CreateUHostInstance {
    const ACTION: &'static str = "CreateUHostInstance";
    type Response = CreateUHostInstanceResponse;
}

/// Parameters of `DescribeImage`.
///
/// - [DescribeImage](https://docs.ucloud.cn/api/uhost-api/describe_image)
#[derive(Debug, Clone, Default)]
pub struct DescribeImage {
    pub region: String,
    /// `Base`, `Business`, `Custom`; all types if unset.
    pub image_type: Option<String>,
    /// `Linux` or `Windows`; all if unset.
    pub os_type: Option<String>,
    pub image_id: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ToParams for DescribeImage {
    fn to_params(&self, params: &mut ParameterSet) {
        params.insert("Region", &self.region);
        params.insert("ImageType", &self.image_type);
        params.insert("OsType", &self.os_type);
        params.insert("ImageId", &self.image_id);
        params.insert("Offset", self.offset);
        params.insert("Limit", self.limit);
    }
}

/// A single image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSet {
    pub image_id: String,
    pub image_name: String,
    pub os_type: String,
    pub os_name: String,
    pub state: String,
    pub image_description: String,
    /// Unix timestamp in seconds.
    ///
    /// Accepted as a json number or a numeric string.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub create_time: Option<i64>,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Number(i64),
        Text(String),
    }

    match Option::<Timestamp>::deserialize(deserializer)? {
        Some(Timestamp::Number(v)) => Ok(Some(v)),
        Some(Timestamp::Text(v)) if v.is_empty() => Ok(None),
        Some(Timestamp::Text(v)) => v.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Response of `DescribeImage`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeImageResponse {
    #[serde(flatten)]
    pub common: CommonResponse,
    pub total_count: u64,
    pub image_set: Vec<ImageSet>,
}

impl AsRef<CommonResponse> for DescribeImageResponse {
    fn as_ref(&self) -> &CommonResponse {
        &self.common
    }
}

impl Operation for DescribeImage {
    const ACTION: &'static str = "DescribeImage";
    type Response = DescribeImageResponse;
}

impl Client {
    /// Create uhost instances.
    pub async fn create_uhost_instance(
        &self,
        params: &CreateUHostInstance,
    ) -> Result<CreateUHostInstanceResponse> {
        self.invoke(params).await
    }

    /// List available images.
    pub async fn describe_image(&self, params: &DescribeImage) -> Result<DescribeImageResponse> {
        self.invoke(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_uhost_instance_params() {
        let params = ParameterSet::from_params(&CreateUHostInstance {
            cpu: Some(0),
            memory: Some(2048),
            password: Some(String::new()),
            charge_type: Some("Month".to_string()),
            ..CreateUHostInstance::new("cn-bj2", "uimage-xxx", "Password")
        });

        assert_eq!(
            params.encode(),
            "CPU=0&ChargeType=Month&ImageId=uimage-xxx&LoginMode=Password&Memory=2048&Region=cn-bj2"
        );
    }

    #[test]
    fn test_describe_image_params() {
        let params = ParameterSet::from_params(&DescribeImage {
            region: "cn-bj2".to_string(),
            os_type: Some("Linux".to_string()),
            offset: Some(0),
            ..Default::default()
        });

        assert_eq!(params.get("Region"), Some("cn-bj2"));
        assert_eq!(params.get("OsType"), Some("Linux"));
        assert_eq!(params.get("Offset"), Some("0"));
        assert!(!params.contains("Limit"));
        assert!(!params.contains("ImageType"));
    }

    #[test]
    fn test_decode_create_uhost_instance_response() {
        let resp: CreateUHostInstanceResponse = serde_json::from_str(
            r#"{"RetCode": 0, "Action": "CreateUHostInstanceResponse", "HostIds": ["uhost-a", "uhost-b"]}"#,
        )
        .unwrap();

        assert_eq!(resp.common.ret_code, 0);
        assert_eq!(resp.host_ids, vec!["uhost-a", "uhost-b"]);
    }

    #[test]
    fn test_decode_image_create_time() {
        let resp: DescribeImageResponse = serde_json::from_str(
            r#"{
                "RetCode": 0,
                "TotalCount": 5,
                "ImageSet": [
                    {"ImageId": "uimage-a", "CreateTime": 1616046912},
                    {"ImageId": "uimage-b", "CreateTime": "1616046912"},
                    {"ImageId": "uimage-c", "CreateTime": ""},
                    {"ImageId": "uimage-d", "CreateTime": null},
                    {"ImageId": "uimage-e"}
                ]
            }"#,
        )
        .unwrap();

        let times: Vec<_> = resp.image_set.iter().map(|v| v.create_time).collect();
        assert_eq!(
            times,
            vec![Some(1616046912), Some(1616046912), None, None, None]
        );
    }

    #[test]
    fn test_decode_image_invalid_create_time() {
        let resp = serde_json::from_str::<ImageSet>(r#"{"CreateTime": "yesterday"}"#);
        assert!(resp.is_err());
    }
}
