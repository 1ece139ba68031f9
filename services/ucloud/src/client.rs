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

use std::time::Duration;

use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use ucloud_core::utils::redact_query_param;
use ucloud_core::{
    Context, Error, ParameterSet, Result, SignedRequest, Signer, ToParams, SIGNATURE_PARAM,
};

use crate::constants::*;
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};

/// Operation is a single UCloud API action.
///
/// The operation's own fields are listed through [`ToParams`]; the action
/// name is sent as the `Action` parameter.
pub trait Operation: ToParams + Send + Sync {
    /// Value of the `Action` parameter.
    const ACTION: &'static str;

    /// Response body of this action.
    type Response: DeserializeOwned + AsRef<CommonResponse> + Send;
}

/// Fields carried by every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommonResponse {
    /// Zero on success.
    pub ret_code: i64,
    /// Name of the answered action.
    pub action: String,
    /// Error description when `ret_code` is not zero.
    pub message: Option<String>,
}

impl AsRef<CommonResponse> for CommonResponse {
    fn as_ref(&self) -> &CommonResponse {
        self
    }
}

/// Client sends signed requests to the UCloud API.
///
/// Each call issues a single GET and never retries.
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer<Credential>,
    timeout: Option<Duration>,
}

impl Client {
    /// Create a client from config.
    ///
    /// Unset config fields are loaded from the environment of `ctx`.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = config.from_env(&ctx);
        let timeout = config.timeout;
        let builder = RequestSigner::from_config(&config);
        let loader = DefaultCredentialProvider::with_config(config.into());

        Self {
            signer: Signer::new(ctx, loader, builder),
            timeout,
        }
    }

    /// Create a client around an existing signer.
    pub fn with_signer(signer: Signer<Credential>) -> Self {
        Self {
            signer,
            timeout: None,
        }
    }

    /// Bound every request with `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the signed request url of `op` without sending it.
    pub async fn request_url<O: Operation>(&self, op: &O) -> Result<SignedRequest> {
        let mut params = ParameterSet::new();
        params.insert(ACTION, O::ACTION);
        params.extend(op);

        self.signer.sign(&params).await
    }

    /// Send `op` and decode its response.
    pub async fn invoke<O: Operation>(&self, op: &O) -> Result<O::Response> {
        let req = self.request_url(op).await?;
        debug!(
            "send {} request: {}",
            O::ACTION,
            redact_query_param(req.url(), SIGNATURE_PARAM)
        );

        let http_req = req.to_http_request::<Bytes>()?;
        let resp = self.send(http_req).await?;

        let status = resp.status().as_u16();
        if (400..=599).contains(&status) {
            return Err(Error::server_error(format!(
                "request error, status code: {status}"
            )));
        }

        let output: O::Response = serde_json::from_slice(resp.body())
            .map_err(|e| Error::decode_failed("unmarshal response failed").with_source(e))?;

        let common = output.as_ref();
        if common.ret_code != 0 {
            return Err(Error::server_error(format!(
                "{} failed, ret code: {}, message: {}",
                O::ACTION,
                common.ret_code,
                common.message.as_deref().unwrap_or_default()
            )));
        }

        Ok(output)
    }

    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let fut = self.signer.context().http_send(req);
        let resp = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut).await.map_err(|e| {
                Error::request_failed(format!("request timed out after {timeout:?}"))
                    .with_source(e)
            })?,
            None => fut.await,
        };

        resp.map_err(|e| Error::request_failed("do request failed").with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uhost::{DescribeImage, DescribeImageResponse};
    use crate::StaticCredentialProvider;
    use async_trait::async_trait;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use ucloud_core::{ErrorKind, HttpSend};

    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        body: &'static str,
        delay: Option<Duration>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                delay: None,
                calls: Arc::default(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.calls.lock().unwrap().push(req.uri().to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))?)
        }
    }

    fn client(http: MockHttpSend, base_url: &str) -> Client {
        let ctx = Context::new().with_http_send(http);
        let signer = Signer::new(
            ctx,
            StaticCredentialProvider::new("public_key", "private_key"),
            RequestSigner::new(base_url).with_project_id("org-test"),
        );
        Client::with_signer(signer)
    }

    fn describe_image() -> DescribeImage {
        DescribeImage {
            region: "cn-bj2".to_string(),
            limit: Some(10),
            ..Default::default()
        }
    }

    const DESCRIBE_IMAGE_BODY: &str = r#"{
        "RetCode": 0,
        "Action": "DescribeImageResponse",
        "TotalCount": 1,
        "ImageSet": [
            {
                "ImageId": "uimage-xxx",
                "ImageName": "CentOS 7.9 64位",
                "OsType": "Linux",
                "OsName": "CentOS 7.9 64位",
                "State": "Available",
                "ImageDescription": "",
                "CreateTime": 1616046912
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_invoke() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        let client = client(http.clone(), "https://api.ucloud.cn");

        let resp: DescribeImageResponse = client.invoke(&describe_image()).await?;
        assert_eq!(resp.common.action, "DescribeImageResponse");
        assert_eq!(resp.total_count, 1);
        assert_eq!(resp.image_set[0].image_id, "uimage-xxx");
        assert_eq!(resp.image_set[0].create_time, Some(1616046912));

        let calls = http.calls();
        assert_eq!(calls.len(), 1);
        let query = calls[0].split_once('?').map(|(_, q)| q).unwrap_or_default();
        let sent = ParameterSet::decode(query);
        assert_eq!(sent.get("Action"), Some("DescribeImage"));
        assert_eq!(sent.get("Region"), Some("cn-bj2"));
        assert_eq!(sent.get("Limit"), Some("10"));
        assert_eq!(sent.get("PublicKey"), Some("public_key"));
        assert_eq!(sent.get("ProjectId"), Some("org-test"));
        assert!(sent.contains("Signature"));
        assert!(!sent.contains("Offset"));
        Ok(())
    }

    #[tokio::test]
    async fn test_invoke_server_error() {
        // The body is not json: decoding must not be attempted.
        let http = MockHttpSend::new(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        let client = client(http.clone(), "https://api.ucloud.cn");

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.to_string(), "request error, status code: 500");
        assert_eq!(http.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_client_error() {
        let http = MockHttpSend::new(StatusCode::FORBIDDEN, "");
        let client = client(http, "https://api.ucloud.cn");

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.to_string(), "request error, status code: 403");
    }

    #[tokio::test]
    async fn test_invoke_decode_failed() {
        let http = MockHttpSend::new(StatusCode::OK, r#"{"RetCode": "zero"}"#);
        let client = client(http, "https://api.ucloud.cn");

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);
    }

    #[tokio::test]
    async fn test_invoke_ret_code() {
        let http = MockHttpSend::new(
            StatusCode::OK,
            r#"{"RetCode": 171, "Action": "DescribeImageResponse", "Message": "Signature VerifyAC Error"}"#,
        );
        let client = client(http, "https://api.ucloud.cn");

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(
            err.to_string(),
            "DescribeImage failed, ret code: 171, message: Signature VerifyAC Error"
        );
    }

    #[tokio::test]
    async fn test_invoke_without_base_url() {
        let http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        let client = client(http.clone(), "");

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(http.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_without_base_url_and_credential() {
        let http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        let ctx = Context::new().with_http_send(http.clone());
        let client = Client::new(ctx, Config::new().with_base_url(""));

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(http.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_without_credential() {
        let http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        let ctx = Context::new().with_http_send(http.clone());
        let client = Client::new(ctx, Config::new());

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(http.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_timeout() {
        let mut http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        http.delay = Some(Duration::from_secs(5));
        let client =
            client(http, "https://api.ucloud.cn").with_timeout(Duration::from_millis(10));

        let err = client.invoke(&describe_image()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
    }

    #[tokio::test]
    async fn test_client_from_config() -> Result<()> {
        let http = MockHttpSend::new(StatusCode::OK, DESCRIBE_IMAGE_BODY);
        let ctx = Context::new().with_http_send(http);
        let config = Config::new()
            .with_public_key("config_public")
            .with_private_key("config_private")
            .with_project_id("org-config")
            .with_base_url("http://localhost:8080");
        let client = Client::new(ctx, config);

        let req = client.request_url(&describe_image()).await?;
        assert_eq!(req.base_url(), "http://localhost:8080");
        assert!(req.url().starts_with("http://localhost:8080?Action=DescribeImage&"));
        assert_eq!(req.params().get("PublicKey"), Some("config_public"));
        assert_eq!(req.params().get("ProjectId"), Some("org-config"));
        Ok(())
    }
}
