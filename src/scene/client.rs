//! 场景分析后端客户端
//!
//! 把照片 POST 给后端，响应体就是场景快照

use std::time::Duration;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::SceneSnapshot;
use crate::config::BackendConfig;
use crate::error::{PerceptionError, Result};

/// 分析请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// 照片 (Base64)
    pub image: String,
    /// 每次请求生成的 ID
    pub uuid: String,
}

impl AnalyzeRequest {
    pub fn new(image: &[u8]) -> Self {
        Self {
            image: BASE64.encode(image),
            uuid: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// 场景分析客户端
pub struct SceneClient {
    client: Client,
    endpoint: String,
}

impl SceneClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// 发送照片并解码快照
    ///
    /// 响应体无法解码时返回 `MalformedSnapshot`
    pub async fn analyze(&self, image: Bytes) -> Result<SceneSnapshot> {
        let request = AnalyzeRequest::new(&image);
        debug!("Sending analyze request {} ({} bytes)", request.uuid, image.len());

        let response = self.client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(PerceptionError::Backend(format!("{}: {}", status, error)));
        }

        let body = response.text().await?;
        SceneSnapshot::from_json(&body)
    }

    /// 健康检查
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.endpoint);

        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                warn!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
