// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ImageSettings;
use crate::domain::services::llm_service::GenerationError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// 图片生成参数
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
}

#[async_trait]
pub trait ImageServiceTrait: Send + Sync {
    /// 生成图片并返回图片URL
    async fn generate_image(&self, request: ImageRequest) -> Result<String, GenerationError>;
}

/// 图片生成服务
///
/// 调用 `images/generations` 接口，默认 60 秒超时
pub struct ImageService {
    client: reqwest::Client,
    enabled: bool,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

impl ImageService {
    pub fn new(settings: &ImageSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            enabled: settings.enabled,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageServiceTrait for ImageService {
    async fn generate_image(&self, request: ImageRequest) -> Result<String, GenerationError> {
        if !self.enabled {
            return Err(GenerationError::NotConfigured(
                "image generation disabled".into(),
            ));
        }
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GenerationError::NotConfigured("image API key not configured".into()))?;

        let response = self
            .client
            .post(format!("{}/images/generations", self.api_base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&json!({
                "model": self.model,
                "prompt": request.prompt,
                "size": request.size,
                "quality": request.quality,
                "n": 1
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        body["data"][0]["url"]
            .as_str()
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| GenerationError::InvalidResponse("missing data[0].url".into()))
    }
}
