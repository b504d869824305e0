// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::LlmSettings;
use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 生成错误类型
///
/// 文本与图片生成共用的错误分类
#[derive(Error, Debug)]
pub enum GenerationError {
    /// 服务未配置（缺少密钥等）
    #[error("Generation service not configured: {0}")]
    NotConfigured(String),

    /// 请求超时
    #[error("Generation request timed out")]
    Timeout,

    /// 网络或请求错误
    #[error("Generation request failed: {0}")]
    Request(String),

    /// 提供商返回非成功状态码
    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// 响应格式无法识别
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// 没有达到评分门槛的研究条目
    #[error("No research item scored above the selection threshold")]
    InsufficientResearch,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Request(err.to_string())
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// 单次对话补全请求
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
pub trait LLMServiceTrait: Send + Sync {
    /// 发送对话补全请求，返回助手回复文本
    async fn chat_completion(
        &self,
        request: ChatRequest,
    ) -> Result<(String, TokenUsage), GenerationError>;
}

/// LLM服务 - 处理与LLM提供商的交互
///
/// # 功能
///
/// 调用 OpenAI 兼容的 `chat/completions` 接口（OpenRouter、OpenAI 等），
/// 请求带有显式超时，超时视为生成失败
pub struct LLMService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    temperature: f32,
    max_tokens: u32,
}

#[async_trait]
impl LLMServiceTrait for LLMService {
    async fn chat_completion(
        &self,
        request: ChatRequest,
    ) -> Result<(String, TokenUsage), GenerationError> {
        let result = LLMService::chat_completion(self, request).await;
        let outcome = if result.is_ok() { "success" } else { "error" };
        counter!("llm_requests_total", "outcome" => outcome).increment(1);
        result
    }
}

impl LLMService {
    pub fn new(settings: &LlmSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// 调用对话补全接口
    ///
    /// # 参数
    /// * `request` - 系统提示、用户提示以及可选的温度和最大token数
    ///
    /// # 返回值
    /// * `Ok((String, TokenUsage))` - 回复文本和令牌使用情况
    ///
    /// # 错误
    /// * 当API密钥未配置时返回 `NotConfigured`
    /// * 当请求失败、超时或响应格式错误时返回相应错误
    pub async fn chat_completion(
        &self,
        request: ChatRequest,
    ) -> Result<(String, TokenUsage), GenerationError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GenerationError::NotConfigured("LLM API key not configured".into()))?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": request.system
                },
                {
                    "role": "user",
                    "content": request.user
                }
            ],
            "temperature": request.temperature.unwrap_or(self.temperature),
            "max_tokens": request.max_tokens.unwrap_or(self.max_tokens)
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        debug!("Sending chat completion request to {} ({})", url, self.model);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
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

        let usage = if let Some(usage_val) = body.get("usage") {
            TokenUsage {
                prompt_tokens: usage_val["prompt_tokens"].as_u64().unwrap_or(0) as u32,
                completion_tokens: usage_val["completion_tokens"].as_u64().unwrap_or(0) as u32,
                total_tokens: usage_val["total_tokens"].as_u64().unwrap_or(0) as u32,
            }
        } else {
            TokenUsage::default()
        };

        match body["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.trim().is_empty() => Ok((content.to_string(), usage)),
            _ => Err(GenerationError::InvalidResponse(
                "missing choices[0].message.content".into(),
            )),
        }
    }
}

/// 去掉模型回复中可能包裹的 markdown 代码块
pub fn strip_code_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
