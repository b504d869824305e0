// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 邮件发送错误
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email provider not configured: {0}")]
    NotConfigured(String),

    #[error("Email request timed out")]
    Timeout,

    #[error("Email request failed: {0}")]
    Request(String),

    #[error("Email provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

impl From<reqwest::Error> for EmailError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EmailError::Timeout
        } else {
            EmailError::Request(err.to_string())
        }
    }
}

/// 单封邮件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// 发送回执
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailReceipt {
    /// 提供商返回的消息ID（如有）
    pub message_id: Option<String>,
}

/// 事务邮件服务特质
///
/// 定义事务邮件提供商的发送接口，发件人由实现方配置
#[async_trait]
pub trait EmailService: Send + Sync {
    /// 发送单封邮件
    ///
    /// # 返回值
    ///
    /// * `Ok(EmailReceipt)` - 提供商接受了该邮件
    /// * `Err(EmailError)` - 发送失败
    async fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, EmailError>;
}
