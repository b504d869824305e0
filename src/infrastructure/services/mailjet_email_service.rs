// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::EmailSettings;
use crate::domain::services::email_service::{EmailError, EmailMessage, EmailReceipt, EmailService};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Mailjet 事务邮件服务实现
///
/// 调用 `POST {base}/v3.1/send`，使用 API key / secret 进行 Basic 认证
pub struct MailjetEmailService {
    /// HTTP 客户端
    client: reqwest::Client,
    api_base_url: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    from_email: String,
    from_name: String,
}

impl MailjetEmailService {
    pub fn new(settings: &EmailSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            from_email: settings.from_email.clone(),
            from_name: settings.from_name.clone(),
        }
    }

    fn payload(&self, message: &EmailMessage) -> Value {
        json!({
            "Messages": [{
                "From": { "Email": self.from_email, "Name": self.from_name },
                "To": [{ "Email": message.to }],
                "Subject": message.subject,
                "TextPart": message.text,
                "HTMLPart": message.html,
            }]
        })
    }
}

#[async_trait]
impl EmailService for MailjetEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, EmailError> {
        let (api_key, api_secret) = match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => (key, secret),
            _ => {
                return Err(EmailError::NotConfigured(
                    "Mailjet API key and secret are required".into(),
                ))
            }
        };

        let response = self
            .client
            .post(format!("{}/v3.1/send", self.api_base_url))
            .basic_auth(api_key, Some(api_secret))
            .json(&self.payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let result = &body["Messages"][0];
        if let Some(message_status) = result["Status"].as_str() {
            if message_status != "success" {
                return Err(EmailError::Provider {
                    status: status.as_u16(),
                    body: result.to_string(),
                });
            }
        }

        let message_id = match &result["To"][0]["MessageID"] {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        };

        Ok(EmailReceipt { message_id })
    }
}
