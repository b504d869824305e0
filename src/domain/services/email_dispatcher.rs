// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::form_submission::FormSubmission;
use crate::domain::services::email_service::{EmailMessage, EmailService};
use crate::domain::services::templates;
use futures::future::join_all;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 投递统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub recipient_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub batches: usize,
}

/// 邮件分发器
///
/// # 功能
///
/// * 新闻通讯按批发送，批内并发，批间停顿
/// * 表单通知尽力发送，失败只记录日志
pub struct EmailDispatcher {
    service: Arc<dyn EmailService>,
    batch_size: usize,
    batch_pause: Duration,
    notification_recipients: Vec<String>,
}

impl EmailDispatcher {
    pub fn new(service: Arc<dyn EmailService>) -> Self {
        Self {
            service,
            batch_size: 50,
            batch_pause: Duration::from_secs(1),
            notification_recipients: Vec::new(),
        }
    }

    pub fn with_batching(mut self, batch_size: usize, batch_pause: Duration) -> Self {
        self.batch_size = batch_size.max(1);
        self.batch_pause = batch_pause;
        self
    }

    pub fn with_notification_recipients(mut self, recipients: Vec<String>) -> Self {
        self.notification_recipients = recipients;
        self
    }

    async fn deliver(&self, messages: Vec<EmailMessage>) -> (usize, usize) {
        let results = join_all(messages.iter().map(|m| self.service.send(m))).await;

        let mut success = 0;
        let mut failure = 0;
        for (message, result) in messages.iter().zip(results) {
            match result {
                Ok(receipt) => {
                    success += 1;
                    counter!("email_delivery_total", "outcome" => "success").increment(1);
                    debug!("Delivered email to {} ({:?})", message.to, receipt.message_id);
                }
                Err(e) => {
                    failure += 1;
                    counter!("email_delivery_total", "outcome" => "failure").increment(1);
                    warn!("Failed to deliver email to {}: {}", message.to, e);
                }
            }
        }
        (success, failure)
    }

    /// 发送新闻通讯
    ///
    /// 单个收件人失败只计入失败数，不会中断后续批次
    pub async fn send_newsletter(
        &self,
        subject: &str,
        html: &str,
        text: &str,
        recipients: &[String],
    ) -> DeliveryReport {
        let mut report = DeliveryReport {
            recipient_count: recipients.len(),
            ..Default::default()
        };

        for (index, batch) in recipients.chunks(self.batch_size).enumerate() {
            if index > 0 && !self.batch_pause.is_zero() {
                tokio::time::sleep(self.batch_pause).await;
            }

            let messages = batch
                .iter()
                .map(|to| EmailMessage {
                    to: to.clone(),
                    subject: subject.to_string(),
                    html: html.to_string(),
                    text: text.to_string(),
                })
                .collect();

            let (success, failure) = self.deliver(messages).await;
            report.success_count += success;
            report.failure_count += failure;
            report.batches += 1;
            debug!(
                "Newsletter batch {} sent: {} ok, {} failed",
                index + 1,
                success,
                failure
            );
        }

        info!(
            "Newsletter delivered to {}/{} recipients in {} batches",
            report.success_count, report.recipient_count, report.batches
        );
        report
    }

    /// 发送表单提交通知
    ///
    /// 从不向调用方返回错误
    pub async fn send_form_notification(&self, submission: &FormSubmission) -> DeliveryReport {
        if self.notification_recipients.is_empty() {
            debug!("No notification recipients configured, skipping form notification");
            return DeliveryReport::default();
        }

        let (subject, html, text) = templates::render_form_notification(submission);
        let messages = self
            .notification_recipients
            .iter()
            .map(|to| EmailMessage {
                to: to.clone(),
                subject: subject.clone(),
                html: html.clone(),
                text: text.clone(),
            })
            .collect();

        let (success_count, failure_count) = self.deliver(messages).await;
        DeliveryReport {
            recipient_count: self.notification_recipients.len(),
            success_count,
            failure_count,
            batches: 1,
        }
    }
}
