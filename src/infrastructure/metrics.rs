// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 注册指标描述
pub fn describe_metrics() {
    describe_counter!(
        "automation_jobs_total",
        "Automation job runs by job type and final status"
    );
    describe_histogram!(
        "automation_job_duration_seconds",
        Unit::Seconds,
        "Wall-clock duration of tracked automation jobs"
    );
    describe_counter!(
        "email_delivery_total",
        "Individual email deliveries by outcome"
    );
    describe_counter!("llm_requests_total", "LLM requests by outcome");
}

/// 启动 Prometheus 导出器
///
/// 地址无效或端口被占用时只记录警告，不影响服务启动
pub fn init_metrics(address: &str) {
    let addr: SocketAddr = match address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", address, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}
