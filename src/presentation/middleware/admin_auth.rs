// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_MAC_KEY: &[u8] = b"contentrs-admin-token";

fn token_mac() -> Option<HmacSha256> {
    HmacSha256::new_from_slice(TOKEN_MAC_KEY).ok()
}

/// 管理接口认证状态
///
/// 只保存令牌的 HMAC 摘要，比较时使用常量时间校验
#[derive(Clone)]
pub struct AdminAuthState {
    expected: Option<Arc<[u8]>>,
}

impl AdminAuthState {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let expected = if token.is_empty() {
            None
        } else {
            token_mac().map(|mut mac| {
                mac.update(token.as_bytes());
                Arc::from(mac.finalize().into_bytes().as_slice())
            })
        };
        Self { expected }
    }

    /// 常量时间比较请求中的令牌
    fn verify(&self, presented: &[u8]) -> bool {
        match (&self.expected, token_mac()) {
            (Some(expected), Some(mut mac)) => {
                mac.update(presented);
                mac.verify_slice(expected).is_ok()
            }
            _ => false,
        }
    }
}

/// 管理接口认证中间件
///
/// 校验 `Authorization: Bearer <token>` 请求头，令牌按原始字节精确匹配。
/// 配置的令牌为空时拒绝所有请求
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(StatusCode)` - 认证失败返回 401
pub async fn admin_auth_middleware(
    State(state): State<AdminAuthState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    debug!("Admin auth processing path: {}", req.uri().path());

    if state.expected.is_none() {
        warn!("Admin token is not configured, rejecting request");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.as_bytes().strip_prefix(b"Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !state.verify(token) {
        warn!("Rejected admin request with invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "admin_auth_test.rs"]
mod tests;
