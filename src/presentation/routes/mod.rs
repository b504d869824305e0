// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::automation_job_repository::AutomationJobRepository;
use crate::domain::repositories::blog_post_repository::BlogPostRepository;
use crate::domain::use_cases::submit_form::SubmitFormUseCase;
use crate::presentation::handlers::automation_handler::{self, SchedulerInfo};
use crate::presentation::handlers::{blog_post_handler, form_submission_handler};
use crate::presentation::middleware::admin_auth::{admin_auth_middleware, AdminAuthState};
use crate::scheduler::AutomationScheduler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 路由依赖的共享组件
#[derive(Clone)]
pub struct RouterComponents {
    pub scheduler: Arc<AutomationScheduler>,
    pub scheduler_info: SchedulerInfo,
    pub jobs: Arc<dyn AutomationJobRepository>,
    pub posts: Arc<dyn BlogPostRepository>,
    pub submit_form: Arc<SubmitFormUseCase>,
    pub admin: AdminAuthState,
}

/// 创建应用路由
///
/// 管理接口位于 `/api/automation` 下并要求 Bearer 令牌，其余为公开接口
pub fn routes(components: RouterComponents) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/api/blog-posts", get(blog_post_handler::list_blog_posts))
        .route("/api/blog-posts/{slug}", get(blog_post_handler::get_blog_post))
        .route(
            "/api/form-submissions",
            post(form_submission_handler::create_form_submission),
        );

    let admin_routes = Router::new()
        .route(
            "/api/automation/trigger/{workflow}",
            post(automation_handler::trigger_workflow),
        )
        .route(
            "/api/automation/status",
            get(automation_handler::automation_status),
        )
        .route("/api/automation/jobs", get(automation_handler::list_jobs))
        .layer(axum::middleware::from_fn_with_state(
            components.admin.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(Extension(components.scheduler))
        .layer(Extension(components.scheduler_info))
        .layer(Extension(components.jobs))
        .layer(Extension(components.posts))
        .layer(Extension(components.submit_form))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
