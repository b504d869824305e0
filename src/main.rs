// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use contentrs::config::settings::Settings;
use contentrs::domain::repositories::automation_job_repository::AutomationJobRepository;
use contentrs::domain::repositories::blog_post_repository::BlogPostRepository;
use contentrs::domain::repositories::form_submission_repository::FormSubmissionRepository;
use contentrs::domain::repositories::newsletter_repository::NewsletterRepository;
use contentrs::domain::repositories::research_repository::ResearchRepository;
use contentrs::domain::repositories::youtube_repository::YoutubeRepository;
use contentrs::domain::services::content_generator::ContentGenerator;
use contentrs::domain::services::email_dispatcher::EmailDispatcher;
use contentrs::domain::services::email_service::EmailService;
use contentrs::domain::services::image_service::{ImageService, ImageServiceTrait};
use contentrs::domain::services::llm_service::{LLMService, LLMServiceTrait};
use contentrs::domain::services::publisher::BlogPublisher;
use contentrs::domain::services::research_gatherer::ResearchGatherer;
use contentrs::domain::services::research_source::{CuratedResearchSource, YoutubeKeywordSource};
use contentrs::domain::services::video_search_service::VideoSearchService;
use contentrs::domain::use_cases::submit_form::SubmitFormUseCase;
use contentrs::infrastructure::database::connection;
use contentrs::infrastructure::repositories::{
    automation_job_repo_impl::AutomationJobRepositoryImpl,
    blog_post_repo_impl::BlogPostRepositoryImpl,
    form_submission_repo_impl::FormSubmissionRepositoryImpl,
    newsletter_repo_impl::NewsletterRepositoryImpl, research_repo_impl::ResearchRepositoryImpl,
    youtube_repo_impl::YoutubeRepositoryImpl,
};
use contentrs::infrastructure::services::mailjet_email_service::MailjetEmailService;
use contentrs::infrastructure::services::youtube_data_api::YoutubeDataApi;
use contentrs::presentation::handlers::automation_handler::SchedulerInfo;
use contentrs::presentation::middleware::admin_auth::AdminAuthState;
use contentrs::presentation::routes::{self, RouterComponents};
use contentrs::scheduler::{AutomationScheduler, JobTracker};
use contentrs::workers::cleanup_worker::CleanupWorkflow;
use contentrs::workers::daily_blog_worker::DailyBlogWorkflow;
use contentrs::workers::newsletter_worker::MonthlyNewsletterWorkflow;
use contentrs::workers::youtube_monitor_worker::YoutubeMonitorWorkflow;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use contentrs::utils::telemetry;
use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting contentrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.metrics.enabled {
        contentrs::infrastructure::metrics::init_metrics(&settings.metrics.address);
    }

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Repositories
    let job_repo: Arc<dyn AutomationJobRepository> =
        Arc::new(AutomationJobRepositoryImpl::new(db.clone()));
    let research_repo: Arc<dyn ResearchRepository> =
        Arc::new(ResearchRepositoryImpl::new(db.clone()));
    let post_repo: Arc<dyn BlogPostRepository> = Arc::new(BlogPostRepositoryImpl::new(db.clone()));
    let newsletter_repo: Arc<dyn NewsletterRepository> =
        Arc::new(NewsletterRepositoryImpl::new(db.clone()));
    let youtube_repo: Arc<dyn YoutubeRepository> =
        Arc::new(YoutubeRepositoryImpl::new(db.clone()));
    let form_repo: Arc<dyn FormSubmissionRepository> =
        Arc::new(FormSubmissionRepositoryImpl::new(db.clone()));

    // 5. Provider clients
    let llm: Arc<dyn LLMServiceTrait> = Arc::new(LLMService::new(&settings.llm));
    let image: Arc<dyn ImageServiceTrait> = Arc::new(ImageService::new(&settings.image));
    let email: Arc<dyn EmailService> = Arc::new(MailjetEmailService::new(&settings.email));
    let video_search: Option<Arc<dyn VideoSearchService>> = match settings.youtube.api_key {
        Some(ref key) if !key.is_empty() => Some(Arc::new(YoutubeDataApi::new(&settings.youtube))),
        _ => {
            warn!("YouTube API key not configured, video monitoring disabled");
            None
        }
    };

    // 6. Domain services
    let mut gatherer = ResearchGatherer::new(research_repo.clone())
        .with_lookback(chrono::Duration::hours(settings.youtube.lookback_hours))
        .with_source(Arc::new(CuratedResearchSource::new()));
    if let Some(search) = &video_search {
        gatherer = gatherer.with_source(Arc::new(YoutubeKeywordSource::new(
            search.clone(),
            settings.youtube.max_results,
        )));
    }
    let gatherer = Arc::new(gatherer);

    let generator = Arc::new(
        ContentGenerator::new(llm, image)
            .with_image_options(settings.image.size.clone(), settings.image.quality.clone())
            .with_public_url(settings.server.public_url.clone()),
    );
    let publisher = Arc::new(BlogPublisher::new(post_repo.clone()));
    let dispatcher = Arc::new(
        EmailDispatcher::new(email)
            .with_batching(
                settings.email.batch_size,
                Duration::from_millis(settings.email.batch_pause_ms),
            )
            .with_notification_recipients(settings.email.notification_recipients.clone()),
    );
    let submit_form = Arc::new(SubmitFormUseCase::new(form_repo.clone(), dispatcher.clone()));

    // 7. Workflows and scheduler
    let tracker = Arc::new(JobTracker::new(job_repo.clone()));
    let mut scheduler = AutomationScheduler::new(tracker)
        .register(Arc::new(DailyBlogWorkflow::new(
            gatherer,
            research_repo.clone(),
            generator.clone(),
            publisher,
        )))
        .register(Arc::new(MonthlyNewsletterWorkflow::new(
            post_repo.clone(),
            form_repo,
            newsletter_repo,
            generator,
            dispatcher,
        )))
        .register(Arc::new(CleanupWorkflow::new(
            job_repo.clone(),
            settings.retention.job_retention_days,
        )));
    if let Some(search) = video_search {
        scheduler = scheduler.register(Arc::new(
            YoutubeMonitorWorkflow::new(
                search,
                youtube_repo,
                research_repo,
                settings.youtube.channels.clone(),
            )
            .with_lookback(chrono::Duration::hours(settings.youtube.lookback_hours))
            .with_max_results(settings.youtube.max_results),
        ));
    }
    let scheduler = Arc::new(scheduler);

    // Keep the cron scheduler alive for the lifetime of the server
    let _cron = if settings.scheduler.enabled {
        Some(scheduler.start(&settings.scheduler).await?)
    } else {
        info!("Scheduler disabled, workflows run only on manual trigger");
        None
    };

    // 8. Start HTTP server
    let app = routes::routes(RouterComponents {
        scheduler,
        scheduler_info: SchedulerInfo {
            enabled: settings.scheduler.enabled,
            timezone: settings.scheduler.timezone.clone(),
        },
        jobs: job_repo,
        posts: post_repo,
        submit_form,
        admin: AdminAuthState::new(settings.admin.api_token.clone()),
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
