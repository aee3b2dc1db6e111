//! # 起動処理
//!
//! 環境変数の読み込み、トレーシングの初期化、データベース接続と
//! マイグレーションを行い、ユースケースに依存関係を注入する。
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let services = notifyhub_core_service::bootstrap::bootstrap().await?;
//! # let _ = services;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use notifyhub_infra::{
    InMemoryTenantCache,
    db::{self, PgTransactionManager},
    notification::{
        NoopNotificationSenderFactory,
        NotificationSenderFactory,
        SmtpNotificationSenderFactory,
    },
    repository::{
        PostgresLocalizedNotificationConfigRepository,
        PostgresNodeInfoRepository,
        PostgresNotificationConfigRepository,
        PostgresSecretRepository,
        PostgresUserSettingsRepository,
    },
};
use notifyhub_shared::observability::{TracingConfig, init_tracing};
use sqlx::PgPool;

use crate::{
    config::{CoreConfig, NotificationBackend},
    error::CoreError,
    usecase::{
        NotificationConfigUseCaseImpl,
        NotificationTestUseCaseImpl,
        TemplateRenderer,
        notification::default_templates,
    },
};

const SERVICE_NAME: &str = "notifyhub-core-service";

/// 組み立て済みのユースケース
pub struct CoreServices {
    pub notification_config: Arc<NotificationConfigUseCaseImpl>,
    pub notification_test:   Arc<NotificationTestUseCaseImpl>,
    /// プロセス内のテナントキャッシュ（通知設定の更新で無効化される）
    pub tenant_cache:        Arc<InMemoryTenantCache>,
}

/// 環境変数から設定を読み込み、ユースケースを組み立てる
pub async fn bootstrap() -> anyhow::Result<CoreServices> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env(SERVICE_NAME));

    let config = CoreConfig::from_env().context("設定の読み込みに失敗")?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗")?;

    let services = build_services(pool, &config)?;
    tracing::info!(
        backend = %config.notification.backend,
        "{} を初期化しました",
        SERVICE_NAME
    );
    Ok(services)
}

/// 接続済みのプールからユースケースを組み立てる
///
/// # Errors
///
/// 同梱のデフォルトテンプレートが不正な場合 `CoreError::Config`
pub fn build_services(pool: PgPool, config: &CoreConfig) -> Result<CoreServices, CoreError> {
    let default_templates =
        default_templates::load().map_err(|e| CoreError::Config(e.to_string()))?;

    let tenant_cache = Arc::new(InMemoryTenantCache::new());
    let secret_repo = Arc::new(PostgresSecretRepository::new(pool.clone()));
    let node_info_repo = Arc::new(PostgresNodeInfoRepository::new(pool.clone()));

    let notification_config = Arc::new(NotificationConfigUseCaseImpl::new(
        Arc::new(PgTransactionManager::new(pool.clone())),
        Arc::new(PostgresNotificationConfigRepository::new()),
        secret_repo.clone(),
        Arc::new(PostgresLocalizedNotificationConfigRepository::new()),
        tenant_cache.clone(),
        Arc::new(default_templates),
    ));

    let sender_factory: Arc<dyn NotificationSenderFactory> = match config.notification.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSenderFactory::new(
            config.notification.smtp_timeout,
        )),
        NotificationBackend::Noop => Arc::new(NoopNotificationSenderFactory),
    };

    let notification_test = Arc::new(NotificationTestUseCaseImpl::new(
        notification_config.clone(),
        Arc::new(PostgresUserSettingsRepository::new(pool)),
        node_info_repo,
        secret_repo,
        tenant_cache.clone(),
        sender_factory,
        TemplateRenderer::new(),
    ));

    Ok(CoreServices {
        notification_config,
        notification_test,
        tenant_cache,
    })
}
