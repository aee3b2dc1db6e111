//! # 通知設定ユースケース
//!
//! 3 つのストア（ConfigStore、SecretStore、LocalizedConfigStore）に分かれた
//! 通知設定を 1 つのマージビューとして読み書きする。
//!
//! ## 更新の流れ
//!
//! 1. `reset_templates` の有無を検証（トランザクション開始前）
//! 2. 非ローカライズ設定を書き込む（PGP 鍵の消去要求があれば最後に消去）
//! 3. SMTP パスワードが空でなければシークレットを書き換える
//! 4. 指定言語のテンプレートを書き込む
//! 5. `reset_templates` が真なら全言語のテンプレートをデフォルトに戻す
//! 6. 同じトランザクションでビューを読み直す
//! 7. テナントキャッシュを無効化してコミット
//!
//! 途中で失敗した場合は `TxContext` のドロップでロールバックされ、
//! キャッシュの無効化は行われない。

use std::sync::Arc;

use notifyhub_domain::{
    language::Language,
    notification_config::{
        DefaultTemplateBundle,
        MergedNotificationView,
        NotificationConfig,
        NotificationUpdate,
        SecretName,
    },
    tenant::TenantId,
};
use notifyhub_infra::{
    MemoryCacheRefresher,
    db::{TransactionManager, TxContext},
    repository::{
        LocalizedNotificationConfigRepository,
        NotificationConfigRepository,
        SecretRepository,
    },
};
use notifyhub_shared::{event_log::event, log_business_event};

use crate::error::CoreError;

/// 通知設定ユースケースの実装
pub struct NotificationConfigUseCaseImpl {
    tx_manager:        Arc<dyn TransactionManager>,
    config_repo:       Arc<dyn NotificationConfigRepository>,
    secret_repo:       Arc<dyn SecretRepository>,
    localized_repo:    Arc<dyn LocalizedNotificationConfigRepository>,
    cache_refresher:   Arc<dyn MemoryCacheRefresher>,
    default_templates: Arc<DefaultTemplateBundle>,
}

impl NotificationConfigUseCaseImpl {
    pub fn new(
        tx_manager: Arc<dyn TransactionManager>,
        config_repo: Arc<dyn NotificationConfigRepository>,
        secret_repo: Arc<dyn SecretRepository>,
        localized_repo: Arc<dyn LocalizedNotificationConfigRepository>,
        cache_refresher: Arc<dyn MemoryCacheRefresher>,
        default_templates: Arc<DefaultTemplateBundle>,
    ) -> Self {
        Self {
            tx_manager,
            config_repo,
            secret_repo,
            localized_repo,
            cache_refresher,
            default_templates,
        }
    }

    /// マージビューを読み取る
    ///
    /// コマンドフィールドは常に既定値（`false`、`false`、空文字列）になる。
    pub async fn get_merged_view(
        &self,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<MergedNotificationView, CoreError> {
        let mut tx = self.tx_manager.begin().await?;
        let view = self.read_view(&mut tx, tenant_id, language).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// マージビューを部分更新し、更新後のビューを返す
    ///
    /// # Errors
    ///
    /// - `reset_templates` が含まれていない場合 `CoreError::InvalidInput`
    ///   （ストアには一切触れない）
    /// - いずれかのストア操作に失敗した場合 `CoreError::StoreFailure`
    ///   （すべての書き込みはロールバックされる）
    pub async fn update_merged_view(
        &self,
        tenant_id: &TenantId,
        language: &Language,
        update: NotificationUpdate,
    ) -> Result<MergedNotificationView, CoreError> {
        let reset_templates = update
            .reset_templates()
            .map_err(|e| CoreError::InvalidInput(e.to_string()))?;

        let mut tx = self.tx_manager.begin().await?;

        // 非ローカライズ設定
        let mut config_entries = update.config.entries();
        if update.exception_email_pgp_key_remove {
            config_entries.extend(NotificationConfig::pgp_key_removal_entries());
        }
        if !config_entries.is_empty() {
            self.config_repo
                .update(&mut tx, tenant_id, &config_entries)
                .await?;
        }

        // シークレット（空文字列は変更なし）
        let new_password = update.new_smtp_password();
        if let Some(password) = &new_password {
            self.secret_repo
                .set(&mut tx, tenant_id, SecretName::SmtpPassword, password)
                .await?;
        }

        // ローカライズ済みテンプレート
        let template_entries = update.templates.entries();
        if !template_entries.is_empty() {
            self.localized_repo
                .update(&mut tx, tenant_id, language, &update.templates)
                .await?;
        }

        // リセットは直前の編集より優先される
        let reset_languages = if reset_templates {
            Some(
                self.localized_repo
                    .reset_all(&mut tx, tenant_id, &self.default_templates)
                    .await?,
            )
        } else {
            None
        };

        let view = self.read_view(&mut tx, tenant_id, language).await?;

        self.cache_refresher.refresh(tenant_id);

        tx.commit().await?;

        log_business_event!(
            event.category = event::category::NOTIFICATION_CONFIG,
            event.action = event::action::NOTIFICATION_CONFIG_UPDATED,
            event.entity_type = event::entity_type::NOTIFICATION_CONFIG,
            event.tenant_id = %tenant_id,
            event.language = %language,
            config_keys = config_entries.len(),
            template_keys = template_entries.len(),
            event.result = event::result::SUCCESS,
            "通知設定を更新"
        );
        if new_password.is_some() {
            log_business_event!(
                event.category = event::category::NOTIFICATION_CONFIG,
                event.action = event::action::SECRET_ROTATED,
                event.entity_type = event::entity_type::SECRET,
                event.entity_id = %SecretName::SmtpPassword,
                event.tenant_id = %tenant_id,
                event.result = event::result::SUCCESS,
                "SMTP パスワードを更新"
            );
        }
        if update.exception_email_pgp_key_remove {
            log_business_event!(
                event.category = event::category::NOTIFICATION_CONFIG,
                event.action = event::action::PGP_KEY_REMOVED,
                event.entity_type = event::entity_type::NOTIFICATION_CONFIG,
                event.tenant_id = %tenant_id,
                event.result = event::result::SUCCESS,
                "例外通知の PGP 鍵を削除"
            );
        }
        if let Some(languages) = reset_languages {
            log_business_event!(
                event.category = event::category::NOTIFICATION_CONFIG,
                event.action = event::action::TEMPLATES_RESET,
                event.entity_type = event::entity_type::LOCALIZED_NOTIFICATION_CONFIG,
                event.tenant_id = %tenant_id,
                languages = ?languages,
                event.result = event::result::SUCCESS,
                "通知テンプレートをデフォルトに戻す"
            );
        }

        Ok(view)
    }

    async fn read_view(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<MergedNotificationView, CoreError> {
        let config = self.config_repo.find(tx, tenant_id).await?;
        let templates = self.localized_repo.find(tx, tenant_id, language).await?;
        Ok(MergedNotificationView::compose(config, templates))
    }
}
