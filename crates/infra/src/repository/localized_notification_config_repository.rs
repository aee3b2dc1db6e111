//! # LocalizedNotificationConfigRepository
//!
//! 言語ごとのメールテンプレート（LocalizedConfigStore）の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **キー単位の保存**: `config_l10n` テーブルに (tenant_id, lang, var_name) ごとに保存
//! - **一括リセット**: テナントで有効な全言語（`enabled_languages`）を
//!   デフォルトテンプレートで上書きする

use async_trait::async_trait;
use notifyhub_domain::{
    language::Language,
    notification_config::{
        DefaultTemplateBundle,
        LocalizedEntry,
        LocalizedNotificationConfig,
        LocalizedNotificationPatch,
    },
    tenant::TenantId,
};
use serde_json::{Map, Value};
use sqlx::PgConnection;

use super::key_list;
use crate::{db::TxContext, error::InfraError};

/// ローカライズ済み通知設定リポジトリトレイト
#[async_trait]
pub trait LocalizedNotificationConfigRepository: Send + Sync {
    /// (テナント, 言語) のテンプレートを読み取る
    async fn find(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<LocalizedNotificationConfig, InfraError>;

    /// 指定されたフィールドだけを書き込む
    async fn update(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
        patch: &LocalizedNotificationPatch,
    ) -> Result<(), InfraError>;

    /// テナントで有効な全言語のテンプレートをデフォルトに戻す
    ///
    /// リセットした言語の一覧を返す。
    async fn reset_all(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        bundle: &DefaultTemplateBundle,
    ) -> Result<Vec<Language>, InfraError>;
}

/// PostgreSQL 実装の LocalizedNotificationConfigRepository
#[derive(Debug, Clone, Default)]
pub struct PostgresLocalizedNotificationConfigRepository;

impl PostgresLocalizedNotificationConfigRepository {
    pub fn new() -> Self {
        Self
    }
}

async fn upsert_entry(
    conn: &mut PgConnection,
    tenant_id: &TenantId,
    language: &Language,
    entry: &LocalizedEntry<'_>,
) -> Result<(), InfraError> {
    sqlx::query(
        r#"
        INSERT INTO config_l10n (tenant_id, lang, var_name, value)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (tenant_id, lang, var_name)
        DO UPDATE SET value = EXCLUDED.value, updated_at = now()
        "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(language.as_str())
    .bind(entry.key)
    .bind(entry.value)
    .execute(conn)
    .await?;

    Ok(())
}

#[async_trait]
impl LocalizedNotificationConfigRepository for PostgresLocalizedNotificationConfigRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %language))]
    async fn find(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<LocalizedNotificationConfig, InfraError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT var_name, value
            FROM config_l10n
            WHERE tenant_id = $1 AND lang = $2 AND var_name = ANY($3)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(language.as_str())
        .bind(key_list(&LocalizedNotificationConfig::KEYS))
        .fetch_all(tx.conn()?)
        .await?;

        let fields: Map<String, Value> = rows
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %language))]
    async fn update(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
        patch: &LocalizedNotificationPatch,
    ) -> Result<(), InfraError> {
        for entry in patch.entries() {
            upsert_entry(tx.conn()?, tenant_id, language, &entry).await?;
        }

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id))]
    async fn reset_all(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        bundle: &DefaultTemplateBundle,
    ) -> Result<Vec<Language>, InfraError> {
        let codes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT lang
            FROM enabled_languages
            WHERE tenant_id = $1
            ORDER BY lang
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(tx.conn()?)
        .await?;

        let mut languages = Vec::with_capacity(codes.len());
        for code in codes {
            let language = Language::new(code)
                .map_err(|e| InfraError::unexpected(format!("有効言語の値が不正: {e}")))?;
            let templates = bundle
                .localized_config(&language)
                .map_err(|e| InfraError::invalid_input(e.to_string()))?;

            for entry in templates.entries() {
                upsert_entry(tx.conn()?, tenant_id, &language, &entry).await?;
            }
            languages.push(language);
        }

        tracing::debug!(languages = languages.len(), "テンプレートをリセット");
        Ok(languages)
    }
}
