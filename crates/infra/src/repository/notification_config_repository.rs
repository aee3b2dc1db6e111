//! # NotificationConfigRepository
//!
//! 非ローカライズ通知設定（ConfigStore）の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **キー単位の保存**: `config` テーブルに (tenant_id, var_name) ごとの JSONB 値として保存
//! - **未知のキーを読まない**: [`NotificationConfig::KEYS`] に含まれるキーだけを読み取る
//! - **キー欠落はストア障害**: 必須キーが欠けていればデシリアライズエラーを返す

use async_trait::async_trait;
use notifyhub_domain::{
    notification_config::{ConfigEntry, NotificationConfig},
    tenant::TenantId,
};
use serde_json::{Map, Value};

use super::key_list;
use crate::{db::TxContext, error::InfraError};

/// 非ローカライズ通知設定リポジトリトレイト
#[async_trait]
pub trait NotificationConfigRepository: Send + Sync {
    /// テナントの通知設定を読み取る
    async fn find(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
    ) -> Result<NotificationConfig, InfraError>;

    /// エントリを書き込む（存在しなければ作成）
    async fn update(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        entries: &[ConfigEntry],
    ) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の NotificationConfigRepository
///
/// すべての操作は呼び出し元のトランザクション上で行うため、プールを保持しない。
#[derive(Debug, Clone, Default)]
pub struct PostgresNotificationConfigRepository;

impl PostgresNotificationConfigRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationConfigRepository for PostgresNotificationConfigRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id))]
    async fn find(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
    ) -> Result<NotificationConfig, InfraError> {
        let rows: Vec<(String, Value)> = sqlx::query_as(
            r#"
            SELECT var_name, value
            FROM config
            WHERE tenant_id = $1 AND var_name = ANY($2)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(key_list(&NotificationConfig::KEYS))
        .fetch_all(tx.conn()?)
        .await?;

        let fields: Map<String, Value> = rows.into_iter().collect();
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, entries = entries.len()))]
    async fn update(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        entries: &[ConfigEntry],
    ) -> Result<(), InfraError> {
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO config (tenant_id, var_name, value)
                VALUES ($1, $2, $3)
                ON CONFLICT (tenant_id, var_name)
                DO UPDATE SET value = EXCLUDED.value, updated_at = now()
                "#,
            )
            .bind(tenant_id.as_uuid())
            .bind(entry.key)
            .bind(&entry.value)
            .execute(tx.conn()?)
            .await?;
        }

        Ok(())
    }
}
