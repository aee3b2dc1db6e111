//! # UserSettingsRepository
//!
//! テスト通知の宛先となるユーザーの設定を読み取るリポジトリ。

use async_trait::async_trait;
use notifyhub_domain::{
    language::Language,
    tenant::TenantId,
    user::{UserId, UserSettings},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザー設定リポジトリトレイト
#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    /// ユーザー設定を読み取る
    ///
    /// ユーザーが言語を設定していない場合、`fallback_language` を使う。
    /// ユーザーが存在しなければ `None`。
    async fn find_settings(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        fallback_language: &Language,
    ) -> Result<Option<UserSettings>, InfraError>;
}

/// PostgreSQL 実装の UserSettingsRepository
#[derive(Debug, Clone)]
pub struct PostgresUserSettingsRepository {
    pool: PgPool,
}

impl PostgresUserSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSettingsRepository for PostgresUserSettingsRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %user_id))]
    async fn find_settings(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        fallback_language: &Language,
    ) -> Result<Option<UserSettings>, InfraError> {
        let row: Option<(String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT name, mail_address, language
            FROM users
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some((name, mail_address, language)) = row else {
            return Ok(None);
        };

        let language = match language {
            Some(code) => Language::new(code)
                .map_err(|e| InfraError::unexpected(format!("ユーザーの言語が不正: {e}")))?,
            None => fallback_language.clone(),
        };

        Ok(Some(UserSettings {
            user_id: user_id.clone(),
            name,
            mail_address,
            language,
        }))
    }
}
