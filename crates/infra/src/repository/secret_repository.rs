//! # SecretRepository
//!
//! テナント単位のシークレット（SecretStore）の永続化を担当するリポジトリ。
//!
//! シークレットは `secrets` テーブルに設定とは分けて保存され、
//! 設定のエクスポートには含まれない。値はログに出力しない。

use async_trait::async_trait;
use notifyhub_domain::{
    notification_config::{SecretName, SecretValue},
    tenant::TenantId,
};
use sqlx::PgPool;

use crate::{db::TxContext, error::InfraError};

/// シークレットリポジトリトレイト
#[async_trait]
pub trait SecretRepository: Send + Sync {
    /// シークレットを作成または上書きする
    async fn set(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        name: SecretName,
        value: &SecretValue,
    ) -> Result<(), InfraError>;

    /// シークレットを読み取る。未設定なら `None`
    async fn find(
        &self,
        tenant_id: &TenantId,
        name: SecretName,
    ) -> Result<Option<SecretValue>, InfraError>;
}

/// PostgreSQL 実装の SecretRepository
#[derive(Debug, Clone)]
pub struct PostgresSecretRepository {
    pool: PgPool,
}

impl PostgresSecretRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecretRepository for PostgresSecretRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %name))]
    async fn set(
        &self,
        tx: &mut TxContext,
        tenant_id: &TenantId,
        name: SecretName,
        value: &SecretValue,
    ) -> Result<(), InfraError> {
        let name: &'static str = name.into();
        sqlx::query(
            r#"
            INSERT INTO secrets (tenant_id, name, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (tenant_id, name)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(name)
        .bind(value.expose())
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %name))]
    async fn find(
        &self,
        tenant_id: &TenantId,
        name: SecretName,
    ) -> Result<Option<SecretValue>, InfraError> {
        let name: &'static str = name.into();
        let value: Option<String> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM secrets
            WHERE tenant_id = $1 AND name = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.and_then(SecretValue::non_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresSecretRepository>();
    }
}
