//! # NodeInfoRepository
//!
//! テナントのノード公開情報を読み取るリポジトリ。
//!
//! ノード名・ホスト名・デフォルト言語は `config` テーブルの
//! `name` / `hostname` / `default_language` キーに、有効な言語は
//! `enabled_languages` テーブルに保存されている。

use async_trait::async_trait;
use notifyhub_domain::{language::Language, node::NodePublicInfo, tenant::TenantId};
use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::PgPool;

use super::key_list;
use crate::error::InfraError;

/// ノード情報リポジトリトレイト
#[async_trait]
pub trait NodeInfoRepository: Send + Sync {
    /// 指定言語で表現したノード公開情報を返す
    async fn find_public_info(
        &self,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<NodePublicInfo, InfraError>;

    /// テナントのデフォルト言語を返す
    async fn find_default_language(&self, tenant_id: &TenantId) -> Result<Language, InfraError>;
}

/// `config` テーブル上のノード設定
#[derive(Debug, Deserialize)]
struct NodeSettings {
    name:             String,
    hostname:         String,
    default_language: Language,
}

impl NodeSettings {
    const KEYS: [&'static str; 3] = ["name", "hostname", "default_language"];
}

/// PostgreSQL 実装の NodeInfoRepository
#[derive(Debug, Clone)]
pub struct PostgresNodeInfoRepository {
    pool: PgPool,
}

impl PostgresNodeInfoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_node_settings(&self, tenant_id: &TenantId) -> Result<NodeSettings, InfraError> {
        let rows: Vec<(String, Value)> = sqlx::query_as(
            r#"
            SELECT var_name, value
            FROM config
            WHERE tenant_id = $1 AND var_name = ANY($2)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(key_list(&NodeSettings::KEYS))
        .fetch_all(&self.pool)
        .await?;

        let fields: Map<String, Value> = rows.into_iter().collect();
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

#[async_trait]
impl NodeInfoRepository for PostgresNodeInfoRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id, %language))]
    async fn find_public_info(
        &self,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<NodePublicInfo, InfraError> {
        let settings = self.find_node_settings(tenant_id).await?;

        let codes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT lang
            FROM enabled_languages
            WHERE tenant_id = $1
            ORDER BY lang
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let languages_enabled = codes
            .into_iter()
            .map(Language::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InfraError::unexpected(format!("有効言語の値が不正: {e}")))?;

        Ok(NodePublicInfo {
            name: settings.name,
            hostname: settings.hostname,
            default_language: settings.default_language,
            languages_enabled,
            language: language.clone(),
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tenant_id))]
    async fn find_default_language(&self, tenant_id: &TenantId) -> Result<Language, InfraError> {
        let value: Option<Value> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM config
            WHERE tenant_id = $1 AND var_name = 'default_language'
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(InfraError::unexpected(format!(
                "テナント {tenant_id} の default_language が未設定"
            ))),
        }
    }
}
