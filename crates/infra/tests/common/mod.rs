//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ投入ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use notifyhub_domain::{
    language::Language,
    notification_config::{LocalizedNotificationConfig, NotificationConfig, SmtpSecurity},
    tenant::TenantId,
    user::UserId,
};
use serde_json::{Value, json};
use sqlx::PgPool;

/// テスト用の通知設定
pub fn sample_config() -> NotificationConfig {
    NotificationConfig {
        smtp_server: "smtp.example.com".to_string(),
        smtp_port: 587,
        smtp_username: "notify".to_string(),
        smtp_security: SmtpSecurity::Tls,
        smtp_source_name: "NotifyHub".to_string(),
        mail_address: "noreply@example.com".to_string(),
        disable_admin_notification_emails: false,
        disable_custodian_notification_emails: false,
        disable_receiver_notification_emails: false,
        tip_expiration_threshold: 72,
        notification_threshold_per_hour: 20,
        exception_email_address: "ops@example.com".to_string(),
        exception_email_pgp_key_fingerprint: String::new(),
        exception_email_pgp_key_public: String::new(),
        exception_email_pgp_key_expiration: None,
    }
}

/// `{言語}:{キー}` を値に持つテンプレート
pub fn sample_templates(language: &str) -> LocalizedNotificationConfig {
    let fields = LocalizedNotificationConfig::KEYS
        .iter()
        .map(|key| ((*key).to_string(), json!(format!("{language}:{key}"))))
        .collect();
    serde_json::from_value(Value::Object(fields)).unwrap()
}

pub fn lang(code: &str) -> Language {
    Language::new(code).unwrap()
}

/// テナントの通知設定・ノード情報・有効言語・テンプレートを投入する
pub async fn seed_tenant(pool: &PgPool, languages: &[&str]) -> TenantId {
    let tenant_id = TenantId::new();

    let Value::Object(mut fields) = serde_json::to_value(sample_config()).unwrap() else {
        unreachable!();
    };
    fields.insert("name".to_string(), json!("Test Node"));
    fields.insert("hostname".to_string(), json!("node.example.com"));
    fields.insert("default_language".to_string(), json!(languages[0]));

    for (key, value) in fields {
        sqlx::query("INSERT INTO config (tenant_id, var_name, value) VALUES ($1, $2, $3)")
            .bind(tenant_id.as_uuid())
            .bind(key)
            .bind(value)
            .execute(pool)
            .await
            .expect("設定の投入に失敗");
    }

    for language in languages {
        sqlx::query("INSERT INTO enabled_languages (tenant_id, lang) VALUES ($1, $2)")
            .bind(tenant_id.as_uuid())
            .bind(*language)
            .execute(pool)
            .await
            .expect("有効言語の投入に失敗");

        for entry in sample_templates(language).entries() {
            sqlx::query(
                "INSERT INTO config_l10n (tenant_id, lang, var_name, value) VALUES ($1, $2, $3, $4)",
            )
            .bind(tenant_id.as_uuid())
            .bind(*language)
            .bind(entry.key)
            .bind(entry.value)
            .execute(pool)
            .await
            .expect("テンプレートの投入に失敗");
        }
    }

    tenant_id
}

/// ユーザーを投入する
pub async fn seed_user(pool: &PgPool, tenant_id: &TenantId, language: Option<&str>) -> UserId {
    let user_id = UserId::new();
    sqlx::query(
        "INSERT INTO users (id, tenant_id, name, mail_address, language) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id.as_uuid())
    .bind(tenant_id.as_uuid())
    .bind("Test Admin")
    .bind("admin@example.com")
    .bind(language)
    .execute(pool)
    .await
    .expect("ユーザーの投入に失敗");
    user_id
}
