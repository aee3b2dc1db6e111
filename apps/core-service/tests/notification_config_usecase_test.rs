//! 通知設定ユースケース統合テスト
//!
//! PostgreSQL 実装を組み込んだ状態で、更新トランザクションの原子性を確認する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p notifyhub-core-service --test notification_config_usecase_test
//! ```

use std::time::Duration;

use notifyhub_core_service::{
    CoreError,
    bootstrap::{CoreServices, build_services},
    config::{CoreConfig, NotificationBackend, NotificationSettings},
};
use notifyhub_domain::{
    language::Language,
    notification_config::{LocalizedNotificationConfig, NotificationUpdate},
    tenant::TenantId,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sqlx::PgPool;

// =============================================================================
// ヘルパー
// =============================================================================

fn lang(code: &str) -> Language {
    Language::new(code).unwrap()
}

fn services(pool: PgPool) -> CoreServices {
    let config = CoreConfig {
        database_url: String::new(),
        notification: NotificationSettings {
            backend:      NotificationBackend::Noop,
            smtp_timeout: Duration::from_secs(1),
        },
    };
    build_services(pool, &config).unwrap()
}

/// テナントの通知設定と、指定した有効言語（`en` のみテンプレート付き）を投入する
async fn seed_tenant(pool: &PgPool, enabled_languages: &[&str]) -> TenantId {
    let tenant_id = TenantId::new();
    let config = json!({
        "smtp_server": "smtp.example.com",
        "smtp_port": 587,
        "smtp_username": "notify",
        "smtp_security": "TLS",
        "smtp_source_name": "NotifyHub",
        "mail_address": "noreply@example.com",
        "disable_admin_notification_emails": false,
        "disable_custodian_notification_emails": false,
        "disable_receiver_notification_emails": false,
        "tip_expiration_threshold": 72,
        "notification_threshold_per_hour": 20,
        "exception_email_address": "ops@example.com",
        "exception_email_pgp_key_fingerprint": "OLD",
        "exception_email_pgp_key_public": "OLDKEY",
        "exception_email_pgp_key_expiration": null
    });
    let Value::Object(fields) = config else {
        unreachable!();
    };
    for (key, value) in fields {
        sqlx::query("INSERT INTO config (tenant_id, var_name, value) VALUES ($1, $2, $3)")
            .bind(tenant_id.as_uuid())
            .bind(key)
            .bind(value)
            .execute(pool)
            .await
            .expect("設定の投入に失敗");
    }

    for language in enabled_languages {
        sqlx::query("INSERT INTO enabled_languages (tenant_id, lang) VALUES ($1, $2)")
            .bind(tenant_id.as_uuid())
            .bind(*language)
            .execute(pool)
            .await
            .expect("有効言語の投入に失敗");
    }

    for key in LocalizedNotificationConfig::KEYS {
        sqlx::query(
            "INSERT INTO config_l10n (tenant_id, lang, var_name, value) VALUES ($1, 'en', $2, $3)",
        )
        .bind(tenant_id.as_uuid())
        .bind(key)
        .bind(format!("en:{key}"))
        .execute(pool)
        .await
        .expect("テンプレートの投入に失敗");
    }

    tenant_id
}

async fn stored_config_value(pool: &PgPool, tenant_id: &TenantId, key: &str) -> Value {
    sqlx::query_scalar("SELECT value FROM config WHERE tenant_id = $1 AND var_name = $2")
        .bind(tenant_id.as_uuid())
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn stored_secret_count(pool: &PgPool, tenant_id: &TenantId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM secrets WHERE tenant_id = $1")
        .bind(tenant_id.as_uuid())
        .fetch_one(pool)
        .await
        .unwrap()
}

// =============================================================================
// テスト
// =============================================================================

#[sqlx::test(migrations = "../../migrations")]
async fn test_更新した値がpostgresから読み直される(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, &["en"]).await;
    let sut = services(pool.clone());

    sut.notification_config
        .update_merged_view(
            &tenant_id,
            &lang("en"),
            NotificationUpdate::try_from(json!({
                "smtp_port": 2525,
                "smtp_password": "new-secret",
                "tip_mail_title": "X",
                "exception_email_pgp_key_fingerprint": "NEWFP",
                "exception_email_pgp_key_expiration": "2030-01-01T00:00:00Z",
                "reset_templates": false
            }))
            .unwrap(),
        )
        .await
        .unwrap();

    let view = sut
        .notification_config
        .get_merged_view(&tenant_id, &lang("en"))
        .await
        .unwrap();
    assert_eq!(view.config.smtp_port, 2525);
    assert_eq!(view.config.exception_email_pgp_key_fingerprint, "NEWFP");
    assert_eq!(
        view.config.exception_email_pgp_key_expiration,
        Some("2030-01-01T00:00:00Z".parse().unwrap())
    );
    assert_eq!(view.templates.tip_mail_title, "X");
    assert_eq!(view.commands.smtp_password, "");
    assert_eq!(stored_secret_count(&pool, &tenant_id).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_リセットが失敗すると先行する書き込みもロールバックされる(pool: PgPool) {
    // 不正な言語コードの有効言語行でリセットが失敗する
    let tenant_id = seed_tenant(&pool, &["bad lang!", "en"]).await;
    let sut = services(pool.clone());
    sut.tenant_cache.put_default_language(&tenant_id, lang("en"), 0);

    let result = sut
        .notification_config
        .update_merged_view(
            &tenant_id,
            &lang("en"),
            NotificationUpdate::try_from(json!({
                "smtp_port": 2525,
                "smtp_password": "new-secret",
                "tip_mail_title": "X",
                "reset_templates": true
            }))
            .unwrap(),
        )
        .await;

    assert!(matches!(result, Err(CoreError::StoreFailure(_))));
    assert_eq!(
        stored_config_value(&pool, &tenant_id, "smtp_port").await,
        json!(587)
    );
    assert_eq!(stored_secret_count(&pool, &tenant_id).await, 0);
    let tip_mail_title: String = sqlx::query_scalar(
        "SELECT value FROM config_l10n WHERE tenant_id = $1 AND lang = 'en' AND var_name = 'tip_mail_title'",
    )
    .bind(tenant_id.as_uuid())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(tip_mail_title, "en:tip_mail_title");
    // キャッシュは無効化されていない
    assert_eq!(
        sut.tenant_cache.default_language(&tenant_id),
        Some(lang("en"))
    );
}
