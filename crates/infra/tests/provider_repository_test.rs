//! ユーザー設定・ノード情報リポジトリ統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p notifyhub-infra --test provider_repository_test
//! ```

mod common;

use common::{lang, seed_tenant, seed_user};
use notifyhub_domain::{tenant::TenantId, user::UserId};
use notifyhub_infra::repository::{
    NodeInfoRepository,
    PostgresNodeInfoRepository,
    PostgresUserSettingsRepository,
    UserSettingsRepository,
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_言語未設定のユーザーはフォールバック言語になる(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, &["en", "fr"]).await;
    let user_id = seed_user(&pool, &tenant_id, None).await;
    let sut = PostgresUserSettingsRepository::new(pool.clone());

    let settings = sut
        .find_settings(&tenant_id, &user_id, &lang("fr"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(settings.language, lang("fr"));
    assert_eq!(settings.mail_address, "admin@example.com");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ユーザーの言語設定が優先される(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, &["en", "fr"]).await;
    let user_id = seed_user(&pool, &tenant_id, Some("en")).await;
    let sut = PostgresUserSettingsRepository::new(pool.clone());

    let settings = sut
        .find_settings(&tenant_id, &user_id, &lang("fr"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(settings.language, lang("en"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_別テナントのユーザーは見つからない(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, &["en"]).await;
    let user_id = seed_user(&pool, &tenant_id, None).await;
    let sut = PostgresUserSettingsRepository::new(pool.clone());

    let other = sut
        .find_settings(&TenantId::new(), &user_id, &lang("en"))
        .await
        .unwrap();
    let unknown = sut
        .find_settings(&tenant_id, &UserId::new(), &lang("en"))
        .await
        .unwrap();

    assert!(other.is_none());
    assert!(unknown.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ノード公開情報を指定言語で取得できる(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, &["fr", "en"]).await;
    let sut = PostgresNodeInfoRepository::new(pool.clone());

    let info = sut.find_public_info(&tenant_id, &lang("en")).await.unwrap();
    let default_language = sut.find_default_language(&tenant_id).await.unwrap();

    assert_eq!(info.name, "Test Node");
    assert_eq!(info.hostname, "node.example.com");
    assert_eq!(info.default_language, lang("fr"));
    assert_eq!(info.languages_enabled, vec![lang("en"), lang("fr")]);
    assert_eq!(info.language, lang("en"));
    assert_eq!(default_language, lang("fr"));
}
