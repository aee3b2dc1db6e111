//! # リポジトリ実装
//!
//! ユースケース層が依存するストアの trait と、その PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **ストアごとの trait**: 非ローカライズ設定・ローカライズ済みテンプレート・
//!   シークレットをそれぞれ独立した trait で表現する
//! - **書き込みは TxContext 必須**: 書き込みと、同一トランザクション内で再読み取りする
//!   メソッドは `&mut TxContext` を受け取る
//! - **テスタビリティ**: trait 経由でモック可能な設計（[`crate::mock`]）

pub mod localized_notification_config_repository;
pub mod node_info_repository;
pub mod notification_config_repository;
pub mod secret_repository;
pub mod user_settings_repository;

pub use localized_notification_config_repository::{
    LocalizedNotificationConfigRepository,
    PostgresLocalizedNotificationConfigRepository,
};
pub use node_info_repository::{NodeInfoRepository, PostgresNodeInfoRepository};
pub use notification_config_repository::{
    NotificationConfigRepository,
    PostgresNotificationConfigRepository,
};
pub use secret_repository::{PostgresSecretRepository, SecretRepository};
pub use user_settings_repository::{PostgresUserSettingsRepository, UserSettingsRepository};

/// `var_name = ANY($n)` にバインドするキー一覧
pub(crate) fn key_list(keys: &[&str]) -> Vec<String> {
    keys.iter().map(ToString::to_string).collect()
}
