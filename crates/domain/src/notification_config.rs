//! # 通知設定
//!
//! 3 つの独立したストアに保存される通知設定と、それらを合成した
//! 外部向けビューを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 保存先 |
//! |---|------------|-------|
//! | [`NotificationConfig`] | 非ローカライズ通知設定（SMTP 設定・フラグ） | ConfigStore |
//! | [`SecretValue`] | シークレット（SMTP パスワード） | SecretStore |
//! | [`LocalizedNotificationConfig`] | 言語ごとのメールテンプレート | LocalizedConfigStore |
//! | [`MergedNotificationView`] | マージビュー | 保存されない（読み取りごとに合成） |
//! | [`NotificationUpdate`] | 部分更新リクエスト | 保存されない |
//! | [`DefaultTemplateBundle`] | 同梱のデフォルトテンプレート | バイナリ埋め込み |
//!
//! ## 設計方針
//!
//! - **ストアごとの型**: 各ストアのスキーマを独立した構造体で表現し、
//!   フィールド集合は互いに素になる
//! - **コマンドフィールド**: `reset_templates` / `exception_email_pgp_key_remove` /
//!   `smtp_password` は更新リクエスト専用で、読み取りでは常にデフォルト値になる
//! - **未知のキーは無視**: 部分更新に含まれる未知のキーはエラーにしない

mod default_bundle;
mod localized;
mod secret;
mod settings;
mod update;
mod view;

pub use default_bundle::DefaultTemplateBundle;
pub use localized::{LocalizedEntry, LocalizedNotificationConfig, LocalizedNotificationPatch};
pub use secret::{SecretName, SecretValue};
pub use settings::{ConfigEntry, NotificationConfig, NotificationConfigPatch, SmtpSecurity};
pub use update::NotificationUpdate;
pub use view::{CommandFields, MergedNotificationView};
