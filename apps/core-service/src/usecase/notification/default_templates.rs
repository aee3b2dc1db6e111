//! # 同梱のデフォルトテンプレート
//!
//! テンプレートのリセットで使う既定のテンプレート一式。
//! `include_str!` でバイナリに埋め込む。

use notifyhub_domain::{DomainError, notification_config::DefaultTemplateBundle};

const DEFAULT_TEMPLATES_JSON: &str =
    include_str!("../../../templates/notifications/default_templates.json");

/// 埋め込みのデフォルトテンプレートを読み込む
///
/// # Errors
///
/// 埋め込みの JSON が不完全な場合 `DomainError::Validation`
pub fn load() -> Result<DefaultTemplateBundle, DomainError> {
    DefaultTemplateBundle::from_json(DEFAULT_TEMPLATES_JSON)
}
