//! 部分更新リクエスト

use serde::Deserialize;

use super::{LocalizedNotificationPatch, NotificationConfigPatch, SecretValue};
use crate::DomainError;

/// 通知設定の部分更新
///
/// マージビューと同じフラットなキー空間を持つ。未知のキーは無視される。
/// `reset_templates` だけは必須で、欠けている場合は検証エラーになる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationUpdate {
    #[serde(flatten)]
    pub config: NotificationConfigPatch,
    #[serde(flatten)]
    pub templates: LocalizedNotificationPatch,
    /// 空文字列は「変更なし」
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub exception_email_pgp_key_remove: bool,
    #[serde(default)]
    pub reset_templates: Option<bool>,
}

impl NotificationUpdate {
    /// `reset_templates` フラグを取り出す
    ///
    /// # Errors
    ///
    /// フラグがリクエストに含まれていない場合 `DomainError::Validation`
    pub fn reset_templates(&self) -> Result<bool, DomainError> {
        self.reset_templates.ok_or_else(|| {
            DomainError::Validation("reset_templates は必須です".to_string())
        })
    }

    /// 書き込むべき新しい SMTP パスワード
    pub fn new_smtp_password(&self) -> Option<SecretValue> {
        SecretValue::non_empty(self.smtp_password.clone())
    }
}

impl TryFrom<serde_json::Value> for NotificationUpdate {
    type Error = DomainError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
            .map_err(|e| DomainError::Validation(format!("通知設定の更新内容が不正です: {e}")))
    }
}
