//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールの件名と本文を生成する。
//!
//! ## 設計方針
//!
//! - **テンプレートはテナントのデータ**: テンプレート文字列はマージビューの
//!   ローカライズ済みフィールドから取り出し、登録せずに 1 回だけ評価する
//! - **プレーンテキスト**: 出力はテキストメールなので HTML エスケープしない
//! - **件名は 1 行**: 件名の前後の空白と改行は取り除く

use notifyhub_domain::{
    node::NodePublicInfo,
    notification::{MailTemplateKind, NotificationError},
    notification_config::MergedNotificationView,
    user::UserSettings,
};
use serde::Serialize;
use tera::{Context, Tera};

/// テンプレートに渡すコンテキスト
///
/// テンプレートからは `type`、`node`、`notification`、`user` として参照する。
#[derive(Debug, Clone, Serialize)]
pub struct TestNotificationContext<'a> {
    #[serde(rename = "type")]
    pub kind:         MailTemplateKind,
    pub node:         &'a NodePublicInfo,
    pub notification: &'a MergedNotificationView,
    pub user:         &'a UserSettings,
}

/// レンダリング結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub body:    String,
}

/// テンプレートレンダラー
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// コンテキストの種別に対応するテンプレートで件名と本文を生成する
    pub fn render(
        &self,
        context: &TestNotificationContext<'_>,
    ) -> Result<RenderedMail, NotificationError> {
        let (subject_template, body_template) =
            context.notification.templates.mail_template(context.kind);

        let tera_context = Context::from_serialize(context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let subject = Tera::one_off(subject_template, &tera_context, false)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;
        let body = Tera::one_off(body_template, &tera_context, false)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(RenderedMail {
            subject: subject.trim().to_string(),
            body,
        })
    }
}
