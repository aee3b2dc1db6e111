//! # 通知
//!
//! メール通知のメッセージ型とエラー型を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`EmailMessage`] | 送信するメール |
//! | [`MailTemplateKind`] | テンプレート種別（ローカライズ済みテンプレートの組を選ぶ） |
//! | [`NotificationError`] | レンダリング・送信の失敗 |

use serde::Serialize;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールテンプレート種別
///
/// 各バリアントはローカライズ済みテンプレートの `{種別}_mail_title` /
/// `{種別}_mail_template` の組に対応する。snake_case の文字列は
/// テンプレートコンテキストの `type` として渡される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MailTemplateKind {
    /// 管理者向けテスト通知
    AdminTestStatic,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}
