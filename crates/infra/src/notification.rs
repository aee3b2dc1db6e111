//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **送信ごとに構築**: SMTP 設定はテナントごとに変更されうるため、
//!   送信のたびに [`NotificationSenderFactory`] から送信インスタンスを作る
//! - **環境変数切替**: `NOTIFICATION_BACKEND` で SMTP / Noop を選択する

mod factory;
mod noop;
mod smtp;

use async_trait::async_trait;
pub use factory::{
    NoopNotificationSenderFactory,
    NotificationSenderFactory,
    SmtpNotificationSenderFactory,
};
pub use noop::NoopNotificationSender;
use notifyhub_domain::{
    notification::{EmailMessage, NotificationError},
    notification_config::{NotificationConfig, SecretValue, SmtpSecurity},
};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// テナントの SMTP 接続設定
///
/// 通知設定と SecretStore のパスワードから組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server:         String,
    pub port:           u16,
    pub security:       SmtpSecurity,
    pub username:       String,
    pub password:       Option<SecretValue>,
    /// 送信者の表示名
    pub source_name:    String,
    /// 送信元メールアドレス
    pub source_address: String,
}

impl SmtpSettings {
    /// 通知設定とパスワードから組み立てる
    pub fn from_config(config: &NotificationConfig, password: Option<SecretValue>) -> Self {
        Self {
            server: config.smtp_server.clone(),
            port: config.smtp_port,
            security: config.smtp_security,
            username: config.smtp_username.clone(),
            password,
            source_name: config.smtp_source_name.clone(),
            source_address: config.mail_address.clone(),
        }
    }
}
