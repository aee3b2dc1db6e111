//! 送信インスタンスの生成
//!
//! テスト通知ではテナントの現在の SMTP 設定で送信するため、
//! 送信のたびに設定から送信インスタンスを作る。

use std::{sync::Arc, time::Duration};

use notifyhub_domain::notification::NotificationError;

use super::{NoopNotificationSender, NotificationSender, SmtpNotificationSender, SmtpSettings};

/// 送信インスタンスのファクトリ
pub trait NotificationSenderFactory: Send + Sync {
    /// SMTP 設定から送信インスタンスを作る
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Arc<dyn NotificationSender>, NotificationError>;
}

/// SMTP 送信インスタンスのファクトリ
#[derive(Debug, Clone)]
pub struct SmtpNotificationSenderFactory {
    timeout: Duration,
}

impl SmtpNotificationSenderFactory {
    /// # 引数
    ///
    /// - `timeout`: SMTP コマンドごとのタイムアウト
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl NotificationSenderFactory for SmtpNotificationSenderFactory {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Arc<dyn NotificationSender>, NotificationError> {
        Ok(Arc::new(SmtpNotificationSender::from_settings(
            settings,
            self.timeout,
        )?))
    }
}

/// Noop 送信インスタンスのファクトリ
///
/// SMTP 設定を無視し、常にログ出力のみの送信インスタンスを返す。
#[derive(Debug, Clone, Default)]
pub struct NoopNotificationSenderFactory;

impl NotificationSenderFactory for NoopNotificationSenderFactory {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Arc<dyn NotificationSender>, NotificationError> {
        tracing::debug!(server = %settings.server, "Noop 送信を使用");
        Ok(Arc::new(NoopNotificationSender))
    }
}
