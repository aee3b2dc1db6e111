//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! テナントの `smtp_security` に応じて接続方式を切り替える。
//!
//! | `smtp_security` | 接続方式 |
//! |---|---|
//! | `TLS` | STARTTLS（必須） |
//! | `SSL` | 接続時から TLS |
//! | `PLAIN` | 暗号化なし |

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use notifyhub_domain::{
    notification::{EmailMessage, NotificationError},
    notification_config::SmtpSecurity,
};

use super::{NotificationSender, SmtpSettings};

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from:      Mailbox,
}

impl SmtpNotificationSender {
    /// SMTP 設定から送信インスタンスを作成する
    ///
    /// 接続はまだ行わない。ユーザー名とパスワードが両方揃っている場合のみ認証する。
    pub fn from_settings(
        settings: &SmtpSettings,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let builder = match settings.security {
            SmtpSecurity::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.server)
                .map_err(|e| NotificationError::SendFailed(format!("SMTP 設定が不正: {e}")))?,
            SmtpSecurity::Tls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)
                    .map_err(|e| NotificationError::SendFailed(format!("SMTP 設定が不正: {e}")))?
            }
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.server)
            }
        };

        let mut builder = builder.port(settings.port).timeout(Some(timeout));
        if let Some(password) = settings
            .password
            .as_ref()
            .filter(|_| !settings.username.is_empty())
        {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                password.expose().to_string(),
            ));
        }

        let from = Mailbox::new(
            (!settings.source_name.is_empty()).then(|| settings.source_name.clone()),
            settings
                .source_address
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text_body.clone())
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use notifyhub_domain::notification_config::SecretValue;
    use rstest::rstest;

    use super::*;

    fn settings(security: SmtpSecurity, source_address: &str) -> SmtpSettings {
        SmtpSettings {
            server: "smtp.example.com".to_string(),
            port: 587,
            security,
            username: "notify".to_string(),
            password: SecretValue::non_empty("s3cret"),
            source_name: "NotifyHub".to_string(),
            source_address: source_address.to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpNotificationSender>();
    }

    #[test]
    fn 平文接続の送信インスタンスを作成できる() {
        let result = SmtpNotificationSender::from_settings(
            &settings(SmtpSecurity::Plain, "noreply@example.com"),
            Duration::from_secs(10),
        );
        assert!(result.is_ok());
    }

    #[rstest]
    #[case("not an address")]
    #[case("")]
    #[case("noreply@")]
    fn 送信元アドレスが不正ならエラー(#[case] source_address: &str) {
        let result = SmtpNotificationSender::from_settings(
            &settings(SmtpSecurity::Plain, source_address),
            Duration::from_secs(10),
        );
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
