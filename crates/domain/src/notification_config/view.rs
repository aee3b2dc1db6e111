//! マージビュー

use serde::Serialize;

use super::{LocalizedNotificationConfig, NotificationConfig};

/// コマンドフィールド
///
/// 更新リクエストでのみ意味を持つフィールド。読み取りでは常にこの既定値になる。
/// `smtp_password` は常に空文字列で、平文がビューに載ることはない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandFields {
    pub reset_templates: bool,
    pub exception_email_pgp_key_remove: bool,
    pub smtp_password: String,
}

/// マージビュー
///
/// 非ローカライズ設定、コマンドフィールド、ローカライズ済みテンプレートを
/// 1 つのフラットなオブジェクトとして外部に公開する。保存はされない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedNotificationView {
    #[serde(flatten)]
    pub config:    NotificationConfig,
    #[serde(flatten)]
    pub commands:  CommandFields,
    #[serde(flatten)]
    pub templates: LocalizedNotificationConfig,
}

impl MergedNotificationView {
    /// 各ストアから読み取った値を合成する
    pub fn compose(config: NotificationConfig, templates: LocalizedNotificationConfig) -> Self {
        Self {
            config,
            commands: CommandFields::default(),
            templates,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::notification_config::SmtpSecurity;

    fn sample_view() -> MergedNotificationView {
        let templates: LocalizedNotificationConfig = serde_json::from_value(serde_json::Value::Object(
            LocalizedNotificationConfig::KEYS
                .iter()
                .map(|key| ((*key).to_string(), json!(format!("en:{key}"))))
                .collect(),
        ))
        .unwrap();

        MergedNotificationView::compose(
            NotificationConfig {
                smtp_server: "smtp.example.com".to_string(),
                smtp_port: 465,
                smtp_username: "notify".to_string(),
                smtp_security: SmtpSecurity::Ssl,
                smtp_source_name: "NotifyHub".to_string(),
                mail_address: "noreply@example.com".to_string(),
                disable_admin_notification_emails: false,
                disable_custodian_notification_emails: true,
                disable_receiver_notification_emails: false,
                tip_expiration_threshold: 72,
                notification_threshold_per_hour: 20,
                exception_email_address: "ops@example.com".to_string(),
                exception_email_pgp_key_fingerprint: String::new(),
                exception_email_pgp_key_public: String::new(),
                exception_email_pgp_key_expiration: None,
            },
            templates,
        )
    }

    #[test]
    fn ビューはフラットなオブジェクトにシリアライズされる() {
        let value = serde_json::to_value(sample_view()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["smtp_port"], json!(465));
        assert_eq!(object["smtp_security"], json!("SSL"));
        assert_eq!(object["tip_mail_title"], json!("en:tip_mail_title"));
        assert_eq!(
            object.len(),
            NotificationConfig::KEYS.len() + LocalizedNotificationConfig::KEYS.len() + 3
        );
    }

    #[test]
    fn コマンドフィールドは常に既定値で出力される() {
        let value = serde_json::to_value(sample_view()).unwrap();

        assert_eq!(value["reset_templates"], json!(false));
        assert_eq!(value["exception_email_pgp_key_remove"], json!(false));
        assert_eq!(value["smtp_password"], json!(""));
    }
}
