//! 非ローカライズ通知設定

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

/// SMTP 接続のセキュリティ方式
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SmtpSecurity {
    /// STARTTLS
    Tls,
    /// 接続時から TLS（SMTPS）
    Ssl,
    /// 暗号化なし
    Plain,
}

/// 非ローカライズ通知設定
///
/// ConfigStore にキーごとに保存される。言語の次元を持たない。
/// ストアに 1 つでもキーが欠けていればデシリアライズに失敗する
/// （テナントのプロビジョニング不備はストア側の障害として扱う）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_security: SmtpSecurity,
    pub smtp_source_name: String,
    /// 送信元メールアドレス
    pub mail_address: String,
    pub disable_admin_notification_emails: bool,
    pub disable_custodian_notification_emails: bool,
    pub disable_receiver_notification_emails: bool,
    /// 期限切れ通知を出すまでの残り時間（時間）
    pub tip_expiration_threshold: u32,
    /// 1 時間あたりの通知上限
    pub notification_threshold_per_hour: u32,
    pub exception_email_address: String,
    pub exception_email_pgp_key_fingerprint: String,
    pub exception_email_pgp_key_public: String,
    pub exception_email_pgp_key_expiration: Option<DateTime<Utc>>,
}

impl NotificationConfig {
    /// ConfigStore 上のキー一覧
    pub const KEYS: [&'static str; 15] = [
        "smtp_server",
        "smtp_port",
        "smtp_username",
        "smtp_security",
        "smtp_source_name",
        "mail_address",
        "disable_admin_notification_emails",
        "disable_custodian_notification_emails",
        "disable_receiver_notification_emails",
        "tip_expiration_threshold",
        "notification_threshold_per_hour",
        "exception_email_address",
        "exception_email_pgp_key_fingerprint",
        "exception_email_pgp_key_public",
        "exception_email_pgp_key_expiration",
    ];

    /// PGP 鍵を消去するためのエントリ
    ///
    /// `exception_email_pgp_key_remove` コマンドで使用する。
    pub fn pgp_key_removal_entries() -> Vec<ConfigEntry> {
        vec![
            ConfigEntry::new("exception_email_pgp_key_public", json!("")),
            ConfigEntry::new("exception_email_pgp_key_fingerprint", json!("")),
            ConfigEntry::new("exception_email_pgp_key_expiration", Value::Null),
        ]
    }
}

/// ConfigStore に書き込む 1 エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key:   &'static str,
    pub value: Value,
}

impl ConfigEntry {
    pub fn new(key: &'static str, value: Value) -> Self {
        Self { key, value }
    }
}

/// 非ローカライズ通知設定の部分更新
///
/// `None` のフィールドは変更しない。
/// `exception_email_pgp_key_expiration` は `null` を指定すると消去される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfigPatch {
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_security: Option<SmtpSecurity>,
    pub smtp_source_name: Option<String>,
    pub mail_address: Option<String>,
    pub disable_admin_notification_emails: Option<bool>,
    pub disable_custodian_notification_emails: Option<bool>,
    pub disable_receiver_notification_emails: Option<bool>,
    pub tip_expiration_threshold: Option<u32>,
    pub notification_threshold_per_hour: Option<u32>,
    pub exception_email_address: Option<String>,
    pub exception_email_pgp_key_fingerprint: Option<String>,
    pub exception_email_pgp_key_public: Option<String>,
    #[serde(deserialize_with = "present_or_null")]
    pub exception_email_pgp_key_expiration: Option<Option<DateTime<Utc>>>,
}

/// キーがあれば `Some`（値が `null` なら `Some(None)`）、なければ `None`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl NotificationConfigPatch {
    /// 指定されたフィールドを ConfigStore 用のエントリに変換する
    pub fn entries(&self) -> Vec<ConfigEntry> {
        let mut entries = Vec::new();

        macro_rules! push_present {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        entries.push(ConfigEntry::new(stringify!($field), json!(value)));
                    }
                )+
            };
        }

        push_present!(
            smtp_server,
            smtp_port,
            smtp_username,
            smtp_security,
            smtp_source_name,
            mail_address,
            disable_admin_notification_emails,
            disable_custodian_notification_emails,
            disable_receiver_notification_emails,
            tip_expiration_threshold,
            notification_threshold_per_hour,
            exception_email_address,
            exception_email_pgp_key_fingerprint,
            exception_email_pgp_key_public,
            exception_email_pgp_key_expiration,
        );

        entries
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_config() -> NotificationConfig {
        NotificationConfig {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "notify".to_string(),
            smtp_security: SmtpSecurity::Tls,
            smtp_source_name: "NotifyHub".to_string(),
            mail_address: "noreply@example.com".to_string(),
            disable_admin_notification_emails: false,
            disable_custodian_notification_emails: false,
            disable_receiver_notification_emails: false,
            tip_expiration_threshold: 72,
            notification_threshold_per_hour: 20,
            exception_email_address: "ops@example.com".to_string(),
            exception_email_pgp_key_fingerprint: String::new(),
            exception_email_pgp_key_public: String::new(),
            exception_email_pgp_key_expiration: None,
        }
    }

    #[test]
    fn keysはシリアライズ結果のキーと一致する() {
        let value = serde_json::to_value(sample_config()).unwrap();
        let mut serialized: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        serialized.sort_unstable();

        let mut keys = NotificationConfig::KEYS.to_vec();
        keys.sort_unstable();

        assert_eq!(serialized, keys);
    }

    #[test]
    fn smtp_securityは大文字でシリアライズされる() {
        assert_eq!(serde_json::to_value(SmtpSecurity::Ssl).unwrap(), json!("SSL"));
        assert_eq!(SmtpSecurity::Plain.to_string(), "PLAIN");
    }

    #[test]
    fn patchのentriesは指定されたフィールドだけを返す() {
        let patch = NotificationConfigPatch {
            smtp_port: Some(465),
            smtp_security: Some(SmtpSecurity::Ssl),
            mail_address: Some("a@b.com".to_string()),
            ..Default::default()
        };

        let entries = patch.entries();

        assert_eq!(
            entries,
            vec![
                ConfigEntry::new("smtp_port", json!(465)),
                ConfigEntry::new("smtp_security", json!("SSL")),
                ConfigEntry::new("mail_address", json!("a@b.com")),
            ]
        );
    }

    #[test]
    fn 空のpatchはentriesを返さない() {
        assert!(NotificationConfigPatch::default().entries().is_empty());
    }

    #[test]
    fn pgp鍵消去エントリはすべて設定キーに含まれる() {
        for entry in NotificationConfig::pgp_key_removal_entries() {
            assert!(NotificationConfig::KEYS.contains(&entry.key), "{}", entry.key);
        }
    }

    #[test]
    fn pgp鍵の期限はnullで消去を指定できる() {
        let cleared: NotificationConfigPatch =
            serde_json::from_value(json!({ "exception_email_pgp_key_expiration": null })).unwrap();
        let absent: NotificationConfigPatch = serde_json::from_value(json!({})).unwrap();

        assert_eq!(cleared.exception_email_pgp_key_expiration, Some(None));
        assert_eq!(
            cleared.entries(),
            vec![ConfigEntry::new("exception_email_pgp_key_expiration", Value::Null)]
        );
        assert_eq!(absent.exception_email_pgp_key_expiration, None);
        assert!(absent.entries().is_empty());
    }

    #[test]
    fn pgp鍵のフィールドはすべてpatchで指定できる() {
        let patch: NotificationConfigPatch = serde_json::from_value(json!({
            "exception_email_pgp_key_fingerprint": "NEWFP",
            "exception_email_pgp_key_public": "NEWKEY",
            "exception_email_pgp_key_expiration": "2030-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            patch.entries(),
            vec![
                ConfigEntry::new("exception_email_pgp_key_fingerprint", json!("NEWFP")),
                ConfigEntry::new("exception_email_pgp_key_public", json!("NEWKEY")),
                ConfigEntry::new(
                    "exception_email_pgp_key_expiration",
                    json!("2030-01-01T00:00:00Z")
                ),
            ]
        );
    }
}
