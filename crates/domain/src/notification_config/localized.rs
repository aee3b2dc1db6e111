//! 言語ごとのメールテンプレート

use serde::{Deserialize, Serialize};

use crate::notification::MailTemplateKind;

/// ローカライズ済み通知設定
///
/// (テナント, 言語) ごとに LocalizedConfigStore に保存されるテンプレート文字列。
/// 有効な言語はすべて、初期化後に全フィールドを持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNotificationConfig {
    pub tip_mail_title: String,
    pub tip_mail_template: String,
    pub comment_mail_title: String,
    pub comment_mail_template: String,
    pub message_mail_title: String,
    pub message_mail_template: String,
    pub tip_expiration_summary_mail_title: String,
    pub tip_expiration_summary_mail_template: String,
    pub admin_anomaly_mail_title: String,
    pub admin_anomaly_mail_template: String,
    pub admin_test_static_mail_title: String,
    pub admin_test_static_mail_template: String,
}

impl LocalizedNotificationConfig {
    /// LocalizedConfigStore 上のキー一覧
    pub const KEYS: [&'static str; 12] = [
        "tip_mail_title",
        "tip_mail_template",
        "comment_mail_title",
        "comment_mail_template",
        "message_mail_title",
        "message_mail_template",
        "tip_expiration_summary_mail_title",
        "tip_expiration_summary_mail_template",
        "admin_anomaly_mail_title",
        "admin_anomaly_mail_template",
        "admin_test_static_mail_title",
        "admin_test_static_mail_template",
    ];

    /// すべてのフィールドをエントリに変換する
    pub fn entries(&self) -> Vec<LocalizedEntry<'_>> {
        Self::KEYS
            .into_iter()
            .zip([
                &self.tip_mail_title,
                &self.tip_mail_template,
                &self.comment_mail_title,
                &self.comment_mail_template,
                &self.message_mail_title,
                &self.message_mail_template,
                &self.tip_expiration_summary_mail_title,
                &self.tip_expiration_summary_mail_template,
                &self.admin_anomaly_mail_title,
                &self.admin_anomaly_mail_template,
                &self.admin_test_static_mail_title,
                &self.admin_test_static_mail_template,
            ])
            .map(|(key, value)| LocalizedEntry {
                key,
                value: value.as_str(),
            })
            .collect()
    }

    /// テンプレート種別に対応する (件名テンプレート, 本文テンプレート) を返す
    pub fn mail_template(&self, kind: MailTemplateKind) -> (&str, &str) {
        match kind {
            MailTemplateKind::AdminTestStatic => (
                &self.admin_test_static_mail_title,
                &self.admin_test_static_mail_template,
            ),
        }
    }
}

/// LocalizedConfigStore に書き込む 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry<'a> {
    pub key:   &'static str,
    pub value: &'a str,
}

/// ローカライズ済み通知設定の部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocalizedNotificationPatch {
    pub tip_mail_title: Option<String>,
    pub tip_mail_template: Option<String>,
    pub comment_mail_title: Option<String>,
    pub comment_mail_template: Option<String>,
    pub message_mail_title: Option<String>,
    pub message_mail_template: Option<String>,
    pub tip_expiration_summary_mail_title: Option<String>,
    pub tip_expiration_summary_mail_template: Option<String>,
    pub admin_anomaly_mail_title: Option<String>,
    pub admin_anomaly_mail_template: Option<String>,
    pub admin_test_static_mail_title: Option<String>,
    pub admin_test_static_mail_template: Option<String>,
}

impl LocalizedNotificationPatch {
    /// 指定されたフィールドをエントリに変換する
    pub fn entries(&self) -> Vec<LocalizedEntry<'_>> {
        let mut entries = Vec::new();

        macro_rules! push_present {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = self.$field.as_deref() {
                        entries.push(LocalizedEntry { key: stringify!($field), value });
                    }
                )+
            };
        }

        push_present!(
            tip_mail_title,
            tip_mail_template,
            comment_mail_title,
            comment_mail_template,
            message_mail_title,
            message_mail_template,
            tip_expiration_summary_mail_title,
            tip_expiration_summary_mail_template,
            admin_anomaly_mail_title,
            admin_anomaly_mail_template,
            admin_test_static_mail_title,
            admin_test_static_mail_template,
        );

        entries
    }

    /// 既存のテンプレートにこの更新を適用した結果を返す
    pub fn apply_to(&self, current: &LocalizedNotificationConfig) -> LocalizedNotificationConfig {
        let mut updated = current.clone();

        macro_rules! overwrite_present {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        updated.$field.clone_from(value);
                    }
                )+
            };
        }

        overwrite_present!(
            tip_mail_title,
            tip_mail_template,
            comment_mail_title,
            comment_mail_template,
            message_mail_title,
            message_mail_template,
            tip_expiration_summary_mail_title,
            tip_expiration_summary_mail_template,
            admin_anomaly_mail_title,
            admin_anomaly_mail_template,
            admin_test_static_mail_title,
            admin_test_static_mail_template,
        );

        updated
    }
}
