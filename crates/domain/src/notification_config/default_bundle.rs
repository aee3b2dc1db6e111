//! 同梱のデフォルトテンプレート

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::LocalizedNotificationConfig;
use crate::{DomainError, language::Language};

/// デフォルトテンプレート
///
/// `{ フィールド名: { 言語: テキスト } }` の形の JSON から読み込む。
/// テンプレートのリセットで、テナントの有効な全言語に書き戻される。
///
/// # 不変条件
///
/// - [`LocalizedNotificationConfig::KEYS`] のすべてのフィールドを持つ
/// - すべてのフィールドが [`Language::FALLBACK`] のテキストを持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTemplateBundle {
    texts: BTreeMap<String, BTreeMap<String, String>>,
}

impl DefaultTemplateBundle {
    /// JSON 文字列から読み込んで検証する
    ///
    /// # Errors
    ///
    /// JSON として不正な場合、またはフィールドやフォールバック言語のテキストが
    /// 欠けている場合 `DomainError::Validation`
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let texts: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| {
                DomainError::Validation(format!("デフォルトテンプレートが不正です: {e}"))
            })?;

        for key in LocalizedNotificationConfig::KEYS {
            let Some(by_language) = texts.get(key) else {
                return Err(DomainError::Validation(format!(
                    "デフォルトテンプレートに {key} がありません"
                )));
            };
            if !by_language.contains_key(Language::FALLBACK) {
                return Err(DomainError::Validation(format!(
                    "デフォルトテンプレートの {key} に {} のテキストがありません",
                    Language::FALLBACK
                )));
            }
        }

        Ok(Self { texts })
    }

    /// 指定言語のテキストを返す。言語のテキストがなければ `en` を返す
    pub fn text(&self, key: &str, language: &Language) -> Option<&str> {
        let by_language = self.texts.get(key)?;
        by_language
            .get(language.as_str())
            .or_else(|| by_language.get(Language::FALLBACK))
            .map(String::as_str)
    }

    /// 指定言語の完全なテンプレート一式を組み立てる
    ///
    /// # Errors
    ///
    /// 組み立てた値がテンプレートの型に合わない場合 `DomainError::Validation`
    pub fn localized_config(
        &self,
        language: &Language,
    ) -> Result<LocalizedNotificationConfig, DomainError> {
        let mut fields = Map::new();
        for key in LocalizedNotificationConfig::KEYS {
            let text = self.text(key, language).ok_or_else(|| {
                DomainError::Validation(format!("デフォルトテンプレートに {key} がありません"))
            })?;
            fields.insert(key.to_string(), Value::String(text.to_string()));
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            DomainError::Validation(format!("デフォルトテンプレートが不正です: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn bundle_json(with_fr: bool) -> String {
        let mut root = Map::new();
        for key in LocalizedNotificationConfig::KEYS {
            let mut by_language = Map::new();
            by_language.insert("en".to_string(), json!(format!("en:{key}")));
            if with_fr && key.ends_with("_title") {
                by_language.insert("fr".to_string(), json!(format!("fr:{key}")));
            }
            root.insert(key.to_string(), Value::Object(by_language));
        }
        Value::Object(root).to_string()
    }

    fn lang(code: &str) -> Language {
        Language::new(code).unwrap()
    }

    #[test]
    fn 言語のテキストがなければenにフォールバックする() {
        let bundle = DefaultTemplateBundle::from_json(&bundle_json(true)).unwrap();

        let fr = bundle.localized_config(&lang("fr")).unwrap();

        assert_eq!(fr.tip_mail_title, "fr:tip_mail_title");
        assert_eq!(fr.tip_mail_template, "en:tip_mail_template");
        assert_eq!(
            bundle.text("tip_mail_title", &lang("de")),
            Some("en:tip_mail_title")
        );
    }

    #[test]
    fn フィールドが欠けたバンドルは拒否される() {
        let mut value: Value = serde_json::from_str(&bundle_json(false)).unwrap();
        value.as_object_mut().unwrap().remove("admin_anomaly_mail_title");

        let result = DefaultTemplateBundle::from_json(&value.to_string());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn enのないフィールドは拒否される() {
        let mut value: Value = serde_json::from_str(&bundle_json(true)).unwrap();
        value["tip_mail_title"].as_object_mut().unwrap().remove("en");

        let result = DefaultTemplateBundle::from_json(&value.to_string());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
