//! # 言語コード
//!
//! ローカライズ済みテンプレートとユーザー設定で使う言語コードの値オブジェクト。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 言語コード（値オブジェクト）
///
/// # 不変条件
///
/// - 1〜16 文字
/// - ASCII 英数字、`_`、`-` のみ（例: `en`, `fr`, `pt_BR`, `zh-Hant`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
#[display("{_0}")]
pub struct Language(String);

impl Language {
    /// 言語コードの最大長
    pub const MAX_LENGTH: usize = 16;

    /// デフォルトテンプレートのフォールバック先
    pub const FALLBACK: &'static str = "en";

    /// 言語コードを検証して作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation("言語コードは必須です".to_string()));
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "言語コードは {} 文字以内である必要があります: {value}",
                Self::MAX_LENGTH
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::Validation(format!(
                "言語コードに使用できない文字が含まれています: {value}"
            )));
        }

        Ok(Self(value))
    }

    /// フォールバック言語（`en`）を返す
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}
