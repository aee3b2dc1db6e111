//! シークレット
//!
//! SMTP パスワードのように、通常のエクスポートに含めてはならない値。

use strum::IntoStaticStr;

/// シークレット名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SecretName {
    SmtpPassword,
}

/// シークレット値
///
/// 空文字列は「変更なし」を意味するため、値としては存在しない。
/// `Debug` 出力はマスクされ、`Display` は実装しない。
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    /// 空でない場合のみシークレット値を作成する
    pub fn non_empty(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// 平文を取り出す
    ///
    /// SMTP 認証情報の組み立てと永続化以外で使用しないこと。
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretValue").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn 空文字列からはシークレットを作らない() {
        assert!(SecretValue::non_empty("").is_none());
        assert_eq!(SecretValue::non_empty("x").unwrap().expose(), "x");
    }

    #[test]
    fn debug出力はマスクされる() {
        let secret = SecretValue::non_empty("hunter2").unwrap();
        let debug = format!("{secret:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn secret_nameはsnake_caseで保存される() {
        let name: &str = SecretName::SmtpPassword.into();
        assert_eq!(name, "smtp_password");
    }
}
