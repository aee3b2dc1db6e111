//! # Core Service 設定
//!
//! 環境変数から Core Service の設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `NOTIFICATION_SMTP_TIMEOUT_SECS` | No | SMTP 接続のタイムアウト秒数（デフォルト: 10） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（[`notifyhub_shared::observability`] が読む） |

use std::{env, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 10;

/// 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Core Service の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// データベース接続 URL
    pub database_url: String,
    /// 通知設定
    pub notification: NotificationSettings,
}

/// テスト通知の送信バックエンド
///
/// - `smtp`: テナントの SMTP 設定で実際に送信する
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    Smtp,
    Noop,
}

/// 通知機能の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub backend:      NotificationBackend,
    /// SMTP 接続のタイムアウト（backend=smtp の場合に使用）
    pub smtp_timeout: Duration,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let backend = parse_or("NOTIFICATION_BACKEND", &lookup, NotificationBackend::Noop)?;
        let timeout_secs = parse_or(
            "NOTIFICATION_SMTP_TIMEOUT_SECS",
            &lookup,
            DEFAULT_SMTP_TIMEOUT_SECS,
        )?;

        Ok(Self {
            database_url,
            notification: NotificationSettings {
                backend,
                smtp_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
