//! # NotifyHub 共有ユーティリティ
//!
//! このクレートは、NotifyHub の全クレートで使用される横断的な
//! ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, core-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod event_log;
pub mod observability;
