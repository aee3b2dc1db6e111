//! # ユースケース層
//!
//! 各ストアへのアクセスを組み合わせ、トランザクション境界と副作用
//! （キャッシュ無効化、ビジネスイベントログ）を管理する。

pub mod notification;
pub mod notification_config;

pub use notification::{RenderedMail, TemplateRenderer, TestNotificationContext};
pub use notification_config::NotificationConfigUseCaseImpl;
pub use notification_test::NotificationTestUseCaseImpl;
