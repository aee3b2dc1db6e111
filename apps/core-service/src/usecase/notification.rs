//! # 通知ユースケースの部品
//!
//! テスト通知で使うテンプレートレンダラーと、同梱のデフォルトテンプレート。

pub mod default_templates;
mod template_renderer;

pub use template_renderer::{RenderedMail, TemplateRenderer, TestNotificationContext};
