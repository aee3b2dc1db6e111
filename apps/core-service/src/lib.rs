//! # NotifyHub Core Service
//!
//! テナント単位の通知設定を扱うユースケースを公開する。
//!
//! ## 提供する操作
//!
//! | 操作 | ユースケース |
//! |------|-------------|
//! | マージビューの読み取り | [`usecase::NotificationConfigUseCaseImpl::get_merged_view`] |
//! | マージビューの部分更新 | [`usecase::NotificationConfigUseCaseImpl::update_merged_view`] |
//! | テスト通知の送信 | [`usecase::NotificationTestUseCaseImpl::send_test_notification`] |
//!
//! HTTP ハンドラや認可はこのクレートの外側で行う。
//! 起動時の依存関係の組み立ては [`bootstrap`] を参照。

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod usecase;

pub use error::CoreError;
