//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` で効率的に調査できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! 既存の `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。
//!
//! シークレットの値はどのフィールドにも出力しないこと。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.tenant_id`: テナント ID
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
/// - `event.actor_id`: 操作者 ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION_CONFIG: &str = "notification_config";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // 通知設定
        pub const NOTIFICATION_CONFIG_UPDATED: &str = "notification_config.updated";
        pub const TEMPLATES_RESET: &str = "notification_config.templates_reset";
        pub const SECRET_ROTATED: &str = "notification_config.secret_rotated";
        pub const PGP_KEY_REMOVED: &str = "notification_config.pgp_key_removed";

        // 通知
        pub const TEST_NOTIFICATION_SENT: &str = "notification.test_sent";
        pub const TEST_NOTIFICATION_FAILED: &str = "notification.test_failed";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const NOTIFICATION_CONFIG: &str = "notification_config";
        pub const LOCALIZED_NOTIFICATION_CONFIG: &str = "localized_notification_config";
        pub const SECRET: &str = "secret";
        pub const USER: &str = "user";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（SMTP サーバー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// テンプレートレンダリング
        pub const TEMPLATE: &str = "template";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const INTERNAL: &str = "internal";
        pub const USER_LOOKUP: &str = "user_lookup";
        pub const NODE_LOOKUP: &str = "node_lookup";
        pub const CONFIG_READ: &str = "config_read";
        pub const SECRET_READ: &str = "secret_read";
        pub const RENDER: &str = "render";
        pub const MAIL_TRANSPORT: &str = "mail_transport";
    }
}
