//! # テナント
//!
//! すべての通知設定を分割するパーティションキー。
//!
//! このクレートではテナントを不透明な識別子として扱う。テナントの作成や
//! 分離の実現方法（RLS など）は外部の責務であり、各操作は `TenantId` を
//! 明示的に受け取る。暗黙のグローバルテナントは存在しない。
//!
//! ```rust
//! use notifyhub_domain::tenant::TenantId;
//! use uuid::Uuid;
//!
//! let tenant_id = TenantId::from_uuid(Uuid::nil());
//! assert_eq!(tenant_id.to_string(), "00000000-0000-0000-0000-000000000000");
//! ```

define_uuid_id! {
    /// テナントの一意識別子
    ///
    /// UUID v7 をラップする。通知設定・ローカライズ済みテンプレート・
    /// シークレットはすべてこの ID ごとに保存される。
    pub struct TenantId;
}
