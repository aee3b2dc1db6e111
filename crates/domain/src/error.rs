//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗など、ドメイン固有の例外状態を表現する。
//!
//! ## 使用例
//!
//! ```rust
//! use notifyhub_domain::DomainError;
//!
//! fn validate(code: &str) -> Result<(), DomainError> {
//!     if code.is_empty() {
//!         return Err(DomainError::Validation("言語コードは必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 不正な言語コード
    /// - 型が合わない更新リクエスト
    /// - 必須のコマンドフィールドの欠落
    /// - 不完全なデフォルトテンプレート
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"User" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
