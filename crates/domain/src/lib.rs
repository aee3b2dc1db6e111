//! # NotifyHub ドメイン層
//!
//! テナント単位の通知設定を扱うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **ストアごとの型**: 非ローカライズ設定・シークレット・ローカライズ済みテンプレートを
//!   それぞれ独立した型で表現し、外部に見せるビューは読み取りのたびに合成する
//! - **コマンドフィールド**: `reset_templates` などの操作要求は永続化されず、
//!   読み取り時は常にデフォルト値を返す
//! - **純粋性**: ストレージやメール送信には依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//!            ↘          ↗
//!              shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層エラー
//! - [`tenant`] - テナント識別子
//! - [`user`] - ユーザー識別子とユーザー設定
//! - [`language`] - 言語コード
//! - [`node`] - ノード公開情報
//! - [`notification`] - メールメッセージと通知エラー
//! - [`notification_config`] - 通知設定・テンプレート・マージビュー

#[macro_use]
mod macros;

pub mod error;
pub mod language;
pub mod node;
pub mod notification;
pub mod notification_config;
pub mod tenant;
pub mod user;

pub use error::DomainError;
