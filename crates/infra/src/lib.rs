//! # NotifyHub インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ユースケース層が依存するストアや送信手段を trait として定義し、
//! PostgreSQL・SMTP・プロセス内キャッシュによる具体的な実装を提供する。
//! 外部システムの詳細をカプセル化し、ユースケース層をインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プールとトランザクション管理
//! - **リポジトリ実装**: 通知設定・テンプレート・シークレット・ユーザー・ノード情報
//! - **キャッシュ**: テナント単位のプロセス内キャッシュと無効化
//! - **メール送信**: lettre による SMTP 送信
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続・トランザクション管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`cache`] - テナントキャッシュ
//! - [`notification`] - メール送信
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod cache;
pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use cache::{InMemoryTenantCache, MemoryCacheRefresher};
pub use error::InfraError;
