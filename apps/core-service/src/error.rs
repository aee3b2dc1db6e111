//! # Core Service エラー定義

use notifyhub_infra::InfraError;
use thiserror::Error;

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// 不正な入力（必須のコマンドフィールドの欠落など）
    #[error("不正な入力: {0}")]
    InvalidInput(String),

    /// ストアの読み書きに失敗した。更新トランザクションは破棄される
    #[error("ストアの操作に失敗: {0}")]
    StoreFailure(#[from] InfraError),

    /// テスト通知の送信に失敗した
    ///
    /// 原因はログにのみ出力し、呼び出し元には区別できる情報を返さない。
    #[error("依存サービスの呼び出しに失敗しました")]
    DependencyFailure,

    /// 起動時の設定エラー
    #[error("設定エラー: {0}")]
    Config(String),
}
