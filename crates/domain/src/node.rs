//! # ノード公開情報
//!
//! テナントのノード（配備先）に関する公開情報。テスト通知テンプレートの
//! `node` コンテキストとして使われる。

use serde::Serialize;

use crate::language::Language;

/// ノード公開情報
///
/// NodeInfoProvider が指定言語で返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodePublicInfo {
    /// ノード名
    pub name:              String,
    /// ホスト名
    pub hostname:          String,
    /// テナントのデフォルト言語
    pub default_language:  Language,
    /// 有効な言語一覧
    pub languages_enabled: Vec<Language>,
    /// この情報が表現されている言語
    pub language:          Language,
}
