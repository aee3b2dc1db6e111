//! # ユーザー
//!
//! テスト通知の宛先となるユーザーの設定。ユーザー自体の管理は外部の責務で、
//! ここでは通知に必要な情報だけを扱う。

use serde::Serialize;

use crate::language::Language;

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    pub struct UserId;
}

/// ユーザー設定
///
/// UserSettingsProvider が返す、テンプレートコンテキスト用のユーザー情報。
/// `language` はユーザーが言語を設定していない場合、呼び出し元が渡した
/// フォールバック言語（テナントのデフォルト言語）になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSettings {
    pub user_id:      UserId,
    pub name:         String,
    pub mail_address: String,
    pub language:     Language,
}
