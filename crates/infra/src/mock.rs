//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! notifyhub-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは `Clone` で内部状態を共有するため、ユースケースに渡した後も
//! テスト側から状態を検査できる。`failing_*` 系のメソッドで障害を注入する。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use notifyhub_domain::{
    language::Language,
    node::NodePublicInfo,
    notification::{EmailMessage, NotificationError},
    notification_config::{
        ConfigEntry,
        DefaultTemplateBundle,
        LocalizedNotificationConfig,
        LocalizedNotificationPatch,
        NotificationConfig,
        SecretName,
        SecretValue,
    },
    tenant::TenantId,
    user::{UserId, UserSettings},
};
use serde_json::{Map, Value};

use crate::{
    cache::MemoryCacheRefresher,
    db::{TransactionManager, TxContext},
    error::InfraError,
    notification::{NotificationSender, NotificationSenderFactory, SmtpSettings},
    repository::{
        LocalizedNotificationConfigRepository,
        NodeInfoRepository,
        NotificationConfigRepository,
        SecretRepository,
        UserSettingsRepository,
    },
};

fn injected(operation: &str) -> InfraError {
    InfraError::unexpected(format!("注入された障害: {operation}"))
}

// ===== MockTransactionManager =====

#[derive(Clone, Default)]
pub struct MockTransactionManager {
    begin_count: Arc<Mutex<usize>>,
    fail:        bool,
}

impl MockTransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `begin()` が呼ばれた回数
    pub fn begin_count(&self) -> usize {
        *self.begin_count.lock().unwrap()
    }
}

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        *self.begin_count.lock().unwrap() += 1;
        if self.fail {
            return Err(injected("begin"));
        }
        Ok(TxContext::mock())
    }
}

// ===== MockNotificationConfigRepository =====

/// ConfigStore のモック
///
/// Postgres 実装と同じく、キーごとの JSON 値として保持する。
#[derive(Clone, Default)]
pub struct MockNotificationConfigRepository {
    values:      Arc<Mutex<HashMap<TenantId, Map<String, Value>>>>,
    fail_update: bool,
}

impl MockNotificationConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込み時に失敗するモック
    pub fn failing_update(self) -> Self {
        Self {
            fail_update: true,
            ..self
        }
    }

    pub fn insert(&self, tenant_id: &TenantId, config: &NotificationConfig) {
        let Value::Object(fields) = serde_json::to_value(config).unwrap() else {
            unreachable!("NotificationConfig はオブジェクトにシリアライズされる");
        };
        self.values.lock().unwrap().insert(tenant_id.clone(), fields);
    }

    /// 保存されている生の値（キー単位）
    pub fn raw_value(&self, tenant_id: &TenantId, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap()
            .get(tenant_id)
            .and_then(|fields| fields.get(key).cloned())
    }
}

#[async_trait]
impl NotificationConfigRepository for MockNotificationConfigRepository {
    async fn find(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
    ) -> Result<NotificationConfig, InfraError> {
        let fields = self
            .values
            .lock()
            .unwrap()
            .get(tenant_id)
            .cloned()
            .unwrap_or_default();
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    async fn update(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
        entries: &[ConfigEntry],
    ) -> Result<(), InfraError> {
        if self.fail_update {
            return Err(injected("config update"));
        }
        let mut values = self.values.lock().unwrap();
        let fields = values.entry(tenant_id.clone()).or_default();
        for entry in entries {
            fields.insert(entry.key.to_string(), entry.value.clone());
        }
        Ok(())
    }
}

// ===== MockSecretRepository =====

#[derive(Clone, Default)]
pub struct MockSecretRepository {
    secrets:   Arc<Mutex<HashMap<(TenantId, SecretName), SecretValue>>>,
    set_count: Arc<Mutex<usize>>,
    fail_set:  bool,
    fail_find: bool,
}

impl MockSecretRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込み時に失敗するモック
    pub fn failing_set(self) -> Self {
        Self {
            fail_set: true,
            ..self
        }
    }

    /// 読み取り時に失敗するモック
    pub fn failing_find(self) -> Self {
        Self {
            fail_find: true,
            ..self
        }
    }

    pub fn insert(&self, tenant_id: &TenantId, name: SecretName, value: SecretValue) {
        self.secrets
            .lock()
            .unwrap()
            .insert((tenant_id.clone(), name), value);
    }

    pub fn get(&self, tenant_id: &TenantId, name: SecretName) -> Option<SecretValue> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(tenant_id.clone(), name))
            .cloned()
    }

    /// `set()` が呼ばれた回数
    pub fn set_count(&self) -> usize {
        *self.set_count.lock().unwrap()
    }
}

#[async_trait]
impl SecretRepository for MockSecretRepository {
    async fn set(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
        name: SecretName,
        value: &SecretValue,
    ) -> Result<(), InfraError> {
        *self.set_count.lock().unwrap() += 1;
        if self.fail_set {
            return Err(injected("secret set"));
        }
        self.insert(tenant_id, name, value.clone());
        Ok(())
    }

    async fn find(
        &self,
        tenant_id: &TenantId,
        name: SecretName,
    ) -> Result<Option<SecretValue>, InfraError> {
        if self.fail_find {
            return Err(injected("secret find"));
        }
        Ok(self.get(tenant_id, name))
    }
}

// ===== MockLocalizedNotificationConfigRepository =====

#[derive(Clone, Default)]
pub struct MockLocalizedNotificationConfigRepository {
    templates:   Arc<Mutex<HashMap<(TenantId, Language), LocalizedNotificationConfig>>>,
    enabled:     Arc<Mutex<HashMap<TenantId, Vec<Language>>>>,
    fail_find:   bool,
    fail_update: bool,
    fail_reset:  bool,
}

impl MockLocalizedNotificationConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み取り時に失敗するモック
    pub fn failing_find(self) -> Self {
        Self {
            fail_find: true,
            ..self
        }
    }

    /// 書き込み時に失敗するモック
    pub fn failing_update(self) -> Self {
        Self {
            fail_update: true,
            ..self
        }
    }

    /// リセット時に失敗するモック
    pub fn failing_reset(self) -> Self {
        Self {
            fail_reset: true,
            ..self
        }
    }

    /// 言語を有効化し、そのテンプレートを登録する
    pub fn insert(
        &self,
        tenant_id: &TenantId,
        language: &Language,
        templates: LocalizedNotificationConfig,
    ) {
        let mut enabled = self.enabled.lock().unwrap();
        let languages = enabled.entry(tenant_id.clone()).or_default();
        if !languages.contains(language) {
            languages.push(language.clone());
        }
        self.templates
            .lock()
            .unwrap()
            .insert((tenant_id.clone(), language.clone()), templates);
    }

    pub fn get(&self, tenant_id: &TenantId, language: &Language) -> Option<LocalizedNotificationConfig> {
        self.templates
            .lock()
            .unwrap()
            .get(&(tenant_id.clone(), language.clone()))
            .cloned()
    }
}

#[async_trait]
impl LocalizedNotificationConfigRepository for MockLocalizedNotificationConfigRepository {
    async fn find(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<LocalizedNotificationConfig, InfraError> {
        if self.fail_find {
            return Err(injected("localized find"));
        }
        self.get(tenant_id, language).ok_or_else(|| {
            InfraError::unexpected(format!("テンプレートがありません: {tenant_id}/{language}"))
        })
    }

    async fn update(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
        language: &Language,
        patch: &LocalizedNotificationPatch,
    ) -> Result<(), InfraError> {
        if self.fail_update {
            return Err(injected("localized update"));
        }
        let mut templates = self.templates.lock().unwrap();
        let current = templates
            .get_mut(&(tenant_id.clone(), language.clone()))
            .ok_or_else(|| {
                InfraError::unexpected(format!("テンプレートがありません: {tenant_id}/{language}"))
            })?;
        *current = patch.apply_to(&*current);
        Ok(())
    }

    async fn reset_all(
        &self,
        _tx: &mut TxContext,
        tenant_id: &TenantId,
        bundle: &DefaultTemplateBundle,
    ) -> Result<Vec<Language>, InfraError> {
        if self.fail_reset {
            return Err(injected("localized reset"));
        }
        let languages = self
            .enabled
            .lock()
            .unwrap()
            .get(tenant_id)
            .cloned()
            .unwrap_or_default();

        let mut templates = self.templates.lock().unwrap();
        for language in &languages {
            let defaults = bundle
                .localized_config(language)
                .map_err(|e| InfraError::invalid_input(e.to_string()))?;
            templates.insert((tenant_id.clone(), language.clone()), defaults);
        }
        Ok(languages)
    }
}

// ===== MockUserSettingsRepository =====

#[derive(Clone)]
struct MockUser {
    name:         String,
    mail_address: String,
    language:     Option<Language>,
}

#[derive(Clone, Default)]
pub struct MockUserSettingsRepository {
    users: Arc<Mutex<HashMap<(TenantId, UserId), MockUser>>>,
    fail:  bool,
}

impl MockUserSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// ユーザーを登録する。`language` が `None` ならフォールバック言語が使われる
    pub fn insert(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        name: &str,
        mail_address: &str,
        language: Option<Language>,
    ) {
        self.users.lock().unwrap().insert(
            (tenant_id.clone(), user_id.clone()),
            MockUser {
                name: name.to_string(),
                mail_address: mail_address.to_string(),
                language,
            },
        );
    }
}

#[async_trait]
impl UserSettingsRepository for MockUserSettingsRepository {
    async fn find_settings(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        fallback_language: &Language,
    ) -> Result<Option<UserSettings>, InfraError> {
        if self.fail {
            return Err(injected("user settings"));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&(tenant_id.clone(), user_id.clone()))
            .map(|user| UserSettings {
                user_id:      user_id.clone(),
                name:         user.name.clone(),
                mail_address: user.mail_address.clone(),
                language:     user
                    .language
                    .clone()
                    .unwrap_or_else(|| fallback_language.clone()),
            }))
    }
}

// ===== MockNodeInfoRepository =====

#[derive(Clone)]
struct MockNode {
    name:              String,
    hostname:          String,
    default_language:  Language,
    languages_enabled: Vec<Language>,
}

#[derive(Clone, Default)]
pub struct MockNodeInfoRepository {
    nodes:                  Arc<Mutex<HashMap<TenantId, MockNode>>>,
    default_language_calls: Arc<Mutex<usize>>,
    fail_public_info:       bool,
}

impl MockNodeInfoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// ノード公開情報の取得で失敗するモック
    pub fn failing_public_info(self) -> Self {
        Self {
            fail_public_info: true,
            ..self
        }
    }

    pub fn insert(
        &self,
        tenant_id: &TenantId,
        name: &str,
        hostname: &str,
        default_language: Language,
        languages_enabled: Vec<Language>,
    ) {
        self.nodes.lock().unwrap().insert(
            tenant_id.clone(),
            MockNode {
                name: name.to_string(),
                hostname: hostname.to_string(),
                default_language,
                languages_enabled,
            },
        );
    }

    /// `find_default_language()` が呼ばれた回数
    pub fn default_language_calls(&self) -> usize {
        *self.default_language_calls.lock().unwrap()
    }

    fn node(&self, tenant_id: &TenantId) -> Result<MockNode, InfraError> {
        self.nodes
            .lock()
            .unwrap()
            .get(tenant_id)
            .cloned()
            .ok_or_else(|| InfraError::unexpected(format!("ノード情報がありません: {tenant_id}")))
    }
}

#[async_trait]
impl NodeInfoRepository for MockNodeInfoRepository {
    async fn find_public_info(
        &self,
        tenant_id: &TenantId,
        language: &Language,
    ) -> Result<NodePublicInfo, InfraError> {
        if self.fail_public_info {
            return Err(injected("node public info"));
        }
        let node = self.node(tenant_id)?;
        Ok(NodePublicInfo {
            name:              node.name,
            hostname:          node.hostname,
            default_language:  node.default_language,
            languages_enabled: node.languages_enabled,
            language:          language.clone(),
        })
    }

    async fn find_default_language(&self, tenant_id: &TenantId) -> Result<Language, InfraError> {
        *self.default_language_calls.lock().unwrap() += 1;
        Ok(self.node(tenant_id)?.default_language)
    }
}

// ===== MockMemoryCacheRefresher =====

#[derive(Clone, Default)]
pub struct MockMemoryCacheRefresher {
    refreshed: Arc<Mutex<Vec<TenantId>>>,
}

impl MockMemoryCacheRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `refresh()` に渡されたテナント（呼び出し順）
    pub fn refreshed(&self) -> Vec<TenantId> {
        self.refreshed.lock().unwrap().clone()
    }
}

impl MemoryCacheRefresher for MockMemoryCacheRefresher {
    fn refresh(&self, tenant_id: &TenantId) {
        self.refreshed.lock().unwrap().push(tenant_id.clone());
    }
}

// ===== MockNotificationSender =====

#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 送信が試みられたメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(NotificationError::SendFailed("注入された障害".to_string()));
        }
        Ok(())
    }
}

// ===== MockNotificationSenderFactory =====

/// 常に同じ [`MockNotificationSender`] を返すファクトリ
#[derive(Clone, Default)]
pub struct MockNotificationSenderFactory {
    sender: MockNotificationSender,
    built:  Arc<Mutex<Vec<SmtpSettings>>>,
}

impl MockNotificationSenderFactory {
    pub fn new(sender: MockNotificationSender) -> Self {
        Self {
            sender,
            built: Arc::default(),
        }
    }

    /// `build()` に渡された SMTP 設定
    pub fn built_settings(&self) -> Vec<SmtpSettings> {
        self.built.lock().unwrap().clone()
    }
}

impl NotificationSenderFactory for MockNotificationSenderFactory {
    fn build(
        &self,
        settings: &SmtpSettings,
    ) -> Result<Arc<dyn NotificationSender>, NotificationError> {
        self.built.lock().unwrap().push(settings.clone());
        Ok(Arc::new(self.sender.clone()))
    }
}
