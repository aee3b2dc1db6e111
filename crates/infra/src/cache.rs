//! # テナントキャッシュ
//!
//! 設定から導出される値をテナント単位でプロセス内に保持する。
//! 通知設定の更新時に [`MemoryCacheRefresher::refresh`] で無効化される。

use dashmap::{DashMap, mapref::entry::Entry};
use notifyhub_domain::{language::Language, tenant::TenantId};

/// プロセス内キャッシュの無効化
///
/// 通知設定の更新トランザクションの最後に、テナントごとに 1 回呼ばれる。
pub trait MemoryCacheRefresher: Send + Sync {
    /// テナントのキャッシュを破棄し、次回アクセス時に再読み込みさせる
    fn refresh(&self, tenant_id: &TenantId);
}

#[derive(Debug, Clone, Default)]
struct TenantCacheEntry {
    /// refresh のたびに進む世代番号
    epoch:            u64,
    default_language: Option<Language>,
}

/// DashMap によるテナントキャッシュ
///
/// 読み込み中に refresh が割り込んだ場合に古い値を書き戻さないよう、
/// 書き込み側は読み込み開始前の [`epoch`](Self::epoch) を渡す。
#[derive(Debug, Default)]
pub struct InMemoryTenantCache {
    entries: DashMap<TenantId, TenantCacheEntry>,
}

impl InMemoryTenantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュ済みのデフォルト言語
    pub fn default_language(&self, tenant_id: &TenantId) -> Option<Language> {
        self.entries
            .get(tenant_id)
            .and_then(|entry| entry.default_language.clone())
    }

    /// テナントの現在の世代。一度も refresh されていなければ 0
    pub fn epoch(&self, tenant_id: &TenantId) -> u64 {
        self.entries.get(tenant_id).map_or(0, |entry| entry.epoch)
    }

    /// `observed_epoch` の時点から refresh されていなければデフォルト言語を保持する
    ///
    /// 保持した場合は `true`。
    pub fn put_default_language(
        &self,
        tenant_id: &TenantId,
        language: Language,
        observed_epoch: u64,
    ) -> bool {
        match self.entries.entry(tenant_id.clone()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.epoch != observed_epoch {
                    return false;
                }
                entry.default_language = Some(language);
                true
            }
            Entry::Vacant(vacant) => {
                if observed_epoch != 0 {
                    return false;
                }
                vacant.insert(TenantCacheEntry {
                    epoch:            0,
                    default_language: Some(language),
                });
                true
            }
        }
    }
}

impl MemoryCacheRefresher for InMemoryTenantCache {
    fn refresh(&self, tenant_id: &TenantId) {
        let mut entry = self.entries.entry(tenant_id.clone()).or_default();
        let evicted = entry.default_language.take().is_some();
        entry.epoch += 1;
        tracing::debug!(%tenant_id, evicted, epoch = entry.epoch, "テナントキャッシュを破棄");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn refreshで対象テナントのエントリだけが破棄される() {
        let cache = InMemoryTenantCache::new();
        let t1 = TenantId::new();
        let t2 = TenantId::new();
        cache.put_default_language(&t1, Language::new("fr").unwrap(), 0);
        cache.put_default_language(&t2, Language::new("en").unwrap(), 0);

        cache.refresh(&t1);

        assert_eq!(cache.default_language(&t1), None);
        assert_eq!(cache.default_language(&t2), Some(Language::new("en").unwrap()));
    }

    #[test]
    fn 未登録テナントのrefreshは何もしない() {
        let cache = InMemoryTenantCache::new();
        cache.refresh(&TenantId::new());
        assert_eq!(cache.default_language(&TenantId::new()), None);
    }

    #[test]
    fn 読み込み中にrefreshされた値は保持しない() {
        let cache = InMemoryTenantCache::new();
        let tenant_id = TenantId::new();
        let observed = cache.epoch(&tenant_id);

        cache.refresh(&tenant_id);
        let stored = cache.put_default_language(&tenant_id, Language::new("fr").unwrap(), observed);

        assert!(!stored);
        assert_eq!(cache.default_language(&tenant_id), None);
    }

    #[test]
    fn refresh後に読み直した値は保持する() {
        let cache = InMemoryTenantCache::new();
        let tenant_id = TenantId::new();
        cache.put_default_language(&tenant_id, Language::new("fr").unwrap(), 0);
        cache.refresh(&tenant_id);

        let observed = cache.epoch(&tenant_id);
        let stored = cache.put_default_language(&tenant_id, Language::new("en").unwrap(), observed);

        assert!(stored);
        assert_eq!(observed, 1);
        assert_eq!(cache.default_language(&tenant_id), Some(Language::new("en").unwrap()));
    }
}
