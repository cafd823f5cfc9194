//! # GitHub 사용자 리포지토리 구현
//!
//! GitHub 프로필의 데이터 액세스 계층입니다.
//! PostgreSQL을 주 저장소로 사용하고, Redis 해시를 선택적 캐시로 사용합니다.
//!
//! ## 특징
//!
//! - **캐시 정책 선택**: 호출마다 [`CachePolicy`]로 캐시 사용 여부를 지정
//! - **원자적 저장**: 삽입/갱신 분기를 단일 upsert 구문으로 처리
//! - **갱신 시 무효화**: 기존 행이 갱신되면 해당 ID의 캐시 항목을 삭제
//! - **명시적 의존성**: 저장소와 캐시는 생성 시 주입됨

use std::sync::Arc;

use log::{debug, info};

use crate::caching::HashCache;
use crate::domain::entities::GithubUser;
use crate::errors::AppResult;
use crate::repositories::github_user::github_user_cache::GithubUserCache;
use crate::repositories::github_user::github_user_sql::{GithubUserDataSource, SaveOutcome};

/// 조회 시 캐시 사용 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// 캐시를 보지 않고 저장소만 조회
    #[default]
    Bypass,
    /// 캐시를 먼저 보고, 미스 시 저장소를 조회하되 캐시는 채우지 않음
    ReadOnly,
    /// 캐시를 먼저 보고, 미스 시 저장소 결과로 캐시를 채움
    ReadThrough,
}

impl CachePolicy {
    /// `use_cache` / `update_cache` 플래그 조합에서 정책을 만듭니다.
    ///
    /// `use_cache`가 꺼져 있으면 `update_cache`는 무시됩니다.
    pub fn from_flags(use_cache: bool, update_cache: bool) -> Self {
        match (use_cache, update_cache) {
            (false, _) => CachePolicy::Bypass,
            (true, false) => CachePolicy::ReadOnly,
            (true, true) => CachePolicy::ReadThrough,
        }
    }
}

/// GitHub 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **키 패턴**: `github_user_info:{id}`
/// - **TTL**: 2시간 (7200초)
/// - **부정 결과 미캐싱**: 저장소에 없는 ID는 캐시에 기록하지 않으므로
///   반복된 미스는 매번 저장소를 조회합니다
/// - **오래된 값 허용**: 캐시 히트 시 저장소를 보지 않으므로 TTL 범위 내에서
///   갱신 이전 값이 반환될 수 있습니다 (`save_or_update`가 갱신 시 무효화)
///
/// ## 에러 처리
///
/// 캐시와 저장소의 에러는 모두 호출자에게 전파됩니다. 캐시 장애는
/// 저장소만으로 성공할 수 있었던 요청도 실패시킵니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = GithubUserRepository::new(
///     Arc::new(GithubUserSql::new(database.pool().clone())),
///     Arc::new(redis_client),
/// );
///
/// repo.save_or_update(&github_user).await?;
/// let cached = repo.get_by_id(github_user.id, CachePolicy::ReadThrough).await?;
/// ```
#[derive(Clone)]
pub struct GithubUserRepository {
    store: Arc<dyn GithubUserDataSource>,
    cache: GithubUserCache,
}

impl GithubUserRepository {
    pub fn new(store: Arc<dyn GithubUserDataSource>, cache: Arc<dyn HashCache>) -> Self {
        Self {
            store,
            cache: GithubUserCache::new(cache),
        }
    }

    /// 캐시 계층에 직접 접근합니다.
    pub fn cache(&self) -> &GithubUserCache {
        &self.cache
    }

    /// 외부 GitHub ID로 프로필을 조회합니다.
    ///
    /// # 인자
    ///
    /// * `id` - GitHub 숫자 ID
    /// * `policy` - 캐시 사용 정책
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(GithubUser))` - 캐시 또는 저장소에서 찾은 경우
    /// * `Ok(None)` - 해당 ID의 프로필이 없는 경우 (에러 아님)
    /// * `Err(AppError)` - 저장소 또는 캐시 에러
    pub async fn get_by_id(&self, id: i64, policy: CachePolicy) -> AppResult<Option<GithubUser>> {
        if policy == CachePolicy::Bypass {
            return self.store.get_by_id(id).await;
        }

        if let Some(cached) = self.cache.get_by_id(id).await? {
            debug!("github user {} served from cache", id);
            return Ok(Some(cached));
        }

        debug!("github user {} cache miss", id);
        let user = self.store.get_by_id(id).await?;

        if let Some(ref user) = user {
            if policy == CachePolicy::ReadThrough {
                self.cache.update(user).await?;
            }
        }

        Ok(user)
    }

    /// 프로필을 삽입하거나 기존 행을 갱신합니다.
    ///
    /// 기존 행이 갱신된 경우 해당 ID의 캐시 항목을 삭제합니다.
    /// 삽입 시에는 `uid`가 기록되고, 갱신 시에는 저장된 `uid`가 유지됩니다.
    pub async fn save_or_update(&self, user: &GithubUser) -> AppResult<SaveOutcome> {
        let outcome = self.store.upsert(user).await?;

        match outcome {
            SaveOutcome::Inserted => {
                info!("github user {} inserted (uid={})", user.id, user.uid);
            }
            SaveOutcome::Updated => {
                self.cache.drop(user.id).await?;
                info!("github user {} updated, cache entry dropped", user.id);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use mockall::predicate::eq;
    use tokio::time::Instant;

    use super::*;
    use crate::caching::MockHashCache;
    use crate::errors::AppError;
    use crate::repositories::github_user::github_user_cache::CACHE_TTL_SECONDS;
    use crate::repositories::github_user::github_user_sql::MockGithubUserDataSource;

    /// 테이블을 흉내내는 인메모리 저장소
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<i64, GithubUser>>,
        reads: AtomicUsize,
    }

    impl MemoryStore {
        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GithubUserDataSource for MemoryStore {
        async fn get_by_id(&self, id: i64) -> AppResult<Option<GithubUser>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn upsert(&self, user: &GithubUser) -> AppResult<SaveOutcome> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&user.id) {
                Some(row) => {
                    let uid = row.uid;
                    *row = GithubUser { uid, ..user.clone() };
                    Ok(SaveOutcome::Updated)
                }
                None => {
                    rows.insert(user.id, user.clone());
                    Ok(SaveOutcome::Inserted)
                }
            }
        }
    }

    /// 만료 시간을 지원하는 인메모리 해시 캐시 (tokio 가상 시계 사용)
    #[derive(Default)]
    struct MemoryHashCache {
        entries: Mutex<HashMap<String, (HashMap<String, String>, Instant)>>,
    }

    impl MemoryHashCache {
        fn contains(&self, key: &str) -> bool {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .is_some_and(|(_, expires_at)| Instant::now() < *expires_at)
        }
    }

    #[async_trait]
    impl HashCache for MemoryHashCache {
        async fn read_hash(&self, key: &str) -> AppResult<HashMap<String, String>> {
            let mut entries = self.entries.lock().unwrap();
            let expired = match entries.get(key) {
                Some((fields, expires_at)) if Instant::now() < *expires_at => return Ok(fields.clone()),
                Some(_) => true,
                None => false,
            };
            if expired {
                entries.remove(key);
            }
            Ok(HashMap::new())
        }

        async fn write_hash(&self, key: &str, fields: Vec<(String, String)>, ttl_seconds: u64) -> AppResult<()> {
            let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (fields.into_iter().collect(), expires_at));
            Ok(())
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn setup() -> (GithubUserRepository, Arc<MemoryStore>, Arc<MemoryHashCache>) {
        let store = Arc::new(MemoryStore::default());
        let cache = Arc::new(MemoryHashCache::default());
        let repo = GithubUserRepository::new(store.clone(), cache.clone());
        (repo, store, cache)
    }

    fn profile(id: i64, name: &str) -> GithubUser {
        GithubUser {
            uid: 1000 + id,
            id,
            name: name.to_string(),
            login: format!("user{}", id),
            follower_count: 5,
            ..GithubUser::default()
        }
    }

    fn redis_down() -> AppError {
        AppError::Redis(redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")))
    }

    #[test]
    fn test_cache_policy_from_flags() {
        assert_eq!(CachePolicy::from_flags(false, false), CachePolicy::Bypass);
        assert_eq!(CachePolicy::from_flags(false, true), CachePolicy::Bypass);
        assert_eq!(CachePolicy::from_flags(true, false), CachePolicy::ReadOnly);
        assert_eq!(CachePolicy::from_flags(true, true), CachePolicy::ReadThrough);
        assert_eq!(CachePolicy::default(), CachePolicy::Bypass);
    }

    #[tokio::test]
    async fn test_save_then_get_returns_saved_profile() {
        let (repo, _, _) = setup();
        let user = profile(7, "seven");

        let outcome = repo.save_or_update(&user).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Inserted);
        assert_eq!(repo.get_by_id(7, CachePolicy::Bypass).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let (repo, _, _) = setup();

        assert_eq!(repo.get_by_id(404, CachePolicy::Bypass).await.unwrap(), None);
        assert_eq!(repo.get_by_id(404, CachePolicy::ReadThrough).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_drops_cache_entry() {
        let (repo, _, cache) = setup();
        repo.save_or_update(&profile(9, "before")).await.unwrap();
        repo.get_by_id(9, CachePolicy::ReadThrough).await.unwrap();
        assert!(cache.contains("github_user_info:9"));

        let outcome = repo.save_or_update(&profile(9, "after")).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Updated);
        assert!(!cache.contains("github_user_info:9"));
        let stored = repo.get_by_id(9, CachePolicy::Bypass).await.unwrap().unwrap();
        assert_eq!(stored.id, 9);
        assert_eq!(stored.name, "after");
    }

    #[tokio::test]
    async fn test_update_preserves_stored_uid() {
        let (repo, _, _) = setup();
        repo.save_or_update(&profile(3, "a")).await.unwrap();

        let mut changed = profile(3, "b");
        changed.uid = 0;
        repo.save_or_update(&changed).await.unwrap();

        let stored = repo.get_by_id(3, CachePolicy::Bypass).await.unwrap().unwrap();
        assert_eq!(stored.uid, 1003);
    }

    #[tokio::test]
    async fn test_read_through_populates_then_serves_from_cache() {
        let (repo, store, cache) = setup();
        repo.save_or_update(&profile(5, "five")).await.unwrap();

        let first = repo.get_by_id(5, CachePolicy::ReadThrough).await.unwrap();
        assert_eq!(store.reads(), 1);
        assert!(cache.contains("github_user_info:5"));

        let second = repo.get_by_id(5, CachePolicy::ReadThrough).await.unwrap();
        assert_eq!(store.reads(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_read_only_does_not_populate_cache() {
        let (repo, store, cache) = setup();
        repo.save_or_update(&profile(6, "six")).await.unwrap();

        repo.get_by_id(6, CachePolicy::ReadOnly).await.unwrap();
        repo.get_by_id(6, CachePolicy::ReadOnly).await.unwrap();

        assert_eq!(store.reads(), 2);
        assert!(!cache.contains("github_user_info:6"));
    }

    #[tokio::test]
    async fn test_negative_result_is_not_cached() {
        let (repo, store, cache) = setup();

        repo.get_by_id(77, CachePolicy::ReadThrough).await.unwrap();
        repo.get_by_id(77, CachePolicy::ReadThrough).await.unwrap();

        assert_eq!(store.reads(), 2);
        assert!(!cache.contains("github_user_info:77"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_falls_through_to_store() {
        let (repo, store, _) = setup();
        repo.save_or_update(&profile(8, "eight")).await.unwrap();
        repo.get_by_id(8, CachePolicy::ReadThrough).await.unwrap();

        tokio::time::advance(Duration::from_secs(CACHE_TTL_SECONDS - 1)).await;
        repo.get_by_id(8, CachePolicy::ReadThrough).await.unwrap();
        assert_eq!(store.reads(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        let user = repo.get_by_id(8, CachePolicy::ReadThrough).await.unwrap();
        assert_eq!(store.reads(), 2);
        assert_eq!(user.unwrap().name, "eight");
    }

    #[tokio::test]
    async fn test_dropped_entry_is_a_miss() {
        let (repo, store, _) = setup();
        repo.save_or_update(&profile(4, "four")).await.unwrap();
        repo.get_by_id(4, CachePolicy::ReadThrough).await.unwrap();

        repo.cache().drop(4).await.unwrap();
        repo.get_by_id(4, CachePolicy::ReadOnly).await.unwrap();

        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_cached_value_may_be_stale_until_invalidated() {
        let (repo, store, _) = setup();
        repo.save_or_update(&profile(2, "old")).await.unwrap();
        repo.get_by_id(2, CachePolicy::ReadThrough).await.unwrap();

        // write behind the repository's back: cache is not invalidated
        store.rows.lock().unwrap().insert(2, profile(2, "new"));

        let cached = repo.get_by_id(2, CachePolicy::ReadThrough).await.unwrap().unwrap();
        assert_eq!(cached.name, "old");
        let fresh = repo.get_by_id(2, CachePolicy::Bypass).await.unwrap().unwrap();
        assert_eq!(fresh.name, "new");
    }

    #[tokio::test]
    async fn test_id_42_insert_then_update_scenario() {
        let (repo, _, cache) = setup();
        let inserted = GithubUser {
            id: 42,
            name: "a".to_string(),
            ..GithubUser::default()
        };

        assert_eq!(repo.save_or_update(&inserted).await.unwrap(), SaveOutcome::Inserted);
        assert_eq!(repo.get_by_id(42, CachePolicy::Bypass).await.unwrap(), Some(inserted));

        repo.get_by_id(42, CachePolicy::ReadThrough).await.unwrap();
        assert!(cache.contains("github_user_info:42"));

        let updated = GithubUser {
            id: 42,
            name: "b".to_string(),
            ..GithubUser::default()
        };
        assert_eq!(repo.save_or_update(&updated).await.unwrap(), SaveOutcome::Updated);
        assert!(!cache.contains("github_user_info:42"));
        assert_eq!(
            repo.get_by_id(42, CachePolicy::ReadThrough).await.unwrap().unwrap().name,
            "b"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut store = MockGithubUserDataSource::new();
        store.expect_get_by_id().never();

        let mut cache = MockHashCache::new();
        cache
            .expect_read_hash()
            .with(eq("github_user_info:42"))
            .times(1)
            .returning(|_| Ok(GithubUser::with_id(42).to_cache_fields().into_iter().collect()));

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(cache));
        let user = repo.get_by_id(42, CachePolicy::ReadThrough).await.unwrap();

        assert_eq!(user, Some(GithubUser::with_id(42)));
    }

    #[tokio::test]
    async fn test_bypass_never_touches_cache() {
        let mut store = MockGithubUserDataSource::new();
        store
            .expect_get_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let mut cache = MockHashCache::new();
        cache.expect_read_hash().never();
        cache.expect_write_hash().never();

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(cache));

        assert_eq!(repo.get_by_id(42, CachePolicy::Bypass).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_does_not_touch_cache() {
        let mut store = MockGithubUserDataSource::new();
        store
            .expect_upsert()
            .withf(|user| user.id == 42)
            .times(1)
            .returning(|_| Ok(SaveOutcome::Inserted));

        let mut cache = MockHashCache::new();
        cache.expect_delete().never();

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(cache));

        assert_eq!(
            repo.save_or_update(&GithubUser::with_id(42)).await.unwrap(),
            SaveOutcome::Inserted
        );
    }

    #[tokio::test]
    async fn test_cache_outage_fails_cached_read() {
        let mut store = MockGithubUserDataSource::new();
        store.expect_get_by_id().never();

        let mut cache = MockHashCache::new();
        cache.expect_read_hash().returning(|_| Err(redis_down()));

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(cache));

        assert!(matches!(
            repo.get_by_id(1, CachePolicy::ReadOnly).await,
            Err(AppError::Redis(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_outage_fails_update_after_store_write() {
        let mut store = MockGithubUserDataSource::new();
        store
            .expect_upsert()
            .times(1)
            .returning(|_| Ok(SaveOutcome::Updated));

        let mut cache = MockHashCache::new();
        cache.expect_delete().returning(|_| Err(redis_down()));

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(cache));

        assert!(matches!(
            repo.save_or_update(&GithubUser::with_id(1)).await,
            Err(AppError::Redis(_))
        ));
    }

    #[tokio::test]
    async fn test_store_error_propagates_unmodified() {
        let mut store = MockGithubUserDataSource::new();
        store
            .expect_upsert()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let repo = GithubUserRepository::new(Arc::new(store), Arc::new(MockHashCache::new()));

        assert!(matches!(
            repo.save_or_update(&GithubUser::with_id(1)).await,
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        ));
    }
}
