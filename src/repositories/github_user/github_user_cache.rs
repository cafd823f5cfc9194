//! # GitHub 사용자 캐시
//!
//! 프로필 하나를 Redis 해시 하나에 저장합니다.
//!
//! - **키 패턴**: `github_user_info:{id}`
//! - **필드**: [`GithubUser::CACHE_FIELDS`], 모든 값은 문자열
//! - **TTL**: 마지막 갱신 시점부터 7200초 (2시간)
//!
//! 부수 효과는 ID당 하나의 키에 한정되며, 키 사이의 불변식은 없습니다.

use std::sync::Arc;

use log::debug;

use crate::caching::HashCache;
use crate::domain::entities::GithubUser;
use crate::errors::AppResult;

/// 캐시 키 접두사
pub const KEY_PREFIX: &str = "github_user_info";

/// 캐시 항목 만료 시간 (초)
pub const CACHE_TTL_SECONDS: u64 = 2 * 60 * 60;

/// 프로필 해시 캐시
#[derive(Clone)]
pub struct GithubUserCache {
    cache: Arc<dyn HashCache>,
}

impl GithubUserCache {
    pub fn new(cache: Arc<dyn HashCache>) -> Self {
        Self { cache }
    }

    /// ID에 대한 캐시 키를 만듭니다.
    pub fn key(id: i64) -> String {
        format!("{}:{}", KEY_PREFIX, id)
    }

    /// 캐시된 프로필을 조회합니다.
    ///
    /// 해시가 비어 있으면(키 없음 또는 만료) `None`입니다.
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<GithubUser>> {
        let fields = self.cache.read_hash(&Self::key(id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }
        GithubUser::from_cache_fields(&fields).map(Some)
    }

    /// 프로필 전체를 해시로 기록하고 TTL을 새로 설정합니다.
    pub async fn update(&self, user: &GithubUser) -> AppResult<()> {
        let key = Self::key(user.id);
        self.cache
            .write_hash(&key, user.to_cache_fields(), CACHE_TTL_SECONDS)
            .await?;
        debug!("cached {} for {}s", key, CACHE_TTL_SECONDS);
        Ok(())
    }

    /// 캐시 항목을 삭제합니다.
    pub async fn drop(&self, id: i64) -> AppResult<()> {
        self.cache.delete(&Self::key(id)).await
    }
}
