//! 캐싱 계층 모듈
//!
//! Redis 해시를 백엔드로 하는 엔티티 캐시를 지원합니다.
//!
//! # 주요 기능
//!
//! - Redis 통합 및 멀티플렉싱 연결
//! - 해시 단위 저장/조회/삭제
//! - 쓰기와 동시에 TTL 설정
//!
//! 리포지토리는 구체 타입 대신 [`HashCache`] 트레이트에 의존하며,
//! 운영 환경에서는 [`redis::RedisClient`]가 이를 구현합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppResult;

pub mod redis;

/// 문자열 해시 기반 캐시 저장소
///
/// 하나의 키에 `필드명 → 문자열 값` 해시를 저장합니다.
/// 모든 실패는 호출자에게 그대로 전파됩니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashCache: Send + Sync {
    /// 키의 전체 해시를 읽습니다. 키가 없으면 빈 맵입니다.
    async fn read_hash(&self, key: &str) -> AppResult<HashMap<String, String>>;

    /// 해시를 기록하고 `ttl_seconds` 후 만료되도록 설정합니다.
    async fn write_hash(&self, key: &str, fields: Vec<(String, String)>, ttl_seconds: u64) -> AppResult<()>;

    /// 키를 삭제합니다.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
