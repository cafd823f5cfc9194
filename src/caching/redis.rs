//! # Redis 캐시 클라이언트 구현
//!
//! 이 모듈은 Redis를 백엔드로 하는 해시 캐시 클라이언트를 제공합니다.
//! 엔티티를 `필드명 → 문자열 값` 형태의 Redis 해시로 저장하며,
//! 쓰기와 만료 설정은 하나의 원자적 파이프라인으로 처리됩니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use log::info;
use redis::{AsyncCommands, Client};

use crate::caching::HashCache;
use crate::config::RedisConfig;
use crate::errors::AppResult;

/// Redis 캐시 클라이언트 래퍼
///
/// 시작 시 [`RedisClient::new`]로 생성되어 `Arc`로 공유되며,
/// 리포지토리에는 [`HashCache`] 트레이트 객체로 주입됩니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
///
/// let redis = RedisClient::new(&RedisConfig::from_env()).await?;
///
/// redis.hset_multiple_with_expiry(
///     "github_user_info:42",
///     &[("login".to_string(), "octocat".to_string())],
///     7200,
/// ).await?;
///
/// let fields = redis.hgetall("github_user_info:42").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// 멀티플렉싱을 지원하는 Redis 클라이언트
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 생성 시 PING 명령으로 Redis 서버의 가용성을 확인합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - 잘못된 URL 형식
    /// - Redis 서버에 연결할 수 없는 경우
    /// - 인증 실패
    pub async fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str())?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 해시의 모든 필드를 조회합니다.
    ///
    /// 키가 존재하지 않으면 빈 맵을 반환합니다.
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hgetall(key).await
    }

    /// 해시 필드들을 기록하고 만료 시간을 설정합니다.
    ///
    /// `HSET`과 `EXPIRE`는 `MULTI/EXEC` 파이프라인으로 함께 실행되므로
    /// 만료 시간 없이 남는 해시가 생기지 않습니다.
    ///
    /// ## 인자
    ///
    /// - `key` - 저장할 Redis 키
    /// - `fields` - `(필드명, 값)` 목록. 비어 있으면 아무 것도 하지 않습니다.
    /// - `seconds` - 만료 시간 (초 단위)
    pub async fn hset_multiple_with_expiry(
        &self,
        key: &str,
        fields: &[(String, String)],
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::pipe()
            .atomic()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, seconds as i64)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 키의 남은 만료 시간(초)을 조회합니다.
    ///
    /// 키가 없으면 `-2`, 만료 시간이 없으면 `-1`을 반환합니다 (Redis `TTL` 의미 그대로).
    pub async fn ttl(&self, key: &str) -> Result<i64, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.ttl(key).await
    }
}

#[async_trait]
impl HashCache for RedisClient {
    async fn read_hash(&self, key: &str) -> AppResult<HashMap<String, String>> {
        Ok(self.hgetall(key).await?)
    }

    async fn write_hash(&self, key: &str, fields: Vec<(String, String)>, ttl_seconds: u64) -> AppResult<()> {
        Ok(self.hset_multiple_with_expiry(key, &fields, ttl_seconds).await?)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        Ok(self.del(key).await?)
    }
}
