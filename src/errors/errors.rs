//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 계정 서비스의 데이터 액세스 계층을 위한 통합 에러 타입입니다.
//! `thiserror`를 사용하여 드라이버 에러(sqlx, redis)를 그대로 감싸고,
//! 캐시/와이어 디코딩 실패를 별도 variant로 구분합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, AppResult};
//!
//! async fn load(repo: &GithubUserRepository, id: i64) -> AppResult<GithubUser> {
//!     repo.get_by_id(id, CachePolicy::ReadThrough)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound(format!("github user {}", id)))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 조회 결과가 없는 경우는 에러가 아니라 `Ok(None)`으로 표현됩니다.
/// 드라이버에서 올라온 에러는 가공 없이 원본을 보존합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 관계형 저장소 에러 (연결, 쿼리, 유니크 제약 위반 등)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 스키마 마이그레이션 실패
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis 캐시 에러
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// 캐시 해시를 엔티티로 복원하지 못한 경우
    #[error("Cache decode error: {0}")]
    CacheDecode(String),

    /// 바이너리 응답 디코딩 실패
    #[error("Decode error: {0}")]
    Decode(String),

    /// 리소스 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 설정값 오류
    #[error("Configuration error: {0}")]
    Config(String),

    /// 내부 에러
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<prost::DecodeError> for AppError {
    fn from(e: prost::DecodeError) -> Self {
        AppError::Decode(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::Internal(format!("{}: {}", f(), e)))
    }
}
