//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! PostgreSQL을 주 저장소로 사용하고 Redis 해시를 통한 캐싱을 지원합니다.
//! 모든 리포지토리는 저장소와 캐시를 생성자 인자로 주입받습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::github_user::{GithubUserRepository, GithubUserSql};
//!
//! let repo = GithubUserRepository::new(
//!     Arc::new(GithubUserSql::new(database.pool().clone())),
//!     redis_client,
//! );
//! ```

pub mod github_user;
