//! GitHub 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! - [`github_user_sql`] - `github_user_info` 테이블 조회 및 upsert
//! - [`github_user_cache`] - `github_user_info:{id}` Redis 해시 캐시
//! - [`github_user_repo`] - 두 계층을 묶는 [`GithubUserRepository`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::github_user::{CachePolicy, GithubUserRepository};
//!
//! let user = repo.get_by_id(583231, CachePolicy::ReadThrough).await?;
//! ```

pub mod github_user_cache;
pub mod github_user_repo;
pub mod github_user_sql;

pub use github_user_cache::GithubUserCache;
pub use github_user_repo::{CachePolicy, GithubUserRepository};
pub use github_user_sql::{GithubUserDataSource, GithubUserSql, SaveOutcome};
