//! 계정 서비스 데이터 액세스 라이브러리
//!
//! GitHub 로그인으로 연결된 사용자 프로필을 PostgreSQL에 미러링하고,
//! Redis 해시 캐시로 조회를 가속하며, 로그인 응답을 JSON과 protobuf로 인코딩합니다.
//!
//! # Features
//!
//! - **프로필 저장소**: `github_user_info` 테이블 조회 및 원자적 upsert
//! - **프로필 캐시**: `github_user_info:{id}` 해시, 2시간 TTL
//! - **로그인 응답**: 두 가지 독립적인 와이어 인코딩
//! - **명시적 의존성**: 커넥션 풀과 캐시 클라이언트는 시작 시 생성되어 주입됨
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Repositories   │ ← 캐시 정책, upsert, 무효화
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PostgreSQL +    │ ← 저장소
//! │ Redis           │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use account_service::repositories::github_user::{CachePolicy, GithubUserRepository};
//!
//! let repo = GithubUserRepository::new(store, cache);
//! repo.save_or_update(&user).await?;
//! let user = repo.get_by_id(user.id, CachePolicy::ReadThrough).await?;
//! ```

pub mod caching;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
