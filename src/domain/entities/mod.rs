//! # Domain Entities Module
//!
//! 계정 도메인의 핵심 엔티티와 집합체를 정의합니다.
//!
//! - [`github_user::GithubUser`] - `github_user_info` 테이블과 1:1 대응되는 영속 엔티티
//! - [`user_info::UserInfo`], [`account::Account`] - 로그인 응답에 값으로 실리는 집합체
//!
//! 영속 엔티티는 `sqlx::FromRow`로 행과 매핑되고, 응답 집합체는
//! `serde`(JSON)와 `prost`(protobuf) 두 가지 인코딩을 모두 지원합니다.

pub mod account;
pub mod github_user;
pub mod user_info;

pub use account::Account;
pub use github_user::GithubUser;
pub use user_info::UserInfo;
