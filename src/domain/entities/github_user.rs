//! GitHub User Entity Implementation
//!
//! GitHub 계정 정보를 로컬 `github_user_info` 테이블에 미러링한 엔티티입니다.
//! 캐시 해시와의 변환은 리플렉션 대신 [`GithubUser::CACHE_FIELDS`]에
//! 명시적으로 선언된 필드 목록을 따릅니다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// GitHub 사용자 프로필 엔티티
///
/// 외부 GitHub 숫자 ID(`id`)가 저장소와 캐시 모두의 조회 키입니다.
/// `uid`는 내부 계정 식별자로, 최초 삽입 시에만 기록됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GithubUser {
    /// 내부 계정 식별자
    pub uid: i64,
    /// GitHub OAuth 액세스 토큰
    pub access_token: String,
    /// GitHub 숫자 ID (unique)
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 아바타 이미지 URL
    pub avatar: String,
    /// GitHub 로그인 핸들
    pub login: String,
    pub blog: String,
    pub location: String,
    pub follower_count: i32,
    pub company: String,
}

impl GithubUser {
    /// 캐시 해시에 기록되는 필드명 목록 (선언 순서)
    pub const CACHE_FIELDS: [&'static str; 11] = [
        "uid",
        "accessToken",
        "id",
        "name",
        "email",
        "avatar",
        "login",
        "blog",
        "location",
        "followerCount",
        "company",
    ];

    /// 외부 ID만 채워진 프로필을 생성합니다.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// 모든 필드를 `(필드명, 문자열 값)` 목록으로 변환합니다.
    ///
    /// 순서는 [`GithubUser::CACHE_FIELDS`]와 같습니다.
    pub fn to_cache_fields(&self) -> Vec<(String, String)> {
        let values = [
            self.uid.to_string(),
            self.access_token.clone(),
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.avatar.clone(),
            self.login.clone(),
            self.blog.clone(),
            self.location.clone(),
            self.follower_count.to_string(),
            self.company.clone(),
        ];

        Self::CACHE_FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// 캐시 해시로부터 프로필을 복원합니다.
    ///
    /// 누락된 필드는 기본값으로 채워지고, 알 수 없는 필드는 무시됩니다.
    /// 숫자 필드의 값을 해석할 수 없으면 [`AppError::CacheDecode`]를 반환합니다.
    pub fn from_cache_fields(fields: &HashMap<String, String>) -> AppResult<Self> {
        let text = |name: &str| fields.get(name).cloned().unwrap_or_default();

        Ok(Self {
            uid: parse_number(fields, "uid")?,
            access_token: text("accessToken"),
            id: parse_number(fields, "id")?,
            name: text("name"),
            email: text("email"),
            avatar: text("avatar"),
            login: text("login"),
            blog: text("blog"),
            location: text("location"),
            follower_count: parse_number(fields, "followerCount")?,
            company: text("company"),
        })
    }
}

fn parse_number<T>(fields: &HashMap<String, String>, name: &str) -> AppResult<T>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    match fields.get(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::CacheDecode(format!("{}={:?}: {}", name, raw, e))),
        None => Ok(T::default()),
    }
}
