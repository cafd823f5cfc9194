//! 로그인 응답 DTO
//!
//! 하나의 응답을 두 가지 독립적인 인코딩으로 내보냅니다.
//!
//! | 필드 | protobuf tag | JSON key |
//! |------|--------------|----------|
//! | `token` | 1 (string) | `token` |
//! | `user_info` | 2 (message) | `user_info` |
//! | `account` | 3 (message) | `account` |
//!
//! 이전 JSON 스키마는 계정 필드에도 `user_info` 키를 사용해 두 필드가 충돌했습니다.
//! 계정은 `account` 키로 내보냅니다.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Account, UserInfo};
use crate::errors::{AppError, AppResult, ErrorContext};

/// 로그인 응답
///
/// 요청 단위로 만들어지는 일시적인 투영이며 영속되지 않습니다.
/// 기본값은 빈 토큰과 기본 생성된 집합체입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    /// Bearer 토큰 (JWT)
    pub token: String,
    pub user_info: UserInfo,
    pub account: Account,
}

/// protobuf 와이어 표현
///
/// 세 필드 모두 필수 필드이므로 빈 값이어도 인코딩 시 항상 기록됩니다.
#[derive(Clone, PartialEq, Message)]
struct LoginResponseWire {
    #[prost(string, optional, tag = "1")]
    token: Option<String>,
    #[prost(message, optional, tag = "2")]
    user_info: Option<UserInfo>,
    #[prost(message, optional, tag = "3")]
    account: Option<Account>,
}

impl LoginResponse {
    pub fn new(token: impl Into<String>, user_info: UserInfo, account: Account) -> Self {
        Self {
            token: token.into(),
            user_info,
            account,
        }
    }

    /// JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self).context("login response json")
    }

    /// protobuf 바이트로 인코딩합니다.
    pub fn encode_binary(&self) -> Vec<u8> {
        LoginResponseWire {
            token: Some(self.token.clone()),
            user_info: Some(self.user_info.clone()),
            account: Some(self.account.clone()),
        }
        .encode_to_vec()
    }

    /// protobuf 바이트를 디코딩합니다.
    ///
    /// 필수 필드인 토큰(tag 1), 사용자 정보(tag 2), 계정(tag 3) 중 하나라도 없으면
    /// [`AppError::Decode`]를 반환합니다.
    pub fn decode_binary(bytes: &[u8]) -> AppResult<Self> {
        let wire = LoginResponseWire::decode(bytes)?;

        let token = wire
            .token
            .ok_or_else(|| AppError::Decode("missing required field token (tag 1)".to_string()))?;

        let user_info = wire
            .user_info
            .ok_or_else(|| AppError::Decode("missing required field user_info (tag 2)".to_string()))?;
        let account = wire
            .account
            .ok_or_else(|| AppError::Decode("missing required field account (tag 3)".to_string()))?;

        Ok(Self {
            token,
            user_info,
            account,
        })
    }
}
