//! 로그인 응답에 실리는 계정 집합체

use serde::{Deserialize, Serialize};

/// 계정 상태 및 권한 정보
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Account {
    #[prost(int64, tag = "1")]
    pub id: i64,

    #[prost(int64, tag = "2")]
    pub uid: i64,

    #[prost(string, tag = "3")]
    pub email: String,

    /// 계정 상태 코드
    #[prost(int32, tag = "4")]
    pub status: i32,

    /// 권한 코드
    #[prost(int32, tag = "5")]
    pub role: i32,

    /// 마지막 로그인 시각 (epoch millis)
    #[prost(int64, tag = "6")]
    pub last_login: i64,
}
