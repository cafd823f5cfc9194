//! 로그인 응답에 실리는 사용자 정보 집합체

use serde::{Deserialize, Serialize};

/// 사용자 공개 정보
///
/// 로그인 응답에 값으로 복사되어 전달되며, 프로필 엔티티와 소유 관계를 갖지 않습니다.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct UserInfo {
    /// 내부 계정 식별자
    #[prost(int64, tag = "1")]
    pub uid: i64,

    #[prost(string, tag = "2")]
    pub username: String,

    /// 프로필 이미지 URL
    #[prost(string, tag = "3")]
    pub logo: String,

    /// 한 줄 소개
    #[prost(string, tag = "4")]
    pub motto: String,

    /// 연결된 GitHub 숫자 ID (없으면 0)
    #[prost(int64, tag = "5")]
    pub github_id: i64,
}
