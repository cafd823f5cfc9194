//! 계정 관련 DTO
//!
//! 로그인 엔드포인트가 반환하는 [`login_response::LoginResponse`]를 제공합니다.

pub mod login_response;

pub use login_response::LoginResponse;
