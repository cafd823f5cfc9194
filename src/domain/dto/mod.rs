//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! 엔티티와 달리 영속되지 않으며, 요청 단위로 만들어져 인코딩된 뒤 버려집니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! └── account/
//!     └── login_response.rs   # 로그인 응답 (JSON + protobuf)
//! ```

pub mod account;
