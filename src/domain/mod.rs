//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 엔티티 및 응답 집합체
//! └── dto       - 데이터 전송 객체
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db, caching)
//! ```

pub mod dto;
pub mod entities;
