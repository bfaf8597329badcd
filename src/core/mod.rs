//! 변환 엔진: 규칙 테이블과 순차 치환 파이프라인

pub mod converter;
pub mod rules;
pub mod unicode;
