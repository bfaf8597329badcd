//! DOCX 문서 변환 모듈
//!
//! 본문 문단마다 변환 엔진을 적용하고, 문단 밖의 구조(스타일, 머리글, 이미지, 표)는
//! 바이트 그대로 보존합니다.
//!
//! # 사용 예시
//!
//! ```no_run
//! use latinify::document::{convert_document, RequestedDirection};
//!
//! let input = std::fs::read("hujjat.docx").unwrap();
//! let result = convert_document(&input, RequestedDirection::Auto).unwrap();
//! std::fs::write("converted_hujjat.docx", result.bytes).unwrap();
//! ```

mod adapter;
mod error;
mod model;
mod package;
mod xml;

pub use adapter::{
    convert_docx_file, convert_document, convert_paragraph, partial_path, read_document,
    ConvertedDocument, RequestedDirection,
};
pub use error::DocumentError;
pub use model::{Document, Paragraph, Run, RunFormat};
