pub mod ads;
pub mod config;
pub mod core;
pub mod detection;
pub mod document;
pub mod storage;
pub mod worker;

pub use core::converter::{convert, to_cyrillic, to_latin, Direction};
pub use detection::{classify, Script};
pub use document::{convert_docx_file, convert_document, DocumentError, RequestedDirection};
