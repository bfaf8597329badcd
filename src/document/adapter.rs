//! DOCX 문단 단위 변환
//!
//! 문단 하나를 변환 단위로 취급합니다: 모든 런의 텍스트를 이어 붙여 변환한 뒤,
//! 첫 번째 원본 런의 서식(굵게, 기울임, 밑줄, 글꼴, 크기)을 가진 런 하나로 교체합니다.
//! 런 경계마다 달랐던 서식은 변환 후 사라집니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::converter::{to_cyrillic, to_latin};
use crate::detection::{classify, Script};

use super::error::DocumentError;
use super::model::{Document, Paragraph, Run};
use super::package::Package;
use super::xml::{parse_paragraphs, render_paragraph, splice};

/// 요청된 변환 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedDirection {
    /// 문단마다 문자 체계를 판별
    #[default]
    Auto,
    LatinToCyrillic,
    CyrillicToLatin,
}

impl RequestedDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestedDirection::Auto => "auto",
            RequestedDirection::LatinToCyrillic => "latin_to_cyrillic",
            RequestedDirection::CyrillicToLatin => "cyrillic_to_latin",
        }
    }

    /// 텍스트 하나에 방향을 적용
    pub fn apply(&self, text: &str) -> String {
        match self {
            RequestedDirection::LatinToCyrillic => to_cyrillic(text),
            RequestedDirection::CyrillicToLatin => to_latin(text),
            RequestedDirection::Auto => match classify(text) {
                Script::Latin => to_cyrillic(text),
                Script::Cyrillic => to_latin(text),
            },
        }
    }
}

impl FromStr for RequestedDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "auto" | "" => Ok(RequestedDirection::Auto),
            "latin_to_cyrillic" | "cyrillic" => Ok(RequestedDirection::LatinToCyrillic),
            "cyrillic_to_latin" | "latin" => Ok(RequestedDirection::CyrillicToLatin),
            other => Err(format!("Noma'lum yo'nalish: {}", other)),
        }
    }
}

impl std::fmt::Display for RequestedDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 문단 하나를 변환한 런 생성
///
/// 비어 있거나 공백만 있는 문단은 None (원본 그대로 둠)
pub fn convert_paragraph(paragraph: &Paragraph, direction: RequestedDirection) -> Option<Run> {
    if paragraph.is_blank() {
        return None;
    }

    let text = direction.apply(&paragraph.text());
    let format = paragraph.first_format().cloned().unwrap_or_default();
    Some(Run::new(text, format))
}

/// 변환 결과
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    /// 새 DOCX 바이트
    pub bytes: Vec<u8>,
    /// 본문 문단 수
    pub paragraphs: usize,
    /// 다시 쓴 문단 수
    pub converted: usize,
}

/// DOCX 바이트를 변환하여 새 DOCX 바이트 생성
pub fn convert_document(
    input: &[u8],
    direction: RequestedDirection,
) -> Result<ConvertedDocument, DocumentError> {
    let mut package = Package::open(input)?;
    let xml = package.read_main_part()?;
    let paragraphs = parse_paragraphs(&xml)?;

    let replacements: Vec<_> = paragraphs
        .iter()
        .filter_map(|p| {
            convert_paragraph(p, direction).map(|run| (p.span.clone(), render_paragraph(&xml, p, &run)))
        })
        .collect();
    let converted = replacements.len();

    let rewritten = splice(&xml, replacements);
    let bytes = package.rewrite_main_part(&rewritten)?;

    Ok(ConvertedDocument {
        bytes,
        paragraphs: paragraphs.len(),
        converted,
    })
}

/// DOCX 바이트에서 본문 문단 읽기
pub fn read_document(input: &[u8]) -> Result<Document, DocumentError> {
    let mut package = Package::open(input)?;
    let xml = package.read_main_part()?;
    Ok(Document {
        paragraphs: parse_paragraphs(&xml)?,
    })
}

/// 파일 단위 변환
///
/// 임시 파일에 쓴 뒤 성공했을 때만 출력 경로로 이동하므로,
/// 실패하면 출력 파일이 남지 않습니다.
pub fn convert_docx_file(
    input: &Path,
    output: &Path,
    direction: RequestedDirection,
) -> Result<ConvertedDocument, DocumentError> {
    let bytes = fs::read(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DocumentError::invalid_input("Fayl topilmadi"),
        _ => DocumentError::from(e),
    })?;

    let result = convert_document(&bytes, direction)?;

    let partial = partial_path(output);
    if let Err(e) = fs::write(&partial, &result.bytes).and_then(|_| fs::rename(&partial, output)) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }

    Ok(result)
}

/// 쓰기 중인 출력 파일 경로 (`converted_x.docx` → `converted_x.docx.part`)
pub fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    output.with_file_name(name)
}
