//! 문서 데이터 모델: 문단과 런

use std::ops::Range;

/// 런 서식 (None 이면 상속/미지정)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// 밑줄 종류 (single, double, none ...)
    pub underline: Option<String>,
    pub font_name: Option<String>,
    /// 글자 크기 (half-point 단위, 11pt = 22)
    pub font_size: Option<u32>,
}

impl RunFormat {
    /// 지정된 속성이 하나도 없는지
    pub fn is_empty(&self) -> bool {
        self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.font_name.is_none()
            && self.font_size.is_none()
    }
}

/// 같은 서식을 가진 텍스트 구간
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
}

impl Run {
    pub fn new(text: impl Into<String>, format: RunFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// 본문 문단
///
/// 원본 XML 안의 바이트 위치를 함께 보관하여,
/// 변환하지 않는 영역은 원본 바이트를 그대로 복사할 수 있게 합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// `<w:p ...>` 부터 `</w:p>` 까지 전체 구간
    pub span: Range<usize>,
    /// 여는 태그 `<w:p ...>` 구간
    pub start_tag: Range<usize>,
    /// 문단 속성 `<w:pPr>...</w:pPr>` 구간
    pub properties: Option<Range<usize>>,
    /// 문단 요소의 이름 접두사 (`w:`, 기본 네임스페이스면 빈 문자열)
    pub prefix: String,
    /// 런 목록 (하이퍼링크 등으로 감싼 런 포함)
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// 모든 런의 텍스트를 이어 붙인 문단 텍스트
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// 비어 있거나 공백만 있는 문단인지
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// 첫 번째 런의 서식
    pub fn first_format(&self) -> Option<&RunFormat> {
        self.runs.first().map(|r| &r.format)
    }
}

/// 본문 문단 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// 문단 텍스트 목록
    pub fn texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}
