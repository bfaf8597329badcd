//! 본문 XML(word/document.xml) 읽기/쓰기
//!
//! 문단을 파싱할 때 원본 바이트 위치를 기록해 두고,
//! 다시 쓸 때는 바꾼 문단 구간만 교체하여 나머지 바이트를 그대로 보존합니다.
//! 요소 이름은 접두사가 아니라 네임스페이스로 판별합니다.

use std::ops::Range;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::error::DocumentError;
use super::model::{Paragraph, Run, RunFormat};

/// WordprocessingML 네임스페이스
const WORD_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

type XmlReader<'a> = NsReader<&'a [u8]>;

/// 파싱 중인 문단 상태
struct ParagraphBuilder {
    /// 문단 요소의 스택 깊이
    level: usize,
    start: usize,
    start_tag: Range<usize>,
    prefix: String,
    properties_start: Option<usize>,
    properties: Option<Range<usize>>,
    runs: Vec<Run>,
    /// 열려 있는 런과 그 스택 깊이
    run: Option<(usize, Run)>,
    in_text: bool,
    in_run_properties: bool,
}

impl ParagraphBuilder {
    fn new(level: usize, start_tag: Range<usize>, prefix: String) -> Self {
        Self {
            level,
            start: start_tag.start,
            start_tag,
            prefix,
            properties_start: None,
            properties: None,
            runs: Vec::new(),
            run: None,
            in_text: false,
            in_run_properties: false,
        }
    }

    fn finish(self, end: usize) -> Paragraph {
        Paragraph {
            span: self.start..end,
            start_tag: self.start_tag,
            properties: self.properties,
            prefix: self.prefix,
            runs: self.runs,
        }
    }

    /// 문단 안에서 요소가 열림 (`depth` = 열리기 전 스택 깊이)
    ///
    /// 런은 하이퍼링크 등으로 감싸져 있어도 수집하지만,
    /// 런 안에 중첩된 런(텍스트 상자)은 무시합니다.
    fn open(
        &mut self,
        reader: &XmlReader,
        e: &BytesStart,
        name: Option<&[u8]>,
        depth: usize,
        span: Range<usize>,
        empty: bool,
    ) -> Result<(), DocumentError> {
        // 다른 네임스페이스 요소 (mc:, w14: ...)
        let Some(name) = name else {
            return Ok(());
        };

        let Some((run_level, run)) = self.run.as_mut() else {
            match name {
                b"pPr" if depth == self.level + 1 => {
                    if empty {
                        self.properties = Some(span);
                    } else {
                        self.properties_start = Some(span.start);
                    }
                }
                b"r" if empty => self.runs.push(Run::default()),
                b"r" => self.run = Some((depth, Run::default())),
                _ => {}
            }
            return Ok(());
        };

        if depth == *run_level + 1 {
            // 런의 직계 자식
            match name {
                b"t" if !empty => self.in_text = true,
                b"tab" => run.text.push('\t'),
                b"br" | b"cr" => run.text.push('\n'),
                b"rPr" if !empty => self.in_run_properties = true,
                _ => {}
            }
        } else if depth == *run_level + 2 && self.in_run_properties {
            read_format_property(reader, e, name, &mut run.format)?;
        }

        Ok(())
    }

    /// 문단 안에서 요소가 닫힘 (`depth` = 닫힌 뒤 스택 깊이)
    fn close(&mut self, name: Option<&[u8]>, depth: usize, end: usize) {
        let Some(name) = name else {
            return;
        };

        if let Some((run_level, _)) = &self.run {
            let run_level = *run_level;
            if depth == run_level && name == b"r" {
                if let Some((_, run)) = self.run.take() {
                    self.runs.push(run);
                }
            } else if depth == run_level + 1 {
                match name {
                    b"t" => self.in_text = false,
                    b"rPr" => self.in_run_properties = false,
                    _ => {}
                }
            }
            return;
        }

        if depth == self.level + 1 && name == b"pPr" {
            if let Some(start) = self.properties_start.take() {
                self.properties = Some(start..end);
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.in_text {
            return;
        }
        if let Some((_, run)) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// 본문(`w:body`)의 직계 자식 문단을 모두 파싱
///
/// 표, 텍스트 상자 안의 문단은 포함하지 않습니다.
/// WordprocessingML 본문이 없으면 `InvalidInput`.
pub fn parse_paragraphs(xml: &[u8]) -> Result<Vec<Paragraph>, DocumentError> {
    let mut reader = NsReader::from_reader(xml);
    // WordprocessingML 요소면 로컬 이름, 아니면 None
    let mut stack: Vec<Option<Vec<u8>>> = Vec::new();
    let mut current: Option<ParagraphBuilder> = None;
    let mut paragraphs = Vec::new();
    let mut has_body = false;

    loop {
        let before = reader.buffer_position() as usize;
        let (ns, event) = reader.read_resolved_event()?;
        let in_word = is_word_namespace(&ns);
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let depth = stack.len();
                let name = in_word.then(|| e.local_name().as_ref().to_vec());
                if let Some(builder) = current.as_mut() {
                    builder.open(&reader, &e, name.as_deref(), depth, before..after, false)?;
                } else if is_body_paragraph(name.as_deref(), &stack) {
                    current = Some(ParagraphBuilder::new(depth, before..after, prefix_of(&e)));
                }
                has_body |= name.as_deref() == Some(b"body".as_slice());
                stack.push(name);
            }
            Event::Empty(e) => {
                let depth = stack.len();
                let name = in_word.then(|| e.local_name().as_ref().to_vec());
                if let Some(builder) = current.as_mut() {
                    builder.open(&reader, &e, name.as_deref(), depth, before..after, true)?;
                } else if is_body_paragraph(name.as_deref(), &stack) {
                    let builder = ParagraphBuilder::new(depth, before..after, prefix_of(&e));
                    paragraphs.push(builder.finish(after));
                }
                has_body |= name.as_deref() == Some(b"body".as_slice());
            }
            Event::End(e) => {
                stack.pop();
                let depth = stack.len();
                let closes_paragraph = current.as_ref().is_some_and(|b| b.level == depth);
                if closes_paragraph {
                    if let Some(builder) = current.take() {
                        paragraphs.push(builder.finish(after));
                    }
                } else if let Some(builder) = current.as_mut() {
                    let name = e.local_name();
                    builder.close(in_word.then_some(name.as_ref()), depth, after);
                }
            }
            Event::Text(t) => {
                if let Some(builder) = current.as_mut() {
                    builder.push_text(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(builder) = current.as_mut() {
                    builder.push_text(&String::from_utf8_lossy(&t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() || !stack.is_empty() {
        return Err(DocumentError::failure("hujjat XML tuzilmasi tugallanmagan"));
    }
    if !has_body {
        return Err(DocumentError::invalid_input(
            "Fayl .docx formatida emas: hujjat matni topilmadi",
        ));
    }

    Ok(paragraphs)
}

fn is_word_namespace(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WORD_NS)
}

fn is_body_paragraph(name: Option<&[u8]>, stack: &[Option<Vec<u8>>]) -> bool {
    name == Some(b"p".as_slice()) && matches!(stack.last(), Some(Some(parent)) if parent == b"body")
}

/// 요소의 접두사 (`w:`), 없으면 빈 문자열
fn prefix_of(e: &BytesStart) -> String {
    e.name()
        .prefix()
        .map(|p| format!("{}:", String::from_utf8_lossy(p.as_ref())))
        .unwrap_or_default()
}

/// `w:rPr` 의 자식 요소 하나를 서식에 반영
fn read_format_property(
    reader: &XmlReader,
    e: &BytesStart,
    name: &[u8],
    format: &mut RunFormat,
) -> Result<(), DocumentError> {
    match name {
        b"b" => format.bold = Some(toggle_value(reader, e)?),
        b"i" => format.italic = Some(toggle_value(reader, e)?),
        b"u" => {
            format.underline = Some(attribute(reader, e, b"val")?.unwrap_or_else(|| "single".into()))
        }
        b"rFonts" => {
            format.font_name = match attribute(reader, e, b"ascii")? {
                Some(name) => Some(name),
                None => attribute(reader, e, b"hAnsi")?,
            };
        }
        b"sz" => {
            format.font_size = attribute(reader, e, b"val")?.and_then(|v| v.parse().ok());
        }
        _ => {}
    }
    Ok(())
}

/// WordprocessingML 속성 값 (접두사 없는 속성도 허용)
fn attribute(
    reader: &XmlReader,
    e: &BytesStart,
    key: &[u8],
) -> Result<Option<String>, DocumentError> {
    for attr in e.attributes() {
        let attr = attr?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let in_word = match ns {
            ResolveResult::Bound(Namespace(uri)) => uri == WORD_NS,
            ResolveResult::Unbound => true,
            ResolveResult::Unknown(_) => false,
        };
        if in_word && local.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// `<w:b/>`, `<w:b w:val="0"/>` 형태의 on/off 속성 값
fn toggle_value(reader: &XmlReader, e: &BytesStart) -> Result<bool, DocumentError> {
    Ok(match attribute(reader, e, b"val")?.as_deref() {
        Some("0") | Some("false") | Some("off") => false,
        _ => true,
    })
}

/// 문단을 런 하나짜리 문단으로 다시 씀
///
/// 원본 여는 태그와 문단 속성(`w:pPr`)은 바이트 그대로 유지하고,
/// 새 요소에는 원본 문단과 같은 접두사를 씁니다.
pub fn render_paragraph(source: &[u8], paragraph: &Paragraph, run: &Run) -> Vec<u8> {
    let mut out = Vec::with_capacity(paragraph.span.len() + run.text.len());
    out.extend_from_slice(&source[paragraph.start_tag.clone()]);
    if let Some(properties) = &paragraph.properties {
        out.extend_from_slice(&source[properties.clone()]);
    }
    out.extend_from_slice(render_run(run, &paragraph.prefix).as_bytes());
    out.extend_from_slice(format!("</{}p>", paragraph.prefix).as_bytes());
    out
}

/// 런 XML 생성 (\t → w:tab, \n → w:br)
pub fn render_run(run: &Run, prefix: &str) -> String {
    let mut xml = format!("<{}r>", prefix);
    xml.push_str(&render_run_properties(&run.format, prefix));

    let mut segment = String::new();
    for c in run.text.chars() {
        match c {
            '\t' | '\n' => {
                push_text_element(&mut xml, &segment, prefix);
                segment.clear();
                let tag = if c == '\t' { "tab" } else { "br" };
                xml.push_str(&format!("<{}{}/>", prefix, tag));
            }
            _ => segment.push(c),
        }
    }
    push_text_element(&mut xml, &segment, prefix);

    xml.push_str(&format!("</{}r>", prefix));
    xml
}

fn push_text_element(xml: &mut String, text: &str, p: &str) {
    if text.is_empty() {
        return;
    }
    xml.push_str(&format!("<{p}t xml:space=\"preserve\">{}</{p}t>", escape(text)));
}

/// 서식 요소는 스키마 순서(rFonts, b, i, sz, u)를 따름
fn render_run_properties(format: &RunFormat, p: &str) -> String {
    if format.is_empty() {
        return String::new();
    }

    let mut xml = format!("<{p}rPr>");
    if let Some(font) = &format.font_name {
        let font = escape(font.as_str());
        xml.push_str(&format!("<{p}rFonts {p}ascii=\"{font}\" {p}hAnsi=\"{font}\"/>"));
    }
    if let Some(bold) = format.bold {
        let val = if bold { String::new() } else { format!(" {p}val=\"0\"") };
        xml.push_str(&format!("<{p}b{val}/>"));
    }
    if let Some(italic) = format.italic {
        let val = if italic { String::new() } else { format!(" {p}val=\"0\"") };
        xml.push_str(&format!("<{p}i{val}/>"));
    }
    if let Some(size) = format.font_size {
        xml.push_str(&format!("<{p}sz {p}val=\"{size}\"/>"));
    }
    if let Some(underline) = &format.underline {
        xml.push_str(&format!("<{p}u {p}val=\"{}\"/>", escape(underline.as_str())));
    }
    xml.push_str(&format!("</{p}rPr>"));
    xml
}

/// 원본 바이트에서 지정 구간들을 교체
///
/// 구간은 서로 겹치지 않고 시작 위치 순으로 정렬되어 있어야 합니다.
pub fn splice(source: &[u8], replacements: Vec<(Range<usize>, Vec<u8>)>) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut cursor = 0;
    for (range, bytes) in replacements {
        out.extend_from_slice(&source[cursor..range.start]);
        out.extend_from_slice(&bytes);
        cursor = range.end;
    }
    out.extend_from_slice(&source[cursor..]);
    out
}
