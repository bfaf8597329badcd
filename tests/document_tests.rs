//! 통합 테스트 - DOCX 문서 변환

use std::io::{Cursor, Read, Write};

use latinify::document::{
    convert_document, convert_docx_file, partial_path, read_document, DocumentError,
    RequestedDirection,
};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Default Extension="png" ContentType="image/png"/>"#,
    r#"</Types>"#,
);

const RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:styleId="Normal"/></w:styles>"#;

const BLANK_PARAGRAPH: &str = r#"<w:p><w:r><w:t xml:space="preserve">  </w:t></w:r></w:p>"#;

const TABLE: &str = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>jadval</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;

const SECTION: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>"#;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

fn document_xml() -> String {
    [
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#,
        r#"<w:r><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/><w:b/><w:sz w:val="28"/><w:u w:val="single"/></w:rPr><w:t xml:space="preserve">Salom </w:t></w:r>"#,
        r#"<w:r><w:rPr><w:i/></w:rPr><w:t>dunyo</w:t></w:r></w:p>"#,
        BLANK_PARAGRAPH,
        r#"<w:p><w:r><w:t>Ўзбекистон</w:t></w:r></w:p>"#,
        TABLE,
        SECTION,
        r#"</w:body></w:document>"#,
    ]
    .concat()
}

fn build_docx(entries: &[(&str, &[u8], CompressionMethod)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes, method) in entries {
        let options = SimpleFileOptions::default().compression_method(*method);
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn sample_docx() -> Vec<u8> {
    let xml = document_xml();
    build_docx(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes(), CompressionMethod::Deflated),
        ("_rels/.rels", RELS.as_bytes(), CompressionMethod::Deflated),
        ("word/document.xml", xml.as_bytes(), CompressionMethod::Deflated),
        ("word/styles.xml", STYLES.as_bytes(), CompressionMethod::Deflated),
        ("word/media/image1.png", PNG, CompressionMethod::Stored),
    ])
}

fn entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Vec<u8> {
    let mut file = archive.by_name(name).unwrap();
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_paragraphs_converted_in_place() {
    let input = sample_docx();
    let result = convert_document(&input, RequestedDirection::Auto).unwrap();

    assert_eq!(result.paragraphs, 3);
    assert_eq!(result.converted, 2);

    let document = read_document(&result.bytes).unwrap();
    assert_eq!(document.texts(), vec!["Салом дунё", "  ", "O'zbekiston"]);
}

#[test]
fn test_converted_run_inherits_first_format() {
    let input = sample_docx();
    let result = convert_document(&input, RequestedDirection::Auto).unwrap();
    let document = read_document(&result.bytes).unwrap();

    let first = &document.paragraphs[0];
    assert_eq!(first.runs.len(), 1);
    let format = &first.runs[0].format;
    assert_eq!(format.bold, Some(true));
    assert_eq!(format.italic, None);
    assert_eq!(format.underline.as_deref(), Some("single"));
    assert_eq!(format.font_name.as_deref(), Some("Times New Roman"));
    assert_eq!(format.font_size, Some(28));
}

#[test]
fn test_untouched_structure_is_byte_identical() {
    let input = sample_docx();
    let result = convert_document(&input, RequestedDirection::Auto).unwrap();

    let mut original = ZipArchive::new(Cursor::new(input.as_slice())).unwrap();
    let mut converted = ZipArchive::new(Cursor::new(result.bytes.as_slice())).unwrap();

    let names: Vec<String> = original.file_names().map(str::to_string).collect();
    let converted_names: Vec<String> = converted.file_names().map(str::to_string).collect();
    assert_eq!(names.len(), converted_names.len());

    for name in ["[Content_Types].xml", "_rels/.rels", "word/styles.xml", "word/media/image1.png"] {
        assert_eq!(entry(&mut original, name), entry(&mut converted, name), "{}", name);
    }
    assert_eq!(
        converted.by_name("word/media/image1.png").unwrap().compression(),
        CompressionMethod::Stored
    );

    let xml = String::from_utf8(entry(&mut converted, "word/document.xml")).unwrap();
    assert!(xml.contains(BLANK_PARAGRAPH));
    assert!(xml.contains(TABLE));
    assert!(xml.contains(SECTION));
    assert!(xml.contains(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r>"#));
}

#[test]
fn test_explicit_direction_applies_to_every_paragraph() {
    let input = sample_docx();
    let result = convert_document(&input, RequestedDirection::LatinToCyrillic).unwrap();
    let document = read_document(&result.bytes).unwrap();
    // 이미 키릴인 문단은 라틴→키릴 규칙이 적용되어도 그대로
    assert_eq!(document.texts()[2], "Ўзбекистон");
    assert_eq!(document.texts()[0], "Салом дунё");
}

#[test]
fn test_main_part_without_relationships() {
    let xml = document_xml();
    let input = build_docx(&[("word/document.xml", xml.as_bytes(), CompressionMethod::Stored)]);
    let result = convert_document(&input, RequestedDirection::Auto).unwrap();
    assert_eq!(result.converted, 2);
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(
        convert_document(b"", RequestedDirection::Auto),
        Err(DocumentError::InvalidInput(_))
    ));
    assert!(matches!(
        convert_document(b"oddiy matn", RequestedDirection::Auto),
        Err(DocumentError::InvalidInput(_))
    ));

    let no_document = build_docx(&[("word/styles.xml", STYLES.as_bytes(), CompressionMethod::Deflated)]);
    assert!(convert_document(&no_document, RequestedDirection::Auto)
        .unwrap_err()
        .is_invalid_input());
}

#[test]
fn test_main_part_without_word_body_is_invalid_input() {
    let input = build_docx(&[(
        "word/document.xml",
        br#"<w:document xmlns:w="urn:boshqa"><w:body><w:p/></w:body></w:document>"#,
        CompressionMethod::Deflated,
    )]);
    let err = convert_document(&input, RequestedDirection::Auto).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_truncated_xml_is_conversion_failure() {
    let input = build_docx(&[(
        "word/document.xml",
        br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>salom"#,
        CompressionMethod::Deflated,
    )]);
    let err = convert_document(&input, RequestedDirection::Auto).unwrap_err();
    assert!(!err.is_invalid_input());
}

#[test]
fn test_convert_docx_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hujjat.docx");
    let output = dir.path().join("converted_hujjat.docx");
    std::fs::write(&input, sample_docx()).unwrap();

    let result = convert_docx_file(&input, &output, RequestedDirection::Auto).unwrap();
    assert_eq!(std::fs::read(&output).unwrap(), result.bytes);
    assert!(!partial_path(&output).exists());
}

#[test]
fn test_failed_conversion_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("buzuq.docx");
    let output = dir.path().join("converted_buzuq.docx");
    std::fs::write(&input, "docx emas").unwrap();

    assert!(convert_docx_file(&input, &output, RequestedDirection::Auto).is_err());
    assert!(!output.exists());
    assert!(!partial_path(&output).exists());
}
