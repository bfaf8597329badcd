//! DOCX(ZIP) 컨테이너 처리
//!
//! 본문 파트만 다시 쓰고, 나머지 항목은 압축된 바이트 그대로 복사합니다.

use std::io::{Cursor, Read, Write};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::DocumentError;

/// 패키지 관계 파일
const PACKAGE_RELS: &str = "_rels/.rels";
/// 관계 파일이 없을 때의 본문 파트 경로
const DEFAULT_MAIN_PART: &str = "word/document.xml";
/// 본문 파트를 가리키는 관계 유형 접미사
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
/// 압축 해제한 본문 파트의 최대 크기
const MAIN_PART_LIMIT: u64 = 64 * 1024 * 1024;

/// 바이트로 읽어 들인 DOCX 패키지
pub struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    main_part: String,
}

impl<'a> Package<'a> {
    /// ZIP 컨테이너를 열고 본문 파트 위치를 찾음
    pub fn open(bytes: &'a [u8]) -> Result<Self, DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::invalid_input("Fayl bo'sh"));
        }

        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|_| DocumentError::invalid_input("Fayl .docx formatida emas"))?;

        let main_part = locate_main_part(&mut archive)?;
        if archive.index_for_name(&main_part).is_none() {
            return Err(DocumentError::invalid_input(
                "Fayl .docx formatida emas: hujjat matni topilmadi",
            ));
        }

        Ok(Self { archive, main_part })
    }

    /// 본문 파트 XML 읽기
    pub fn read_main_part(&mut self) -> Result<Vec<u8>, DocumentError> {
        self.read_main_part_limited(MAIN_PART_LIMIT)
    }

    /// 압축 해제 크기가 `limit` 를 넘으면 `InvalidInput`
    ///
    /// 헤더에 적힌 크기는 믿지 않고 실제로 읽은 바이트 수로 판단합니다.
    fn read_main_part_limited(&mut self, limit: u64) -> Result<Vec<u8>, DocumentError> {
        let file = self.archive.by_name(&self.main_part)?;
        if file.size() > limit {
            return Err(DocumentError::invalid_input("Hujjat hajmi juda katta"));
        }

        let mut xml = Vec::with_capacity(file.size() as usize);
        file.take(limit + 1).read_to_end(&mut xml)?;
        if xml.len() as u64 > limit {
            return Err(DocumentError::invalid_input("Hujjat hajmi juda katta"));
        }
        Ok(xml)
    }

    /// 본문 파트를 교체한 새 패키지 생성
    ///
    /// 다른 항목은 압축 해제 없이 원본 순서대로 그대로 복사됩니다.
    pub fn rewrite_main_part(mut self, main_xml: &[u8]) -> Result<Vec<u8>, DocumentError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for index in 0..self.archive.len() {
            let file = self.archive.by_index_raw(index)?;
            if file.name() != self.main_part {
                writer.raw_copy_file(file)?;
                continue;
            }

            let method = match file.compression() {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            drop(file);

            let options = SimpleFileOptions::default().compression_method(method);
            writer.start_file(self.main_part.as_str(), options)?;
            writer.write_all(main_xml)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// `_rels/.rels` 에서 본문 파트 경로를 찾음
fn locate_main_part(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String, DocumentError> {
    let rels = match archive.by_name(PACKAGE_RELS) {
        Ok(mut file) => {
            let mut xml = Vec::new();
            file.read_to_end(&mut xml)?;
            xml
        }
        Err(_) => return Ok(DEFAULT_MAIN_PART.to_string()),
    };

    Ok(office_document_target(&rels)?.unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()))
}

/// 관계 XML에서 officeDocument 대상 경로 추출 (앞의 '/' 제거)
fn office_document_target(rels: &[u8]) -> Result<Option<String>, DocumentError> {
    let mut reader = Reader::from_reader(rels);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let rel_type = match e.try_get_attribute("Type")? {
                    Some(attr) => attr.unescape_value()?.into_owned(),
                    None => continue,
                };
                if !rel_type.ends_with(OFFICE_DOCUMENT_REL) {
                    continue;
                }
                if let Some(attr) = e.try_get_attribute("Target")? {
                    let target = attr.unescape_value()?;
                    return Ok(Some(target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
