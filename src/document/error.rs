//! 문서 변환 에러

use quick_xml::events::attributes::AttrError;

/// 문서 변환 실패
///
/// 표시 문자열은 사용자에게 그대로 보여주는 메시지입니다.
#[derive(Debug)]
pub enum DocumentError {
    /// 빈 입력, 확장자 불일치, ZIP/DOCX 형식이 아닌 파일
    InvalidInput(String),
    /// 문서 재작성 중 예기치 못한 오류 (손상된 컨테이너, 예상 밖 구조)
    ConversionFailure(String),
}

impl DocumentError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DocumentError::InvalidInput(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        DocumentError::ConversionFailure(message.into())
    }

    /// 호출자 책임으로 돌릴 입력 오류인지
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DocumentError::InvalidInput(_))
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::InvalidInput(s) => write!(f, "{}", s),
            DocumentError::ConversionFailure(s) => write!(f, "DOCX konvertatsiyada xatolik: {}", s),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<std::io::Error> for DocumentError {
    fn from(e: std::io::Error) -> Self {
        DocumentError::ConversionFailure(e.to_string())
    }
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(e: zip::result::ZipError) -> Self {
        DocumentError::ConversionFailure(e.to_string())
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(e: quick_xml::Error) -> Self {
        DocumentError::ConversionFailure(format!("XML: {}", e))
    }
}

impl From<AttrError> for DocumentError {
    fn from(e: AttrError) -> Self {
        DocumentError::ConversionFailure(format!("XML atributi: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = DocumentError::invalid_input("Faqat .docx fayllarni yuklash mumkin");
        assert_eq!(e.to_string(), "Faqat .docx fayllarni yuklash mumkin");
        assert!(e.is_invalid_input());

        let e = DocumentError::failure("buzilgan arxiv");
        assert_eq!(e.to_string(), "DOCX konvertatsiyada xatolik: buzilgan arxiv");
        assert!(!e.is_invalid_input());
    }

    #[test]
    fn test_io_error_is_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let e: DocumentError = io.into();
        assert!(matches!(e, DocumentError::ConversionFailure(_)));
    }
}
