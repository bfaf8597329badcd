//! 광고 저장소 에러

#[derive(Debug)]
pub enum AdsError {
    /// 해당 id의 광고 없음
    NotFound(u64),
    /// 잘못된 입력 (이미지 형식, 크기 등)
    InvalidInput(String),
    /// 파일 읽기/쓰기 실패
    IoError(std::io::Error),
    /// JSON 파싱 실패
    ParseError(String),
}

impl std::fmt::Display for AdsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdsError::NotFound(_) => f.write_str("Reklama topilmadi"),
            AdsError::InvalidInput(s) => f.write_str(s),
            AdsError::IoError(e) => write!(f, "파일 입출력 오류: {}", e),
            AdsError::ParseError(s) => write!(f, "JSON 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for AdsError {}

impl From<std::io::Error> for AdsError {
    fn from(e: std::io::Error) -> Self {
        AdsError::IoError(e)
    }
}

impl From<serde_json::Error> for AdsError {
    fn from(e: serde_json::Error) -> Self {
        AdsError::ParseError(e.to_string())
    }
}
