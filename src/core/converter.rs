//! 라틴 ↔ 키릴 통합 변환기

use serde::{Deserialize, Serialize};

use crate::core::rules::{Rule, CYRILLIC_TO_LATIN, LATIN_TO_CYRILLIC};
use crate::core::unicode::{is_apostrophe, takes_modifier_mark, CANONICAL_APOSTROPHE};
use crate::detection::{classify, Script};

/// 변환 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LatinToCyrillic,
    CyrillicToLatin,
    /// 변환할 문자가 없는 입력 (빈 문자열, 공백만)
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LatinToCyrillic => "latin_to_cyrillic",
            Direction::CyrillicToLatin => "cyrillic_to_latin",
            Direction::None => "none",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 라틴 문자열을 키릴 문자열로 변환
///
/// 아포스트로피 사전 처리 후 규칙 테이블을 순서대로 적용합니다.
/// 입력이 이미 키릴이어도 그대로 테이블을 적용합니다.
pub fn to_cyrillic(text: &str) -> String {
    let normalized = normalize_apostrophes(text);
    apply_rules(normalized, LATIN_TO_CYRILLIC)
}

/// 키릴 문자열을 라틴 문자열로 변환
pub fn to_latin(text: &str) -> String {
    apply_rules(text.to_string(), CYRILLIC_TO_LATIN)
}

/// 문자 체계를 자동 판별하여 반대 체계로 변환
///
/// 빈 문자열이나 공백만 있는 입력은 그대로 `Direction::None` 과 함께 반환
pub fn convert(text: &str) -> (String, Direction) {
    if text.trim().is_empty() {
        return (text.to_string(), Direction::None);
    }

    match classify(text) {
        Script::Latin => (to_cyrillic(text), Direction::LatinToCyrillic),
        Script::Cyrillic => (to_latin(text), Direction::CyrillicToLatin),
    }
}

/// 아포스트로피 사전 처리 (라틴 → 키릴 변환 전 1회)
///
/// o/O/g/G 바로 뒤의 아포스트로피는 oʻ/gʻ 표시이므로 ASCII ' 로 정규화하고,
/// 나머지 아포스트로피는 모두 제거합니다.
fn normalize_apostrophes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if is_apostrophe(c) {
            if prev.is_some_and(takes_modifier_mark) {
                out.push(CANONICAL_APOSTROPHE);
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

/// 규칙을 테이블 순서대로 하나씩 전체 문자열에 적용
/// 각 단계의 입력은 직전 단계의 출력
fn apply_rules(text: String, table: &[Rule]) -> String {
    table.iter().fold(text, |acc, (pattern, replacement)| {
        if acc.contains(*pattern) {
            acc.replace(*pattern, replacement)
        } else {
            acc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(to_cyrillic("salom"), "салом");
        assert_eq!(to_cyrillic("kitob"), "китоб");
        assert_eq!(to_latin("салом"), "salom");
        assert_eq!(to_latin("Тошкент"), "Toshkent");
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(to_cyrillic("sh"), "ш");
        assert_eq!(to_cyrillic("ch"), "ч");
        assert_eq!(to_cyrillic("ng"), "нг");
        assert_eq!(to_cyrillic("shahar"), "шаҳар");
        assert_eq!(to_cyrillic("choy"), "чой");
    }

    #[test]
    fn test_uppercase_digraphs() {
        assert_eq!(to_cyrillic("Sh"), "Ш");
        assert_eq!(to_cyrillic("Shahar"), "Шаҳар");
        assert_eq!(to_cyrillic("Chiroyli"), "Чиройли");
        // 완전 대문자 이중 문자는 테이블에 없음
        assert_eq!(to_cyrillic("SH"), "СҲ");
    }

    #[test]
    fn test_apostrophe_letters() {
        assert_eq!(to_cyrillic("o'"), "ў");
        assert_eq!(to_cyrillic("g'"), "ғ");
        assert_eq!(to_cyrillic("o‘zbek"), "ўзбек");
        assert_eq!(to_cyrillic("O’zbekiston"), "Ўзбекистон");
        assert_eq!(to_cyrillic("tog`"), "тоғ");
        assert_eq!(to_cyrillic("yo'l"), "йўл");
    }

    #[test]
    fn test_stray_apostrophes_removed() {
        assert_eq!(to_cyrillic("tushunarli'"), "тушунарли");
        assert_eq!(to_cyrillic("ma'no"), "мано");
        assert_eq!(to_cyrillic("'salom'"), "салом");
    }

    #[test]
    fn test_normalize_apostrophes() {
        assert_eq!(normalize_apostrophes("o‘g‘il"), "o'g'il");
        assert_eq!(normalize_apostrophes("ma'no"), "mano");
        assert_eq!(normalize_apostrophes("o''"), "o'");
        assert_eq!(normalize_apostrophes(""), "");
    }

    #[test]
    fn test_reverse_canonical_apostrophe() {
        assert_eq!(to_latin("ўзбек"), "o'zbek");
        assert_eq!(to_latin("Ғалаба"), "G'alaba");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(to_cyrillic("2024!"), "2024!");
        assert_eq!(to_latin("2024!"), "2024!");
        assert_eq!(to_cyrillic(""), "");
    }

    #[test]
    fn test_convert_empty() {
        assert_eq!(convert(""), (String::new(), Direction::None));
        assert_eq!(convert("  \n\t"), ("  \n\t".to_string(), Direction::None));
    }

    #[test]
    fn test_convert_auto() {
        let (converted, direction) = convert("Assalomu alaykum");
        assert_eq!(direction, Direction::LatinToCyrillic);
        assert_eq!(converted, "Ассалому алайкум");

        let (converted, direction) = convert("Ассалому алайкум");
        assert_eq!(direction, Direction::CyrillicToLatin);
        assert_eq!(converted, "Assalomu alaykum");
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::LatinToCyrillic.to_string(), "latin_to_cyrillic");
        assert_eq!(Direction::None.as_str(), "none");
        let json = serde_json::to_string(&Direction::CyrillicToLatin).unwrap();
        assert_eq!(json, "\"cyrillic_to_latin\"");
    }
}
