//! 우즈베크어 문자 분류 유틸리티

/// 아포스트로피로 취급하는 문자들
/// ASCII ', 백틱, ‘(U+2018), ’(U+2019), 수식 문자 ʻ(U+02BB)
pub const APOSTROPHE_GLYPHS: [char; 5] = ['\'', '`', '\u{2018}', '\u{2019}', '\u{02BB}'];

/// 라틴→키릴 변환 시 o'/g'로 남기는 정규 아포스트로피
pub const CANONICAL_APOSTROPHE: char = '\'';

/// 우즈베크 키릴 전용 문자 (기본 а-я 범위 밖)
const UZBEK_CYRILLIC_EXTRA: [char; 10] = ['ё', 'ў', 'ғ', 'ҳ', 'қ', 'Ё', 'Ў', 'Ғ', 'Ҳ', 'Қ'];

/// 아포스트로피 계열 문자인지 확인
pub fn is_apostrophe(c: char) -> bool {
    APOSTROPHE_GLYPHS.contains(&c)
}

/// 뒤에 오는 아포스트로피가 oʻ/gʻ 표시가 되는 문자인지 확인
pub fn takes_modifier_mark(c: char) -> bool {
    matches!(c, 'o' | 'O' | 'g' | 'G')
}

/// 키릴 문자 판별 (а-я, А-Я + 우즈베크 전용 문자)
pub fn is_uzbek_cyrillic(c: char) -> bool {
    ('а'..='я').contains(&c) || ('А'..='Я').contains(&c) || UZBEK_CYRILLIC_EXTRA.contains(&c)
}

/// ASCII 라틴 문자 판별 (a-z, A-Z)
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apostrophe_glyphs() {
        assert!(is_apostrophe('\''));
        assert!(is_apostrophe('`'));
        assert!(is_apostrophe('‘'));
        assert!(is_apostrophe('’'));
        assert!(is_apostrophe('ʻ'));
        assert!(!is_apostrophe('"'));
        assert!(!is_apostrophe('a'));
    }

    #[test]
    fn test_cyrillic_range() {
        assert!(is_uzbek_cyrillic('а'));
        assert!(is_uzbek_cyrillic('я'));
        assert!(is_uzbek_cyrillic('Ж'));
        assert!(is_uzbek_cyrillic('ў'));
        assert!(is_uzbek_cyrillic('Қ'));
        assert!(is_uzbek_cyrillic('ё'));

        assert!(!is_uzbek_cyrillic('a')); // 라틴 a
        assert!(!is_uzbek_cyrillic('1'));
        assert!(!is_uzbek_cyrillic('і')); // 우크라이나 і는 범위 밖
    }

    #[test]
    fn test_latin_range() {
        assert!(is_latin_letter('a'));
        assert!(is_latin_letter('Z'));
        assert!(!is_latin_letter('é'));
        assert!(!is_latin_letter('а'));
        assert!(!is_latin_letter('\''));
    }

    #[test]
    fn test_modifier_mark_letters() {
        assert!(takes_modifier_mark('o'));
        assert!(takes_modifier_mark('G'));
        assert!(!takes_modifier_mark('n'));
        assert!(!takes_modifier_mark('ў'));
    }
}
