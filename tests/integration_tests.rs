//! 통합 테스트 - 문자 체계 판별과 변환 엔진

use latinify::{classify, convert, to_cyrillic, to_latin, Direction, Script};

#[test]
fn test_classify_majority() {
    assert_eq!(classify("Assalomu alaykum"), Script::Latin);
    assert_eq!(classify("Ассалому алайкум"), Script::Cyrillic);
    assert_eq!(classify("Ўзбекистон Respublikasi"), Script::Latin);
    assert_eq!(classify("Ўзбекистон Республикаси, 2024 yil"), Script::Cyrillic);
}

#[test]
fn test_classify_tie_and_empty_default_to_latin() {
    assert_eq!(classify("aб"), Script::Latin);
    assert_eq!(classify(""), Script::Latin);
    assert_eq!(classify("123 !?"), Script::Latin);
}

#[test]
fn test_convert_blank_input_unchanged() {
    assert_eq!(convert(""), (String::new(), Direction::None));
    assert_eq!(convert("   \n\t"), ("   \n\t".to_string(), Direction::None));
}

#[test]
fn test_convert_detects_direction() {
    assert_eq!(
        convert("Men o'zbek tilini yaxshi ko'raman"),
        (
            "Мен ўзбек тилини яхши кўраман".to_string(),
            Direction::LatinToCyrillic
        )
    );
    assert_eq!(
        convert("Мен ўзбек тилини яхши кўраман"),
        (
            "Men o'zbek tilini yaxshi ko'raman".to_string(),
            Direction::CyrillicToLatin
        )
    );
}

#[test]
fn test_digraphs_before_letters() {
    assert_eq!(to_cyrillic("sh"), "ш");
    assert_eq!(to_cyrillic("ch"), "ч");
    assert_eq!(to_cyrillic("ng"), "нг");
    assert_eq!(to_cyrillic("o'"), "ў");
    assert_eq!(to_cyrillic("g'"), "ғ");
    assert_eq!(to_cyrillic("Shahar"), "Шаҳар");
    assert_eq!(to_cyrillic("Chiroyli"), "Чиройли");
}

#[test]
fn test_stray_apostrophes_removed() {
    assert_eq!(to_cyrillic("tushunarli'"), "тушунарли");
    assert_eq!(to_cyrillic("ma'no"), "мано");
    assert!(!to_cyrillic("'salom'").contains('\''));
}

#[test]
fn test_apostrophe_glyph_variants() {
    for input in ["o'zbek", "o`zbek", "o\u{2018}zbek", "o\u{2019}zbek", "o\u{02BB}zbek"] {
        assert_eq!(to_cyrillic(input), "ўзбек", "input: {}", input);
    }
    assert_eq!(to_cyrillic("G\u{2018}alaba"), "Ғалаба");
}

#[test]
fn test_round_trip_canonical_apostrophe() {
    assert_eq!(to_latin(&to_cyrillic("o'zbek")), "o'zbek");
    assert_eq!(to_latin(&to_cyrillic("o\u{2018}zbek")), "o'zbek");
    assert_eq!(to_latin(&to_cyrillic("O'zbekiston")), "O'zbekiston");
}

#[test]
fn test_case_fidelity() {
    assert_eq!(to_cyrillic("Sh"), "Ш");
    assert_eq!(to_cyrillic("Yo'l"), "Йўл");
    assert_eq!(to_latin("Шаҳар"), "Shahar");
    assert_eq!(to_latin("Ёшлар"), "Yoshlar");
}

#[test]
fn test_non_letters_pass_through() {
    assert_eq!(to_cyrillic("2024-yil, 5%!"), "2024-йил, 5%!");
    assert_eq!(to_latin("№1 — тест"), "№1 — test");
}

#[test]
fn test_russian_letters_to_latin() {
    assert_eq!(to_latin("цирк"), "tsirk");
    assert_eq!(to_latin("съезд"), "s'ezd");
    assert_eq!(to_latin("Цех"), "Tsex");
}
