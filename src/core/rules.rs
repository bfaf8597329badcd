//! 라틴 ↔ 키릴 치환 규칙 테이블
//!
//! 각 테이블은 (패턴, 치환) 쌍의 순서 있는 목록입니다.
//! 순서가 곧 정확성 조건입니다: 두 글자 패턴(sh, ch, ng, o', g' ...)은
//! 그 접두/부분 문자열이 되는 한 글자 패턴보다 반드시 앞에 와야 합니다.
//! 대문자는 별도 항목입니다 (Sh → Ш 는 ш 의 대문자화로 유도되지 않음).

/// 치환 규칙 하나: (패턴, 치환)
pub type Rule = (&'static str, &'static str);

/// 라틴 → 키릴
///
/// 입력의 아포스트로피는 사전 처리에서 ASCII ' 로 정규화되므로
/// o'/g' 패턴은 ASCII 형태 하나만 둡니다.
pub const LATIN_TO_CYRILLIC: &[Rule] = &[
    // 아포스트로피 표시 문자 (yo'l → йўл 이 되려면 yo 보다 먼저)
    ("o'", "ў"),
    ("g'", "ғ"),
    ("O'", "Ў"),
    ("G'", "Ғ"),
    // 이중 문자
    ("sh", "ш"),
    ("ch", "ч"),
    ("ng", "нг"),
    ("yo", "ё"),
    ("ya", "я"),
    ("yu", "ю"),
    ("ye", "е"),
    ("Sh", "Ш"),
    ("Ch", "Ч"),
    ("Ng", "Нг"),
    ("Yo", "Ё"),
    ("Ya", "Я"),
    ("Yu", "Ю"),
    ("Ye", "Е"),
    // 한 글자
    ("a", "а"),
    ("b", "б"),
    ("d", "д"),
    ("e", "е"),
    ("f", "ф"),
    ("g", "г"),
    ("h", "ҳ"),
    ("i", "и"),
    ("j", "ж"),
    ("k", "к"),
    ("l", "л"),
    ("m", "м"),
    ("n", "н"),
    ("o", "о"),
    ("p", "п"),
    ("q", "қ"),
    ("r", "р"),
    ("s", "с"),
    ("t", "т"),
    ("u", "у"),
    ("v", "в"),
    ("x", "х"),
    ("y", "й"),
    ("z", "з"),
    ("A", "А"),
    ("B", "Б"),
    ("D", "Д"),
    ("E", "Е"),
    ("F", "Ф"),
    ("G", "Г"),
    ("H", "Ҳ"),
    ("I", "И"),
    ("J", "Ж"),
    ("K", "К"),
    ("L", "Л"),
    ("M", "М"),
    ("N", "Н"),
    ("O", "О"),
    ("P", "П"),
    ("Q", "Қ"),
    ("R", "Р"),
    ("S", "С"),
    ("T", "Т"),
    ("U", "У"),
    ("V", "В"),
    ("X", "Х"),
    ("Y", "Й"),
    ("Z", "З"),
];

/// 키릴 → 라틴
///
/// ў/ғ 는 항상 ASCII 아포스트로피 형태(o', g')로 되돌립니다.
pub const CYRILLIC_TO_LATIN: &[Rule] = &[
    // 여러 글자로 풀리는 문자
    ("ў", "o'"),
    ("ғ", "g'"),
    ("ё", "yo"),
    ("я", "ya"),
    ("ю", "yu"),
    ("ш", "sh"),
    ("ч", "ch"),
    ("Ў", "O'"),
    ("Ғ", "G'"),
    ("Ё", "Yo"),
    ("Я", "Ya"),
    ("Ю", "Yu"),
    ("Ш", "Sh"),
    ("Ч", "Ch"),
    // 한 글자
    ("а", "a"),
    ("б", "b"),
    ("д", "d"),
    ("е", "e"),
    ("ф", "f"),
    ("г", "g"),
    ("ҳ", "h"),
    ("и", "i"),
    ("ж", "j"),
    ("к", "k"),
    ("л", "l"),
    ("м", "m"),
    ("н", "n"),
    ("о", "o"),
    ("п", "p"),
    ("қ", "q"),
    ("р", "r"),
    ("с", "s"),
    ("т", "t"),
    ("у", "u"),
    ("в", "v"),
    ("х", "x"),
    ("й", "y"),
    ("з", "z"),
    ("А", "A"),
    ("Б", "B"),
    ("Д", "D"),
    ("Е", "E"),
    ("Ф", "F"),
    ("Г", "G"),
    ("Ҳ", "H"),
    ("И", "I"),
    ("Ж", "J"),
    ("К", "K"),
    ("Л", "L"),
    ("М", "M"),
    ("Н", "N"),
    ("О", "O"),
    ("П", "P"),
    ("Қ", "Q"),
    ("Р", "R"),
    ("С", "S"),
    ("Т", "T"),
    ("У", "U"),
    ("В", "V"),
    ("Х", "X"),
    ("Й", "Y"),
    ("З", "Z"),
    // 러시아어 차용어 문자
    ("ц", "ts"),
    ("щ", "sh"),
    ("ъ", "'"),
    ("ь", ""),
    ("э", "e"),
    ("ы", "i"),
    ("Ц", "Ts"),
    ("Щ", "Sh"),
    ("Ъ", "'"),
    ("Ь", ""),
    ("Э", "E"),
    ("Ы", "I"),
];
