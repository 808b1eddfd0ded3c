use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, a hyphen or one of the
/// allowed scripts (Latin extended, Cyrillic, Arabic, CJK, kana, Hangul).
static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[^\w\s\-\x{00C0}-\x{017F}\x{0400}-\x{04FF}\x{0600}-\x{06FF}\x{4E00}-\x{9FFF}\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{AC00}-\x{D7AF}]",
    )
    .expect("disallowed characters pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Clean a raw query into a search safe string.
///
/// Punctuation and symbols become spaces, whitespace runs collapse to one
/// space and the result is trimmed. Non-latin scripts are kept intact.
pub fn normalize_query(query: &str) -> String {
    let replaced = DISALLOWED_CHARS.replace_all(query, " ");
    WHITESPACE_RUN
        .replace_all(&replaced, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize_query("AC/DC - Back in Black!"), "AC DC - Back in Black");
        assert_eq!(normalize_query("what's up?"), "what s up");
        assert_eq!(normalize_query("@#$%"), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_query("  hello \t\n  world  "), "hello world");
        assert_eq!(normalize_query(""), "");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_keeps_non_latin_scripts() {
        assert_eq!(normalize_query("Beyoncé — Halo"), "Beyoncé Halo");
        assert_eq!(normalize_query("Кино «Группа крови»"), "Кино Группа крови");
        assert_eq!(normalize_query("米津玄師 / Lemon"), "米津玄師 Lemon");
        assert_eq!(normalize_query("ヨルシカ「だから僕は音楽を辞めた」"), "ヨルシカ だから僕は音楽を辞めた");
        assert_eq!(normalize_query("방탄소년단 (BTS) Dynamite"), "방탄소년단 BTS Dynamite");
        assert_eq!(normalize_query("عمرو دياب - تملي معاك"), "عمرو دياب - تملي معاك");
    }

    #[test]
    fn test_keeps_hyphen_and_underscore() {
        assert_eq!(normalize_query("jay-z under_score"), "jay-z under_score");
    }

    #[test]
    fn test_idempotent_and_single_spaced() {
        let inputs = [
            "Imagine Dragons - Believer (Official Video)",
            "  ..multiple...dots.. and   spaces ",
            "emoji 🎵 inside 🎶 query",
            "mixed Кино 米津 ＆ full-width！",
            "\u{200b}zero\u{200b}width",
        ];
        for input in inputs {
            let once = normalize_query(input);
            assert_eq!(normalize_query(&once), once, "not idempotent for {input:?}");
            assert!(!once.contains("  "), "double space in {once:?}");
            assert!(once.chars().count() <= input.chars().count());
            assert_eq!(once.trim(), once);
        }
    }
}
