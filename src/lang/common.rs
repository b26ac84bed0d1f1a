//! Prefix matchers shared by every line-oriented pass in the crate.

use super::BlockKind;

/// Opener prefixes in match order. `begin`, `quote` and `try` carry no
/// trailing space, so `tryparse(x)` counts as an opener too.
pub(crate) static OPENERS: &[(&str, BlockKind)] = &[
    ("function ", BlockKind::Function),
    ("macro ", BlockKind::Macro),
    ("module ", BlockKind::Module),
    ("struct ", BlockKind::Struct),
    ("mutable struct ", BlockKind::MutableStruct),
    ("begin", BlockKind::Begin),
    ("quote", BlockKind::Quote),
    ("let ", BlockKind::Let),
    ("for ", BlockKind::For),
    ("while ", BlockKind::While),
    ("if ", BlockKind::If),
    ("try", BlockKind::Try),
];

const CLOSER_PREFIXES: &[&str] = &["end ", "end,", "end;"];

/// Strips leading and trailing whitespace.
#[inline]
pub fn trim(line: &str) -> &str {
    line.trim()
}

/// True if the trimmed line begins with any opener prefix.
pub fn is_block_start(line: &str) -> bool {
    let trimmed = trim(line);
    OPENERS.iter().any(|(prefix, _)| trimmed.starts_with(prefix))
}

/// True for a bare `end`, or `end` followed by a space, comma or semicolon.
pub fn is_block_end(line: &str) -> bool {
    let trimmed = trim(line);
    trimmed == "end" || CLOSER_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ── trim ──

    #[test]
    fn trim_strips_mixed_whitespace() {
        assert_eq!(trim(" \t  x = 1 \r\n"), "x = 1");
    }

    #[test]
    fn trim_handles_vertical_tab_and_form_feed() {
        assert_eq!(trim("\x0b\x0cend\x0c"), "end");
    }

    #[test]
    fn trim_strips_unicode_spaces() {
        assert_eq!(trim("\u{a0}function f()\u{3000}"), "function f()");
        assert!(is_block_start("\u{a0}function f()"));
    }

    #[test]
    fn trim_empty_and_blank() {
        assert_eq!(trim(""), "");
        assert_eq!(trim("   \t"), "");
    }

    // ── is_block_start ──

    #[rstest]
    #[case("function foo()")]
    #[case("macro m(x)")]
    #[case("module Foo")]
    #[case("struct Point")]
    #[case("mutable struct Point")]
    #[case("begin")]
    #[case("quote")]
    #[case("let x = 1")]
    #[case("for i in 1:10")]
    #[case("while true")]
    #[case("if x > 0")]
    #[case("try")]
    #[case("    function indented(x)")]
    fn openers_match(#[case] line: &str) {
        assert!(is_block_start(line));
    }

    #[rstest]
    #[case("x = 1")]
    #[case("end")]
    #[case("Function foo()")]
    #[case("functional = 3")]
    #[case("iffy()")]
    #[case("elseif x")]
    #[case("# function commented")]
    #[case("")]
    fn non_openers_do_not_match(#[case] line: &str) {
        assert!(!is_block_start(line));
    }

    #[test]
    fn bare_keywords_match_longer_identifiers() {
        assert!(is_block_start("tryFoo()"));
        assert!(is_block_start("beginning = 1"));
        assert!(is_block_start("quoted"));
    }

    // ── is_block_end ──

    #[rstest]
    #[case("end")]
    #[case("  end  ")]
    #[case("end # function foo")]
    #[case("end, y")]
    #[case("end;")]
    fn closers_match(#[case] line: &str) {
        assert!(is_block_end(line));
    }

    #[rstest]
    #[case("end)")]
    #[case("end.")]
    #[case("endswith(s, \"x\")")]
    #[case("x = end")]
    #[case("")]
    fn non_closers_do_not_match(#[case] line: &str) {
        assert!(!is_block_end(line));
    }
}
