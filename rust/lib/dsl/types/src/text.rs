//! Text helpers shared by the normalization rules.
//!
//! Whitespace here means any char with the Unicode `White_Space` property,
//! so NO-BREAK SPACE, EM SPACE and IDEOGRAPHIC SPACE are stripped together
//! with ASCII blanks.

/// Strip leading and trailing whitespace.
pub fn strip(s: &str) -> &str {
    s.trim()
}

/// True when nothing is left after [`strip`].
pub fn is_blank(s: &str) -> bool {
    strip(s).is_empty()
}

/// Strip `s` in place, keeping its allocation.
pub fn strip_in_place(s: &mut String) {
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    s.drain(..start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ascii_and_unicode_blanks() {
        assert_eq!(strip("  a b \t\n"), "a b");
        assert_eq!(strip("\u{00A0}x\u{3000}"), "x");
        assert_eq!(strip("\u{2003}\u{2003}"), "");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank(" \r\n\t"));
        assert!(is_blank("\u{2028}"));
        assert!(!is_blank(" . "));
    }

    #[test]
    fn strip_in_place_keeps_inner_spaces() {
        let mut s = String::from("\u{00A0} hello  world \n");
        strip_in_place(&mut s);
        assert_eq!(s, "hello  world");

        let mut blank = String::from("   ");
        strip_in_place(&mut blank);
        assert!(blank.is_empty());

        let mut clean = String::from("ok");
        strip_in_place(&mut clean);
        assert_eq!(clean, "ok");
    }
}
