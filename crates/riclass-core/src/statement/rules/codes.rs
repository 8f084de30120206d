//! Account-code normalization.

/// Separator glyphs accepted in raw account codes.
const SEPARATORS: &[char] = &['-', '.', '/', '\\', ' ', ',', ';', ':', '|', '_'];

/// Canonicalize a raw account code into underscore-joined digit groups.
///
/// Everything except digits and the accepted separator glyphs is dropped;
/// separator runs collapse to a single `_`; leading and trailing
/// separators are trimmed. Total over any input; empty input yields an
/// empty string. Idempotent: normalizing a normalized code is a no-op.
pub fn normalize_code(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.trim().chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if SEPARATORS.contains(&c) && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_code("1-1-10"), "1_1_10");
        assert_eq!(normalize_code("1.2.3"), "1_2_3");
        assert_eq!(normalize_code("1 / 2"), "1_2");
        assert_eq!(normalize_code("01;02|03"), "01_02_03");
    }

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize_code("--1--2--"), "1_2");
        assert_eq!(normalize_code("  .1.2.  "), "1_2");
        assert_eq!(normalize_code("___"), "");
    }

    #[test]
    fn test_normalize_drops_foreign_characters() {
        assert_eq!(normalize_code("A.I.1)"), "1");
        assert_eq!(normalize_code("cod: 1-7-3"), "1_7_3");
    }

    #[test]
    fn test_normalize_total_on_degenerate_input() {
        assert_eq!(normalize_code(""), "");
        assert_eq!(normalize_code("abc"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["1-1-10", "A.I.1)", "  1 . 2 / 3  ", "", "9;9;9", "_-_-_", "007"] {
            let once = normalize_code(raw);
            assert_eq!(normalize_code(&once), once, "not idempotent for {raw:?}");
        }
    }
}
