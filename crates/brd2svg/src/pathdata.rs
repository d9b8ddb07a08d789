//! Path-data rewriting under translation.
//!
//! Rewrites the numeric literals inside an SVG path `d` string, leaving all
//! command letters and separators byte-for-byte untouched. The approach is
//! deliberately command-agnostic: every float token in the string is paired
//! off as (x, y) in order of appearance, regardless of which drawing command
//! it belongs to, and shifted by the offset. This mirrors the source tool's
//! behavior and is a known approximation — relative commands, H/V single
//! coordinates and arc parameter lists are all treated as plain pairs. Do
//! not "fix" this per-command without flagging the behavior change.
//!
//! Rewritten numbers are emitted with exactly three fractional digits, a
//! lossy but deterministic canonicalization.

use regex::Regex;
use std::sync::OnceLock;

/// Float token grammar: optional sign, integer/fractional digits, optional
/// exponent. Ordered so the longest form wins at each position.
fn float_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][-+]?\d+)?").unwrap()
    })
}

/// Shift every coordinate pair in a path-data string by `(dx, dy)`.
///
/// Literals at even positions (0-based) receive `dx`, odd positions `dy`.
/// When the literal count is odd, the final unpaired literal is treated as
/// an X value and receives `dx`.
pub fn translate_path_data(d: &str, dx: f64, dy: f64) -> String {
    let mut out = String::with_capacity(d.len());
    let mut last_end = 0;

    for (index, token) in float_token().find_iter(d).enumerate() {
        out.push_str(&d[last_end..token.start()]);

        match token.as_str().parse::<f64>() {
            Ok(value) => {
                let shifted = if index % 2 == 0 { value + dx } else { value + dy };
                out.push_str(&format!("{:.3}", shifted));
            }
            // The grammar only matches valid floats; parse can still refuse
            // out-of-range exponents, in which case the token passes through.
            Err(_) => out.push_str(token.as_str()),
        }

        last_end = token.end();
    }

    out.push_str(&d[last_end..]);
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Count the coordinate pairs the rewriter would see in a path string.
    fn coordinate_pair_count(d: &str) -> usize {
        let literals = float_token().find_iter(d).count();
        literals.div_ceil(2)
    }

    #[test]
    fn zero_offset_canonicalizes_only() {
        let d = "M10,20 L30,40 Z";
        assert_eq!(translate_path_data(d, 0.0, 0.0), "M10.000,20.000 L30.000,40.000 Z");
    }

    #[test]
    fn rewrite_is_idempotent_after_first_pass() {
        let d = "M10.5,20 C1,2 3,4 5,6 Z";
        let once = translate_path_data(d, 0.0, 0.0);
        let twice = translate_path_data(&once, 0.0, 0.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn offset_shifts_every_pair() {
        let d = "M10,20 L30,40";
        assert_eq!(translate_path_data(d, 5.0, -2.0), "M15.000,18.000 L35.000,38.000");
    }

    #[test]
    fn pair_count_is_preserved() {
        let d = "M1,2 L3,4 C5,6 7,8 9,10";
        let shifted = translate_path_data(d, 100.0, 200.0);
        assert_eq!(coordinate_pair_count(d), coordinate_pair_count(&shifted));
        assert_eq!(coordinate_pair_count(d), 5);
    }

    #[test]
    fn command_letters_and_separators_survive_verbatim() {
        let d = "M 10 , 20  l-5,.5Z";
        let shifted = translate_path_data(d, 0.0, 0.0);
        assert_eq!(shifted, "M 10.000 , 20.000  l-5.000,0.500Z");
    }

    #[test]
    fn negative_and_exponent_literals() {
        let d = "M-1.5e1,2E-1";
        // -1.5e1 = -15, 2E-1 = 0.2
        assert_eq!(translate_path_data(d, 1.0, 1.0), "M-14.000,1.200");
    }

    #[test]
    fn odd_literal_count_shifts_trailing_x() {
        // Three literals: (x, y) pair plus a dangling x
        let d = "M1,2 H7";
        assert_eq!(translate_path_data(d, 10.0, 20.0), "M11.000,22.000 H17.000");
    }

    #[test]
    fn no_numbers_passes_through() {
        assert_eq!(translate_path_data("Z", 5.0, 5.0), "Z");
        assert_eq!(translate_path_data("", 5.0, 5.0), "");
    }

    #[test]
    fn shift_is_exact_within_formatting_tolerance() {
        let d = "M12.3456,78.9012 L0.0004,9";
        let shifted = translate_path_data(d, 1.0, 2.0);
        let originals: Vec<f64> = float_token()
            .find_iter(d)
            .map(|m| m.as_str().parse().unwrap())
            .collect();
        let rewritten: Vec<f64> = float_token()
            .find_iter(&shifted)
            .map(|m| m.as_str().parse().unwrap())
            .collect();
        assert_eq!(originals.len(), rewritten.len());
        for (i, (a, b)) in originals.iter().zip(&rewritten).enumerate() {
            let expected = if i % 2 == 0 { a + 1.0 } else { a + 2.0 };
            assert!((b - expected).abs() < 0.001, "literal {}: {} vs {}", i, b, expected);
        }
    }
}
