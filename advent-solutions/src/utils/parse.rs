//! Line-oriented input parsing

use advent_solver::ParseError;

/// Parse every non-blank line with `f`
///
/// Failures are reported as `ParseError::InvalidFormat` prefixed with the
/// 1-based line number.
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            f(line.trim_end()).map_err(|e| {
                ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
            })
        })
        .collect()
}

/// Split input into blank-line separated sections
///
/// Leading whitespace inside a section is kept.
pub fn sections(input: &str) -> Vec<&str> {
    input
        .split("\n\n")
        .map(|section| section.trim_matches('\n'))
        .filter(|section| !section.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_parse_lines_skips_blank_lines() {
        let values = parse_lines("1\n\n2\n3\n", |line| Ok(line.parse::<u8>()?)).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_lines_reports_line_number() {
        let err = parse_lines("1\n2\nx\n", |line| {
            line.parse::<u8>().with_context(|| format!("not a number: {line}"))
        })
        .unwrap_err();
        match err {
            ParseError::InvalidFormat(message) => {
                assert!(message.starts_with("(line 3)"), "{message}");
                assert!(message.contains("not a number: x"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_lines_can_borrow_from_input() {
        let pairs = parse_lines("you: bbb ccc\nbbb: out\n", |line| {
            let (name, rest) = line.split_once(':').context("missing ':'")?;
            Ok((name, rest.split_whitespace().collect::<Vec<_>>()))
        })
        .unwrap();
        assert_eq!(pairs[0], ("you", vec!["bbb", "ccc"]));
        assert_eq!(pairs[1], ("bbb", vec!["out"]));
    }

    #[test]
    fn test_sections_keep_leading_indent() {
        let parts = sections("    [D]\n[N] [C]\n\nmove 1 from 2 to 1\n");
        assert_eq!(parts, vec!["    [D]\n[N] [C]", "move 1 from 2 to 1"]);
    }
}
