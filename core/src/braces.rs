#![deny(missing_docs)]

//! # Brace Balance
//!
//! Naive `{`/`}` counting for locating an unclosed block in a large source
//! file. Strings and comments are not recognised.

/// Result of a brace scan. Line numbers are 1-based.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BraceReport {
    /// First line where more braces were closed than opened, with its text.
    pub negative_at: Option<(usize, String)>,
    /// Balance when the scan stopped.
    pub final_balance: i64,
    /// Opening lines of braces still open, oldest first.
    pub unclosed: Vec<usize>,
    /// Running balance after each requested checkpoint line that was reached.
    pub checkpoints: Vec<(usize, i64)>,
}

impl BraceReport {
    /// The `n` most recent unclosed opening lines.
    pub fn last_unclosed(&self, n: usize) -> &[usize] {
        let start = self.unclosed.len().saturating_sub(n);
        &self.unclosed[start..]
    }
}

/// Scans `content` line by line.
///
/// Stops at the first line that drives the balance negative.
pub fn check_braces(content: &str, checkpoints: &[usize]) -> BraceReport {
    let mut report = BraceReport::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        for ch in line.chars() {
            match ch {
                '{' => {
                    report.final_balance += 1;
                    report.unclosed.push(line_no);
                }
                '}' => {
                    report.final_balance -= 1;
                    report.unclosed.pop();
                }
                _ => {}
            }
        }

        if checkpoints.contains(&line_no) {
            report.checkpoints.push((line_no, report.final_balance));
        }

        if report.final_balance < 0 {
            report.negative_at = Some((line_no, line.trim().to_string()));
            break;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        let report = check_braces("fn a() {\n  if x { y }\n}\n", &[]);
        assert_eq!(report.final_balance, 0);
        assert!(report.unclosed.is_empty());
        assert!(report.negative_at.is_none());
    }

    #[test]
    fn test_unclosed_lines() {
        let code = "a {\nb {\nc {\nd {\n}\n";
        let report = check_braces(code, &[2, 5]);
        assert_eq!(report.final_balance, 3);
        assert_eq!(report.unclosed, vec![1, 2, 3]);
        assert_eq!(report.last_unclosed(2), &[2, 3]);
        assert_eq!(report.last_unclosed(10), &[1, 2, 3]);
        assert_eq!(report.checkpoints, vec![(2, 2), (5, 3)]);
    }

    #[test]
    fn test_negative_stops_scan() {
        let code = "x {\n}\n  }  // extra\n{\n";
        let report = check_braces(code, &[4]);
        assert_eq!(report.negative_at, Some((3, "}  // extra".to_string())));
        assert_eq!(report.final_balance, -1);
        assert!(report.checkpoints.is_empty());
    }
}
