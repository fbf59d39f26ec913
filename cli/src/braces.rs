//! # Brace Check Command
//!
//! Reports where a source file's braces stop balancing.

use crate::error::CliResult;
use postgen_core::{check_braces, AppError, BraceReport};
use std::fs;
use std::path::PathBuf;

/// Arguments for the check-braces command.
#[derive(clap::Args, Debug, Clone)]
pub struct BracesArgs {
    /// File to scan.
    #[clap(long)]
    pub file: PathBuf,

    /// Print the running balance after this line (repeatable).
    #[clap(long = "at")]
    pub checkpoints: Vec<usize>,
}

/// Formats a report the way the command prints it.
pub fn render(report: &BraceReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .checkpoints
        .iter()
        .map(|(line, balance)| format!("Balance at line {}: {}", line, balance))
        .collect();

    if let Some((line, text)) = &report.negative_at {
        lines.push(format!("Negative balance at line {}: {}", line, text));
        return lines;
    }

    lines.push(format!("Final Balance: {}", report.final_balance));
    if !report.unclosed.is_empty() {
        lines.push(format!(
            "Unclosed braces starting at lines: {:?} (showing last 3)",
            report.last_unclosed(3)
        ));
    }
    lines
}

/// Executes the brace check.
pub fn execute(args: &BracesArgs) -> CliResult<()> {
    let content = fs::read_to_string(&args.file)
        .map_err(|e| AppError::General(format!("Failed to read {:?}: {}", args.file, e)))?;

    for line in render(&check_braces(&content, &args.checkpoints)) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_unclosed() {
        let report = check_braces("a {\nb {\nc {\nd {\n", &[1]);
        assert_eq!(
            render(&report),
            vec![
                "Balance at line 1: 1".to_string(),
                "Final Balance: 4".to_string(),
                "Unclosed braces starting at lines: [2, 3, 4] (showing last 3)".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_negative() {
        let report = check_braces("}\n", &[]);
        assert_eq!(render(&report), vec!["Negative balance at line 1: }".to_string()]);
    }
}
