//! # Record Inspector
//!
//! Prints each stage of the record argument parser for a single file, for
//! figuring out why a DTO body came out wrong.

use crate::error::CliResult;
use postgen_core::parser::{declare_argument, flatten_whitespace, locate_declaration, split_arguments};
use postgen_core::{extract_properties, AppError};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Arguments for the inspect-record command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the C# source file declaring the record.
    #[clap(long)]
    pub file: PathBuf,
}

/// Renders the parser trace as lines.
pub fn trace(content: &str) -> CliResult<Vec<String>> {
    let mut lines = Vec::new();

    let Some(declaration) = locate_declaration(content) else {
        lines.push("No record declaration found; falling back to auto-properties.".to_string());
        return Ok(lines);
    };

    lines.push(format!("RECORD: {}", declaration.name));
    lines.push(format!("RAW ARGS_STR: {}", declaration.raw_args));
    lines.push(format!("FLAT ARGS_STR: {}", flatten_whitespace(&declaration.raw_args)));

    let args = split_arguments(&declaration.raw_args)?;
    lines.push(format!("SPLIT ARGS: {:?}", args));

    for arg in &args {
        let decl = arg.split('=').next().unwrap_or_default().trim();
        lines.push(format!("ARG: '{}' -> DECL: '{}'", arg, decl));
        match declare_argument(arg) {
            Some(prop) => lines.push(format!("  FOUND: Name='{}', Type='{}'", prop.name, prop.ty)),
            None => lines.push(format!(
                "  IGNORED (len<2): {:?}",
                decl.split_whitespace().collect::<Vec<_>>()
            )),
        }
    }

    Ok(lines)
}

/// Executes the inspection.
pub fn execute(args: &InspectArgs) -> CliResult<()> {
    let content = fs::read_to_string(&args.file).map_err(|e| {
        AppError::General(format!("Failed to read source file {:?}: {}", args.file, e))
    })?;

    for line in trace(&content)? {
        println!("{}", line);
    }

    let props: Map<String, Value> = extract_properties(&content)?
        .into_iter()
        .map(|p| (p.name, Value::String(p.ty)))
        .collect();
    println!("{}", serde_json::to_string_pretty(&props).map_err(AppError::from)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_reports_found_and_ignored() {
        let code = "public record RegisterUserCommand(\n    string Email,\n    Orphan,\n    string? Bio = null);";
        let lines = trace(code).unwrap();

        assert_eq!(lines[0], "RECORD: RegisterUserCommand");
        assert!(lines.contains(&"FLAT ARGS_STR: string Email, Orphan, string? Bio = null".to_string()));
        assert!(lines.contains(&"  FOUND: Name='Email', Type='string'".to_string()));
        assert!(lines.contains(&"  IGNORED (len<2): [\"Orphan\"]".to_string()));
        assert!(lines.contains(&"ARG: 'string? Bio = null' -> DECL: 'string? Bio'".to_string()));
    }

    #[test]
    fn test_trace_unbalanced_is_error() {
        let err = trace("public record Bad(List<int X);").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_trace_without_record() {
        let lines = trace("public class Dto { public int A { get; set; } }").unwrap();
        assert_eq!(lines.len(), 1);
    }
}
