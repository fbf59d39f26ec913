//! # Swagger Command
//!
//! Bulk rewrite of `Program.cs` files so Swagger is served outside development.

use crate::error::CliResult;
use postgen_core::{patch_swagger_tree, AppError};
use std::path::PathBuf;

/// Arguments for the fix-swagger command.
#[derive(clap::Args, Debug, Clone)]
pub struct SwaggerArgs {
    /// Root of the service source tree.
    #[clap(long, env = "POSTGEN_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Report the files that would change without writing them.
    #[clap(long)]
    pub dry_run: bool,
}

/// Executes the patch.
pub fn execute(args: &SwaggerArgs) -> CliResult<()> {
    if !args.root.is_dir() {
        return Err(AppError::General(format!("Source root not found: {:?}", args.root)).into());
    }

    let report = patch_swagger_tree(&args.root, args.dry_run)?;

    for (path, reason) in &report.skipped {
        eprintln!("Warning: Skipped {:?}: {}", path, reason);
    }
    let verb = if args.dry_run { "Would update" } else { "Updated" };
    for path in &report.updated {
        println!("{} {:?}", verb, path);
    }
    if report.updated.is_empty() {
        println!("No guarded UseSwagger() calls found.");
    }

    Ok(())
}
