#![deny(missing_docs)]

//! # Field Strip Commands
//!
//! Moves a request field (the app id by default) into a header in an existing
//! collection, and removes it from the README examples to match.

use crate::error::CliResult;
use postgen_core::json::{to_string_indented, INDENT_2};
use postgen_core::{strip_field, strip_field_from_markdown, AppError, FieldStrip};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Options shared by both field strip commands.
#[derive(clap::Args, Debug, Clone)]
pub struct FieldArgs {
    /// Field to strip (camelCase; the PascalCase spelling is stripped too).
    #[clap(long, default_value = "appId")]
    pub field: String,

    /// Only endpoints whose URL / heading contains this are rewritten.
    #[clap(long, default_value = "/auth/api/")]
    pub scope: String,
}

impl FieldArgs {
    fn to_strip(&self) -> FieldStrip {
        FieldStrip {
            field: self.field.clone(),
            scope: self.scope.clone(),
            ..FieldStrip::default()
        }
    }
}

/// Arguments for the patch-collection command.
#[derive(clap::Args, Debug, Clone)]
pub struct PatchCollectionArgs {
    /// Collection file to patch.
    #[clap(long)]
    pub collection: PathBuf,

    /// Where to write the result. Defaults to patching in place.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Header that carries the field instead.
    #[clap(long, default_value = "App-Id")]
    pub header_key: String,

    /// Header value.
    #[clap(long, default_value = "{{appId}}")]
    pub header_value: String,

    #[clap(flatten)]
    #[allow(missing_docs)]
    pub field: FieldArgs,
}

/// Arguments for the patch-readme command.
#[derive(clap::Args, Debug, Clone)]
pub struct PatchReadmeArgs {
    /// Markdown file to patch.
    #[clap(long)]
    pub readme: PathBuf,

    /// Where to write the result. Defaults to patching in place.
    #[clap(long)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    #[allow(missing_docs)]
    pub field: FieldArgs,
}

fn read_input(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(AppError::General(format!("Input file not found: {:?}", path)).into());
    }
    Ok(fs::read_to_string(path)?)
}

fn write_output(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

/// Executes the collection patch.
pub fn execute_collection(args: &PatchCollectionArgs) -> CliResult<()> {
    let raw = read_input(&args.collection)?;
    let mut document: Value = serde_json::from_str(&raw).map_err(AppError::from)?;

    let cfg = FieldStrip {
        header_key: args.header_key.clone(),
        header_value: args.header_value.clone(),
        ..args.field.to_strip()
    };
    let stats = strip_field(&mut document, &cfg)?;

    let target = args.output.as_ref().unwrap_or(&args.collection);
    write_output(target, &to_string_indented(&document, INDENT_2)?)?;

    println!(
        "Postman collection updated successfully ({} headers, {} bodies): {:?}",
        stats.headers, stats.bodies, target
    );
    Ok(())
}

/// Executes the README patch.
pub fn execute_readme(args: &PatchReadmeArgs) -> CliResult<()> {
    let content = read_input(&args.readme)?;
    let patched = strip_field_from_markdown(&content, &args.field.to_strip());

    let target = args.output.as_ref().unwrap_or(&args.readme);
    write_output(target, &patched)?;

    println!("README payloads cleaned: {:?}", target);
    Ok(())
}
