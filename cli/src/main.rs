#![deny(missing_docs)]

//! # Postgen CLI
//!
//! Command Line Interface for the source scraping and patch toolkit.
//!
//! Supported Commands:
//! - `collection`: Scrapes controllers and DTOs into an API-testing collection.
//! - `inspect-record`: Prints every step of the record argument parser for one file.
//! - `check-braces`: Reports brace balance of a source file.
//! - `fix-swagger`: Un-gates `UseSwagger()` in service bootstrap files.
//! - `patch-collection`: Moves a field out of an existing collection into a header.
//! - `patch-readme`: Removes the same field from README request examples.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod braces;
mod collection;
mod error;
mod inspect;
mod patch;
mod swagger;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Postman collection generator and source patch toolkit")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a Postman collection from the controllers of a service tree.
    Collection(collection::CollectionArgs),
    /// Trace the record argument parser over one source file.
    InspectRecord(inspect::InspectArgs),
    /// Report the brace balance of a source file.
    CheckBraces(braces::BracesArgs),
    /// Remove the development-only guard around `app.UseSwagger()`.
    FixSwagger(swagger::SwaggerArgs),
    /// Move a field out of an existing collection's queries, paths and bodies.
    PatchCollection(patch::PatchCollectionArgs),
    /// Remove a field from the JSON examples of a README.
    PatchReadme(patch::PatchReadmeArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Collection(args) => collection::execute(args)?,
        Commands::InspectRecord(args) => inspect::execute(args)?,
        Commands::CheckBraces(args) => braces::execute(args)?,
        Commands::FixSwagger(args) => swagger::execute(args)?,
        Commands::PatchCollection(args) => patch::execute_collection(args)?,
        Commands::PatchReadme(args) => patch::execute_readme(args)?,
    }

    Ok(())
}
