#![deny(missing_docs)]

//! # Collection Command
//!
//! Implements the pipeline: Controllers -> Endpoints -> DTO bodies -> Collection.
//!
//! 1. **Walk**: `*Controller.cs` files under `Controllers` folders of known `*.API` projects.
//! 2. **Scrape**: verbs, routes and `[FromBody]` types per action.
//! 3. **Bodies**: DTO records resolved by file name and filled with sample values.
//! 4. **Write**: the collection document, replaced wholesale.

use crate::error::CliResult;
use postgen_core::collection::{
    build_collection, default_service_prefixes, write_collection, CollectionOptions,
    DEFAULT_COLLECTION_NAME,
};
use postgen_core::{AppError, SystemSource};
use std::path::PathBuf;

/// Arguments for the collection command.
#[derive(clap::Args, Debug, Clone)]
pub struct CollectionArgs {
    /// Root of the service source tree.
    #[clap(long, env = "POSTGEN_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output path for the collection file.
    #[clap(long, default_value = "docs/postman/All_Endpoints.postman_collection.json")]
    pub output: PathBuf,

    /// Display name of the collection.
    #[clap(long, default_value = DEFAULT_COLLECTION_NAME)]
    pub name: String,

    /// Add or override a service prefix.
    /// Format: `"Service.API=route"`. An empty route mounts at the gateway root.
    #[clap(long, value_parser = parse_key_val)]
    pub prefix: Vec<(String, String)>,

    /// Start from an empty routing table instead of the built-in one.
    #[clap(long)]
    pub no_default_prefixes: bool,

    /// List every scraped controller.
    #[clap(long, short)]
    pub verbose: bool,
}

/// Helper to parse "key=value" arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Builds the run options from the arguments.
fn options_from_args(args: &CollectionArgs) -> CollectionOptions {
    let mut prefixes = if args.no_default_prefixes {
        Default::default()
    } else {
        default_service_prefixes()
    };
    prefixes.extend(args.prefix.iter().cloned());

    CollectionOptions {
        root: args.root.clone(),
        name: args.name.clone(),
        prefixes,
    }
}

/// Executes the collection generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &CollectionArgs) -> CliResult<()> {
    if !args.root.is_dir() {
        return Err(AppError::General(format!("Source root not found: {:?}", args.root)).into());
    }

    println!("Scanning controllers under {:?}...", args.root);

    let options = options_from_args(args);
    let generated = build_collection(&options, &SystemSource)?;

    for (path, reason) in &generated.skipped {
        eprintln!("Warning: Skipped {:?}: {}", path, reason);
    }

    if args.verbose {
        for (path, controller) in &generated.controllers {
            println!(
                "  -> {} ({} endpoints) from {:?}",
                controller.name,
                controller.endpoints.len(),
                path
            );
        }
    }

    let endpoints: usize = generated
        .controllers
        .iter()
        .map(|(_, c)| c.endpoints.len())
        .sum();
    println!(
        "Found {} services, {} controllers, {} endpoints.",
        generated.collection.item.len(),
        generated.controllers.len(),
        endpoints
    );

    write_collection(&generated.collection, &args.output)?;
    println!("Collection generated at: {:?}", args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(root: PathBuf, output: PathBuf) -> CollectionArgs {
        CollectionArgs {
            root,
            output,
            name: DEFAULT_COLLECTION_NAME.to_string(),
            prefix: vec![],
            no_default_prefixes: false,
            verbose: true,
        }
    }

    #[test]
    fn test_argument_parsing() {
        let valid = parse_key_val("Billing.API=billing").unwrap();
        assert_eq!(valid, ("Billing.API".to_string(), "billing".to_string()));

        let empty_route = parse_key_val("Gateway.API=").unwrap();
        assert_eq!(empty_route.1, "");

        assert!(parse_key_val("invalid").is_err());
    }

    #[test]
    fn test_prefix_overrides() {
        let mut a = args(PathBuf::from("."), PathBuf::from("out.json"));
        a.prefix = vec![
            ("Auth.API".to_string(), "identity".to_string()),
            ("Billing.API".to_string(), "billing".to_string()),
        ];
        let options = options_from_args(&a);
        assert_eq!(options.prefixes["Auth.API"], "identity");
        assert_eq!(options.prefixes["Billing.API"], "billing");
        assert!(options.prefixes.contains_key("Users.API"));

        a.no_default_prefixes = true;
        let options = options_from_args(&a);
        assert_eq!(options.prefixes.len(), 2);
    }

    #[test]
    fn test_execute_writes_collection() {
        let dir = tempdir().unwrap();
        let controllers = dir.path().join("Geo/Geo.API/Controllers");
        fs::create_dir_all(&controllers).unwrap();
        fs::write(
            controllers.join("PlacesController.cs"),
            r#"
[Route("api/[controller]")]
public class PlacesController : ControllerBase
{
    [HttpGet("nearby")]
    public async Task<IActionResult> Nearby(double lat, double lng) { }
}
"#,
        )
        .unwrap();

        let output = dir.path().join("out/collection.json");
        execute(&args(dir.path().to_path_buf(), output.clone())).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"name\": \"Geo.API\""));
        assert!(written.contains("\"raw\": \"{{gateway_url}}/geo/api/Places/nearby\""));
    }

    #[test]
    fn test_execute_missing_root() {
        let dir = tempdir().unwrap();
        let err = execute(&args(dir.path().join("nope"), dir.path().join("o.json"))).unwrap_err();
        assert!(err.to_string().contains("Source root not found"));
    }
}
