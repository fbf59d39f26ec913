//! # Collection Builder
//!
//! Walks a service tree, scrapes every controller and assembles the collection.

use crate::body::generate_body_for_type;
use crate::collection::models::{
    Body, BodyOptions, Collection, CollectionInfo, Event, Folder, Header, RawOptions, Request,
    RequestItem, Script, Url, COLLECTION_SCHEMA,
};
use crate::error::AppResult;
use crate::json::{to_string_indented, INDENT_4};
use crate::parser::{parse_controller, ParsedController};
use crate::resolver::TypeIndex;
use crate::sample::{SampleSource, DEMO_APP_ID};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Host variable every generated URL starts with.
pub const GATEWAY_HOST: &str = "{{gateway_url}}";

/// Default collection display name.
pub const DEFAULT_COLLECTION_NAME: &str = "Full Platform (Generated)";

/// Service project name (`Auth.API`) to gateway route prefix (`auth`).
pub type ServicePrefixes = IndexMap<String, String>;

/// The gateway routing table of the platform.
pub fn default_service_prefixes() -> ServicePrefixes {
    [
        ("Auth.API", "auth"),
        ("Users.API", "users"),
        ("Apps.API", "apps"),
        ("Notifications.API", "notifications"),
        ("Media.API", "media"),
        ("Chat.API", "chat"),
        ("Payments.API", "payments"),
        ("Audit.API", "audit"),
        ("Search.API", "search"),
        ("Scheduler.API", "scheduler"),
        ("Geo.API", "geo"),
        ("Recommendation.API", "recommendation"),
        ("Gateway.API", ""),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Root of the service tree.
    pub root: PathBuf,
    /// Collection display name.
    pub name: String,
    /// Services to include and their gateway prefixes.
    pub prefixes: ServicePrefixes,
}

impl CollectionOptions {
    /// Options with the default name and routing table.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            name: DEFAULT_COLLECTION_NAME.to_string(),
            prefixes: default_service_prefixes(),
        }
    }
}

/// Result of a run: the document plus what was scraped or skipped on the way.
#[derive(Debug, Clone)]
pub struct GeneratedCollection {
    /// The assembled collection.
    pub collection: Collection,
    /// Controllers that contributed a folder, with their source file.
    pub controllers: Vec<(PathBuf, ParsedController)>,
    /// Files that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Builds one request entry.
///
/// `url_path` is the controller route; `prefix` (when non-empty) is prepended
/// as the first path segment. A body adds a JSON `Content-Type` header.
pub fn create_postman_item(
    name: &str,
    method: &str,
    url_path: &str,
    prefix: &str,
    event: Option<Vec<Event>>,
    body: Option<&Value>,
) -> AppResult<RequestItem> {
    let mut path: Vec<String> = url_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if !prefix.is_empty() {
        path.insert(0, prefix.to_string());
    }

    let mut request = Request {
        method: method.to_string(),
        header: Vec::new(),
        url: Url {
            raw: format!("{}/{}", GATEWAY_HOST, path.join("/")),
            host: vec![GATEWAY_HOST.to_string()],
            path,
        },
        body: None,
    };

    if let Some(payload) = body {
        request.body = Some(Body {
            mode: "raw".to_string(),
            raw: to_string_indented(payload, INDENT_4)?,
            options: BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            },
        });
        request
            .header
            .push(Header::text("Content-Type", "application/json"));
    }

    Ok(RequestItem {
        name: format!("{} ({})", name, url_path),
        request,
        response: Vec::new(),
        event,
    })
}

/// Whether an action is the login endpoint of the auth controller.
pub fn is_login_action(action: &str, controller: &str) -> bool {
    action.contains("Login") && controller.contains("Auth")
}

/// Credential payload used for the login request.
pub fn login_body() -> Value {
    json!({
        "email": "test@example.com",
        "password": "Password123!",
        "appId": DEMO_APP_ID
    })
}

/// Test script capturing the issued tokens into the environment.
pub fn login_events() -> Vec<Event> {
    let exec = [
        "var jsonData = pm.response.json();",
        "if (jsonData.accessToken) {",
        "    pm.environment.set('jwt_token', jsonData.accessToken);",
        "    console.log('Access Token Set');",
        "}",
        "if (jsonData.refreshToken) {",
        "    pm.environment.set('refresh_token', jsonData.refreshToken);",
        "}",
    ];
    vec![Event {
        listen: "test".to_string(),
        script: Script {
            exec: exec.iter().map(|l| l.to_string()).collect(),
            kind: "text/javascript".to_string(),
        },
    }]
}

/// Finds the first path component naming an API project (`Foo.API`).
pub fn service_name(dir: &Path) -> Option<String> {
    dir.components()
        .filter_map(|c| c.as_os_str().to_str())
        .find(|c| c.ends_with(".API"))
        .map(str::to_string)
}

/// Converts a scraped controller into a folder of request items.
pub fn controller_folder(
    controller: &ParsedController,
    prefix: &str,
    index: &mut TypeIndex,
    source: &dyn SampleSource,
) -> AppResult<Folder<RequestItem>> {
    let mut folder = Folder::new(controller.name.as_str());

    for endpoint in &controller.endpoints {
        let mut body = endpoint
            .body_type
            .as_deref()
            .map(|ty| generate_body_for_type(index, ty, source));
        let mut event = None;

        if is_login_action(&endpoint.name, &controller.name) {
            body = Some(login_body());
            event = Some(login_events());
        }

        folder.item.push(create_postman_item(
            &endpoint.name,
            &endpoint.method,
            &endpoint.path,
            prefix,
            event,
            body.as_ref(),
        )?);
    }

    Ok(folder)
}

/// Walks `options.root` and assembles the collection.
///
/// Only directories below a `Controllers` path inside a known `*.API` project
/// are visited; `*Controller.cs` files in them are scraped. Traversal is in
/// file name order so repeated runs are stable. Unreadable controller files are
/// reported in `skipped` and do not abort the run.
pub fn build_collection(
    options: &CollectionOptions,
    source: &dyn SampleSource,
) -> AppResult<GeneratedCollection> {
    let mut index = TypeIndex::new(&options.root);
    let mut services: Vec<Folder<Folder<RequestItem>>> = Vec::new();
    let mut controllers = Vec::new();
    let mut skipped = Vec::new();

    let dirs = WalkDir::new(&options.root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir());

    for dir in dirs {
        let dir_path = dir.path();
        if !dir_path.to_string_lossy().contains("Controllers") {
            continue;
        }

        let Some(service) = service_name(dir_path) else {
            continue;
        };
        let Some(prefix) = options.prefixes.get(&service) else {
            continue;
        };

        let slot = match services.iter().position(|f| f.name == service) {
            Some(pos) => pos,
            None => {
                services.push(Folder::new(service.as_str()));
                services.len() - 1
            }
        };

        let files = WalkDir::new(dir_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        for file in files {
            let is_controller = file
                .file_name()
                .to_str()
                .is_some_and(|n| n.ends_with("Controller.cs"));
            if !is_controller {
                continue;
            }

            let content = match fs::read_to_string(file.path()) {
                Ok(c) => c,
                Err(e) => {
                    skipped.push((file.path().to_path_buf(), e.to_string()));
                    continue;
                }
            };

            let Some(controller) = parse_controller(&content) else {
                continue;
            };
            if controller.endpoints.is_empty() {
                continue;
            }

            let folder = controller_folder(&controller, prefix, &mut index, source)?;
            services[slot].item.push(folder);
            controllers.push((file.path().to_path_buf(), controller));
        }
    }

    Ok(GeneratedCollection {
        collection: Collection {
            info: CollectionInfo {
                postman_id: source.uuid(),
                name: options.name.clone(),
                schema: COLLECTION_SCHEMA.to_string(),
            },
            item: services,
        },
        controllers,
        skipped,
    })
}

/// Serializes the collection with four-space indentation and writes it,
/// creating parent directories as needed.
pub fn write_collection(collection: &Collection, output: &Path) -> AppResult<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, to_string_indented(collection, INDENT_4)?)?;
    Ok(())
}
