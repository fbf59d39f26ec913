//! # Controller Scraping
//!
//! Line-oriented, regex based extraction of ASP.NET style controllers.
//! Only single-line action signatures are recognised.

use crate::parser::models::{ParsedController, ParsedEndpoint};
use crate::parser::record::split_arguments;
use regex::Regex;
use std::sync::OnceLock;

/// Base route used when a controller carries no `[Route]` attribute.
pub const DEFAULT_BASE_ROUTE: &str = "api/[controller]";

const FROM_BODY: &str = "[FromBody]";

fn class_regex() -> &'static Regex {
    static CLASS_RE: OnceLock<Regex> = OnceLock::new();
    CLASS_RE.get_or_init(|| {
        Regex::new(r"public\s+class\s+(\w+)\s*:\s*ControllerBase").expect("Invalid regex")
    })
}

fn route_regex() -> &'static Regex {
    static ROUTE_RE: OnceLock<Regex> = OnceLock::new();
    ROUTE_RE.get_or_init(|| Regex::new(r#"\[Route\("(.+?)"\)\]"#).expect("Invalid regex"))
}

fn verb_regex() -> &'static Regex {
    static VERB_RE: OnceLock<Regex> = OnceLock::new();
    VERB_RE.get_or_init(|| {
        Regex::new(
            r#"\[Http(Get|Post|Put|Delete|Patch|Head|Options)(?:\(\s*(?:"([^"]*)")?[^\]]*\))?\]"#,
        )
        .expect("Invalid regex")
    })
}

fn action_regex() -> &'static Regex {
    static ACTION_RE: OnceLock<Regex> = OnceLock::new();
    ACTION_RE.get_or_init(|| {
        Regex::new(r"public\s+(?:async\s+)?Task<.*?>\s+(\w+)\s*\((.*?)\)").expect("Invalid regex")
    })
}

/// Scrapes a controller source file.
///
/// Returns `None` when the file declares no `ControllerBase` subclass. HTTP verb
/// attributes stack: every verb seen since the last action is attached to the
/// next action signature.
pub fn parse_controller(content: &str) -> Option<ParsedController> {
    let class_name = class_regex().captures(content)?.get(1)?.as_str();
    let name = class_name.replace("Controller", "");

    let base_route = route_regex()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(DEFAULT_BASE_ROUTE, |m| m.as_str())
        .replace("[controller]", &name);

    let mut endpoints = Vec::new();
    let mut pending: Vec<(String, String)> = Vec::new();

    for line in content.lines().map(str::trim) {
        if let Some(caps) = verb_regex().captures(line) {
            let verb = caps[1].to_uppercase();
            let suffix = caps.get(2).map_or("", |m| m.as_str()).to_string();
            pending.push((verb, suffix));
            continue;
        }

        if pending.is_empty() {
            continue;
        }

        if let Some(caps) = action_regex().captures(line) {
            let action = caps[1].to_string();
            let body_type = find_body_type(&caps[2]);

            for (verb, suffix) in pending.drain(..) {
                endpoints.push(ParsedEndpoint {
                    name: action.clone(),
                    method: verb,
                    path: join_route(&base_route, &suffix),
                    body_type: body_type.clone(),
                });
            }
        }
    }

    Some(ParsedController { name, endpoints })
}

/// Joins a base route and an action suffix, collapsing `//` and trimming slashes.
pub fn join_route(base: &str, suffix: &str) -> String {
    format!("{}/{}", base, suffix)
        .replace("//", "/")
        .trim_matches('/')
        .to_string()
}

/// Returns the declared type of the `[FromBody]` parameter in an argument list.
pub fn find_body_type(args: &str) -> Option<String> {
    if !args.contains(FROM_BODY) {
        return None;
    }

    let pieces = split_arguments(args)
        .unwrap_or_else(|_| args.split(',').map(|a| a.trim().to_string()).collect());

    pieces.iter().find_map(|arg| {
        let tokens: Vec<&str> = arg.split_whitespace().collect();
        let idx = tokens.iter().position(|t| *t == FROM_BODY)?;
        tokens.get(idx + 1).map(|t| t.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTH_CONTROLLER: &str = r#"
using MediatR;
using Microsoft.AspNetCore.Mvc;

namespace Auth.API.Controllers;

[ApiController]
[Route("api/[controller]")]
public class AuthController : ControllerBase
{
    [HttpPost("register")]
    public async Task<IActionResult> Register([FromBody] RegisterUserCommand command)
    {
        return Ok();
    }

    [HttpGet("users")]
    public async Task<IActionResult> GetAllUsers()
    {
        return Ok();
    }

    [HttpPut("users/{id}")]
    public async Task<IActionResult> Update(Guid id, [FromBody] Auth.Application.Features.UpdateUserCommand command)
    {
        return Ok();
    }

    [HttpPost("logout")]
    public IActionResult Logout()
    {
        return Ok();
    }
}
"#;

    #[test]
    fn test_parse_controller_endpoints() {
        let controller = parse_controller(AUTH_CONTROLLER).unwrap();
        assert_eq!(controller.name, "Auth");
        assert_eq!(controller.endpoints.len(), 3);

        let register = &controller.endpoints[0];
        assert_eq!(register.name, "Register");
        assert_eq!(register.method, "POST");
        assert_eq!(register.path, "api/Auth/register");
        assert_eq!(register.body_type.as_deref(), Some("RegisterUserCommand"));

        let users = &controller.endpoints[1];
        assert_eq!(users.method, "GET");
        assert!(users.body_type.is_none());

        let update = &controller.endpoints[2];
        assert_eq!(update.path, "api/Auth/users/{id}");
        assert_eq!(
            update.body_type.as_deref(),
            Some("Auth.Application.Features.UpdateUserCommand")
        );
    }

    #[test]
    fn test_non_task_action_consumes_nothing() {
        // `Logout` is not `Task<...>`, so its verb stays pending and is dropped at EOF.
        let controller = parse_controller(AUTH_CONTROLLER).unwrap();
        assert!(controller.endpoints.iter().all(|e| e.name != "Logout"));
    }

    #[test]
    fn test_stacked_verbs_and_bare_attribute() {
        let code = r#"
public class ItemsController : ControllerBase
{
    [HttpGet]
    [HttpHead("probe")]
    public async Task<ActionResult<List<ItemDto>>> List()
    {
    }

    [HttpGet("{id}", Name = "GetItem")]
    public async Task<ActionResult<ItemDto>> Get(Guid id)
    {
    }
}
"#;
        let controller = parse_controller(code).unwrap();
        assert_eq!(controller.name, "Items");
        let routes: Vec<(&str, &str, &str)> = controller
            .endpoints
            .iter()
            .map(|e| (e.name.as_str(), e.method.as_str(), e.path.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("List", "GET", "api/Items"),
                ("List", "HEAD", "api/Items/probe"),
                ("Get", "GET", "api/Items/{id}"),
            ]
        );
    }

    #[test]
    fn test_not_a_controller() {
        assert!(parse_controller("public class Helper { }").is_none());
    }

    #[test]
    fn test_join_route() {
        assert_eq!(join_route("api/Auth", ""), "api/Auth");
        assert_eq!(join_route("/api/Auth/", "/login"), "api/Auth/login");
    }

    #[test]
    fn test_find_body_type_with_generic_sibling() {
        let args = "Dictionary<string, int> filters, [FromBody] CreateAppCommand command";
        assert_eq!(find_body_type(args).as_deref(), Some("CreateAppCommand"));
        assert!(find_body_type("Guid id").is_none());
    }
}
