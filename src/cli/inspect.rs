//! Read-only commands: `match`, `params`, `route` and `conflicts`.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use pageroute::route::conflict::print_conflicts;
use pageroute::{Enhancement, RoutingEngine, log};
use serde::Serialize;

/// JSON shape of a `match` result.
#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    url: &'a str,
    page: u64,
    page_type: &'a str,
    params: &'a BTreeMap<String, String>,
    #[serde(flatten)]
    result: &'a Enhancement,
}

/// Match `url`, run the enhancer and report what would be rendered.
pub fn run_match(engine: &RoutingEngine, url: &str, json: bool) -> Result<()> {
    let Some((context, enhancement)) = engine.handle(url)? else {
        bail!("no route matches `{url}`");
    };

    if json {
        let report = MatchReport {
            url,
            page: context.page.id,
            page_type: &context.page.kind,
            params: &context.params,
            result: &enhancement,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("page     {} ({})", context.page.id, context.page.kind);
    for (name, value) in &context.params {
        println!("  {name} = {value:?}");
    }
    match enhancement {
        Enhancement::Unchanged => println!("content  {}", "none".dimmed()),
        Enhancement::Attached { content } => println!("content  {}", content.key()),
        Enhancement::Redirect { url, permanent } => {
            let status = if permanent { 301 } else { 302 };
            println!("redirect {status} {}", url.yellow());
        }
    }
    Ok(())
}

/// List the URL parameters of a page.
pub fn run_params(engine: &RoutingEngine, page: u64) -> Result<()> {
    let parameters = engine.url_parameters(page)?;
    if parameters.is_empty() {
        log!("params"; "page {} takes no URL parameters", page);
        return Ok(());
    }

    let width = parameters.iter().map(|p| p.name().len()).max().unwrap_or(0);
    for parameter in &parameters {
        let mut line = format!("{:width$}  {}", parameter.name(), parameter.description());
        if let Some(requirement) = parameter.requirement() {
            line.push_str(&format!("  <{requirement}>"));
        }
        if let Some(default) = parameter.default_value() {
            line.push_str(&format!("  [default: {default}]"));
        }
        if parameter.is_identifier() {
            line.push_str(&format!("  {}", "identifier".cyan()));
        }
        println!("{line}");
    }
    Ok(())
}

/// Print the route path of a page.
pub fn run_route(engine: &RoutingEngine, page: u64) -> Result<()> {
    let page = engine.page(page)?;
    let route = engine.registry().route(&page);
    if !route.is_routable() {
        bail!("page {} of type `{}` has no URL of its own", page.id, page.kind);
    }
    println!("{}", route.path_with_parameters());
    Ok(())
}

/// Report alias conflicts of a page.
pub fn run_conflicts(engine: &RoutingEngine, page: u64) -> Result<()> {
    let conflicts = engine.conflicts(page)?;
    let page = engine.page(page)?;
    if conflicts.is_empty() {
        log!("conflict"; "page {} ({}) has no conflicts", page.id, page.alias_or_id());
        return Ok(());
    }
    print_conflicts(&page, &conflicts);
    Ok(())
}
