//! `generate` command: content → absolute URL.

use anyhow::{Context, Result, anyhow};
use pageroute::content::StringUrl;
use pageroute::{Content, ContentType, ParamValue, ParameterMap, QueryParams, RoutingEngine};

use super::GenerateArgs;

/// Print the URL of the requested content to stdout.
pub fn run_generate(engine: &RoutingEngine, args: &GenerateArgs) -> Result<()> {
    let content = load_content(engine, &args.kind, &args.id)?;

    let params: ParameterMap = args
        .params
        .iter()
        .map(|(name, value)| (name.clone(), ParamValue::from(value.as_str())))
        .collect();
    let query: QueryParams = args.query.iter().cloned().collect();

    let url = engine
        .generate(&content, &params, &query)
        .with_context(|| format!("failed to generate a URL for {}", content.key()))?;
    println!("{url}");
    Ok(())
}

/// Content addressed by kind and id. String URLs take the raw URL as id.
pub fn load_content(engine: &RoutingEngine, kind: &str, id: &str) -> Result<Content> {
    let kind: ContentType = kind.parse().map_err(|e: String| anyhow!(e))?;
    if kind == ContentType::StringUrl {
        return Ok(StringUrl::new(id).into());
    }

    let id: u64 = id
        .parse()
        .with_context(|| format!("`{id}` is not a numeric {kind} id"))?;
    engine
        .loader()
        .find_by_id(kind, id)
        .ok_or_else(|| anyhow!("no {kind} with id {id} in the site document"))
}
