//! `cq normalize` -- remove overlaps between ordinal buckets.

use anyhow::Result;
use cqql_query::{expand, is_overlap_free, normalize_dnf, parse, to_dnf};
use cqql_ui::styles::render_muted;

use crate::cli::NormalizeArgs;
use crate::context::{RuntimeContext, normalize_options, read_formula};
use crate::output::output_json;

/// Execute the `cq normalize` command.
///
/// Prints the normalized formula followed by one DNF term per line.
pub fn run(ctx: &RuntimeContext, args: &NormalizeArgs) -> Result<()> {
    let (config, _) = ctx.load_config()?;
    let opts = normalize_options(&config, &args.pipeline);
    let naming = config.naming();

    let text = read_formula(&args.formula)?;
    let expanded = expand(&parse(&text)?);
    let dnf = normalize_dnf(to_dnf(&expanded)?, &opts, &naming)?;
    let formula = dnf.to_formula();
    let terms: Vec<String> = dnf.terms().map(ToString::to_string).collect();

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.to_string(),
            "terms": terms,
            "overlap_free": is_overlap_free(&dnf, &opts, &naming),
            "ordinal": opts.ordinal_attrs,
        }));
        return Ok(());
    }

    println!("{}", formula);
    if !ctx.quiet {
        for term in &terms {
            println!("  {}", render_muted(term));
        }
    }
    Ok(())
}
