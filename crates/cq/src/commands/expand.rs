//! `cq expand` -- rewrite WAND/WOR into AND/OR/NOT.

use anyhow::Result;
use cqql_query::{expand, parse};

use crate::cli::FormulaArgs;
use crate::context::{RuntimeContext, read_formula};
use crate::output::output_json;

/// Execute the `cq expand` command.
pub fn run(ctx: &RuntimeContext, args: &FormulaArgs) -> Result<()> {
    let text = read_formula(&args.formula)?;
    let parsed = parse(&text)?;
    let expanded = expand(&parsed);

    if ctx.json {
        output_json(&serde_json::json!({
            "parsed": parsed.to_string(),
            "expanded": expanded.to_string(),
        }));
    } else {
        println!("{}", expanded);
    }
    Ok(())
}
