//! `cq parse` -- parse a formula and print it in canonical form.

use anyhow::Result;
use cqql_query::parse;

use crate::cli::FormulaArgs;
use crate::context::{RuntimeContext, read_formula};
use crate::output::output_json;

/// Execute the `cq parse` command.
pub fn run(ctx: &RuntimeContext, args: &FormulaArgs) -> Result<()> {
    let text = read_formula(&args.formula)?;
    let formula = parse(&text)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.to_string(),
            "root": formula.kind(),
            "expanded": formula.is_expanded(),
        }));
    } else {
        println!("{}", formula);
    }
    Ok(())
}
