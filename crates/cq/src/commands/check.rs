//! `cq check` -- crisp boolean evaluation.

use std::collections::BTreeSet;

use anyhow::Result;
use cqql_query::parse;
use cqql_ui::styles::render_truth;

use crate::cli::CheckArgs;
use crate::context::{RuntimeContext, read_formula};
use crate::output::output_json;

/// Execute the `cq check` command.
///
/// The listed atoms are true, every other atom is false. Weighted
/// connectives are decided by their truth tables, so no expansion is needed.
pub fn run(ctx: &RuntimeContext, args: &CheckArgs) -> Result<()> {
    let text = read_formula(&args.formula)?;
    let formula = parse(&text)?;
    let true_atoms: BTreeSet<&str> = args.atoms.iter().map(String::as_str).collect();

    let value = formula.holds(&|atom: &str| true_atoms.contains(atom));

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.to_string(),
            "true_atoms": true_atoms,
            "value": value,
        }));
    } else {
        println!("{}", render_truth(value));
    }
    Ok(())
}
