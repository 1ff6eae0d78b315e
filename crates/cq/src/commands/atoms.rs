//! `cq atoms` -- list the atoms a formula references.

use anyhow::Result;
use cqql_query::parse;

use crate::cli::FormulaArgs;
use crate::context::{RuntimeContext, read_formula};
use crate::output::output_json;

/// Execute the `cq atoms` command.
pub fn run(ctx: &RuntimeContext, args: &FormulaArgs) -> Result<()> {
    let text = read_formula(&args.formula)?;
    let formula = parse(&text)?;
    let atoms = formula.atoms();

    if ctx.json {
        output_json(&atoms);
    } else {
        for atom in atoms {
            println!("{}", atom);
        }
    }
    Ok(())
}
