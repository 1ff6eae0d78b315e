//! `cq explain` -- print every pipeline stage, then the ranking.

use anyhow::Result;
use cqql_ui::styles::{render_score, render_separator};
use cqql_ui::terminal::terminal_width;

use crate::cli::RankArgs;
use crate::commands::rank::compile_and_rank;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_stage};

const SEPARATOR_WIDTH: usize = 40;

/// Execute the `cq explain` command.
pub fn run(ctx: &RuntimeContext, args: &RankArgs) -> Result<()> {
    let (compiled, ranked) = compile_and_rank(ctx, args)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "parsed": compiled.parsed.to_string(),
            "expanded": compiled.expanded.to_string(),
            "normalized": compiled.normalized.to_string(),
            "ranking": ranked,
        }));
        return Ok(());
    }

    output_stage("parsed", &compiled.parsed.to_string());
    println!();
    output_stage("expanded", &compiled.expanded.to_string());
    println!();
    output_stage("normalized", &compiled.normalized.to_string());
    println!();
    output_stage("ranking", &render_separator(terminal_width().min(SEPARATOR_WIDTH)));

    let width = ranked.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for r in &ranked {
        println!("  {:<width$}  {}", r.name, render_score(r.score), width = width);
    }
    Ok(())
}
