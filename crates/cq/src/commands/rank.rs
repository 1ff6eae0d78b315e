//! `cq rank` -- score the dataset and sort by match.

use anyhow::{Context, Result};
use cqql_query::{Compiled, Ranked, compile, rank};
use cqql_ui::styles::{format_score, render_score_bar};
use tracing::debug;

use crate::cli::RankArgs;
use crate::context::{RuntimeContext, normalize_options, read_formula};
use crate::output::{output_json, output_table};

const BAR_WIDTH: usize = 20;

/// Compile the formula and rank every object, best first.
///
/// Shared by `cq rank` and `cq explain`. `--limit` is applied here.
pub fn compile_and_rank(ctx: &RuntimeContext, args: &RankArgs) -> Result<(Compiled, Vec<Ranked>)> {
    let (config, source) = ctx.load_config()?;
    debug!(?source, "resolved config");
    let opts = normalize_options(&config, &args.pipeline);
    let naming = config.naming();

    let text = read_formula(&args.formula)?;
    let compiled = compile(&text, &opts, &naming)?;

    let objects = ctx.load_objects(&config)?;
    let mut ranked = rank(&compiled.normalized, &objects, &config.schema(), &naming)
        .context("failed to score objects")?;
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }
    Ok((compiled, ranked))
}

/// Execute the `cq rank` command.
pub fn run(ctx: &RuntimeContext, args: &RankArgs) -> Result<()> {
    let (_, ranked) = compile_and_rank(ctx, args)?;

    if ctx.json {
        output_json(&ranked);
        return Ok(());
    }

    if ranked.is_empty() {
        if !ctx.quiet {
            println!("No objects to rank.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.name.clone(),
                format_score(r.score),
                render_score_bar(r.score, BAR_WIDTH),
            ]
        })
        .collect();
    output_table(&["#", "OBJECT", "SCORE", "MATCH"], &rows);
    Ok(())
}
