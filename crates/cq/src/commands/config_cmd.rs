//! `cq config` -- show or initialize the configuration.

use anyhow::{Context, Result, bail};
use cqql_config::config::CONFIG_FILE;
use cqql_config::{CqqlConfig, ensure_config_dir, find_config_dir_or_error, save_config};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::{ConfigSource, RuntimeContext};
use crate::demo::demo_config;
use crate::output::output_json;

/// Execute the `cq config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Path => path(ctx),
        ConfigCommands::Init(init_args) => init(ctx, init_args),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    let (config, source) = ctx.load_config()?;

    if ctx.json {
        output_json(&serde_json::json!({
            "source": source,
            "config": config,
        }));
        return Ok(());
    }

    if !ctx.quiet {
        match &source {
            ConfigSource::File(path) => println!("# source: {}", path.display()),
            ConfigSource::Demo => println!("# source: built-in demo profile"),
        }
    }
    let yaml = serde_yaml::to_string(&config).context("failed to render config")?;
    print!("{}", yaml);
    Ok(())
}

/// `--config` wins; otherwise a `.cqql/` directory must be discoverable.
fn path(ctx: &RuntimeContext) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            find_config_dir_or_error(&cwd)?.join(CONFIG_FILE)
        }
    };

    if ctx.json {
        output_json(&serde_json::json!({
            "path": path,
            "exists": path.exists(),
        }));
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let dir = ensure_config_dir(&cwd)
        .with_context(|| format!("failed to create config directory in {}", cwd.display()))?;
    let path = dir.join(CONFIG_FILE);

    if path.exists() && !args.force {
        bail!(
            "{} already exists\nHint: pass --force to overwrite it",
            path.display()
        );
    }

    let config = if args.empty {
        CqqlConfig::default()
    } else {
        demo_config()
    };
    save_config(&dir, &config).with_context(|| format!("failed to write {}", path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "path": path,
            "profile": if args.empty { "empty" } else { "demo" },
        }));
    } else if !ctx.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
