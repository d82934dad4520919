use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_allowables::{
    analysis::analyze,
    backend::StatrsBackend,
    cli::Cli,
    io::{self, load_hk_table, load_or_empty, load_weibull_table},
    tables::ReferenceTables,
};

/// Initialize tracing subscriber; `RUST_LOG` takes precedence over the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let cfg = args.resolve_config().context("Failed to load configuration")?;

    let (sample, groups) = io::load_sample(&cfg.input, cfg.columns())
        .with_context(|| format!("Error loading data from {}", cfg.input.display()))?;

    let tables = ReferenceTables {
        hk: load_or_empty(&cfg.hk_table, load_hk_table),
        weibull: load_or_empty(&cfg.weibull_table, load_weibull_table),
    };

    let result = analyze(&sample, &groups, &tables, &StatrsBackend)?;

    io::save_report(&cfg.output, &result)
        .with_context(|| format!("Failed to write report to {}", cfg.output.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    println!("{}", io::completion_message(&result));

    Ok(())
}
