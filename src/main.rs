use anyhow::{Context, Result};
use clap::Parser;

use ajeno::cli::{Cli, OutputFormat};
use ajeno::json_output::JsonOutput;
use ajeno::view::{MemorySink, ThirdPartyView, SUMMARY_RECORD_TYPE};
use ajeno::{csv_output, input, table_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let audit = input::load_audit(&cli.audit)?;
    let mapping = match &cli.mapping {
        Some(path) => input::load_mapping(path)?,
        None => Vec::new(),
    };

    let mut store = MemorySink::new();
    let mut controller =
        ThirdPartyView::new(audit.third_party, mapping, audit.domain_wise_scripts);
    let state = controller.set_view(cli.view.into(), &mut store);

    match cli.format {
        OutputFormat::Text => print!("{}", table_output::render(&state)),
        OutputFormat::Json => println!("{}", JsonOutput::from_state(&state).to_json()?),
        OutputFormat::Csv => print!("{}", csv_output::render(&state)),
    }

    if let Some(path) = &cli.emit_summary {
        let summary = store
            .get(SUMMARY_RECORD_TYPE)
            .context("no summary was published")?;
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    Ok(())
}
