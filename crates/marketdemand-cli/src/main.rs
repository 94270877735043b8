//! marketdemand — entry point for the CLI binary.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marketdemand_cli::app::{render_industry_list, run_analysis};
use marketdemand_cli::cli::Args;
use marketdemand_cli::config::Config;
use marketdemand_cli::prompts::prompt_filters;
use marketdemand_cli::render::render_dashboard;
use marketdemand_ingestion::MarketData;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marketdemand=info,warn")),
        )
        .init();

    let args = Args::parse();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(source) = args.demographics_source {
        config.sources.demographic = source;
    }

    let data = MarketData::load(&config.data, &config.sources, &config.census).await?;

    if args.list_industries {
        print!("{}", render_industry_list(&data));
        return Ok(());
    }

    let (filters, listing) = if args.needs_prompt() {
        prompt_filters(&args.listing(config.display.default_limit), &data.industries.names())?
    } else {
        if args.industry.is_none() {
            anyhow::bail!("--industry is required with --json");
        }
        (args.filters(), args.listing(config.display.default_limit))
    };

    let report = run_analysis(&data, &filters, &listing, &config.scoring);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let color = config.display.color && !args.no_color;
        print!(
            "{}",
            render_dashboard(
                &report.businesses,
                &report.filters,
                report.industry_params.ideal_ppb,
                &report.result,
                config.display.bar_width,
                color,
            )
        );
    }
    Ok(())
}
