use std::fs::File;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use dai_market::{
    charts::DashboardCharts,
    config::{self, DashboardConfig},
    dai_market::get_dai_market,
    env::ENV_CONFIG,
    export::{self, DataFormat},
    flipside::FlipsideHttp,
    granularity::Granularity,
    log,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file mapping datasets to URLs. Defaults to CONFIG_PATH, then
    /// config.json.
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the DAI market data to CSV.
    Data {
        /// daily, weekly or monthly.
        #[clap(long, default_value = "daily")]
        granularity: Granularity,
        /// wide (a column per metric) or long (Date, Amount, Context).
        #[clap(long, default_value = "wide")]
        format: DataFormat,
        /// Output file path (e.g., ./dai-market.csv).
        #[clap(long)]
        output: String,
    },
    /// Export the dashboard chart figures as plotly JSON.
    Charts {
        /// daily, weekly or monthly.
        #[clap(long, default_value = "daily")]
        granularity: Granularity,
        /// Output file path (e.g., ./charts.json).
        #[clap(long)]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log::init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| ENV_CONFIG.config_path.clone());
    let config = config::read_config(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    match cli.command {
        Commands::Data {
            granularity,
            format,
            output,
        } => {
            export_data(&config, granularity, format, &output).await?;
        }
        Commands::Charts {
            granularity,
            output,
        } => {
            export_charts(&config, granularity, &output).await?;
        }
    }

    Ok(())
}

async fn export_data(
    config: &DashboardConfig,
    granularity: Granularity,
    format: DataFormat,
    output: &str,
) -> anyhow::Result<()> {
    let api = FlipsideHttp::new();
    let frame = get_dai_market(&api, config.dai_daily_url()?, granularity).await?;

    let file = File::create(output)?;
    export::write_csv(file, &frame, format)?;

    info!(output, rows = frame.len(), %granularity, "export dai market completed");
    Ok(())
}

async fn export_charts(
    config: &DashboardConfig,
    granularity: Granularity,
    output: &str,
) -> anyhow::Result<()> {
    let api = FlipsideHttp::new();
    let url = config.dai_daily_url()?;

    let daily = get_dai_market(&api, url, Granularity::Daily).await?;
    let selected = match granularity {
        Granularity::Daily => daily.clone(),
        _ => get_dai_market(&api, url, granularity).await?,
    };
    let charts = DashboardCharts::build(&selected, &daily, granularity, &config.policy_markers());

    let file = File::create(output)?;
    serde_json::to_writer_pretty(file, &charts)?;

    info!(output, %granularity, "export charts completed");
    Ok(())
}
