use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nimda::analytics::{build_analytics_report, fetch_realtime_users, resolve_filters, AnalyticsQuery};
use nimda::config::Config;
use nimda::ga4::Ga4Client;

#[derive(Parser)]
#[command(name = "nimda-report")]
#[command(about = "Fetch the GA4 dashboard report from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full dashboard report as JSON
    Report {
        /// Range preset: 7d, 30d or custom
        #[arg(long)]
        range: Option<String>,
        /// Start date (YYYY-MM-DD) for a custom range
        #[arg(long)]
        start_date: Option<String>,
        /// End date (YYYY-MM-DD) for a custom range
        #[arg(long)]
        end_date: Option<String>,
        /// Locale filter: all, en, ru or uz
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print active users over the last 30 minutes
    Realtime,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = Ga4Client::from_config(&config.ga4)?;

    match cli.command {
        Commands::Report {
            range,
            start_date,
            end_date,
            locale,
        } => {
            let filters = resolve_filters(&AnalyticsQuery {
                range,
                start_date,
                end_date,
                locale,
            });
            let report = build_analytics_report(&client, &filters)
                .await
                .context("failed to fetch analytics report")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Realtime => {
            let summary = fetch_realtime_users(&client)
                .await
                .context("failed to fetch realtime users")?;
            println!(
                "Active users in the last 30 minutes: {}",
                summary.active_users_last_30_minutes
            );
        }
    }

    Ok(())
}
