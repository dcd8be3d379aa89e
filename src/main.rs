mod chart;
mod client;
mod config;
mod models;
mod process;
mod utils;
mod widget;
mod window;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::{HttpQuotationSource, QuotationSource};
use crate::config::AppConfig;
use crate::models::{Currency, TimeRange};
use crate::widget::LineChartWidget;

#[derive(Parser)]
#[command(name = "quote-chart", about = "Market quotation line-chart feed", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, process and window a symbol's quotations, then print the
    /// chart spec as JSON for the renderer
    Render {
        /// Company symbol code, e.g. YPF
        #[arg(short, long)]
        cod: String,

        /// Display currency: USD or YEN
        #[arg(long, default_value = "USD")]
        currency: Currency,

        /// USD→YEN multiplier, applied when currency is YEN
        #[arg(long, default_value_t = 1.0)]
        exchange_rate: f64,

        /// Visible window: 1d, 3d, 1w, 1m or all
        #[arg(short, long, default_value = "1d")]
        range: TimeRange,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Dump the raw quotation rows for a symbol (debugging aid)
    Fetch {
        #[arg(short, long)]
        cod: String,
    },

    /// List the supported window selections
    Ranges,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "quote_chart=info,warn",
        1 => "quote_chart=debug,info",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Render {
            cod,
            currency,
            exchange_rate,
            range,
            pretty,
        } => {
            let _t = utils::Timer::start(format!("Render {}", cod));
            let source = HttpQuotationSource::new(&config.client)?;

            let mut widget =
                LineChartWidget::new(cod.as_str(), currency, exchange_rate, config.chart);
            widget.set_range(range);
            widget.load(&source).await;

            // A failed load still yields a spec: an empty chart, per the
            // log-and-stop error policy.
            let spec = widget
                .chart_spec()
                .context("no chart spec after load")?;

            info!(
                "{}: {} points processed, {} visible ({})",
                cod,
                widget.processed_len(),
                spec.point_count(),
                range.code(),
            );

            let json = if pretty {
                serde_json::to_string_pretty(&spec)?
            } else {
                serde_json::to_string(&spec)?
            };
            println!("{}", json);
        }

        Command::Fetch { cod } => {
            let _t = utils::Timer::start(format!("Fetch {}", cod));
            let source = HttpQuotationSource::new(&config.client)?;
            let rows = source.fetch_quotations(&cod).await?;
            info!("{}: {} rows", cod, rows.len());
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Command::Ranges => {
            println!("Supported ranges:");
            for r in TimeRange::ALL_RANGES {
                match r.days() {
                    Some(d) => println!("  {:<4} {} (last {} day{})", r.code(), r.label(), d,
                        if d == 1 { "" } else { "s" }),
                    None => println!("  {:<4} {} (downsampled full history)", r.code(), r.label()),
                }
            }
        }
    }

    Ok(())
}
