use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use model::Country;
use std::path::PathBuf;

pub mod commands;

use commands::{export, print_curves, render, serve};

#[derive(Parser)]
#[command(name = "inflation-curves")]
#[command(about = "Survey inflation expectation term structures: web API and CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Chart rendered by the `render` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Time series of the curated horizons
    Overview,
    /// Structure curves of several quarters side by side
    Comparison,
    /// A single structure curve
    Evolution,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Directory holding `<code>/FittedTermStructure.csv` per country
        #[arg(short, long, env = "DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Export the table of a country as CSV
    ///
    /// Without --quarters the whole table is exported.
    Export {
        /// Country code (de, es, ez, fr, it, nl)
        #[arg(short, long, default_value = "ez")]
        country: Country,

        /// Comma-separated quarter labels, e.g. 2019Q4,2020Q4
        #[arg(short, long, value_delimiter = ',')]
        quarters: Vec<String>,

        /// Output file; the CSV is written to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding `<code>/FittedTermStructure.csv` per country
        #[arg(short, long, env = "DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Render a chart to a standalone HTML file
    Render {
        /// Country code (de, es, ez, fr, it, nl)
        #[arg(short, long, default_value = "ez")]
        country: Country,

        /// Chart to render
        #[arg(short, long, value_enum, default_value_t = View::Overview)]
        view: View,

        /// Comparison view: comma-separated quarter labels (default: most recent three)
        #[arg(short, long, value_delimiter = ',')]
        quarters: Vec<String>,

        /// Evolution view: quarter label of the curve (default: most recent)
        #[arg(long)]
        quarter: Option<String>,

        /// Pin the y-axis to the value range of the whole table
        #[arg(long)]
        fixed_scale: bool,

        /// Output HTML file
        #[arg(short, long, default_value = "chart.html")]
        output: PathBuf,

        /// Directory holding `<code>/FittedTermStructure.csv` per country
        #[arg(short, long, env = "DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Print the quarter labels and curve metrics of a country
    Curves {
        /// Country code (de, es, ez, fr, it, nl)
        #[arg(short, long, default_value = "ez")]
        country: Country,

        /// Directory holding `<code>/FittedTermStructure.csv` per country
        #[arg(short, long, env = "DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, data_dir } => {
                serve(bind_address, data_dir).await?;
            }
            Commands::Export { country, quarters, output, data_dir } => {
                export(country, &quarters, output.as_deref(), data_dir)?;
            }
            Commands::Render {
                country,
                view,
                quarters,
                quarter,
                fixed_scale,
                output,
                data_dir,
            } => {
                render(country, view, &quarters, quarter.as_deref(), fixed_scale, &output, data_dir)?;
            }
            Commands::Curves { country, data_dir } => {
                print_curves(country, data_dir)?;
            }
        }
        Ok(())
    }
}
