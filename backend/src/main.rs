//! gdpdash CLI - GDP per capita dashboard
//!
//! ```bash
//! gdpdash clean data/GDP.csv -o clean.csv --format csv   # Long-format records
//! gdpdash figures data/GDP.csv -o figures.json           # The four charts
//! gdpdash figures data/GDP.csv --plotly                  # ...as Plotly figures
//! gdpdash validate figures.json                          # Check a chart file
//! gdpdash serve --port 3000 --data data/GDP.csv          # HTTP server
//! ```
//!
//! `--config` takes a JSON file overriding any [`DashboardConfig`] field.

use clap::{Parser, Subcommand, ValueEnum};
use gdpdash::{
    build_dashboard, load_records, to_plotly_all, validate_figures, write_csv, DashboardConfig,
    DashboardOptions, ServerSettings,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gdpdash")]
#[command(about = "Clean GDP per capita tables and build the dashboard charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Reshape a wide CSV into long-format records
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: RecordFormat,

        /// Dashboard configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build the four dashboard charts
    Figures {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit Plotly figure JSON instead of chart specs
        #[arg(long)]
        plotly: bool,

        /// Dashboard configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate a chart file against the figure-set schema
    Validate {
        /// Input JSON file (array of four charts)
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: GDPDASH_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// CSV served by GET /api/figures (default: GDPDASH_DATA or data/GDP.csv)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Dashboard configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            input,
            output,
            format,
            config,
        } => cmd_clean(&input, output.as_deref(), format, config.as_deref()),

        Commands::Figures {
            input,
            output,
            plotly,
            config,
            no_validate,
        } => cmd_figures(&input, output.as_deref(), plotly, config.as_deref(), no_validate),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Serve { port, data, config } => cmd_serve(port, data, config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_clean(
    input: &Path,
    output: Option<&Path>,
    format: RecordFormat,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::load(config_path)?;
    config.validate()?;

    let cleaned = load_records(input, &config)?;

    let content = match format {
        RecordFormat::Json => serde_json::to_string_pretty(&cleaned.records)?,
        RecordFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&cleaned.records, &mut buf)?;
            String::from_utf8(buf)?
        }
    };
    write_output(&content, output)?;

    Ok(())
}

fn cmd_figures(
    input: &Path,
    output: Option<&Path>,
    plotly: bool,
    config_path: Option<&Path>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::load(config_path)?;
    let options = DashboardOptions {
        skip_validation: no_validate,
    };

    let result = build_dashboard(input, &config, &options)?;

    let json = if plotly {
        serde_json::to_string_pretty(&to_plotly_all(&result.figures))?
    } else {
        serde_json::to_string_pretty(&result.figures)?
    };
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let figures: Value = serde_json::from_str(&content)?;

    match validate_figures(&figures) {
        Ok(()) => {
            eprintln!("Valid figure set");
            Ok(())
        }
        Err(errors) => {
            for err in errors.iter().take(10) {
                eprintln!("   - {}", err);
            }
            Err(format!("{} validation errors", errors.len()).into())
        }
    }
}

async fn cmd_serve(
    port: Option<u16>,
    data: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = ServerSettings::from_env()?;
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(data) = data {
        settings.data_path = data;
    }
    let config = DashboardConfig::load(config_path)?;

    gdpdash::server::start_server(settings, config).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
