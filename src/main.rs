//! Form features CLI
//!
//! Builds rolling-form training tables from football results files.

use clap::{Parser, Subcommand};
use form_features::data::export::ExportFormat;
use form_features::{Config, Result};

#[derive(Parser)]
#[command(name = "form-features")]
#[command(about = "Rolling team-form feature tables from match results", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature table for a results file
    Build {
        /// Results CSV (overrides config)
        #[arg(long)]
        input: Option<String>,
        /// Output path (overrides config)
        #[arg(long)]
        output: Option<String>,
        /// Number of prior matches per form vector (overrides config)
        #[arg(long)]
        window: Option<usize>,
        /// Output format
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },
    /// Show one team's form as of a date
    Inspect {
        /// Team name, exactly as in the results file
        team: String,
        /// As-of date (dd/mm/yy)
        date: String,
        /// Results CSV (overrides config)
        #[arg(long)]
        input: Option<String>,
        /// Number of prior matches (overrides config)
        #[arg(long)]
        window: Option<usize>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Show results file summary
    Status {
        /// Results CSV (overrides config)
        #[arg(long)]
        input: Option<String>,
    },
    /// Write a default config file
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            window,
            format,
        } => commands::build(&config, input, output, window, format),
        Commands::Inspect {
            team,
            date,
            input,
            window,
            format,
        } => commands::inspect(&config, &team, &date, input, window, format),
        Commands::Status { input } => commands::status(&config, input),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use form_features::data::{export, FeatureDataset, FeatureRow, MatchStore};
    use form_features::features::{FormAggregator, FormVector};
    use form_features::{parse_date, FormError};

    fn window_size(config: &Config, window: Option<usize>) -> Result<usize> {
        let size = window.unwrap_or(config.features.window_size);
        if size == 0 {
            return Err(FormError::Parse("window must be at least 1".to_string()));
        }
        Ok(size)
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Put a results CSV at {}", config.data.input_path);
        println!("  2. Run 'form-features build' to write the feature table");
        Ok(())
    }

    pub fn build(
        config: &Config,
        input: Option<String>,
        output: Option<String>,
        window: Option<usize>,
        format: ExportFormat,
    ) -> Result<()> {
        let input = input.unwrap_or_else(|| config.data.input_path.clone());
        let output = output.unwrap_or_else(|| config.data.output_path.clone());
        let window = window_size(config, window)?;

        let store = MatchStore::open(&input)?;
        let dataset = FeatureDataset::build(&store, window);
        export::save(dataset.rows(), format, &output)?;

        println!(
            "{} rows ({} columns) written to {}; {} matches skipped for insufficient history",
            dataset.len(),
            FeatureRow::DIM,
            output,
            dataset.skipped()
        );
        Ok(())
    }

    pub fn inspect(
        config: &Config,
        team: &str,
        date: &str,
        input: Option<String>,
        window: Option<usize>,
        format: OutputFormat,
    ) -> Result<()> {
        let input = input.unwrap_or_else(|| config.data.input_path.clone());
        let window = window_size(config, window)?;
        let as_of = parse_date(date)?;

        let store = MatchStore::open(&input)?;
        if !store.contains_team(team) {
            return Err(FormError::UnknownTeam(team.to_string()));
        }

        let history = store.matches_before(team, as_of);
        let form = FormAggregator::new(&store, window).aggregate(team, as_of);

        match format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "team": team,
                    "as_of": as_of.to_string(),
                    "window": window,
                    "prior_matches": history.len(),
                    "form": form,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Table => match form {
                Some(form) => print_form(team, &form),
                None => println!(
                    "{}: insufficient history before {} ({} of {} matches)",
                    team,
                    as_of,
                    history.len(),
                    window
                ),
            },
        }
        Ok(())
    }

    fn print_form(team: &str, form: &FormVector) {
        println!("{}", team);
        println!("{}", "-".repeat(40));
        for (name, value) in FormVector::STAT_NAMES.iter().zip(form.to_array()) {
            println!("{:<30} {:>8}", name, value);
        }
    }

    pub fn status(config: &Config, input: Option<String>) -> Result<()> {
        let input = input.unwrap_or_else(|| config.data.input_path.clone());
        let store = MatchStore::open(&input)?;

        println!("Results file: {}", input);
        println!("  Matches: {}", store.len());
        println!("  Teams:   {}", store.teams().len());
        if let Some((first, last)) = store.date_range() {
            println!("  Dates:   {} to {}", first, last);
        }
        Ok(())
    }
}
