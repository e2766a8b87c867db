use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use drills::analyser::{self, AnalysisOptions, Chart as _};
use drills::chance;
use drills::config::{self, AppSettings};
use drills::error::DrillError;
use drills::input::{self, IntReader, RetryPolicy};
use drills::songs::{self, SearchRequest, SongClient};
use drills::{calculator, greeting};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "drills", version, about = "Small programming drills")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the square of an integer
    Square {
        /// Integer to square
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Read an integer from standard input, asking again on bad input
    ReadInt {
        /// What to do after a line that is not a number. Defaults to the config value.
        #[arg(long, value_enum)]
        policy: Option<RetryPolicy>,

        /// Name of the value in the prompt. Defaults to the config value.
        #[arg(long)]
        var: Option<String>,
    },
    /// Introduce yourself. Takes exactly one name.
    Name {
        #[arg(allow_hyphen_values = true)]
        names: Vec<String>,
    },
    /// Flip a coin
    Coin {
        /// Seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pick a random integer in an inclusive range
    Roll {
        /// Lower bound. Defaults to the config value (1).
        #[arg(long, allow_hyphen_values = true)]
        low: Option<i64>,

        /// Upper bound. Defaults to the config value (12).
        #[arg(long, allow_hyphen_values = true)]
        high: Option<i64>,

        /// Seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Shuffle cards and print them one per line
    Shuffle {
        /// Cards to shuffle. Defaults to a five-card hand.
        cards: Vec<String>,

        /// Seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search songs by term. Takes exactly one term.
    Songs {
        terms: Vec<String>,

        /// Maximum number of results (default: 1 with --raw, 50 otherwise)
        #[arg(long)]
        limit: Option<u32>,

        /// Print the whole JSON response instead of track names
        #[arg(long)]
        raw: bool,
    },
    /// Print the first rows of a spreadsheet or CSV file
    Preview {
        file: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },
    /// Average a value per group and chart the result
    Analyze {
        file: PathBuf,

        /// Column to group by
        #[arg(long, default_value = "Country")]
        key: String,

        /// Column averaged and plotted per group
        #[arg(long, default_value = "MortalityRate")]
        value: String,

        /// Column plotted against the value in the histogram
        #[arg(long, default_value = "Population")]
        weight: String,

        /// Output directory for the charts. Defaults to the config value.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as JSON
    Show,
    /// Print the settings file and log file locations
    Path,
    /// Write the default settings file if none exists
    Init,
}

/// Prints drill diagnostics (not a number, wrong argument count, ...) on
/// stdout and maps them to exit status 1. Anything else is a real error.
fn user_error(err: DrillError) -> Result<ExitCode> {
    if err.is_user_facing() {
        println!("{err}");
        Ok(ExitCode::FAILURE)
    } else {
        Err(err.into())
    }
}

pub async fn run_command(command: Commands, settings: &AppSettings) -> Result<ExitCode> {
    match command {
        Commands::Square { value } => handle_square(&value),
        Commands::ReadInt { policy, var } => handle_read_int(
            policy.unwrap_or(settings.retry_policy),
            var.unwrap_or_else(|| settings.variable_name.clone()),
        ),
        Commands::Name { names } => match greeting::single_argument(&names) {
            Ok(name) => {
                println!("{}", greeting::introduce(name));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => user_error(e),
        },
        Commands::Coin { seed } => {
            let mut rng = chance::make_rng(seed);
            println!("{}", chance::flip_coin(&mut rng));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Roll { low, high, seed } => {
            let mut rng = chance::make_rng(seed);
            let low = low.unwrap_or(settings.roll_low);
            let high = high.unwrap_or(settings.roll_high);
            match chance::roll(&mut rng, low, high) {
                Ok(n) => {
                    println!("{n}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => user_error(e),
            }
        }
        Commands::Shuffle { mut cards, seed } => {
            if cards.is_empty() {
                cards = chance::default_deck();
            }
            let mut rng = chance::make_rng(seed);
            chance::shuffle(&mut rng, &mut cards);
            for card in &cards {
                println!("{card}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Songs { terms, limit, raw } => handle_songs(&terms, limit, raw, settings).await,
        Commands::Preview { file, rows } => {
            let df = analyser::load_table(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            println!("{}", analyser::preview(&df, rows));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analyze {
            file,
            key,
            value,
            weight,
            out,
        } => {
            let options = AnalysisOptions {
                key,
                value,
                weight,
                out_dir: out.unwrap_or_else(|| settings.chart_dir.clone()),
            };
            handle_analyze(&file, &options)
        }
        Commands::Config { command } => handle_config(command, settings),
    }
}

fn handle_square(value: &str) -> Result<ExitCode> {
    match input::parse_int(value, value) {
        Ok(n) => {
            println!("{n} squared is {}", calculator::square(n));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => user_error(e),
    }
}

fn handle_read_int(policy: RetryPolicy, var: String) -> Result<ExitCode> {
    let result = {
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        let mut reader = IntReader::new(stdin, stdout)
            .with_var(var.clone())
            .with_policy(policy);
        reader.read_int()
    };

    match result {
        Ok(x) => {
            println!("{var} is {x}");
            Ok(ExitCode::SUCCESS)
        }
        // The reader already printed the diagnostic before terminating.
        Err(DrillError::NotANumber { .. }) => Ok(ExitCode::FAILURE),
        Err(e) => user_error(e),
    }
}

async fn handle_songs(
    terms: &[String],
    limit: Option<u32>,
    raw: bool,
    settings: &AppSettings,
) -> Result<ExitCode> {
    let term = match greeting::single_argument(terms) {
        Ok(term) => term,
        Err(e) => return user_error(e),
    };
    let limit = limit.unwrap_or(if raw { 1 } else { 50 });

    let client = SongClient::new(
        settings.songs_base_url.clone(),
        Duration::from_secs(settings.songs_timeout_secs),
    )?;
    let document = client
        .search(&SearchRequest::new(term, limit))
        .await
        .context("Song search failed")?;

    if raw {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        for name in songs::track_names(&document) {
            println!("{name}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_analyze(file: &Path, options: &AnalysisOptions) -> Result<ExitCode> {
    println!("Analyzing {}...", file.display());
    let report = analyser::run_analysis(file, options)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    println!("{} groups", report.groups);
    print!("{}", report.bar_chart.to_text(40));
    for path in &report.written {
        println!("Chart saved to: {}", path.display());
    }
    println!("Data analysis and visualizations complete.");
    Ok(ExitCode::SUCCESS)
}

fn handle_config(command: ConfigCommands, settings: &AppSettings) -> Result<ExitCode> {
    match command {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        ConfigCommands::Path => {
            println!("config: {}", config::get_config_path().display());
            println!("log: {}", drills::logging::get_current_log_path()?.display());
        }
        ConfigCommands::Init => {
            let path = config::get_config_path();
            if path.exists() {
                println!("Config already exists at {}", path.display());
            } else {
                config::save_app_config(&AppSettings::default())?;
                println!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
