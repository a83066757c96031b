use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use weight_watcher::{
    commands,
    config::{Config, OutputFormat},
    report,
};

#[derive(Parser)]
#[command(name = "weight-watcher", version, about = "Keeps track of your weight")]
struct Cli {
    /// Show more output
    #[arg(short = 'b', long, global = true)]
    verbose: bool,

    /// Data file (defaults to general.data_file from the config)
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Init a new data file
    #[command(alias = "I")]
    Init,

    /// Add a new measurement
    #[command(alias = "A")]
    Add {
        /// Measured weight
        #[arg(short, long)]
        weight: f64,

        /// Date of measurement (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Edit a measurement
    #[command(alias = "E")]
    Edit {
        /// Id of the measurement to change
        #[arg(short, long)]
        id: i64,

        /// New date of measurement (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// New weight
        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// Remove a measurement
    #[command(alias = "R")]
    Remove {
        /// Id of the measurement to remove
        #[arg(short, long)]
        id: i64,
    },

    /// List all measurements
    #[command(alias = "L")]
    List,

    /// Show report
    #[command(alias = "S", subcommand)]
    Show(ShowCommands),
}

#[derive(Subcommand)]
enum ShowCommands {
    /// Current weight (average of last few days)
    Summary(ReportArgs),

    /// Historical data with moving average
    History(ReportArgs),
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Number of periods in the moving average
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    window: Option<i64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

/// Loads the config file, or `None` when there is no file and defaults apply.
fn load_config(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    Config::load(path)
        .map(Some)
        .map_err(|e| anyhow!("syntax error in {}: {}", path.display(), e))
}

fn run_report(data_file: &Path, config: &Config, command: ShowCommands) -> Result<()> {
    let (args, is_summary) = match command {
        ShowCommands::Summary(args) => (args, true),
        ShowCommands::History(args) => (args, false),
    };
    let settings = config.report.resolve(args.window, args.format);
    debug!("Report window {}, format {:?}", settings.window, settings.format);

    let db = commands::open_existing(data_file)?;
    let output = if is_summary {
        let row = report::summary(&db, settings.window)?;
        report::render_summary(row.as_ref(), settings.format)?
    } else {
        let rows = report::history(&db, settings.window)?;
        report::render_history(&rows, settings.format)?
    };
    print!("{}", output);
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let data_file = cli.file.unwrap_or_else(|| config.data_file());
    debug!("Using data file {:?}", data_file);

    match cli.command {
        Commands::Init => {
            commands::init(&data_file)?;
            println!("Created {}", data_file.display());
        }
        Commands::Add { weight, date } => {
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            println!("{}", commands::add(&data_file, day, weight)?);
        }
        Commands::Edit { id, date, weight } => commands::edit(&data_file, id, date, weight)?,
        Commands::Remove { id } => commands::remove(&data_file, id)?,
        Commands::List => {
            for m in commands::list(&data_file)? {
                println!("{:>5}  {}  {:>7.1}", m.id, m.day, m.value);
            }
        }
        Commands::Show(command) => run_report(&data_file, &config, command)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = load_config(&config_path)?;

    let verbose = cli.verbose || loaded.as_ref().is_some_and(|c| c.general.verbose);
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = loaded.unwrap_or_else(|| {
        info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    });
    run(cli, config)
}
