use clap::{Parser, Subcommand};
use napkin::estimate::{
    self, Estimate, SizeUnit, StorageInputs, TimeUnit, TrafficInputs, UnitTable,
};
use napkin::scenario;
use tracing::Level;

#[derive(Parser)]
#[command(name = "napkin")]
#[command(about = "Back-of-envelope traffic and storage estimator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate request rates for every period
    Traffic {
        /// Number of requests (e.g., "100")
        num_requests: String,

        /// Period the requests occur in (e.g., "per min")
        time_range: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate storage growth per day, month and year
    Storage {
        /// Size of one item (e.g., "2")
        storage_per_item: String,

        /// Items written per day
        items_per_day: String,

        /// Unit of the item size (KB, MB, GB, TB)
        #[arg(short, long, default_value = "MB")]
        unit: String,

        /// Days counted per year (default: 365)
        #[arg(short, long, default_value = "")]
        days_per_year: String,

        /// Retention in years; multiplies the yearly total
        #[arg(short, long, default_value = "")]
        years_to_store: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every scenario in a TOML file and print JSON results
    Batch {
        /// Scenario file path
        path: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List accepted time ranges and storage units
    Units,
}

/// Exit status when the inputs were rejected
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Traffic {
            num_requests,
            time_range,
            json,
        } => run_estimate(
            estimate::compute(&estimate::Request::Traffic(TrafficInputs::new(
                num_requests,
                time_range,
            ))),
            json,
        ),
        Commands::Storage {
            storage_per_item,
            items_per_day,
            unit,
            days_per_year,
            years_to_store,
            json,
        } => run_estimate(
            estimate::compute(&estimate::Request::Storage(StorageInputs::new(
                storage_per_item,
                unit,
                items_per_day,
                days_per_year,
                years_to_store,
            ))),
            json,
        ),
        Commands::Batch { path, output } => run_batch(&path, output.as_deref()),
        Commands::Units => {
            list_units();
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Print one estimate; `Ok(false)` when its inputs were rejected
fn run_estimate(estimate: Estimate, json: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&estimate.to_json())?);
        return Ok(estimate.is_ok());
    }

    match &estimate {
        Estimate::Traffic(Ok(report)) => {
            println!("Estimated Traffic:");
            for (period, value) in report.rows() {
                println!("  {} per {}", value, period);
            }
        }
        Estimate::Storage(Ok(report)) => {
            println!("Estimated Storage:");
            for (period, value) in report.rows() {
                println!("  {} per {}", value, period);
            }
        }
        Estimate::Traffic(Err(errors)) => eprint!("{}", errors),
        Estimate::Storage(Err(errors)) => eprint!("{}", errors),
    }

    Ok(estimate.is_ok())
}

fn run_batch(path: &str, output: Option<&str>) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = scenario::ScenarioFile::load_from_file(path)?;
    let outcomes = scenario::run_scenarios(&scenarios);

    let rejected = outcomes.iter().filter(|o| !o.estimate.is_ok()).count();
    if rejected > 0 {
        eprintln!(
            "{} of {} scenarios had invalid inputs",
            rejected,
            outcomes.len()
        );
    }

    let json = serde_json::to_string_pretty(&scenario::outcomes_to_json(&outcomes))?;

    if let Some(output_path) = output {
        std::fs::write(output_path, json)?;
        println!("Results written to {}", output_path);
    } else {
        println!("{}", json);
    }

    Ok(rejected == 0)
}

fn list_units() {
    println!("Time ranges (seconds):");
    for unit in TimeUnit::ALL {
        println!("  {:<10} {}", unit.label(), unit.factor());
    }

    println!("\nStorage units (megabytes):");
    for unit in SizeUnit::ALL {
        println!("  {:<10} {}", unit.label(), unit.factor());
    }
}
