mod config;
mod display;
mod error;
mod export;
mod parser;
mod schedule;
mod web;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use config::resolve_capacity;
use display::{print_schedule, write_schedule_to_file};
use export::export_schedule_csv;
use parser::load_roster;
use schedule::build_schedule;

#[derive(Debug, Parser)]
#[command(name = "clinic-signup", about = "Randomized, scarcity-first clinic signup scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a schedule from a form-responses CSV
    Schedule {
        /// Form responses export (name, email, comma-separated M/D/YY dates)
        csv: PathBuf,

        /// People per date; defaults to the first cell of the first data row
        #[arg(long, env = "SIGNUP_CAPACITY")]
        capacity: Option<String>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "Clinic Schedule")]
        title: String,

        /// Also write the schedule as text to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write a sheet-shaped CSV to this file
        #[arg(long)]
        csv_output: Option<PathBuf>,
    },

    /// Serve the scheduler over HTTP
    Web {
        #[arg(long, default_value_t = 8080)]
        port: u16,

        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Web { port, admin_password } => {
            println!("Starting web server on port {}...", port);
            println!("POST a roster CSV to http://localhost:{}/api/schedule", port);
            web::start_server(port, admin_password).await?;
        }
        Command::Schedule {
            csv,
            capacity,
            seed,
            title,
            output,
            csv_output,
        } => {
            // Everything fallible happens before the draw
            let roster = load_roster(&csv)?;
            let capacity = resolve_capacity(capacity.as_deref(), roster.capacity_cell.as_deref())?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let schedule = build_schedule(roster.people, capacity, &mut rng);

            print_schedule(&title, &schedule)?;

            if let Some(path) = output {
                write_schedule_to_file(&title, &schedule, &path)?;
                println!("\nSchedule saved to {}", path.display());
            }
            if let Some(path) = csv_output {
                export_schedule_csv(&path, &title, &schedule)?;
                println!("Sheet export saved to {}", path.display());
            }
        }
    }

    Ok(())
}
