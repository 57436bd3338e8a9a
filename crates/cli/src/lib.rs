pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use soiree_core::{PartyBrief, TimeSlot, NO_THEME};

#[derive(Debug, Parser)]
#[command(
    name = "soiree",
    about = "Soiree party-planning CLI",
    long_about = "Assemble supplier party plans, propose replacements for rejected picks, \
                  write the demo catalog, and inspect effective engine configuration.",
    after_help = "Examples:\n  soiree plan --theme princess --guests 12 --date 2026-10-03 \
                  --slot afternoon --location \"SW19 1RG\"\n  soiree replace --supplier-id \
                  ent-princess-parties --theme princess --guests 12 --date 2026-10-03 \
                  --slot afternoon --location SW19\n  soiree seed --out catalog.json\n  \
                  soiree config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Build a party plan for a brief and print it as JSON")]
    Plan {
        #[command(flatten)]
        brief: BriefArgs,
        #[arg(long, help = "Catalog JSON file (defaults to the built-in demo catalog)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Propose a replacement for a rejected supplier")]
    Replace {
        #[command(flatten)]
        brief: BriefArgs,
        #[arg(long, help = "Catalog id of the rejected supplier")]
        supplier_id: String,
        #[arg(long, help = "Catalog JSON file (defaults to the built-in demo catalog)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Write the deterministic demo catalog as a loadable JSON document")]
    Seed {
        #[arg(long, default_value = "soiree-catalog.json", help = "Output path")]
        out: PathBuf,
    },
    #[command(about = "Inspect effective engine configuration with source attribution")]
    Config,
}

/// Party brief flags shared by `plan` and `replace`.
#[derive(Debug, Args)]
pub struct BriefArgs {
    #[arg(long, default_value = NO_THEME, help = "Party theme, or no-theme")]
    pub theme: String,
    #[arg(long, help = "Number of guests")]
    pub guests: u32,
    #[arg(long, help = "Party date (YYYY-MM-DD)")]
    pub date: NaiveDate,
    #[arg(long, help = "Time slot: morning or afternoon")]
    pub slot: TimeSlot,
    #[arg(long, default_value_t = 2, help = "Party duration in hours")]
    pub duration: u32,
    #[arg(long, help = "Party location (postcode or area)")]
    pub location: String,
    #[arg(long, help = "Total budget in pounds (defaults to a guest-count step)")]
    pub budget: Option<Decimal>,
}

impl BriefArgs {
    pub fn into_brief(self) -> PartyBrief {
        PartyBrief {
            theme: self.theme,
            guest_count: self.guests,
            date: self.date,
            time_slot: self.slot,
            duration_hours: self.duration,
            location: self.location,
            budget: self.budget,
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Plan { brief, catalog } => commands::plan::run(brief.into_brief(), catalog),
        Command::Replace { brief, supplier_id, catalog } => {
            commands::replace::run(brief.into_brief(), &supplier_id, catalog)
        }
        Command::Seed { out } => commands::seed::run(&out),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
