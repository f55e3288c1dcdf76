#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pausier::{
    config::Config,
    io,
    model::Roster,
    report::{ReportRenderer, TextReport},
    scheduler::{BreakScheduler, BreakTable, CoverageMap},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de placement de pauses (une journée par exécution)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (groupes, horaires, réglages)
    #[arg(long, global = true, default_value = "pausier.json")]
    config: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer les pauses d'un planning CSV
    Schedule {
        /// CSV `dept,subdept,name,shift`
        #[arg(long)]
        csv: String,
        /// Date du planning (YYYY-MM-DD), par défaut aujourd'hui
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Écrire une configuration par défaut
    InitConfig,

    /// Vérifier la configuration (groupes en double, structure)
    CheckConfig,

    /// Afficher la couverture par groupe, avant et après pauses
    Coverage {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.config)?;

    let code = match cli.cmd {
        Commands::Schedule {
            csv,
            date,
            out_csv,
            out_json,
        } => {
            let config = storage.load_or_default();
            let scheduler = build_scheduler(&config, &csv, date.as_deref())?;
            let table = scheduler.schedule();

            print!("{}", TextReport.render(scheduler.roster(), &table));

            if let Some(path) = out_csv {
                io::export_breaks_csv(path, scheduler.roster(), &table)?;
            }
            if let Some(path) = out_json {
                io::export_breaks_json(path, scheduler.roster(), &table)?;
            }
            0
        }
        Commands::InitConfig => {
            storage.save(&Config::default())?;
            println!("Default config written to {}", cli.config);
            0
        }
        Commands::CheckConfig => {
            let config = storage.load()?;
            let warnings = config.validate()?;
            if warnings.is_empty() {
                println!("OK: config valid");
                0
            } else {
                for w in &warnings {
                    eprintln!("Warning: {w}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Coverage { csv, date } => {
            let config = storage.load_or_default();
            let scheduler = build_scheduler(&config, &csv, date.as_deref())?;
            let table = scheduler.schedule();

            let empty = BreakTable::for_roster(scheduler.roster());
            let before = CoverageMap::compute(scheduler.roster(), &empty, scheduler.hours());
            let after = CoverageMap::compute(scheduler.roster(), &table, scheduler.hours());

            for group in scheduler.groups() {
                let Some(probe) = group.departments.first() else {
                    continue;
                };
                println!("{}", group.name);
                for t in scheduler.hours().ticks() {
                    println!(
                        "  {} | {} -> {}",
                        io::minutes_to_time(t),
                        before.coworkers_at(t, probe, scheduler.groups()),
                        after.coworkers_at(t, probe, scheduler.groups()),
                    );
                }
            }
            0
        }
    };

    std::process::exit(code);
}

fn build_scheduler(config: &Config, csv: &str, date: Option<&str>) -> Result<BreakScheduler> {
    let rows = io::import_rows_csv(csv)?;
    let roster = Roster::from_rows(rows);
    if roster.is_empty() {
        bail!("no usable schedule rows in {csv}");
    }

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => Local::now().date_naive(),
    };
    let hours = config.hours.for_date(date);

    Ok(BreakScheduler::new(
        roster,
        config.groups.clone(),
        hours,
        config.settings,
    ))
}
