//! Sol Cesto Advisor - Command line host
//!
//! Reads a vision report, runs the recommender and prints the advice as a
//! human-readable report or as JSON.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use sol_cesto_advisor::core::config::{load_tuning, AdvisorConfig};
use sol_cesto_advisor::core::error::Result;
use sol_cesto_advisor::engine::{
    LoadoutEvaluation, MoveRecommender, Recommendation, StrategicAssessment,
};
use sol_cesto_advisor::grid::VisionReport;
use sol_cesto_advisor::player::items::{resolve_items, CATALOG};
use sol_cesto_advisor::player::PlayerStats;

/// Sol Cesto Advisor - pick the safest profitable row
#[derive(Parser, Debug)]
#[command(name = "sol-cesto-advisor")]
#[command(about = "Recommend which Sol Cesto row to explore")]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend a row from a vision report
    Recommend {
        /// Vision report (JSON)
        #[arg(long)]
        state: PathBuf,

        /// Tuning file (TOML); built-in tuning when omitted
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Evaluate a loadout of catalog items
    Loadout {
        #[arg(long, default_value_t = 10)]
        hp: i32,

        #[arg(long, default_value_t = 5)]
        force: i32,

        #[arg(long, default_value_t = 3)]
        magic: i32,

        /// Catalog item ids
        items: Vec<String>,
    },
    /// List every known item
    Catalog,
}

/// JSON output structure
#[derive(Serialize)]
struct AdviceReport {
    tuning: String,
    recommendation: Recommendation,
    assessment: StrategicAssessment,
    loadout: LoadoutEvaluation,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "sol_cesto_advisor=debug"
    } else {
        "sol_cesto_advisor=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Recommend {
            state,
            tuning,
            format,
        } => run_recommend(&state, tuning.as_deref(), &format),
        Command::Loadout {
            hp,
            force,
            magic,
            items,
        } => {
            run_loadout(PlayerStats::new(hp, force, magic), &items);
            Ok(())
        }
        Command::Catalog => {
            print_catalog();
            Ok(())
        }
    }
}

fn run_recommend(state: &std::path::Path, tuning: Option<&std::path::Path>, format: &str) -> Result<()> {
    let config = match tuning {
        Some(path) => load_tuning(path)?,
        None => AdvisorConfig::default(),
    };
    tracing::info!("Using tuning '{}'", config.name);

    let snapshot = VisionReport::load(state)?.into_snapshot()?;
    let recommender = MoveRecommender::with_config(&config);

    let recommendation = recommender.recommend(&snapshot.grid, &snapshot.stats, &snapshot.modifiers)?;
    let assessment = recommender
        .strategy()
        .assess(&snapshot.stats, snapshot.level, snapshot.gold);
    let loadout = recommender
        .strategy()
        .evaluate_item_loadout(&snapshot.stats, &snapshot.items);

    let report = AdviceReport {
        tuning: config.name.clone(),
        recommendation,
        assessment,
        loadout,
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report, &snapshot.stats);
    }

    Ok(())
}

fn print_text_report(report: &AdviceReport, stats: &PlayerStats) {
    let rec = &report.recommendation;

    println!("=== SOL CESTO ADVISOR ===");
    println!(
        "HP {} | Force {} | Magic {} | Phase {}",
        stats.hp, stats.force, stats.magic, report.assessment.phase
    );
    println!();
    println!("Row  Score     Gain    Damage  Survival");
    for evaluation in &rec.evaluations {
        let marker = if evaluation.row == rec.best_row { '*' } else { ' ' };
        println!(
            "{}{:<3} {:>8.2} {:>7.2} {:>8.2} {:>8.0}%",
            marker,
            evaluation.row + 1,
            evaluation.score,
            evaluation.expected_gain,
            evaluation.expected_damage,
            evaluation.survival_probability * 100.0
        );
    }
    println!();
    println!("Recommended row: {}", rec.best_row + 1);
    println!("Reason: {}", rec.justification);

    if report.assessment.prioritize_chests {
        println!("Chests are a priority this phase");
    }
    if report.loadout.synergy > 1.0 {
        println!("Item synergy: x{:.2}", report.loadout.synergy);
    }
}

fn run_loadout(stats: PlayerStats, ids: &[String]) {
    let items = resolve_items(ids);
    let recommender = MoveRecommender::new();
    let evaluation = recommender.strategy().evaluate_item_loadout(&stats, &items);
    let effective = evaluation.effective;

    println!("Items: {}", items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>().join(", "));
    println!(
        "Force {} | Magic {} | HP {}/{} | Damage reduction {:.1}",
        effective.force,
        effective.magic,
        effective.hp,
        effective.hp_max.unwrap_or(effective.hp),
        effective.damage_reduction
    );
    println!("Synergy: x{:.2}", evaluation.synergy);
}

fn print_catalog() {
    println!("{:<22} {:<9} {:<22} Value", "Id", "Source", "Effect");
    for entry in CATALOG {
        println!(
            "{:<22} {:<9} {:<22} {}",
            entry.id,
            format!("{:?}", entry.source),
            entry.effect.label(),
            entry.value
        );
    }
}
