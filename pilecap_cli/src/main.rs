//! # Pilecap CLI
//!
//! Command line front end for `pilecap_core`.
//!
//! ```text
//! pilecap run tank30.json [--json]     analyze a project file
//! pilecap example [--save FILE]        analyze the built-in reference project
//! pilecap explore tank30.json          compare 4, 5 and 9 pile caps
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use pilecap_core::calculations::pile_cap::CapAlternative;
use pilecap_core::file_io::{load_project, save_project};
use pilecap_core::project::FoundationProject;
use pilecap_core::units::kn;
use pilecap_core::CalcError;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pilecap")]
#[command(about = "Pile-cap foundation check for cup-type elevated water tanks")]
#[command(version)]
struct CliArgs {
    /// Print results as JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a project file
    Run {
        /// Path to the project JSON file
        file: PathBuf,
    },

    /// Analyze the built-in 30 m³ reference project
    Example {
        /// Also write the reference project to this file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Evaluate every pile cap typology for a project
    Explore {
        /// Path to the project JSON file
        file: PathBuf,
    },
}

// ============================================================================
// Commands
// ============================================================================

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CalcError> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

fn analyze(project: &FoundationProject, json: bool) -> Result<(), CalcError> {
    let report = project.analyze()?;
    if json {
        println!("{}", to_json(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn print_alternatives(alternatives: &[CapAlternative]) {
    println!("{:<10} {:>10} {:>10} {:>14}  {}", "Typology", "B_min (m)", "h_min (m)", "Reaction (kN)", "Status");
    for alt in alternatives {
        let (reaction, status) = match &alt.result {
            Ok(result) => {
                let status = if result.passes() {
                    "OK".to_string()
                } else if result.pile_capacity_ok {
                    "overturning fails".to_string()
                } else {
                    "pile capacity fails".to_string()
                };
                (format!("{:.2}", kn(result.max_reaction)), status)
            }
            Err(e) => ("-".to_string(), e.to_string()),
        };
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>14}  {}",
            alt.typology.display_name(),
            alt.minimum.width,
            alt.minimum.height,
            reaction,
            status
        );
    }
}

fn run(args: CliArgs) -> Result<(), CalcError> {
    match args.command {
        Command::Run { file } => {
            info!("Loading project from {}", file.display());
            let project = load_project(&file)?;
            analyze(&project, args.json)
        }
        Command::Example { save } => {
            let project = FoundationProject::worked_example();
            if let Some(path) = save {
                save_project(&project, &path)?;
                info!("Reference project written to {}", path.display());
            }
            analyze(&project, args.json)
        }
        Command::Explore { file } => {
            let project = load_project(&file)?;
            let alternatives = project.explore()?;
            if args.json {
                println!("{}", to_json(&alternatives)?);
            } else {
                print_alternatives(&alternatives);
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} ({})", e, e.error_code());
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
