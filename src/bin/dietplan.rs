//! dietplan: diet plan recommendation CLI
//!
//! Computes a BMI health summary and diet-compliant meal recommendations
//! from the configured classifier artifacts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::error;

use dietplan::{
    BuildInfo, Config, DietPlanError, DietType, HealthSummary, MacroPreference, MedicalCondition,
    SessionHistory, UserProfile,
};

/// Diet plan recommender
#[derive(Parser)]
#[command(name = "dietplan")]
#[command(about = "Personalized meal recommendations from a trained diet model")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "DIETPLAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show BMI, category and goal
    Bmi {
        /// Height in centimetres (100-250)
        #[arg(long, default_value_t = 170.0)]
        height: f64,
        /// Weight in kilograms (30-200)
        #[arg(long, default_value_t = 65.0)]
        weight: f64,
    },

    /// Generate a meal plan
    Recommend {
        /// Height in centimetres (100-250)
        #[arg(long, default_value_t = 170.0)]
        height: f64,
        /// Weight in kilograms (30-200)
        #[arg(long, default_value_t = 65.0)]
        weight: f64,
        /// Medical consideration: none, diabetes, hypertension, heart-disease
        #[arg(long, default_value = "None")]
        condition: String,
        /// Diet preference: vegetarian, non-vegetarian, vegan
        #[arg(long, default_value = "Vegetarian")]
        diet: String,
        /// Macronutrient focus: balanced, high-protein, low-carb
        #[arg(long = "macro", default_value = "Balanced")]
        macro_preference: String,
        /// Seed for reproducible substitutions
        #[arg(long)]
        seed: Option<u64>,
        /// Session file (default: ~/.cache/dietplan/session.json)
        #[arg(long)]
        session: Option<PathBuf>,
    },

    /// List catalog meals
    Catalog {
        /// Only meals eligible for this diet type
        #[arg(long)]
        diet: Option<String>,
    },

    /// Show or clear previous recommendations
    History {
        /// Session file (default: ~/.cache/dietplan/session.json)
        #[arg(long)]
        session: Option<PathBuf>,
        /// Forget stored recommendations
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // version string includes git metadata
    let matches = Args::command()
        .version(BuildInfo::current().to_string())
        .get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> dietplan::Result<()> {
    let config_path = args.config.as_deref();

    match args.command {
        Command::Bmi { height, weight } => {
            let profile = UserProfile::new(height, weight)?;
            print_health(&profile.health());
        }

        Command::Recommend {
            height,
            weight,
            condition,
            diet,
            macro_preference,
            seed,
            session,
        } => {
            let profile = UserProfile::new(height, weight)?
                .condition(condition.parse::<MedicalCondition>()?)
                .diet(diet.parse::<DietType>()?)
                .macro_preference(macro_preference.parse::<MacroPreference>()?);

            let mut config = Config::load_or_default(config_path)?;
            if seed.is_some() {
                config.recommendation.seed = seed;
            }
            let mut planner = config.build_planner()?;

            let session_path = session.unwrap_or_else(default_session_path);
            let mut history =
                SessionHistory::load_or_default(&session_path, config.recommendation.history);
            let previous = history.latest().cloned();

            let plan = planner.recommend(&profile, &mut history)?;
            history.save_or_warn(&session_path);

            print_health(&plan.health);
            println!();
            println!("Here are your personalized meal recommendations:");
            print!("{plan}");

            if let Some(previous) = previous {
                println!();
                println!("Previous recommendations:");
                for name in previous.names() {
                    println!("  - {name}");
                }
            }
            print_footer();
        }

        Command::Catalog { diet } => {
            let planner = Config::load_or_default(config_path)?.build_planner()?;
            match diet {
                Some(diet) => {
                    let diet = diet.parse::<DietType>()?;
                    let meals = planner.eligible_meals(diet);
                    if meals.is_empty() {
                        println!("no {diet} meals in catalog");
                    }
                    for meal in meals {
                        println!("{meal}");
                    }
                }
                None => {
                    for meal in planner.catalog().iter() {
                        println!("{meal}");
                    }
                }
            }
        }

        Command::History { session, clear } => {
            let config = Config::load_or_default(config_path)?;
            let session_path = session.unwrap_or_else(default_session_path);
            let mut history =
                SessionHistory::load_or_default(&session_path, config.recommendation.history);
            if clear {
                history.clear();
                history.save(&session_path)?;
                println!("history cleared");
            } else if history.is_empty() {
                println!("no previous recommendations");
            } else {
                for recommendation in history.entries() {
                    println!("{} diet:", recommendation.diet);
                    for name in recommendation.names() {
                        println!("  - {name}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn default_session_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("dietplan")
        .join("session.json")
}

fn print_health(health: &HealthSummary) {
    println!("Health Summary");
    println!("{health}");
}

fn print_footer() {
    println!();
    println!(
        "Note: these recommendations are model-generated and should not replace professional medical advice"
    );
    println!("dietplan {}", BuildInfo::current());
}

/// Print an error with guidance matching its severity.
fn report(err: &DietPlanError) {
    error!(error = %err, fatal = err.is_fatal(), "request failed");
    match err {
        DietPlanError::AssetUnavailable { .. } => {
            eprintln!("Error loading model files: {err}");
            eprintln!("Please ensure:");
            eprintln!("1. Model files exist at the configured paths");
            eprintln!("2. Files are not corrupted");
            eprintln!("3. The model and label encoder come from the same training run");
        }
        DietPlanError::UnknownLabel { .. } => {
            eprintln!("Warning: {err}");
            eprintln!("Re-export the label encoder alongside the model.");
        }
        _ => eprintln!("Error generating recommendations: {err}"),
    }
}
