mod display;
mod loader;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use craftplan_core::{PlanOutcome, Planner, Program, RecipeDefinition, Resource, expand_all};
use craftplan_solver::Solver;

#[derive(Parser)]
#[command(name = "craftplan")]
#[command(about = "Decide what to craft from the resources you have", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// Path to the resources file
    #[arg(long, default_value = "resources.yaml")]
    resources: PathBuf,
    /// Path to the recipes file
    #[arg(long, default_value = "recipes.yaml")]
    recipes: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the highest-priority set of things to craft
    Solve {
        #[command(flatten)]
        inputs: Inputs,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Give up after this many seconds
        #[arg(long)]
        time_limit: Option<f64>,
        /// Also show the stock left after crafting
        #[arg(long)]
        leftover: bool,
    },
    /// Check the input files for errors
    Check {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Print the integer program built from the input files
    Program {
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn load(inputs: &Inputs) -> (Vec<Resource>, Vec<RecipeDefinition>) {
    let resources = loader::read_resources_file(&inputs.resources).unwrap_or_else(|e| fail("Resources error", &e));
    let recipes = loader::read_recipes_file(&inputs.recipes).unwrap_or_else(|e| fail("Recipes error", &e));
    (resources, recipes)
}

fn fail(context: &str, error: &dyn std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            inputs,
            format,
            time_limit,
            leftover,
        } => {
            let (resources, recipes) = load(&inputs);

            let mut solver = Solver::new();
            if let Some(secs) = time_limit {
                let limit = Duration::try_from_secs_f64(secs).unwrap_or_else(|e| fail("Invalid time limit", &e));
                solver = solver.with_time_limit(limit);
            }

            let outcome = Planner::new(solver)
                .plan(&resources, &recipes)
                .unwrap_or_else(|e| fail("Planning error", &e));

            if format == "json" {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail("Output error", &e),
                }
                if !matches!(outcome, PlanOutcome::Optimal { .. }) {
                    std::process::exit(1);
                }
                return;
            }

            match outcome {
                PlanOutcome::Optimal { summary, objective } => {
                    let left = leftover.then(|| summary.leftover(&resources));
                    print!("{}", display::format_plan(&summary, objective, left.as_ref()));
                }
                PlanOutcome::Infeasible => {
                    println!("Status: INFEASIBLE");
                    println!("No production plan fits within the available resources.");
                    std::process::exit(1);
                }
                PlanOutcome::Unbounded => {
                    println!("Status: UNBOUNDED");
                    println!("Some recipe needs no resources and can be crafted without limit.");
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { inputs } => {
            let (resources, recipes) = load(&inputs);
            check(&inputs.recipes, &resources, &recipes);
        }
        Commands::Program { inputs } => {
            let (resources, definitions) = load(&inputs);
            let recipes = expand_all(&definitions).unwrap_or_else(|e| fail("Recipes error", &e));
            let program = Program::build(&resources, &recipes).unwrap_or_else(|e| fail("Program error", &e));
            let problem = program.problem();

            println!("Columns: {}", problem.variables.join(", "));
            println!("Objective (minimize): {:?}", problem.c);
            println!("Constraints:");
            for (i, row) in problem.a_ub.iter().enumerate() {
                println!("  {:20} {:?} <= {}", problem.rows[i], row, problem.b_ub[i]);
            }
        }
    }
}

fn check(recipes_path: &Path, resources: &[Resource], definitions: &[RecipeDefinition]) {
    let recipes = match expand_all(definitions) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ {} has errors:", recipes_path.display());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Program::build(resources, &recipes) {
        eprintln!("✗ {} has errors:", recipes_path.display());
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    println!("✓ inputs are valid");
    println!("  {} resources", resources.len());
    println!("  {} recipes", definitions.len());
    println!("  {} recipe variants", recipes.len());
}
