use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Deterministic day planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full placement pass over a snapshot
    Plan(commands::plan::PlanArgs),
    /// Right-shift overlapping scheduled tasks
    Resolve(commands::resolve::ResolveArgs),
    /// Report how many minutes the plan has slipped
    Drift(commands::drift::DriftArgs),
    /// Move a task and propagate through its dependency graph
    Move(commands::move_task::MoveArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Drift(args) => commands::drift::run(args),
        Commands::Move(args) => commands::move_task::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
