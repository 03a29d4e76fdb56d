use clap::Args;
use dayplan_core::{resolve_conflicts, Task};

use super::read_input;

#[derive(Args)]
pub struct ResolveArgs {
    /// Task list JSON file ("-" for stdin)
    pub input: String,
    /// Pretty-print the resolved task list
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<Task> = serde_json::from_str(&read_input(&args.input)?)?;
    let resolved = resolve_conflicts(&tasks);
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", serde_json::to_string(&resolved)?);
    }
    Ok(())
}
