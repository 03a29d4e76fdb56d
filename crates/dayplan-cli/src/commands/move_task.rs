use clap::Args;
use chrono::{DateTime, Utc};
use dayplan_core::{cascade_move, Task};

use super::read_input;

#[derive(Args)]
pub struct MoveArgs {
    /// Task list JSON file ("-" for stdin)
    pub input: String,
    /// Identifier of the task being moved
    #[arg(long)]
    pub id: String,
    /// New start moment (RFC3339)
    #[arg(long)]
    pub start: String,
    /// Pretty-print the updated task list
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: MoveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<Task> = serde_json::from_str(&read_input(&args.input)?)?;
    let start = DateTime::parse_from_rfc3339(&args.start)?.with_timezone(&Utc);
    let moved = cascade_move(&tasks, &args.id, start);
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&moved)?);
    } else {
        println!("{}", serde_json::to_string(&moved)?);
    }
    Ok(())
}
