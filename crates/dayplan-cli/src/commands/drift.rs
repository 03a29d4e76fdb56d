use clap::Args;
use dayplan_core::Task;

use super::{parse_now, read_input};

#[derive(Args)]
pub struct DriftArgs {
    /// Task list JSON file ("-" for stdin)
    pub input: String,
    /// Reference moment (RFC3339); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: DriftArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<Task> = serde_json::from_str(&read_input(&args.input)?)?;
    let now = parse_now(args.now.as_deref())?;
    println!("{}", dayplan_core::drift(&tasks, now));
    Ok(())
}
