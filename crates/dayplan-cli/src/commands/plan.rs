use clap::Args;
use dayplan_core::Snapshot;

use super::{parse_now, read_input};

#[derive(Args)]
pub struct PlanArgs {
    /// Snapshot JSON file ("-" for stdin)
    pub input: String,
    /// Planning reference moment (RFC3339); defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Pretty-print the resulting plan
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot: Snapshot = serde_json::from_str(&read_input(&args.input)?)?;
    let now = parse_now(args.now.as_deref())?;

    let plan = dayplan_core::plan(&snapshot.tasks, now, &snapshot.settings)?;

    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("{}", serde_json::to_string(&plan)?);
    }
    Ok(())
}
