//! # Dayplan Core Library
//!
//! Deterministic planning core for a personal productivity application.
//! Given an immutable snapshot of tasks, fixed events, the current moment,
//! and user settings, it produces a conflict-free schedule plus the list
//! of tasks it could not place. All arithmetic happens on a 15-minute
//! grid, and every entry point is a pure function over its inputs.
//!
//! ## Architecture
//!
//! - **Availability Engine**: subtracts fixed events from configured work
//!   hours to enumerate free windows over a 180-day horizon
//! - **Rhythm Engine**: carves free windows into alternating focus slots
//!   and synthetic break tasks
//! - **Placement Engine**: fits a ranked, dependency-aware task queue into
//!   the slot grid, splitting tasks across windows when needed
//! - **Cascade Mover / Conflict Resolver / Drift Detector**: reactive
//!   utilities the host invokes on manual moves, "fix conflicts", and a
//!   once-a-minute poll
//!
//! ## Entry points
//!
//! - [`plan`]: the full placement pass
//! - [`cascade_move`]: manual move with dependency propagation
//! - [`resolve_conflicts`]: right-shift overlapping scheduled tasks
//! - [`drift`]: maximum overrun across incomplete scheduled tasks

pub mod availability;
pub mod cascade;
pub mod conflict;
pub mod drift;
pub mod error;
pub mod grid;
pub mod placement;
pub mod ranker;
pub mod rhythm;
pub mod settings;
pub mod snapshot;
pub mod task;

pub use availability::{AvailabilityEngine, HORIZON_DAYS};
pub use cascade::cascade_move;
pub use conflict::resolve_conflicts;
pub use drift::drift;
pub use error::{PlanError, Result, ValidationError};
pub use grid::GRID_MINUTES;
pub use placement::{plan, Plan, Unscheduled};
pub use ranker::TaskRanker;
pub use rhythm::{RhythmEngine, RhythmOutput};
pub use settings::PlannerSettings;
pub use snapshot::{Project, Snapshot, UserStats};
pub use task::{EnergyLevel, Priority, Slot, Status, Task, TaskId, BREAK_PROJECT_ID};
