// Chore Tracker - Core Library
// Shared by the interactive session, the API server, and tests

pub mod error;
pub mod model;
pub mod reconciliation;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use error::{Result, TrackerError};
pub use model::{Chore, Completion, ParentRoster, Role, Timing, User, DEFAULT_EMOJI};
pub use reconciliation::{reconcile, reconcile_summary, ChildSummary, ReconcileReceipt};
pub use report::{
    aggregate_all_children, aggregate_for_child, completions_for_child, format_money, week_cutoff,
    ChildCompletions, ChildReport, ReportItem, REPORT_WINDOW_DAYS,
};
pub use store::ChoreStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
