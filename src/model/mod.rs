// Data model - the three record types the tracker keeps in memory

pub mod chore;
pub mod completion;
pub mod user;

pub use chore::{Chore, Timing, DEFAULT_EMOJI};
pub use completion::Completion;
pub use user::{ParentRoster, Role, User};
