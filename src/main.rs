// Only compile the interactive session when the cli feature is enabled
#[cfg(feature = "cli")]
mod session;

use anyhow::Result;
use clap::Parser;

/// Household chore tracker - interactive session
#[derive(Parser, Debug)]
#[command(
    name = "chore-tracker",
    version,
    about = "Track chores, completions and allowance payouts"
)]
struct Args {
    /// Comma-separated names treated as parents (everyone else is a child)
    #[arg(long, value_delimiter = ',', default_value = "aaron,janet")]
    parents: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run_session(args)
}

#[cfg(feature = "cli")]
fn run_session(args: Args) -> Result<()> {
    use chore_tracker::{ChoreStore, ParentRoster};

    let store = ChoreStore::new(ParentRoster::new(&args.parents));
    session::run(store)
}

#[cfg(not(feature = "cli"))]
fn run_session(_args: Args) -> Result<()> {
    eprintln!("❌ Interactive mode not available!");
    eprintln!("   Rebuild with: cargo build --features cli");
    eprintln!("   Or use the web API: cargo run --bin chore-server --features server");
    std::process::exit(1);
}
