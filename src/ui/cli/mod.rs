// Thu Oct 15 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{AddrArgs, Args, Command, ImportArgs, LabelsArgs, LineArgs};
pub use handler::{CommandHandler, Session};

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    CommandHandler::setup_logging(&args);
    let handler = CommandHandler::from_args(&args)?;
    handler.execute(args.command)
}
