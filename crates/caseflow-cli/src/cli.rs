use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "caseflow")]
#[command(bin_name = "caseflow")]
#[command(version)]
#[command(about = "Interactive phone-case customization wizard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Show the saved in-progress order and current step")]
    Status,
    #[command(about = "List logged brand/model searches with no results")]
    Demand,
    #[command(about = "Clear the saved order and return to the start")]
    Reset,
}
