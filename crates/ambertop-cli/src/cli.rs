use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ambertop - inspect, validate and rewrite Amber prmtop topology files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the header summary of a topology without loading its blocks.
    Info(InfoArgs),
    /// Fully load a topology and verify its header against the block data.
    Check(CheckArgs),
    /// Load a topology and write it back in canonical block order.
    Rewrite(RewriteArgs),
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input topology file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Emit the summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the input topology file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Path to the input topology file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the rewritten topology file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Keep the input's date stamp instead of stamping the current time.
    #[arg(long)]
    pub keep_date: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rewrite_requires_input_and_output() {
        let parsed = Cli::try_parse_from(["ambertop", "rewrite", "-i", "a.prmtop"]);
        assert!(parsed.is_err());
        let parsed =
            Cli::try_parse_from(["ambertop", "rewrite", "-i", "a.prmtop", "-o", "b.prmtop"]);
        assert!(parsed.is_ok());
    }
}
