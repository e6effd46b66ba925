use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser, Debug)]
#[command(name = "capital-gains")]
#[command(
    version,
    about = "Capital gains tax calculator for buy/sell operations"
)]
#[command(
    long_about = "Reads JSON arrays of buy/sell operations (one request per line, a blank line ends the input) and prints the tax owed for each operation, using weighted average cost, a tax-free threshold on sale proceeds and loss carryforward."
)]
pub struct Cli {
    /// Path to a TOML config file with tax parameters
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject sells of more units than are currently held
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one JSON line of taxes per request (default)
    Calculate {
        /// File with operation requests (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Show a per-operation breakdown of position and tax
    Report {
        /// File with operation requests (defaults to stdin)
        input: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["capital-gains"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.strict);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "capital-gains",
            "report",
            "ops.json",
            "--strict",
            "--no-color",
        ])
        .unwrap();
        assert!(cli.strict);
        assert!(cli.no_color);
        match cli.command {
            Some(Commands::Report { input }) => {
                assert_eq!(input, Some(PathBuf::from("ops.json")))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
