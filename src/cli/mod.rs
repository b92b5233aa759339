//! CLI command definitions and handlers

pub mod analyze;

use crate::analyzer::CancellationToken;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Doccov - public API documentation coverage
#[derive(Parser, Debug)]
#[command(name = "doccov")]
#[command(
    version,
    about = "Measure public-API documentation coverage for a project or solution",
    long_about = "Doccov counts the public API members of a C# project or solution and \
reports how many carry documentation comments, classified against two \
configurable thresholds.\n\n\
Output can target a terminal, GitHub Actions, Azure Pipelines, or JSON.",
    after_help = "\
Examples:
  doccov                                   Analyze the single project/solution in the cwd
  doccov -p src/MyLib/MyLib.csproj         Analyze one project
  doccov -s All.sln -x '*Tests*'           Analyze a solution, skipping test projects
  doccov -s All.sln --github -e           GitHub Actions output, exit 1 below minimum
  doccov -p MyLib.csproj --percentages 80,95 --json"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: AnalyzeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Project file to analyze
    #[arg(short = 'p', long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Solution file to analyze
    #[arg(short = 's', long, value_name = "FILE")]
    pub solution: Option<PathBuf>,

    /// Glob pattern of project paths to exclude (repeatable, matches the whole path)
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Emit GitHub Actions workflow commands
    #[arg(long, conflicts_with_all = ["azure", "json"])]
    pub github: bool,

    /// Emit Azure Pipelines logging commands
    #[arg(long, conflicts_with = "json")]
    pub azure: bool,

    /// Buffer all output into a single JSON document
    #[arg(long)]
    pub json: bool,

    /// Error/success thresholds as whole percentages "min,ok"
    #[arg(long, default_value = "50,90", value_name = "MIN,OK")]
    pub percentages: String,

    /// Exit with code 1 when coverage is below the minimum threshold
    #[arg(short = 'e', long)]
    pub set_exit_code: bool,

    /// Render per-file debug events on the console
    #[arg(long)]
    pub debug: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            project: None,
            solution: None,
            exclude: Vec::new(),
            github: false,
            azure: false,
            json: false,
            percentages: "50,90".to_string(),
            set_exit_code: false,
            debug: false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze documentation coverage (the default when no subcommand is given)
    Analyze {
        #[command(flatten)]
        args: AnalyzeArgs,
    },
}

/// Dispatch a parsed CLI invocation, returning the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let args = match cli.command {
        Some(Commands::Analyze { args }) => args,
        None => cli.args,
    };
    analyze::run(&args, CancellationToken::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn default_command_takes_top_level_args() {
        let cli = Cli::parse_from(["doccov", "-p", "a.csproj", "-x", "*Tests*", "-e"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.args.project, Some(PathBuf::from("a.csproj")));
        assert_eq!(cli.args.exclude, vec!["*Tests*".to_string()]);
        assert!(cli.args.set_exit_code);
        assert_eq!(cli.args.percentages, "50,90");
    }

    #[test]
    fn analyze_subcommand_parses_same_args() {
        let cli = Cli::parse_from(["doccov", "analyze", "-s", "All.sln", "--json"]);
        let Some(Commands::Analyze { args }) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(args.solution, Some(PathBuf::from("All.sln")));
        assert!(args.json);
    }

    #[test]
    fn backend_flags_conflict() {
        assert!(Cli::try_parse_from(["doccov", "--github", "--json"]).is_err());
        assert!(Cli::try_parse_from(["doccov", "--azure", "--json"]).is_err());
    }
}
