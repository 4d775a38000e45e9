use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Render {
        /// Raw query fragment; empty selects the default query.
        query: String,
        organization: Option<String>,
        template: Option<PathBuf>,
    },
    Whoami,
    Login {
        token: String,
    },
    Logout,
    /// Help or version text to print.
    Help(String),
    /// Usage error message.
    Invalid(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "issues2markdown",
    version,
    about = "Render GitHub issue search results as a Markdown checklist",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Search issues and print them as Markdown
    Render(RenderArgs),
    /// Print the authenticated GitHub login
    Whoami,
    /// Validate and store a GitHub token
    Login {
        #[arg(long)]
        token: String,
    },
    /// Delete the stored GitHub token
    Logout,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Search qualifiers replacing the default query, e.g. `repo:owner/name -label:bug`.
    /// Options must come before the first qualifier.
    #[arg(value_name = "QUERY", allow_hyphen_values = true, trailing_var_arg = true)]
    query: Vec<String>,
    /// Author used by the default query (defaults to the authenticated user)
    #[arg(short, long = "org", value_name = "ORG")]
    organization: Option<String>,
    /// Template file used instead of the built-in checklist
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
pub fn parse_args(args: &[String]) -> Command {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Subcommands::Render(render) => Command::Render {
                query: render.query.join(" "),
                organization: render.organization,
                template: render.template,
            },
            Subcommands::Whoami => Command::Whoami,
            Subcommands::Login { token } => Command::Login { token },
            Subcommands::Logout => Command::Logout,
        },
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Command::Help(err.to_string())
            }
            _ => Command::Invalid(err.to_string()),
        },
    }
}
