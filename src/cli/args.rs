use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quote_cli", version, about = "Guided quotation requests")]
pub struct Cli {
    /// Directory holding the configuration, saved drafts and the outbox
    #[arg(long, global = true, env = "QUOTE_WIZARD_HOME", value_name = "PATH")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the quotation wizard, interactively or from an answers file
    Start(StartArgs),
    /// Validate one step of a form-data JSON file
    Validate(ValidateArgs),
    /// Inspect or discard saved drafts
    Drafts {
        #[command(subcommand)]
        action: DraftsCommand,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ContextArg {
    /// Service context (intelligent-applications, solutions, smart-assistant,
    /// system-integration). Unknown values fall back to the standard flow
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub context: ContextArg,

    /// Package tier: basic, standard or enterprise
    #[arg(long, default_value = "standard")]
    pub package: String,

    /// Form-data JSON used to answer every step without prompting
    #[arg(long, value_name = "PATH")]
    pub answers: Option<PathBuf>,

    /// Landing page URL; its utm_* parameters travel with the submission
    #[arg(long, value_name = "URL")]
    pub landing_url: Option<String>,

    /// Referrer URL recorded in the submission metadata
    #[arg(long, value_name = "URL")]
    pub referrer: Option<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub context: ContextArg,

    /// 1-based step number
    #[arg(long)]
    pub step: u8,

    /// Form-data JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum DraftsCommand {
    /// Print the saved draft for a context
    Show(ContextArg),
    /// Remove the saved draft for a context
    Clear {
        #[command(flatten)]
        context: ContextArg,

        /// Also remove the pre-namespacing draft
        #[arg(long)]
        legacy: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the active configuration
    Show,
    /// Set how many days a draft is kept
    SetTtl {
        #[arg(value_name = "DAYS")]
        days: u32,
    },
}
