use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "govmap")]
#[command(about = "Map Victoria 2 governments to Hearts of Iron IV governments")]
#[command(version)]
pub struct Cli {
    /// Verbose output (shows every mapping decision)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.govmap)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Government mapping file (overrides sources.governments)
    #[arg(long, global = true)]
    pub governments: Option<PathBuf>,

    /// Reform definitions file (overrides sources.reforms)
    #[arg(long, global = true)]
    pub reforms: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify nations from a JSON file
    Classify {
        /// JSON array of nations (tag, government, ruling_ideology, reforms)
        nations: PathBuf,

        /// Only classify the nation with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show ranked reform tracks and progress totals
    Reforms {
        /// Also list the levels of every track
        #[arg(short, long)]
        levels: bool,
    },

    /// List mapping rules in evaluation order
    Rules {
        /// Only show rules for this source government
        #[arg(long)]
        source: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., sources.governments)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., mapping.totals)
        key: String,

        /// Value to set (e.g., "summed" or "common/issues.txt")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
