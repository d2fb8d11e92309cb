use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a status line whenever the battery changes (default)
    #[command(alias = "w")]
    Watch,

    /// Print the current battery status and exit
    Status {
        /// Show every field on its own line
        #[arg(short, long)]
        verbose: bool,
    },

    /// Output status changes as JSON (suitable for piping)
    #[command(alias = "raw")]
    Pipe {
        /// Number of samples to output (0 = infinite)
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Compact JSON output (one line per sample)
        #[arg(short, long)]
        compact: bool,
    },

    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "batstat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ignore the host battery and always simulate
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to a daily rotated file instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,
}
