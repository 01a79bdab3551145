use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rSeizureLog
/// CLI application to log seizure events with SQLite
#[derive(Parser)]
#[command(
    name = "rseizurelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A seizure diary CLI: import caregiver notes or spreadsheets into a SQLite log",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a single seizure
    Add {
        /// When it happened, e.g. "June 16, 2024 9pm" or "6/16/24 21:00"
        when: String,

        #[arg(long = "duration", help = "How long it lasted, e.g. \"1 min 30 sec\" or \"2:15\"")]
        duration: Option<String>,

        #[arg(long = "trigger", help = "Trigger (looked up in the description when omitted)")]
        trigger: Option<String>,

        #[arg(long = "desc", help = "Free-text description")]
        desc: Option<String>,
    },

    /// Import caregiver notes or a CSV/TSV table
    Import {
        #[arg(
            long,
            value_name = "FILE",
            help = "Input file (reads stdin when omitted or '-')"
        )]
        file: Option<String>,

        #[arg(long = "dry-run", help = "Show what would be imported and stop")]
        dry_run: bool,

        #[arg(long, short = 'y', help = "Commit without asking for confirmation")]
        yes: bool,

        #[arg(
            long,
            value_name = "ROWS",
            help = "Staged rows to leave out, e.g. 2,5-7"
        )]
        exclude: Option<String>,

        #[arg(long, help = "Year used for dates written without one")]
        year: Option<i32>,
    },

    /// List stored seizures
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "summary", help = "Also show counts and total duration per trigger category")]
        summary: bool,
    },

    /// Delete a stored seizure by ID
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Delete without asking for confirmation")]
        yes: bool,
    },

    /// Export stored seizures
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
