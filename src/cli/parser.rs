use clap::{Parser, Subcommand};

/// Command-line interface definition for bridgetroll
/// Lab check-in kiosk backed by SQLite
#[derive(Parser)]
#[command(
    name = "bridgetroll",
    version = env!("CARGO_PKG_VERSION"),
    about = "A single-room check-in/check-out kiosk: scan a student ID to toggle attendance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use a configuration file other than ~/.bridgetroll/bridgetroll.conf
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

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

    /// Import the student roster CSV (safe to re-run)
    Import {
        /// Roster file; defaults to `roster` from the configuration
        #[arg(long = "file", value_name = "FILE")]
        file: Option<String>,
    },

    /// Initialize, import the roster and start the kiosk web server
    Serve {
        /// Address to listen on (e.g. 0.0.0.0:5000)
        #[arg(long = "bind", value_name = "ADDR")]
        bind: Option<String>,

        /// Roster file to import at startup
        #[arg(long = "roster", value_name = "FILE")]
        roster: Option<String>,

        /// Do not import the roster at startup
        #[arg(long = "skip-import", conflicts_with = "roster")]
        skip_import: bool,
    },

    /// Check a student in or out from the terminal
    Checkin {
        /// Student ID as printed on the card
        student_id: String,
    },

    /// List login records
    List {
        /// Show only open sessions (students currently checked in)
        #[arg(long = "open")]
        open: bool,

        /// Filter by student ID
        #[arg(long = "student", value_name = "ID")]
        student: Option<String>,
    },
}
