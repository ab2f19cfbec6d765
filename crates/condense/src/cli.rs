use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "condense")]
#[command(version)]
#[command(about = "Context compression for tabular data analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a CSV file's schema into its compact string
    Profile {
        /// Path to the CSV file
        file: String,

        /// Dataset name (file stem if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Also print the full textual dump the compact string replaces
        #[arg(long)]
        full: bool,
    },

    /// Run a free-form analysis query against a CSV file
    Analyze {
        /// Path to the CSV file
        file: String,

        /// Query routed through the keyword rules
        query: String,

        /// Emit the step report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the automated analysis sequence
    Auto {
        /// Path to the CSV file
        file: String,

        /// Emit step reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the assembled LLM context after an automated pass
    Context {
        /// Path to the CSV file
        file: String,
    },

    /// Probe the compression API and report which path serves requests
    Connection,

    /// Print version information
    Version,
}
