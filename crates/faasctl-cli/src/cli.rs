use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faasctl")]
#[command(about = "Manage and run serverless functions from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL
    #[arg(long, env = "FAASCTL_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new function
    Create {
        /// Function name
        #[arg(long)]
        name: String,

        /// Function language (python or javascript)
        #[arg(long)]
        language: String,

        /// Inline source code
        #[arg(long, conflicts_with = "file")]
        code: Option<String>,

        /// Read source code from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Timeout in seconds (1-60)
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },

    /// List stored functions
    List,

    /// Show one function by id
    Get {
        /// Function id
        id: String,
    },

    /// Update an existing function
    Update {
        /// Function id
        id: String,

        /// New function name
        #[arg(long)]
        name: String,

        /// New language (python or javascript)
        #[arg(long)]
        language: String,

        /// New inline source code
        #[arg(long, conflicts_with = "file")]
        code: Option<String>,

        /// Read new source code from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// New timeout in seconds (1-60)
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },

    /// Delete a function by id
    Delete {
        /// Function id
        id: String,
    },

    /// Execute ad-hoc code
    Exec {
        /// Language to execute (python or javascript)
        #[arg(long)]
        language: String,

        /// Inline source code
        #[arg(long, conflicts_with = "file")]
        code: Option<String>,

        /// Read source code from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Timeout in seconds (1-60)
        #[arg(long, default_value_t = 5)]
        timeout: u64,

        /// Run inside the gVisor isolation runtime
        #[arg(long)]
        isolated: bool,
    },

    /// Execution metrics for one function
    Metrics {
        /// Function id
        id: String,

        /// Number of samples to fetch
        #[arg(long)]
        limit: Option<u32>,

        /// Sample offset
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Unified execution history across functions and ad-hoc runs
    History {
        /// Window start (YYYY-MM-DD or RFC 3339)
        #[arg(long, requires = "until")]
        since: Option<String>,

        /// Window end (YYYY-MM-DD or RFC 3339)
        #[arg(long, requires = "since")]
        until: Option<String>,
    },
}
