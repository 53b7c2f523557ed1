use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "orgtree", about = "Terminal organisation chart browser", version)]
pub struct Cli {
    /// Path to the organisation JSON file [default: ~/.orgtree/org.json]
    #[arg(long, short = 'f', env = "ORGTREE_FILE", global = true)]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show details for one person (the root when omitted)
    Show {
        /// Node id
        id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List people as a flat directory or as a tree
    List {
        /// Display as tree
        #[arg(long)]
        tree: bool,
        /// Only people whose role contains this text
        #[arg(long, conflicts_with = "tree")]
        role: Option<String>,
        /// Limit tree depth (0 = root only)
        #[arg(long, requires = "tree")]
        depth: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search people by name or role
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch the interactive browser
    #[command(name = "watch")]
    Watch {
        /// Node id to browse as the subtree root
        #[arg(long)]
        root: Option<String>,
        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        poll_interval: u64,
    },
}
