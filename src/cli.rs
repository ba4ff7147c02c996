use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "learnview")]
#[command(about = "Browse repository learnings documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory or base URL holding the learnings files
    #[arg(short, long, global = true, env = "LEARNVIEW_DATA")]
    pub data: Option<String>,

    /// Text to search for and highlight in summaries
    #[arg(short, long, global = true, env = "LEARNVIEW_FILTER")]
    pub filter: Option<String>,

    /// Category the filter applies to
    #[arg(short = 't', long = "type", global = true, env = "LEARNVIEW_TYPE")]
    pub type_filter: Option<String>,

    /// Per-file load timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover data files and list the ones that would be offered
    Files {
        /// Print the full discovery report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load one file and print a rendered category
    Show {
        /// File name, relative to the data location
        file: String,

        /// Category to render (default: filter target if it matches, else the first)
        #[arg(short, long)]
        category: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },

    /// Run the web viewer
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8050)]
        port: u16,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered HTML fragment
    Html,
    /// Panel state as JSON
    Json,
}
