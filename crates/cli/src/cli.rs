//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "kankotri",
    version,
    about = "Resolve wedding guest names to Gujarati script"
)]
pub struct Cli {
    /// Never contact the remote translator; use the bundled dictionary only.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Deadline for one remote translation call, in seconds.
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Extra dictionary file merged over the bundled one.
    #[arg(long, global = true, value_name = "PATH")]
    pub dictionary: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve names given as arguments, or one name per line on stdin.
    Resolve {
        names: Vec<String>,

        /// Print only the resolved text instead of a JSON record.
        #[arg(long)]
        plain: bool,
    },

    /// Resolve one name and print where it goes on the invitation.
    Layout {
        name: String,

        /// Height in points of each template page, in page order.
        #[arg(long = "page-height", value_name = "PT", required = true)]
        page_heights: Vec<f32>,
    },
}
