use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "unredact")]
#[command(about = "Redact words and let a prediction service guess them back", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "UNREDACT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the rendered text and outbound payload without contacting the service
    Render(DocumentArgs),

    /// Send the redacted words to the prediction service and show the result
    Predict {
        #[command(flatten)]
        document: DocumentArgs,

        /// Override the configured service endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Document text
    pub text: String,

    /// Toggle redaction on the word at this position (0-indexed, repeatable)
    #[arg(long = "redact", value_name = "WORD")]
    pub redact: Vec<usize>,

    /// Toggle redaction on the word under this character offset (repeatable)
    #[arg(long = "tap", value_name = "OFFSET")]
    pub tap: Vec<usize>,
}
