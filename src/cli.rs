use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "slackpost",
    version,
    about = "Format tagged messages as Slack attachments and post them to a webhook",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a message and post it to the webhook
    Send {
        #[command(flatten)]
        message: MessageArgs,

        /// Webhook URL (overrides config)
        #[arg(long)]
        webhook_url: Option<String>,
    },

    /// Print the payload a message would produce, without sending it
    Format {
        #[command(flatten)]
        message: MessageArgs,
    },

    /// Post a pre-built JSON body to the webhook as-is
    Raw {
        /// Configuration file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Webhook URL (overrides config)
        #[arg(long)]
        webhook_url: Option<String>,

        /// Request body
        body: String,
    },

    /// Load a configuration file and show what it sets
    Test {
        /// Configuration file path
        #[arg(long, required = true)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Parse the message as JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Message text, or a JSON document with --json
    pub message: String,
}
