mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, MessageArgs};
use slackpost::{format_payload, Client, Config, Message};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Send {
            message,
            webhook_url,
        } => {
            handle_send(message, webhook_url).await?;
        }
        Commands::Format { message } => {
            handle_format(message)?;
        }
        Commands::Raw {
            config,
            webhook_url,
            body,
        } => {
            handle_raw(config, webhook_url, body).await?;
        }
        Commands::Test { config } => {
            handle_test(config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>, webhook_url: Option<String>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.merge_with_cli(webhook_url);
    Ok(config)
}

fn parse_message(args: &MessageArgs) -> Result<Message> {
    if args.json {
        let value: serde_json::Value =
            serde_json::from_str(&args.message).context("Message is not valid JSON")?;
        Ok(value.into())
    } else {
        Ok(Message::Text(args.message.clone()))
    }
}

async fn handle_send(args: MessageArgs, webhook_url: Option<String>) -> Result<()> {
    let config = load_config(args.config.as_ref(), webhook_url)?;
    if config.webhook_url.is_none() {
        anyhow::bail!("No webhook URL! Provide --webhook-url or set webhookURL in the config file.");
    }
    let message = parse_message(&args)?;

    let client = Client::new(config);
    let response = client
        .post_formatted(args.tags.as_slice(), message)
        .await
        .context("Failed to deliver message")?;

    tracing::info!("Message delivered");
    println!("{}", response);
    Ok(())
}

fn handle_format(args: MessageArgs) -> Result<()> {
    let config = load_config(args.config.as_ref(), None)?;
    let message = parse_message(&args)?;

    let payload = format_payload(args.tags.as_slice(), &message, &config)?;
    println!("{}", payload);
    Ok(())
}

async fn handle_raw(
    config_path: Option<PathBuf>,
    webhook_url: Option<String>,
    body: String,
) -> Result<()> {
    let config = load_config(config_path.as_ref(), webhook_url)?;
    let client = Client::new(config);

    let response = client.post(body).await.context("Failed to deliver body")?;

    tracing::info!("Body delivered");
    println!("{}", response);
    Ok(())
}

fn handle_test(config_path: PathBuf) -> Result<()> {
    tracing::info!("Testing configuration: {}", config_path.display());

    let config = load_config(Some(&config_path), None)?;

    println!("\n🔗 Webhook:");
    match &config.webhook_url {
        Some(url) => println!("  {}...", url.chars().take(30).collect::<String>()),
        None => println!("  ⚠️  No webhookURL set (formatting only)"),
    }

    println!("\n💬 Payload options:");
    println!("  Channel: {}", config.channel.as_deref().unwrap_or("(webhook default)"));
    println!("  Username: {}", config.username.as_deref().unwrap_or("(webhook default)"));
    if let Some(icon) = &config.icon_url {
        println!("  Icon URL: {}", icon);
    }
    if let Some(emoji) = &config.icon_emoji {
        println!("  Icon emoji: {}", emoji);
    }

    println!("\n📋 Fields:");
    println!(
        "  Records as: {}",
        if config.convert_object_to_fields {
            "fields"
        } else {
            "code block"
        }
    );
    println!("  Tags field: {}", if config.hide_tags { "hidden" } else { "shown" });
    println!("  Additional fields: {}", config.additional_fields.len());
    for field in &config.additional_fields {
        println!("    - {}: {}", field.title, field.value);
    }

    println!("\n🎨 Tag colors:");
    match &config.tag_colors {
        Some(colors) => {
            for (tag, color) in colors.iter() {
                println!("  - {} → {}", tag, color);
            }
        }
        None => println!("  defaults (success → good, warning → warning, error → danger)"),
    }

    println!("\n✅ Configuration is valid");
    Ok(())
}
