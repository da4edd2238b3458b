//! Trendify CLI - Run AI flows against a Trendify server
//!
//! Lists the flow catalogue, runs flows with `-i key=value` input, shows
//! saved generations, and renders prompts locally for debugging.

mod api;
mod config;
mod input;

use anyhow::{bail, Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use std::fs;
use std::path::PathBuf;

use api::{Attachment, InvokeFlowRequest, TrendifyClient};
use config::Config;
use trendify::{flows, PromptTemplate};

#[derive(Parser)]
#[command(name = "trendify")]
#[command(about = "Trendify CLI - AI content flows for creators", long_about = None)]
#[command(version)]
struct Cli {
    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show current configuration
    Config,

    /// List available flows
    Flows,

    /// Run a flow on the server
    Generate {
        /// Flow name (see `trendify flows`)
        flow: String,
        /// Input value as key=value (JSON values allowed, repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<String>,
        /// JSON object file with input values (-i pairs override it)
        #[arg(short = 'f', long)]
        input_file: Option<PathBuf>,
        /// Media file sent with the prompt (video or image)
        #[arg(short, long)]
        attach: Option<PathBuf>,
        /// MIME type of the attachment (guessed from extension if omitted)
        #[arg(long)]
        mime: Option<String>,
        /// Save the result to this user's history
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show saved generations, newest first
    History {
        /// User ID (defaults to default_user in config)
        #[arg(short, long)]
        user: Option<String>,
        /// Max results
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Render a prompt locally without calling a model
    Render {
        /// Flow name, or a template file with --template
        flow: Option<String>,
        /// Template file to render instead of a flow
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Input value as key=value (JSON values allowed, repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<String>,
        /// JSON object file with input values
        #[arg(short = 'f', long)]
        input_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Config => cmd_config(),
        Commands::Flows => cmd_flows().await,
        Commands::Generate { flow, inputs, input_file, attach, mime, user } => {
            cmd_generate(flow, inputs, input_file, attach, mime, user).await
        }
        Commands::History { user, limit } => cmd_history(user, limit).await,
        Commands::Render { flow, template, inputs, input_file } => {
            cmd_render(flow, template, inputs, input_file)
        }
    }
}

// ============================================
// Command Implementations
// ============================================

fn logged_in_client(config: &Config) -> Result<TrendifyClient> {
    let api_key = config
        .api_key
        .as_ref()
        .context("Not logged in. Run 'trendify login' first.")?;
    Ok(TrendifyClient::new(&config.base_url, Some(api_key)))
}

async fn cmd_login(key: Option<String>) -> Result<()> {
    // Environment overrides pick the server but are never persisted
    let base_url = Config::load()?.base_url;
    let mut config = Config::load_file()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = TrendifyClient::new(&base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not connect to Trendify API at {}", base_url);
        }
    }

    // Health is public; listing flows checks the key itself
    if let Err(e) = client.list_flows().await {
        bail!("API key rejected: {}", e);
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.default_user.is_none() {
        println!("\n{}", "Tip: set default_user in the config file to keep a history:".yellow());
        println!("  trendify generate content_ideas -i niche=fitness --user <USER_ID>");
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
    );
    println!(
        "  Default User: {}",
        config.default_user.as_deref().unwrap_or("None").cyan()
    );

    Ok(())
}

async fn cmd_flows() -> Result<()> {
    let config = Config::load()?;
    let client = logged_in_client(&config)?;

    let flows = client.list_flows().await?;
    if flows.is_empty() {
        println!("No flows available.");
        return Ok(());
    }

    println!("{}", "Flows:".bold());
    for flow in flows {
        let media = if flow.requires_attachment {
            " [attachment]".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            flow.name.cyan().bold(),
            format!("({})", flow.provider).dimmed(),
            media
        );
        println!("    {}", flow.description);
        if !flow.placeholders.is_empty() {
            println!("    {} {}", "inputs:".dimmed(), flow.placeholders.join(", "));
        }
    }

    Ok(())
}

fn read_input(input_file: Option<PathBuf>, inputs: &[String]) -> Result<trendify::InvocationInput> {
    let content = match input_file {
        Some(path) => Some(
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file: {:?}", path))?,
        ),
        None => None,
    };
    input::build_input(content.as_deref(), inputs)
}

async fn cmd_generate(
    flow: String,
    inputs: Vec<String>,
    input_file: Option<PathBuf>,
    attach: Option<PathBuf>,
    mime: Option<String>,
    user: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let client = logged_in_client(&config)?;

    let input = read_input(input_file, &inputs)?;

    let attachment = match attach {
        Some(path) => {
            let mime_type = match mime {
                Some(m) => m,
                None => input::guess_mime(&path)
                    .with_context(|| format!("Unknown media type for {:?}. Pass --mime.", path))?
                    .to_string(),
            };
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read attachment: {:?}", path))?;
            tracing::debug!(bytes = bytes.len(), mime = %mime_type, "Attaching media");
            Some(Attachment {
                mime_type,
                data_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            })
        }
        None => None,
    };

    let request = InvokeFlowRequest {
        user_id: config.user(user.as_deref()),
        input,
        attachment,
    };

    eprintln!("{} {}...", "Running".dimmed(), flow.cyan());
    let response = client.invoke_flow(&flow, &request).await?;

    eprintln!(
        "{} {} via {} ({})",
        "✓".green(),
        response.flow.cyan(),
        response.provider,
        response.model.dimmed()
    );
    if let Some(record_id) = &response.record_id {
        eprintln!("  {} {}", "saved as".dimmed(), record_id);
    }

    // Output to stdout (clean for piping)
    println!("{}", serde_json::to_string_pretty(&response.output)?);

    Ok(())
}

async fn cmd_history(user: Option<String>, limit: i64) -> Result<()> {
    let config = Config::load()?;
    let client = logged_in_client(&config)?;

    let user_id = config
        .user(user.as_deref())
        .context("No user specified and no default_user set. Use -u <user>.")?;

    let generations = client.list_generations(&user_id, Some(limit)).await?;
    if generations.is_empty() {
        println!("No generations found for '{}'", user_id);
        return Ok(());
    }

    println!(
        "{} generations for '{}':",
        generations.len().to_string().green(),
        user_id.cyan()
    );
    for generation in generations {
        println!(
            "  {} {} {}",
            generation.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            generation.flow.cyan(),
            format!("({}, {})", generation.provider, generation.model).dimmed()
        );
        println!(
            "    {}",
            truncate_string(&generation.output.to_string(), 80)
        );
        tracing::debug!(id = %generation.id, "History entry");
    }

    Ok(())
}

fn cmd_render(
    flow: Option<String>,
    template: Option<PathBuf>,
    inputs: Vec<String>,
    input_file: Option<PathBuf>,
) -> Result<()> {
    let template = match (flow, template) {
        (Some(name), None) => match flows::find(&name) {
            Some(flow) => flow.template.clone(),
            None => bail!("Unknown flow '{}'. See `trendify flows`.", name),
        },
        (None, Some(path)) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {:?}", path))?;
            PromptTemplate::new(source)?
        }
        (Some(_), Some(_)) => bail!("Cannot specify both a flow and --template"),
        (None, None) => bail!("Specify a flow name or --template <file>"),
    };

    let input = read_input(input_file, &inputs)?;
    println!("{}", template.render(&input)?);

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
