use anyhow::{Context, Result};
use bistro::{chat, menu, order, web_server, ChatBridge, ChatConfig};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the ordering assistant web server.
    Start {
        #[arg(long, env = "BISTRO_PORT", default_value_t = 7860, help = "Port for the web server.")]
        port: u16,
        #[arg(long, default_value = "templates", help = "Directory holding the page templates.")]
        templates: PathBuf,
        #[arg(long, default_value = "static", help = "Directory holding CSS and JS assets.")]
        static_dir: PathBuf,
    },
    /// Chat with the ordering assistant in the terminal.
    Chat,
    /// Print the menu.
    Menu,
    /// Place an order for the given dish labels, e.g. "Vada Pav ($3)".
    Order {
        #[arg(long, help = "Customer name; defaults to Guest.")]
        name: Option<String>,
        #[arg(required = true)]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for GROQ_API_KEY and friends)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG (e.g., RUST_LOG=info,bistro=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Bistro starting with command: {:?}", cli.command);

    match cli.command {
        Commands::Start {
            port,
            templates,
            static_dir,
        } => {
            info!("Starting web server on port {}...", port);
            let state = web_server::AppState::new(templates, ChatBridge::new(ChatConfig::from_env()));

            let mut web_server_handle = tokio::spawn(async move {
                if let Err(e) = web_server::start_web_server(port, state, &static_dir).await {
                    error!("Web server failed: {:?}", e);
                }
            });

            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Ctrl-C received, shutting down...");
                }
                res = &mut web_server_handle => {
                    match res {
                        Ok(_) => info!("Web server task completed unexpectedly."),
                        Err(e) if e.is_panic() => error!("Web server task panicked: {:?}", e),
                        Err(e) => error!("Web server task failed: {:?}", e),
                    }
                }
            }

            if !web_server_handle.is_finished() {
                info!("Aborting web server task...");
                web_server_handle.abort();
            }
            info!("Shutdown complete.");
        }
        Commands::Chat => {
            run_terminal_chat(ChatBridge::new(ChatConfig::from_env()))
                .await
                .context("Chat session failed")?;
        }
        Commands::Menu => {
            println!("{}", *menu::MENU_TEXT);
        }
        Commands::Order { name, items } => {
            println!("{}", order::place_order(&items, name.as_deref()));
        }
    }

    Ok(())
}

/// Reads one message per line until EOF or an empty line. History lives only
/// for this session.
async fn run_terminal_chat(bridge: ChatBridge) -> Result<()> {
    info!(model = %bridge.config().model, "Starting terminal chat");
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history: Vec<(String, String)> = Vec::new();

    stdout
        .write_all(format!("Try: {}\n> ", chat::EXAMPLE_PROMPTS.join(" | ")).as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        let message = line.trim().to_string();
        if message.is_empty() {
            break;
        }
        let reply = bridge.reply(&message, &history).await;
        stdout.write_all(format!("{}\n> ", reply).as_bytes()).await?;
        stdout.flush().await?;
        history.push((message, reply));
    }

    info!("Chat session finished.");
    Ok(())
}
