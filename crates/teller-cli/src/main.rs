//! teller - terminal client for the banking support assistant

mod config;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use teller_chat::{ClientTransport, Dispatcher, DispatcherConfig, Role, Submission};
use teller_client::ChatClient;
use teller_render::render;

/// teller - chat with the support assistant from the terminal
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the assistant service
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Send a single message and exit
    #[arg(short = 'm', long)]
    message: Option<String>,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("teller=debug,teller_chat=debug,teller_client=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let file_config = config::Config::load();
    let endpoint = args.endpoint.unwrap_or_else(|| file_config.endpoint.clone());
    let timeout_secs = args.timeout.unwrap_or(file_config.timeout_secs);

    let client = if timeout_secs == 0 {
        ChatClient::new(&endpoint)
    } else {
        ChatClient::with_timeout(&endpoint, Duration::from_secs(timeout_secs))?
    };
    let transport = Arc::new(ClientTransport::new(client));

    let mut dispatcher_config = DispatcherConfig::default();
    if let Some(greeting) = file_config.greeting {
        dispatcher_config.greeting = greeting;
    }
    if let Some(fallback) = file_config.fallback_reply {
        dispatcher_config.fallback_reply = fallback;
    }

    let mut dispatcher = Dispatcher::new(dispatcher_config, transport);
    tracing::debug!("session {}", dispatcher.session_id());

    // Show the seeded greeting
    let transcript = render(&dispatcher.snapshot());
    for message in &transcript.messages {
        ui::print_message(message);
    }

    if let Some(text) = args.message {
        submit_and_print(&mut dispatcher, &text).await;
        return Ok(());
    }

    run_interactive(&mut dispatcher).await
}

/// Read lines from stdin until EOF or /quit, submitting each one
async fn run_interactive(dispatcher: &mut Dispatcher) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == "/quit" || line == "/exit" {
            break;
        }

        submit_and_print(dispatcher, line).await;
    }
    Ok(())
}

/// Submit one utterance and print the assistant entries it produced
async fn submit_and_print(dispatcher: &mut Dispatcher, text: &str) {
    let before = dispatcher.snapshot().messages.len();
    if dispatcher.submit(text).await == Submission::Ignored {
        return;
    }

    let transcript = render(&dispatcher.snapshot());
    for message in transcript.messages.iter().skip(before) {
        if message.role == Role::Assistant {
            ui::print_message(message);
        }
    }
}
