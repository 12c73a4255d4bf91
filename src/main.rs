//! Errand - Entry Point
//!
//! Interactive chat front end for the task assistant. Reads lines from
//! stdin, dispatches them as chat messages for one user, and prints the
//! reply, any tool results, and the suggested follow-ups. All decision
//! logic lives in the library; this binary is wiring.

use clap::Parser;
use errand::chat::Dispatcher;
use errand::core::config::ErrandConfig;
use errand::core::error::Result;
use errand::llm::LlmClient;
use errand::store::{JsonFileStore, MemoryStore, TaskStore};
use errand::task::TaskService;
use errand::tools;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "errand", about = "Conversational task assistant")]
struct Args {
    /// User id the session acts as
    #[arg(long, default_value = "default_user")]
    user: String,

    /// Persist tasks to this JSON file (in-memory store when omitted)
    #[arg(long)]
    store: Option<PathBuf>,

    /// TOML file overriding the default tuning values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "errand=info".into()),
        )
        .init();

    let args = Args::parse();
    tracing::info!(user = %args.user, "errand starting");

    let config = match &args.config {
        Some(path) => ErrandConfig::load(path)?,
        None => ErrandConfig::default(),
    };

    // Create the async runtime for dispatch and store calls
    let rt = Runtime::new()?;

    let store: Arc<dyn TaskStore> = match &args.store {
        Some(path) => Arc::new(JsonFileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    let service = TaskService::new(store, config.store_timeout());
    let mut dispatcher = Dispatcher::new(service, config);

    // Try to create the fallback LLM client (optional - works without it)
    match LlmClient::from_env() {
        Ok(llm) => {
            dispatcher = dispatcher.with_llm(llm);
        }
        Err(_) => {
            tracing::warn!("LLM_API_KEY not set - low-confidence replies stay canned");
        }
    }

    // Display welcome message
    println!("\n=== ERRAND ===");
    println!("Conversational task assistant");
    println!();
    println!("Commands:");
    println!("  tools           - Show the tool catalog");
    println!("  quit / q        - Exit");
    println!("  <any text>      - Chat message (e.g. 'Add task to buy milk')");
    println!();

    // Main chat loop
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tools" {
            for decl in tools::declarations() {
                println!("  {:<14} {}", decl.name, decl.description);
            }
            continue;
        }

        let outcome = rt.block_on(dispatcher.dispatch(&args.user, input));

        println!();
        println!("{}", outcome.response);
        for call in &outcome.tool_calls {
            match serde_json::to_string(call) {
                Ok(json) => println!("  [{}] {}", call.tool, json),
                Err(e) => tracing::warn!(error = %e, "could not render tool call"),
            }
        }
        if !outcome.suggested_actions.is_empty() {
            println!("Try next: {}", outcome.suggested_actions.join(" | "));
        }
        println!();
    }

    println!("Goodbye!");
    Ok(())
}
