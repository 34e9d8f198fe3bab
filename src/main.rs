//! Lumo CLI binary entry point.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lumo::agent::ChatSession;
use lumo::cli::{repl, AskArgs, ChatArgs, Cli, Commands, SessionArgs};
use lumo::config::LumoConfig;
use lumo::error::LumoError;
use lumo::types::ConversationId;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Chat(args) => handle_chat(args).await,
        Commands::Ask(args) => handle_ask(args).await,
        Commands::Models => {
            handle_models();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn connect(args: &SessionArgs) -> Result<ChatSession, LumoError> {
    let mut config = LumoConfig::from_env()?;
    args.apply(&mut config)?;
    ChatSession::connect(&config).await
}

async fn handle_chat(args: ChatArgs) -> Result<(), LumoError> {
    eprintln!("Lumo is waking up... (type 'quit' to end the chat)");
    let mut session = connect(&args.session).await?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run_repl(&mut session, stdin.lock(), &mut stdout).await?;
    eprintln!("Chat ended.");
    Ok(())
}

async fn handle_ask(args: AskArgs) -> Result<(), LumoError> {
    let conversation = args
        .conversation
        .as_deref()
        .map(str::parse::<ConversationId>)
        .transpose()?;

    let mut session = connect(&args.session).await?;
    if let Some(id) = conversation {
        session.resume(id);
    }

    let reply = session.submit(&args.prompt).await;
    println!("{reply}");
    eprintln!("conversation: {}", session.conversation_id());
    Ok(())
}

fn handle_models() {
    #[cfg(feature = "google")]
    {
        for id in lumo::models::google::GoogleModel::known() {
            println!("google:{id}");
        }
    }
    #[cfg(feature = "openai-compatible")]
    println!("openai-compatible:<model> (needs OPENAI_COMPAT_BASE_URL)");
}
