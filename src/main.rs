//! mnemo CLI: a conversational-memory demo against a local model backend.

use clap::{Parser, Subcommand};
use mnemo::cli::Output;
use mnemo::{Config, ConversationRunner, HistoryStore, Provider};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The scripted demo conversation: state a fact, then ask the model to
/// recall it across turns.
const DEMO_TURNS: [&str; 5] = [
    "My favorite color is blue.",
    "What is my favorite color?",
    "Hello!",
    "My name is Manuel.",
    "What is my name?",
];

#[derive(Parser)]
#[command(name = "mnemo", version, about = "Session-scoped conversational memory demo")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scripted memory demo conversation
    Demo {
        /// Session to run the demo in (defaults to a fresh random id)
        #[arg(long)]
        session: Option<String>,
    },
    /// Send a single message within a session
    Ask {
        /// Session id
        session: String,
        /// Message text
        text: String,
    },
    /// List stored sessions
    Sessions,
    /// Delete a session transcript
    Clear {
        /// Session id
        session: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mnemo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = Config::from_env()?;
    let store: Arc<dyn HistoryStore> = Arc::from(config.history.create_store().await?);

    match cli.command {
        Command::Demo { session } => {
            let runner = build_runner(&config, store.clone()).await?;
            let session = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            out.banner();
            out.info(&format!(
                "model '{}' at {}, history backend '{}'",
                config.llm.model,
                config.llm.ollama_url,
                config.history.name()
            ));
            out.info(&format!("session '{}'", session));

            for turn in DEMO_TURNS {
                out.separator();
                out.user_turn(turn);
                out.separator();
                match runner.converse(&session, turn).await {
                    Ok(reply) => out.reply(&reply),
                    Err(e) => {
                        out.error(&e.to_string());
                        return Err(e.into());
                    }
                }
            }
            out.separator();
            out.success("demo complete; run again with --session to extend the conversation");
        }
        Command::Ask { session, text } => {
            let runner = build_runner(&config, store.clone()).await?;
            let reply = runner.converse(&session, &text).await?;
            out.reply(&reply);
        }
        Command::Sessions => {
            let sessions = store.sessions().await?;
            if sessions.is_empty() {
                out.info("no stored sessions");
            }
            for info in sessions {
                out.info(&format!("{} ({} messages)", info.id, info.message_count));
            }
        }
        Command::Clear { session } => {
            store.clear(&session).await?;
            out.success(&format!("cleared session '{}'", session));
        }
    }

    Ok(())
}

async fn build_runner(
    config: &Config,
    store: Arc<dyn HistoryStore>,
) -> anyhow::Result<ConversationRunner> {
    let provider = Provider::Ollama {
        base_url: config.llm.ollama_url.clone(),
        model: config.llm.model.clone(),
    };
    let client = provider.create_client().await?;

    let mut runner = ConversationRunner::new(store, Arc::from(client))
        .with_model_timeout(Duration::from_secs(config.llm.request_timeout_secs));
    if let Some(prompt) = &config.chat.system_prompt {
        runner = runner.with_system_prompt(prompt.clone());
    }
    Ok(runner)
}
