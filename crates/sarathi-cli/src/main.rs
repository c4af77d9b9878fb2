use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sarathi")]
#[command(about = "Sarathi CLI - RAG-based intelligence assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        /// Email to sign in with (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Remember the email for future logins
        #[arg(long)]
        remember: bool,
    },
    /// Clear the stored session
    Logout,
    /// Show the current session state
    Status,
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: Vec<String>,
        /// Answer locally instead of calling the backend
        #[arg(long)]
        offline: bool,
    },
    /// Start an interactive chat session
    Chat {
        /// Answer locally instead of calling the backend
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { email, remember } => commands::login::run(email, remember).await?,
        Commands::Logout => commands::login::logout()?,
        Commands::Status => commands::status::run()?,
        Commands::Ask { question, offline } => {
            commands::chat::ask(question.join(" "), offline).await?
        }
        Commands::Chat { offline } => commands::chat::run(offline).await?,
    }

    Ok(())
}

// Logs go to stderr so transcripts on stdout stay clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
