mod api;
mod commands;
mod config;
mod interactive;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use triage_core::{Assistant, Role, Tone};
use triage_llm::GeminiClient;
use triage_logging::{init_tracing, LogFormat, Logger};
use triage_store::IncidentLogStore;

use crate::config::ProjectConfig;

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    about = "GenAI incident assistant for DevOps and SRE teams",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Generation model (overrides triage.toml)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Incident log file (overrides triage.toml)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Tracing filter level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Also write assistant events as JSON lines to this file
    #[arg(long, global = true)]
    event_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the single-page web UI (default)
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = 8501)]
        port: u16,

        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Terminal session with role/tone selectors and a log viewer
    Interactive,
    /// Generate guidance for a single incident and exit
    Ask {
        /// Assistant role, e.g. "SRE Expert" or sre-expert
        #[arg(short, long)]
        role: Option<Role>,

        /// Response tone: professional, detailed or concise
        #[arg(short, long)]
        tone: Option<Tone>,

        /// Incident description (reads --file or stdin if omitted)
        #[arg(long, conflicts_with = "file")]
        description: Option<String>,

        /// Read the incident description from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json_output: bool,
    },
    /// Print the incident log
    Logs,
    /// List the available roles and tones
    Options,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let working_dir = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let project = ProjectConfig::load(&working_dir)?.unwrap_or_default();
    let selection = project.selection();

    let command = cli.command.unwrap_or(Command::Serve {
        host: "127.0.0.1".to_string(),
        port: 8501,
        no_open: false,
    });

    if let Command::Options = command {
        commands::handle_options(selection);
        return Ok(());
    }

    // The credential is read here, once; a missing key only fails on first generate.
    let generation = project.generation_config(cli.model.as_deref());
    let generator = GeminiClient::new(&generation).context("Failed to create Gemini client")?;
    let store = IncidentLogStore::new(project.log_path(&working_dir, cli.log_file.as_deref()));
    let logger = match cli.event_log {
        Some(ref path) => Logger::with_file(log_format, path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?,
        None => Logger::new(log_format),
    };

    let assistant = Arc::new(Assistant::new(
        Arc::new(generator),
        store,
        Arc::new(logger),
    ));

    match command {
        Command::Serve {
            host,
            port,
            no_open,
        } => ui::handle_serve(assistant, selection, &host, port, !no_open).await,
        Command::Interactive => interactive::handle_interactive(&assistant, selection).await,
        Command::Ask {
            role,
            tone,
            description,
            file,
            json_output,
        } => {
            let description = commands::read_description(description, file.as_deref())?;
            let code = commands::handle_ask(
                &assistant,
                role.unwrap_or(selection.role),
                tone.unwrap_or(selection.tone),
                description,
                json_output,
            )
            .await?;
            std::process::exit(code);
        }
        Command::Logs => commands::handle_logs(&assistant),
        Command::Options => Ok(()),
    }
}
