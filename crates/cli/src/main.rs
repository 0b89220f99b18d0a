use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildcard_core::client::{HttpJournalClient, JournalApi};
use wildcard_core::domain::analysis::AnalysisResult;
use wildcard_core::domain::chat::ChatMessage;
use wildcard_core::domain::form::InvestmentFormData;

mod form;
mod session;

#[derive(Debug, Parser)]
#[command(name = "wildcard")]
struct Args {
    /// Backend base URL. Overrides API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive journaling session (default).
    Interactive,
    /// Submit a form and print the analysis JSON.
    Analyze {
        /// Form JSON file (`{stocks, decisionBasis}`).
        #[arg(long, conflicts_with = "quick", required_unless_present = "quick")]
        form: Option<PathBuf>,

        /// Use the built-in sample portfolio.
        #[arg(long)]
        quick: bool,
    },
    /// Generate a quiz from an analysis JSON file.
    Quiz {
        #[arg(long)]
        analysis: PathBuf,
    },
    /// Send one chat message.
    Chat {
        #[arg(long)]
        message: String,

        /// JSON array of `{role, content}` messages.
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = wildcard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(base_url) = args.base_url {
        settings.api_base_url = Some(base_url);
    }

    let client = HttpJournalClient::from_settings(&settings)?;
    tracing::debug!(base_url = client.base_url(), "journal api client ready");

    let result = run(&client, args.command.unwrap_or(Command::Interactive)).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "wildcard failed");
    }
    result
}

async fn run(client: &HttpJournalClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Interactive => {
            let today = chrono::Local::now().date_naive();
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            session::Session::new(client, stdin, stdout, today)
                .run()
                .await
        }
        Command::Analyze { form, quick } => {
            let form: InvestmentFormData = match form {
                Some(path) if !quick => read_json(&path)?,
                _ => InvestmentFormData::quick_sample(),
            };
            let result = client.analyze(&form).await?;
            print_json(result.raw())
        }
        Command::Quiz { analysis } => {
            let analysis = AnalysisResult::from_value(read_json(&analysis)?);
            let quizzes = client.generate_quiz(&analysis).await?;
            print_json(&quizzes)
        }
        Command::Chat { message, history } => {
            let history: Vec<ChatMessage> = match history {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let reply = client.chat(&history, &message).await?;
            println!("{}", reply.message);
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{text}");
    Ok(())
}

fn init_sentry(settings: &wildcard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let args = Args::parse_from(["wildcard", "--base-url", "http://api:9000"]);
        assert!(args.command.is_none());
        assert_eq!(args.base_url.as_deref(), Some("http://api:9000"));
    }

    #[test]
    fn analyze_requires_form_or_quick() {
        assert!(Args::try_parse_from(["wildcard", "analyze"]).is_err());
        assert!(Args::try_parse_from(["wildcard", "analyze", "--quick"]).is_ok());
        assert!(Args::try_parse_from(["wildcard", "analyze", "--quick", "--form", "f.json"]).is_err());
    }
}
