use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use miso_common::config::{BASE_URL_ENV, SESSION_ENV};
use miso_common::{ApiConfig, BlogClient, MisoError, telemetry};
use miso_editor_core::{
    EditorConfig, EditorStatusTracker, StaticForm, StripMode, parse_fragment,
};

#[derive(Parser)]
#[command(version, about = "miso - blog article tools: sanitize, check and interact", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Blog base URL
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Session cookie value
    #[arg(long, global = true, env = SESSION_ENV, hide_env_values = true)]
    session: Option<String>,

    /// Editor config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize article markup against the allow list
    Sanitize {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,

        /// Replace disallowed elements with their whole text
        #[arg(long)]
        flatten: bool,
    },
    /// Print the word/character status line
    Status {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Run the article submission checks and print the content that would
    /// be submitted
    Check {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,

        /// Article category
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle the like on an article
    Like {
        article_id: u64,

        /// CSRF token from the article page
        #[arg(long, default_value = "")]
        csrf: String,
    },
    /// Reply to a discussion
    Reply {
        discussion_id: u64,

        /// Form field, as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_miette()?;
    telemetry::init_tracing(telemetry::default_level());

    let cli = Cli::parse();
    let editor_config = load_editor_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sanitize { file, flatten } => {
            let mut config = editor_config;
            if flatten {
                config.strip_mode = StripMode::Flatten;
            }
            let markup = read_input(file.as_deref())?;
            println!("{}", config.sanitizer().sanitize(&markup));
        }
        Commands::Status { file } => {
            let tracker = EditorStatusTracker::new(editor_config);
            let region = parse_fragment(&read_input(file.as_deref())?);
            let snapshot = tracker.compute_status(&region);
            let labels = &tracker.config().labels;
            println!("{}", labels.word_count_line(&snapshot));
            if let Some(line) = labels.last_modified_line(&snapshot) {
                println!("{line}");
            }
        }
        Commands::Check { file, category } => {
            let tracker = EditorStatusTracker::new(editor_config);
            let region = parse_fragment(&read_input(file.as_deref())?);
            let mut form = StaticForm {
                category,
                content: None,
            };
            let outcome = tracker.on_submit(&region, &mut form)?;
            tracing::info!(category = %outcome.category, "article passes submission checks");
            println!("{}", outcome.content);
        }
        Commands::Like { article_id, csrf } => {
            let client = BlogClient::new(api_config(cli.base_url, cli.session)?);
            match client.toggle_like(article_id, &csrf).await {
                Ok(state) => println!("{} ({})", state.label(), state.likes),
                Err(MisoError::AuthRequired) => {
                    return Err(miette::miette!(
                        help = "pass --session or set MISO_SESSION",
                        "not logged in, log in at {}",
                        client.config().login_url()
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Reply {
            discussion_id,
            fields,
        } => {
            let client = BlogClient::new(api_config(cli.base_url, cli.session)?);
            client.post_reply(discussion_id, fields).await?;
            println!("Reply posted");
        }
    }

    Ok(())
}

fn api_config(base_url: Option<String>, session: Option<String>) -> Result<ApiConfig> {
    let mut config = match base_url {
        Some(url) => ApiConfig::new(&url)?,
        None => ApiConfig::default(),
    };
    config.session_cookie = session.filter(|s| !s.is_empty());
    Ok(config)
}

fn load_editor_config(path: Option<&Path>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let json = std::fs::read_to_string(path).into_diagnostic()?;
    EditorConfig::from_json(&json).into_diagnostic()
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).into_diagnostic(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
            Ok(buf)
        }
    }
}

fn parse_field(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty field name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
