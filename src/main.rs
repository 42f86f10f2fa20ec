use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use wiktionnaire_parser::fetch::Fetcher;
use wiktionnaire_parser::languages;
use wiktionnaire_parser::parser::document::Document;
use wiktionnaire_parser::settings::Settings;
use wiktionnaire_parser::WiktionnaireParser;

#[derive(Parser)]
#[command(name = "wiktionnaire", about = "Extract lexical data from French Wiktionary pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page by title and print its data as JSON
    Page {
        title: String,
        /// Past revision to fetch instead of the current one
        #[arg(long)]
        oldid: Option<u64>,
        #[command(flatten)]
        language: LanguageArgs,
    },
    /// Fetch a random page with an entry in the given language
    Random {
        /// Language code (default: fr)
        #[arg(short, long, default_value = "fr")]
        code: String,
    },
    /// Parse a saved HTML page
    File {
        path: PathBuf,
        #[command(flatten)]
        language: LanguageArgs,
    },
    /// List the languages a page covers
    Languages {
        /// Page title, fetched from the wiki
        title: Option<String>,
        /// Saved HTML page instead of a title
        #[arg(short, long, conflicts_with = "title")]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LanguageArgs {
    /// Language name as written on the page (e.g. "Anglais")
    #[arg(short, long, conflicts_with = "code")]
    language: Option<String>,
    /// Language code (e.g. "en")
    #[arg(short, long)]
    code: Option<String>,
}

impl LanguageArgs {
    fn resolve(&self, settings: &Settings) -> Result<String> {
        match (&self.language, &self.code) {
            (Some(name), _) => Ok(name.clone()),
            (None, Some(code)) => Ok(languages::name_for_code(code)?.to_string()),
            (None, None) => Ok(settings.default_language.clone()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "settings loaded");

    match cli.command {
        Commands::Page { title, oldid, language } => {
            let language = language.resolve(&settings)?;
            let fetcher = Fetcher::new(&settings)?;
            let html = fetcher
                .page(&title, oldid)
                .with_context(|| format!("Failed to fetch page {title}"))?;
            print_word(&html, &language)?;
        }
        Commands::Random { code } => {
            let language = languages::name_for_code(&code)?;
            let fetcher = Fetcher::new(&settings)?;
            let html = fetcher
                .random(&code)
                .context("Failed to fetch a random page")?;
            print_word(&html, language)?;
        }
        Commands::File { path, language } => {
            let language = language.resolve(&settings)?;
            let html = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let parser =
                WiktionnaireParser::from_document(Document::from_bytes(&html), &language);
            println!("{}", serde_json::to_string_pretty(&parser.word_data())?);
        }
        Commands::Languages { title, file } => {
            let document = match (title, file) {
                (_, Some(path)) => Document::from_bytes(
                    &std::fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                (Some(title), None) => Document::parse(&Fetcher::new(&settings)?.page(&title, None)?),
                (None, None) => anyhow::bail!("Give a page title or --file"),
            };
            for language in document.languages() {
                println!("{language}");
            }
        }
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn print_word(html: &str, language: &str) -> Result<()> {
    let parser = WiktionnaireParser::new(html, language);
    if parser.section_index().is_none() {
        tracing::warn!(language, "no section for this language on the page");
    }
    println!("{}", serde_json::to_string_pretty(&parser.word_data())?);
    Ok(())
}
