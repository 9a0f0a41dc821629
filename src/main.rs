// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = crawl/store failed, 2 = error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - explicit configuration objects
mod crawl;    // src/crawl/ - the bounded crawler
mod error;    // src/error.rs - typed errors
mod fetch;    // src/fetch/ - page fetching
mod handler;  // src/handler.rs - trigger handler (crawl + store)
mod logging;  // src/logging.rs - tracing set-up
mod store;    // src/store/ - document persistence
mod text;     // src/text/ - HTML to text, link discovery

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use cli::{Cli, Commands, PolicyArgs, StoreArgs};
use crawl::{CrawlOptions, Crawler};
use error::FailureKind;
use fetch::{Headers, HttpFetcher};
use handler::{DepthValue, Handler, TriggerEvent};
use store::{load_documents, upload_file, LocalBucketStore};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected errors print the whole cause chain
            eprintln!("Error: {:?}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init();

    match cli.command {
        Commands::Crawl {
            urls,
            depth,
            prefix,
            headers,
            policy,
            json,
        } => handle_crawl(&urls, depth, prefix, headers, &policy, json).await,
        Commands::Invoke {
            url,
            depth,
            level_prefix,
            payload,
            policy,
            store,
        } => {
            let event = match payload {
                Some(raw) => parse_payload(&raw)?,
                None => TriggerEvent {
                    url,
                    depth: depth.map(DepthValue::Text),
                    level_prefix,
                },
            };
            handle_invoke(event, &policy, &store).await
        }
        Commands::Upload { path, store } => handle_upload(&path, &store).await,
        Commands::Show { store, json } => handle_show(&store, json).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    urls: &[String],
    depth: usize,
    prefix: Option<String>,
    headers: Vec<(String, String)>,
    policy: &PolicyArgs,
    json: bool,
) -> Result<i32> {
    let mut options = policy.apply(CrawlOptions::new(depth));
    if let Some(prefix) = prefix {
        options = options.with_prefix(prefix);
    }
    if !headers.is_empty() {
        options = options.with_headers(headers.into_iter().collect::<Headers>());
    }

    let fetcher = HttpFetcher::new().context("failed to build the HTTP client")?;
    let crawler = Crawler::new(fetcher);

    match crawler.crawl(urls, &options).await {
        Ok(documents) => {
            print_documents(&documents, json)?;
            Ok(0)
        }
        Err(e) => {
            eprintln!("Error: {:?}", anyhow::Error::new(e));
            Ok(1)
        }
    }
}

// Handles the 'invoke' subcommand
// The response is always printed as JSON, success or not
async fn handle_invoke(event: TriggerEvent, policy: &PolicyArgs, store: &StoreArgs) -> Result<i32> {
    let config = store.to_config();
    let fetcher = HttpFetcher::new().context("failed to build the HTTP client")?;
    let handler = Handler::new(
        Crawler::new(fetcher),
        LocalBucketStore::new(&config.root),
        config,
    )
    .with_options(policy.apply(CrawlOptions::default()));

    let response = handler.handle(event).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() { 0 } else { 1 })
}

// Handles the 'upload' subcommand
async fn handle_upload(path: &Path, store: &StoreArgs) -> Result<i32> {
    let config = store.to_config();
    let bucket = LocalBucketStore::new(&config.root);

    match upload_file(&bucket, &config, path).await {
        Ok(stored) => {
            println!(
                "Successfully uploaded file at {} to {}",
                path.display(),
                stored.location
            );
            Ok(0)
        }
        // Bad input gets a one-line message, storage failures the full chain
        Err(e) if e.kind() == FailureKind::InvalidInput => {
            eprintln!("[ERROR] {}", e);
            Ok(1)
        }
        Err(e) => {
            eprintln!("[ERROR] {:?}", anyhow::Error::new(e));
            Ok(1)
        }
    }
}

// Handles the 'show' subcommand
async fn handle_show(store: &StoreArgs, json: bool) -> Result<i32> {
    let config = store.to_config();
    let bucket = LocalBucketStore::new(&config.root);

    let documents = load_documents(&bucket, &config)
        .await
        .with_context(|| {
            format!(
                "could not read {} from {}",
                config.artifact_name,
                config.bucket_name()
            )
        })?;

    print_documents(&documents, json)?;
    Ok(0)
}

// `null` and `{}` both mean "use every default"
fn parse_payload(raw: &str) -> Result<TriggerEvent> {
    let event: Option<TriggerEvent> =
        serde_json::from_str(raw).context("payload must be a JSON object")?;
    Ok(event.unwrap_or_default())
}

// Prints documents either as a JSON array or as a table
fn print_documents(documents: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(documents)?);
    } else {
        print_table(documents);
    }
    Ok(())
}

fn print_table(documents: &[String]) {
    println!("{:<6} {:<10} {:<60}", "#", "CHARS", "FIRST LINE");
    println!("{}", "=".repeat(78));

    for (index, document) in documents.iter().enumerate() {
        let first_line = document.lines().next().unwrap_or("");

        // Truncate on a char boundary so multi-byte text doesn't panic
        let preview = if first_line.chars().count() > 57 {
            format!("{}...", first_line.chars().take(57).collect::<String>())
        } else {
            first_line.to_string()
        };

        println!("{:<6} {:<10} {:<60}", index + 1, document.chars().count(), preview);
    }

    println!();
    println!("Documents: {}", documents.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_defaults() {
        assert_eq!(parse_payload("null").unwrap(), TriggerEvent::default());
        assert_eq!(parse_payload("{}").unwrap(), TriggerEvent::default());
    }

    #[test]
    fn test_parse_payload_fields() {
        let event = parse_payload(r#"{"url": "https://a.test", "depth": 2}"#).unwrap();
        assert_eq!(event.url.as_deref(), Some("https://a.test"));
        assert_eq!(event.depth, Some(DepthValue::Number(2)));
    }

    #[test]
    fn test_parse_payload_accepts_any_depth_value() {
        // Validation of the depth happens in the handler, which answers 500
        let event = parse_payload(r#"{"depth": 1.0}"#).unwrap();
        assert_eq!(event.depth, Some(DepthValue::Other(serde_json::json!(1.0))));
        assert!(parse_payload(r#"{"depth": false}"#).is_ok());
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(parse_payload("[1, 2]").is_err());
        assert!(parse_payload("url=x").is_err());
    }
}
