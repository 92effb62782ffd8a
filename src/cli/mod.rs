use crate::config::Config;
use crate::utils::render_template;
use crate::Essence;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "essence")]
#[command(about = "Extracts embed metadata from URLs found in text")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of URLs extracted concurrently
    #[arg(short = 'j', long)]
    pub concurrent: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the URLs found in a text
    Extract {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Print embed metadata for each URL as JSON
    Embed {
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },
    /// Replace the URLs of a text with their embeds
    Replace {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output template using %(name)s placeholders, e.g. "%(title)s"
        #[arg(short, long, default_value = "%(html)s")]
        template: String,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(concurrent) = self.concurrent {
            config.concurrency = concurrent;
        }

        let essence = Essence::new(&config)?;
        let options = config.options();

        match &self.command {
            Command::Extract { text } => {
                for url in essence.extract(text) {
                    println!("{}", url);
                }
            }
            Command::Embed { urls } => {
                for (url, result) in essence.extractor().extract_each(urls, &options).await {
                    match result {
                        Ok(media) => println!("{}", serde_json::to_string_pretty(&media)?),
                        Err(e) => eprintln!("{}: {}", url, e),
                    }
                }
            }
            Command::Replace { text, template } => {
                let replaced = essence
                    .replace(text, |media| render_template(template, media), &options)
                    .await;
                println!("{}", replaced);
            }
        }

        Ok(())
    }
}
