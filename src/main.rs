use anyhow::{Context, Result};
use autumnus::{FormatterOption, Options, highlight, themes};
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use iocraft::prelude::*;
use std::path::{Path, PathBuf};
use xmedia::{BearerToken, MediaCategory, MediaClient, MediaUploadRequest, MediaUploadResponse};

use crate::ui::{ErrorMessage, UploadSummary};

mod config;
mod ui;

#[derive(Parser)]
#[command(name = "xmedia")]
#[command(version)]
#[command(about = "Upload media to X")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a media file in a single request
    Upload {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// MIME type of the file, e.g. image/png or text/srt
        #[arg(short, long)]
        media_type: String,
        /// Media category: tweet_image, dm_image or subtitles
        #[arg(short, long, default_value = "tweet_image")]
        category: MediaCategory,
        /// User ID allowed to use the media (repeatable)
        #[arg(short, long = "owner")]
        owners: Vec<String>,
        /// Print the decoded response as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let _rt_guard = rt.enter();
    clap_complete::CompleteEnv::with_factory(Cli::command).complete();
    let cli = Cli::parse();

    let result = rt.block_on(async {
        let config = config::read_config()?;
        let client = MediaClient::new(config.api_host, BearerToken::new(config.bearer_token));

        match cli.command {
            Commands::Upload {
                file,
                media_type,
                category,
                owners,
                json,
            } => upload(&client, &file, media_type, category, owners, json).await,
        }
    });

    if let Err(e) = result {
        element!(ErrorMessage(message: format!("{e:#}"))).print();
        std::process::exit(1);
    }
    Ok(())
}

async fn upload(
    client: &MediaClient,
    file: &Path,
    media_type: String,
    category: MediaCategory,
    owners: Vec<String>,
    json: bool,
) -> Result<()> {
    let media = tokio::fs::read(file)
        .await
        .with_context(|| format!("Unable to read {}", file.display()))?;

    let request =
        MediaUploadRequest::new(media, media_type, category).with_additional_owners(owners);
    let response = client
        .upload_media(&request)
        .await
        .context("Failed to upload media")?;

    if json {
        print_json(&response)?;
    } else {
        let title = match file.file_name() {
            Some(name) => format!("Uploaded {}", name.to_string_lossy()),
            None => "Media uploaded".to_string(),
        };
        element!(UploadSummary(title: title, response: response)).print();
        println!("\nUse the Media ID or Media Key when creating posts with attached media");
    }

    Ok(())
}

fn print_json(response: &MediaUploadResponse) -> Result<()> {
    let output = highlight(
        &serde_json::to_string_pretty(&response.data)?,
        Options {
            formatter: FormatterOption::Terminal {
                theme: Some(themes::get("ayu_light").expect("Syntax highlighting theme not found")),
            },
            lang_or_file: Some("json"),
        },
    );
    println!("{}", output);
    Ok(())
}
