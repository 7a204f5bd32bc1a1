//! CLI for the TTDL downloader client.

mod commands;
mod terminal;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ttdl_core::config::{self, TtdlConfig};
use ttdl_core::sink::DirectoryFileSink;
use ttdl_core::status::Status;
use ttdl_core::transport::{CurlTransport, Transport};

use commands::{
    run_audio, run_contact, run_mp3, run_open, run_preview, run_story, run_video, run_watch,
};
use terminal::TerminalSink;

/// Top-level CLI for the TTDL downloader client.
#[derive(Debug, Parser)]
#[command(name = "ttdl")]
#[command(about = "TTDL: preview and download TikTok media through a ttdl backend", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides `base_url` in config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory downloads are saved into (default: config, then current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch and show the preview card for a URL.
    Preview {
        url: String,
    },

    /// Download the video behind a URL.
    Video {
        url: String,
        /// Quality hint passed to the backend (`best`, `worst`, or a format string).
        #[arg(long)]
        quality: Option<String>,
    },

    /// Download the audio track as MP3.
    Mp3 {
        url: String,
    },

    /// Convert to MP3 on the backend and show the hosted audio link.
    Audio {
        url: String,
    },

    /// Fetch the stories of a user.
    Story {
        username: String,
    },

    /// Open the original page in the browser.
    Open {
        url: String,
    },

    /// Interactive mode: each stdin line replaces the URL input; `:video`,
    /// `:mp3`, `:audio`, `:open` act on it and `:quit` exits.
    Watch,

    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

/// Everything a command needs, built once from config and global flags.
pub struct Context {
    pub cfg: TtdlConfig,
    pub transport: Arc<dyn Transport>,
    pub sink: Arc<TerminalSink>,
    pub files: Arc<DirectoryFileSink>,
}

impl Context {
    fn build(global: GlobalOpts) -> Result<Self> {
        let mut cfg = config::load_or_init()?;
        if let Some(base_url) = global.base_url {
            cfg.base_url = base_url;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let transport = CurlTransport::from_config(&cfg)
            .with_context(|| format!("invalid backend URL {:?}", cfg.base_url))?;
        let download_dir = match global.download_dir.or_else(|| cfg.download_dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        Ok(Self {
            cfg,
            transport: Arc::new(transport),
            sink: Arc::new(TerminalSink::new()),
            files: Arc::new(DirectoryFileSink::new(download_dir)),
        })
    }
}

impl CliCommand {
    /// Returns the final status of the command's flow.
    pub async fn run_from_args() -> Result<Status> {
        let cli = Cli::parse();
        let ctx = Context::build(cli.global)?;

        let status = match cli.command {
            CliCommand::Preview { url } => run_preview(&ctx, &url).await,
            CliCommand::Video { url, quality } => run_video(&ctx, &url, quality).await,
            CliCommand::Mp3 { url } => run_mp3(&ctx, &url).await,
            CliCommand::Audio { url } => run_audio(&ctx, &url).await,
            CliCommand::Story { username } => run_story(&ctx, &username).await,
            CliCommand::Open { url } => run_open(&ctx, &url),
            CliCommand::Watch => run_watch(&ctx).await?,
            CliCommand::Contact {
                name,
                email,
                message,
            } => run_contact(&ctx, name, email, message).await,
        };

        Ok(status)
    }
}

#[cfg(test)]
mod tests;
