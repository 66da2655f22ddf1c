use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings_from, DEFAULT_SETTINGS_FILE},
    render_text, ArtworkApi, GalleryController, GalleryState, HttpArtworkClient, Settings,
};
use shared::domain::ArtworkId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "artbase", about = "Browse the Art Base One collection from a terminal")]
struct Args {
    /// API base URL; relative values resolve against --origin.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    /// Path of the artworks listing under the API base.
    #[arg(long)]
    artworks_path: Option<String>,
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the gallery view, wait for both lists and print it.
    Gallery {
        #[arg(long)]
        json: bool,
        /// Artwork ids to show enlarged (each toggles once).
        #[arg(long = "expand")]
        expand: Vec<i64>,
        /// Give up waiting after this many seconds.
        #[arg(long, default_value_t = 30)]
        wait_secs: u64,
    },
    /// Print one artwork record.
    Show { id: i64 },
    /// Print the API greeting to check connectivity.
    Ping,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = load_settings_from(&self.config);
        if let Some(v) = &self.api_url {
            settings.api_base = v.clone();
        }
        if let Some(v) = &self.origin {
            settings.origin = v.clone();
        }
        if let Some(v) = &self.artworks_path {
            settings.artworks_path = v.clone();
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = args.settings();
    let client = HttpArtworkClient::from_settings(&settings)
        .with_context(|| format!("invalid API settings: {settings:?}"))?;
    tracing::info!(api_base = %client.base(), "using artwork API");

    match args.command.unwrap_or(Command::Gallery {
        json: false,
        expand: Vec::new(),
        wait_secs: 30,
    }) {
        Command::Gallery {
            json,
            expand,
            wait_secs,
        } => show_gallery(client, json, &expand, wait_secs).await,
        Command::Show { id } => {
            let artwork = client
                .fetch_artwork(ArtworkId(id))
                .await
                .with_context(|| format!("failed to load artwork {id}"))?;
            println!("{}", serde_json::to_string_pretty(&artwork)?);
            Ok(())
        }
        Command::Ping => {
            let message = client
                .fetch_root_message()
                .await
                .context("API did not answer")?;
            println!("{message}");
            Ok(())
        }
    }
}

async fn show_gallery(
    client: HttpArtworkClient,
    json: bool,
    expand: &[i64],
    wait_secs: u64,
) -> Result<()> {
    let (mut controller, mut events) = GalleryController::with_channel(Arc::new(client));
    let mut state = GalleryState::new();
    controller.mount();

    if tokio::time::timeout(Duration::from_secs(wait_secs), state.settle(&mut events))
        .await
        .is_err()
    {
        tracing::warn!("gave up waiting after {wait_secs}s; printing partial view");
    }
    controller.unmount();

    for id in expand {
        state.toggle_image_expansion(ArtworkId(*id));
    }

    let view = state.render();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(())
}
