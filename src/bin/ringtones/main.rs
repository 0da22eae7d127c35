//! ringtones - terminal ringtone browser
//!
//! Run with: cargo run -- <catalog.json | tune.rtttl> [--config player.json]
//!
//! Set `RINGTONES_LOG=<file>` to write logs (filtered by `RUST_LOG`) to a file;
//! the terminal itself belongs to the UI.

mod app;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtttl_player::{catalog::Catalog, PlayerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::Ringtones;

struct Args {
    catalog: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> EyreResult<Self> {
        let mut catalog = None;
        let mut config = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or_else(|| eyre!("--config needs a path"))?;
                    config = Some(PathBuf::from(path));
                }
                _ if catalog.is_none() => catalog = Some(PathBuf::from(arg)),
                other => return Err(eyre!("unexpected argument: {other}")),
            }
        }

        Ok(Self {
            catalog: catalog
                .ok_or_else(|| eyre!("usage: ringtones <catalog.json | tune.rtttl> [--config player.json]"))?,
            config,
        })
    }
}

fn init_tracing() -> EyreResult<()> {
    let Some(path) = std::env::var_os("RINGTONES_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).wrap_err("failed to create log file")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_tracing()?;

    let args = Args::parse()?;
    let catalog = Catalog::from_path(&args.catalog)
        .wrap_err_with(|| format!("failed to load {}", args.catalog.display()))?;
    let config = match &args.config {
        Some(path) => PlayerConfig::from_path(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => PlayerConfig::default(),
    };

    tracing::info!(ringtones = catalog.len(), "catalog loaded");
    Ringtones::new(catalog, config).run()
}
