//! photo-dash command line
//!
//! Renders a dashboard request document into `<dest>/<module>.jpg`, or
//! removes a module's image.
//!
//! ```text
//! photo-dash [--config PATH] [--dest DIR] render <REQUEST.json>
//! photo-dash [--config PATH] [--dest DIR] delete <MODULE>
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use photo_dash::config::DEFAULT_CONFIG_PATH;
use photo_dash::{AppConfig, DashError, DashResult, ImageStore};
use photo_dash_core::{Canvas, DashboardRequest, SystemClock};

#[derive(Parser)]
#[command(version, about = "Render dashboard requests into status images")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output directory, overriding `dest` from the configuration file
    #[arg(short, long)]
    dest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a request document and store the image
    Render { request: PathBuf },
    /// Delete the stored image of a module
    Delete { module: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> DashResult<()> {
    let config = AppConfig::load(&cli.config)?;
    let store = ImageStore::new(cli.dest.unwrap_or(config.dest));

    match cli.command {
        Commands::Render { request } => {
            let canvas = Canvas::new(config.canvas)?;
            render(&canvas, &store, &request)
        }
        Commands::Delete { module } => store.delete(&module),
    }
}

fn render(canvas: &Canvas, store: &ImageStore, path: &Path) -> DashResult<()> {
    let text = fs::read_to_string(path).map_err(|e| DashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let request = DashboardRequest::from_json_str(&text).map_err(|e| DashError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let module = request.module.clone();
    store.path_for(&module)?;
    let output = canvas.render_request(request, &SystemClock)?;
    store.save(&module, &output.bitmap)?;
    Ok(())
}
