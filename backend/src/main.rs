#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod modules;

include_modules!();

use crate::model::{ConfigOverrides, EnvOverrides, ExportConfig};
use crate::processing::processor::{print_summaries, run_export};
use crate::utils::{ensure_config_files, get_env_file_path, init_logger, load_env_file, read_config, resolve_env_var, PlexClient};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{error, info};
use shared::model::NamingMode;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "plexport")]
#[command(version)]
#[command(about = "Export metadata and poster/art from plex to NFO and image files", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// The config directory
    #[arg(short = 'p', long = "config-path")]
    config_path: Option<String>,

    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Plex server base url
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Plex token
    #[arg(long = "token")]
    token: Option<String>,

    /// Library name(s) to process
    #[arg(short = 'l', long = "library", num_args = 1..)]
    library: Option<Vec<String>>,

    /// Media title(s) to process
    #[arg(short = 't', long = "title", num_args = 1..)]
    title: Option<Vec<String>>,

    /// Movie NFO naming: default, title or filename
    #[arg(long = "nfo-name-type", value_parser = ["default", "title", "filename"])]
    nfo_name_type: Option<String>,

    /// Movie poster/art naming: default, title or filename
    #[arg(long = "image-name-type", value_parser = ["default", "title", "filename"])]
    image_name_type: Option<String>,

    /// Export NFO files
    #[arg(long = "export-nfo", overrides_with = "no_export_nfo")]
    export_nfo: bool,
    #[arg(long = "no-export-nfo", overrides_with = "export_nfo")]
    no_export_nfo: bool,

    /// Export posters
    #[arg(long = "export-poster", overrides_with = "no_export_poster")]
    export_poster: bool,
    #[arg(long = "no-export-poster", overrides_with = "export_poster")]
    no_export_poster: bool,

    /// Export fanarts
    #[arg(long = "export-fanart", overrides_with = "no_export_fanart")]
    export_fanart: bool,
    #[arg(long = "no-export-fanart", overrides_with = "export_fanart")]
    no_export_fanart: bool,

    /// Export season posters
    #[arg(long = "export-season-poster", overrides_with = "no_export_season_poster")]
    export_season_poster: bool,
    #[arg(long = "no-export-season-poster", overrides_with = "export_season_poster")]
    no_export_season_poster: bool,

    /// Export episode NFO files
    #[arg(long = "export-episode-nfo", overrides_with = "no_export_episode_nfo")]
    export_episode_nfo: bool,
    #[arg(long = "no-export-episode-nfo", overrides_with = "export_episode_nfo")]
    no_export_episode_nfo: bool,

    /// Overwrite files without checking server metadata
    #[arg(short = 'f', long = "force-overwrite", default_value_t = false)]
    force_overwrite: bool,

    /// Simulate actions without making any changes
    #[arg(long = "dry-run", default_value_t = false)]
    dry_run: bool,

    /// log level
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

const fn flag_pair(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

impl From<&Args> for ConfigOverrides {
    fn from(args: &Args) -> Self {
        Self {
            base_url: args.url.clone(),
            token: args.token.clone(),
            libraries: args.library.clone(),
            titles: args.title.clone(),
            movie_nfo_name_type: args.nfo_name_type.as_deref().map(NamingMode::from),
            movie_image_name_type: args.image_name_type.as_deref().map(NamingMode::from),
            export_nfo: flag_pair(args.export_nfo, args.no_export_nfo),
            export_poster: flag_pair(args.export_poster, args.no_export_poster),
            export_fanart: flag_pair(args.export_fanart, args.no_export_fanart),
            export_season_poster: flag_pair(args.export_season_poster, args.no_export_season_poster),
            export_episode_nfo: flag_pair(args.export_episode_nfo, args.no_export_episode_nfo),
            force_overwrite: args.force_overwrite,
            dry_run: args.dry_run,
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_TIMESTAMP: Option<&str> = option_env!("VERGEN_BUILD_TIMESTAMP");

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let (config_path, config_file) = get_file_paths(&args);
    let env_file = get_env_file_path(&config_path);
    match ensure_config_files(&env_file, Path::new(&config_file)) {
        Ok(Some(created)) => {
            println!("{} created. Please populate it and rerun.", created.display());
            return;
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("Can't create config template: {err}");
            std::process::exit(1);
        }
    }
    load_env_file(&config_path);

    let log_file = init_logger(args.log_level.as_ref(), &config_file);

    info!("Version: {VERSION}");
    if let Some(bts) = BUILD_TIMESTAMP.and_then(|ts| ts.parse::<DateTime<Utc>>().ok()).map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string()) {
        info!("Build time: {bts}");
    }
    info!("Config file: {config_file}");

    let dto = read_config(Path::new(&config_file)).unwrap_or_else(|err| exit!("{err}"));
    let mut config = ExportConfig::from(&dto);
    config.apply_env(&EnvOverrides::gather());
    config.apply_args(&ConfigOverrides::from(&args));
    config.validate().unwrap_or_else(|err| exit!("{err}"));

    let client = PlexClient::new(&config).unwrap_or_else(|err| exit!("{err}"));
    let summaries = run_export(&client, &config).await.unwrap_or_else(|err| exit!("{err}"));

    if !config.dry_run {
        print_summaries(&summaries, &config.exports);
    }
    print_log_hint(log_file.as_ref());
}

fn get_file_paths(args: &Args) -> (String, String) {
    let config_path = resolve_env_var(&args.config_path.as_ref().map_or_else(utils::get_default_config_path, ToString::to_string));
    let config_file = resolve_env_var(&args.config_file.as_ref().map_or_else(|| utils::get_default_config_file_path(&config_path), ToString::to_string));
    (config_path, config_file)
}

fn print_log_hint(log_file: Option<&PathBuf>) {
    if let Some(file) = log_file {
        println!("\nLog file: {}", file.display());
    }
    println!("Check the log file for entries marked [ADDED], [UPDATED], [SKIPPED], and [FAILURE].");
    println!("To display those in the terminal instead, set \"LOG_LEVEL\" to \"VERBOSE\" in your config.yml or as an environment variable.\n");
}
