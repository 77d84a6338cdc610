use std::{path::PathBuf, time::Instant};

use clap::Parser;
use rulate_bookmarks::{config::Config, pipeline, prompt::prompt_credentials};
use rulate_scraping_utils::fs_json_util::{read_json, read_toml};

#[derive(Parser)]
struct Opts {
    /// TOML file overriding the built-in settings.
    #[arg(long)]
    config_path: Option<PathBuf>,
    /// JSON file with `login` and `password`, used instead of prompting.
    #[arg(long)]
    credentials_path: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let start = Instant::now();

    let opts = Opts::parse();
    let config = match &opts.config_path {
        Some(path) => read_toml(path)?,
        None => Config::default(),
    };
    let credentials = match &opts.credentials_path {
        Some(path) => read_json(path)?,
        None => prompt_credentials()?,
    };

    pipeline::run(&config, &credentials).await?;

    println!(
        "Finished in {:.2} seconds.",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
