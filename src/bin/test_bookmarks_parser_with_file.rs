use std::path::PathBuf;

use clap::Parser;
use rulate_bookmarks::{config::Config, parser};

#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let page = fs_err::read_to_string(opts.input_file)?;
    let records = parser::bookmarks::parse(&page, &Config::default().origin());
    println!("{}", serde_json::to_string_pretty(&records)?);
    eprintln!("{} records", records.len());
    Ok(())
}
