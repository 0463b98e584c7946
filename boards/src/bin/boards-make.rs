use std::{fs::File, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::LevelFilter::Info;
use rand::{thread_rng, Rng};
use simple_logger::SimpleLogger;

use ballmaze_boards::BoardPack;

#[derive(Parser)]
struct Args {
    /// Rows of every board
    #[clap(long, short = 'r', default_value = "6")]
    rows: usize,
    /// Columns of every board
    #[clap(long, short = 'c', default_value = "6")]
    cols: usize,
    /// Seed of the pack, random if missing
    #[clap(long, short = 's')]
    seed: Option<u64>,
    /// Number of boards to generate
    #[clap(long, short = 'n', default_value = "100")]
    count: usize,
    outfile: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args {
        rows,
        cols,
        seed,
        count,
        outfile,
    } = Args::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(Info)
        .env()
        .init()
        .expect("Failed to init logger");
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    log::info!("Generating {count} boards {rows}x{cols} with seed {seed}");
    let pack = BoardPack::compute_async(rows, cols, seed, count)
        .await
        .context("While generating boards")?;
    pack.write(File::create(&outfile).context("While creating the output file")?)
        .context("While writing boards")?;
    Ok(())
}
