use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use deepsize::DeepSizeOf;
use humansize::{format_size, BINARY};
use log::LevelFilter::Info;
use simple_logger::SimpleLogger;

use ballmaze_boards::BoardPack;

#[derive(Parser)]
struct Args {
    /// File to show info for
    infile: PathBuf,
    /// Also draw the board with this index
    #[clap(long, short = 's')]
    show: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let Args { infile, show } = Args::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(Info)
        .env()
        .init()
        .expect("Failed to init logger");
    let pack = BoardPack::bufread(BufReader::new(
        File::open(&infile).context("While opening the boards file")?,
    ))
    .context("While reading boards")?;

    println!("File: {}", infile.to_string_lossy());
    println!("Version: {}", pack.version);
    println!("Board size: {}x{}", pack.rows, pack.cols);
    println!("Seed: {}", pack.seed);
    println!("Total boards: {}", pack.boards.len());
    println!(
        "Unpacked memory: {}",
        format_size(pack.deep_size_of(), BINARY)
    );

    let mut broken = 0;
    for (i, maze) in pack.mazes().enumerate() {
        if let Err(err) = maze {
            log::warn!("Board {i} is not a valid maze: {err}");
            broken += 1;
        }
    }
    println!("Valid boards: {}", pack.boards.len() - broken);

    if let Some(i) = show {
        let board = pack
            .boards
            .get(i)
            .with_context(|| format!("No board {i} in the pack"))?;
        let maze = board
            .maze(pack.rows, pack.cols)
            .with_context(|| format!("While rebuilding board {i}"))?;
        print!("{maze}");
    }

    Ok(())
}
