//! Packs of precomputed boards
//!
//! Every board of a pack is carved independently with its own generator, seeded
//! from the pack seed and the board index, so packs can be computed concurrently
//! and still come out identical to a sequential run.

use std::{io, panic};

use bincode::error::DecodeError;
use bincode::{Decode, Encode};
use deepsize::DeepSizeOf;
use flate2::Compression;
use flate2::{bufread, read, write};
use rand::SeedableRng;
use rand_wyrand::WyRand;
use tokio::task::JoinHandle;

use ballmaze::{Grid, Maze};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Edge state of a single carved board
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, DeepSizeOf)]
pub struct StoredBoard {
    /// Seed the board was carved with
    pub seed: u64,
    pub verticals: Box<[bool]>,
    pub horizontals: Box<[bool]>,
}

impl StoredBoard {
    /// Carve a new board
    pub fn generate(rows: usize, cols: usize, seed: u64) -> ballmaze::Result<Self> {
        let maze = Maze::carve(rows, cols, &mut WyRand::seed_from_u64(seed))?;
        Ok(Self {
            seed,
            verticals: maze.grid().verticals().into(),
            horizontals: maze.grid().horizontals().into(),
        })
    }

    /// Rebuild the maze, checking the stored edges still form a spanning tree
    pub fn maze(&self, rows: usize, cols: usize) -> ballmaze::Result<Maze> {
        Maze::from_edges(
            rows,
            cols,
            self.verticals.clone(),
            self.horizontals.clone(),
        )
    }
}

/// A set of boards sharing the same dimensions
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, DeepSizeOf)]
pub struct BoardPack {
    /// Version of the crate that wrote the pack
    pub version: String,
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub boards: Vec<StoredBoard>,
}

impl BoardPack {
    #[must_use]
    fn board_seed(seed: u64, index: usize) -> u64 {
        seed.wrapping_add(index as u64)
    }

    fn new(rows: usize, cols: usize, seed: u64, boards: Vec<StoredBoard>) -> Self {
        Self {
            version: VERSION.to_owned(),
            rows,
            cols,
            seed,
            boards,
        }
    }

    pub async fn compute_async(
        rows: usize,
        cols: usize,
        seed: u64,
        count: usize,
    ) -> ballmaze::Result<Self> {
        Grid::new(rows, cols)?;
        let mut tasks = Vec::with_capacity(count);
        for i in 0..count {
            let board_seed = Self::board_seed(seed, i);
            tasks.push(tokio::spawn(async move {
                log::debug!("Carving board {i}");
                StoredBoard::generate(rows, cols, board_seed)
            }));
        }
        let boards = join_boards(tasks).await?;
        log::info!("Carved {count} boards {rows}x{cols}");
        Ok(Self::new(rows, cols, seed, boards))
    }

    pub fn compute(rows: usize, cols: usize, seed: u64, count: usize) -> ballmaze::Result<Self> {
        Grid::new(rows, cols)?;
        let boards = (0..count)
            .map(|i| StoredBoard::generate(rows, cols, Self::board_seed(seed, i)))
            .collect::<ballmaze::Result<Vec<_>>>()?;
        log::info!("Carved {count} boards {rows}x{cols}");
        Ok(Self::new(rows, cols, seed, boards))
    }

    /// Rebuild every maze of the pack
    pub fn mazes(&self) -> impl Iterator<Item = ballmaze::Result<Maze>> + '_ {
        self.boards
            .iter()
            .map(|board| board.maze(self.rows, self.cols))
    }

    pub fn write(&self, writer: impl io::Write) -> io::Result<()> {
        let mut writer = write::DeflateEncoder::new(writer, Compression::best());
        bincode::encode_into_std_write(self, &mut writer, bincode::config::standard()).map_err(
            |err| match err {
                bincode::error::EncodeError::Io { inner, .. } => inner,
                other => io::Error::new(io::ErrorKind::Other, other.to_string()),
            },
        )?;
        writer.finish()?;
        Ok(())
    }
    pub fn read(reader: impl io::Read) -> Result<Self, DecodeError> {
        let mut reader = read::DeflateDecoder::new(reader);
        bincode::decode_from_std_read(&mut reader, bincode::config::standard())
    }
    pub fn bufread(reader: impl io::BufRead) -> Result<Self, DecodeError> {
        let mut reader = bufread::DeflateDecoder::new(reader);
        bincode::decode_from_std_read(&mut reader, bincode::config::standard())
    }
}

/// Await every task before reporting the first error, so no carving is left detached
async fn join_boards(
    tasks: Vec<JoinHandle<ballmaze::Result<StoredBoard>>>,
) -> ballmaze::Result<Vec<StoredBoard>> {
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(board) => results.push(board),
            Err(err) => panic::resume_unwind(err.into_panic()),
        };
    }
    results.into_iter().collect()
}
