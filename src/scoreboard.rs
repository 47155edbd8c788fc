use crate::app_dirs::AppDirs;
use crate::score::ScoreResult;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reference scoreboard depth; only the top entries survive a record.
pub const SCOREBOARD_CAP: usize = 10;

/// On-disk shape: the ranked list under `scoreboard` and the all-time best
/// under `highScore`. Either key may be absent in a valid store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    scoreboard: Vec<ScoreResult>,
    #[serde(rename = "highScore", default, skip_serializing_if = "Option::is_none")]
    high_score: Option<u32>,
}

/// What changed when a result was recorded, for the scoreboard/high-score
/// displays to consume.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    pub leaderboard: Vec<ScoreResult>,
    pub new_high_score: Option<u32>,
    /// False when the write to disk failed; in-memory state is still updated.
    pub persisted: bool,
}

/// Bounded ranked leaderboard plus a separate all-time high score, persisted
/// after every mutation.
///
/// Loading fails soft: a missing or malformed store file yields an empty
/// board. A failed write is logged and reported on the `RecordUpdate`, and
/// the in-memory board stays authoritative for the rest of the process.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    cap: usize,
    scoreboard: Vec<ScoreResult>,
    high_score: Option<u32>,
}

impl ScoreStore {
    pub fn open(cap: usize) -> Self {
        let path = AppDirs::scoreboard_path().unwrap_or_else(|| PathBuf::from("scoreboard.json"));
        Self::with_path(path, cap)
    }

    pub fn with_path<P: AsRef<Path>>(p: P, cap: usize) -> Self {
        let path = p.as_ref().to_path_buf();
        let doc = Self::load(&path);
        Self {
            path,
            cap,
            scoreboard: doc.scoreboard,
            high_score: doc.high_score,
        }
    }

    fn load(path: &Path) -> StoreDocument {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(_) => return StoreDocument::default(),
        };

        match serde_json::from_slice::<StoreDocument>(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("malformed score store at {}: {e}", path.display());
                StoreDocument::default()
            }
        }
    }

    /// Insert a finished round, keep the top `cap` entries ranked by hits
    /// (stable for ties), bump the high score if beaten, and persist both.
    pub fn record(&mut self, result: ScoreResult) -> RecordUpdate {
        let hits = result.hits;
        self.scoreboard.push(result);
        // Vec::sort_by is stable, so equal-hit entries keep their order.
        self.scoreboard.sort_by(|a, b| b.hits.cmp(&a.hits));
        self.scoreboard.truncate(self.cap);

        let new_high_score = match self.high_score {
            Some(best) if hits <= best => None,
            _ => {
                self.high_score = Some(hits);
                Some(hits)
            }
        };

        let persisted = match self.persist() {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to persist score store at {}: {e}", self.path.display());
                false
            }
        };

        RecordUpdate {
            leaderboard: self.scoreboard.clone(),
            new_high_score,
            persisted,
        }
    }

    pub fn top_scores(&self) -> &[ScoreResult] {
        &self.scoreboard
    }

    pub fn high_score(&self) -> Option<u32> {
        self.high_score
    }

    pub fn is_empty(&self) -> bool {
        self.scoreboard.is_empty()
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = StoreDocument {
            scoreboard: self.scoreboard.clone(),
            high_score: self.high_score,
        };
        let data = serde_json::to_vec_pretty(&doc).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
