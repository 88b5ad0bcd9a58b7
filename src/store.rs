use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Plain text file holding the best score as a single integer.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        HighScoreStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file counts as a high score of zero.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match contents.trim().parse() {
                Ok(score) => score,
                Err(e) => {
                    warn!("Ignoring malformed high score in {}: {}", self.path.display(), e);
                    0
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                warn!("Error loading high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())?;
        info!("Saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::process;

    fn temp_store(name: &str) -> HighScoreStore {
        let path = env::temp_dir().join(format!("snake-{}-{}.txt", name, process::id()));
        let _ = fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = temp_store("missing");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn garbage_reads_as_zero() {
        let store = temp_store("garbage");
        fs::write(store.path(), "not a number").unwrap();
        assert_eq!(store.load(), 0);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = temp_store("overwrite");
        store.save(12345).unwrap();
        store.save(70).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "70");
        assert_eq!(store.load(), 70);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn tolerates_trailing_newline() {
        let store = temp_store("newline");
        fs::write(store.path(), "50\n").unwrap();
        assert_eq!(store.load(), 50);
        fs::remove_file(store.path()).unwrap();
    }
}
