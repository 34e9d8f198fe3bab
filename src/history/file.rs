//! File-backed history, one JSON-lines file per conversation.
//!
//! Intended for a single process. Appends are serialized by an in-process
//! lock; nothing coordinates writers in other processes.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{ensure_storable, HistoryStore};
use crate::error::LumoError;
use crate::types::{ConversationId, Message};

#[derive(Debug)]
pub struct FileHistoryStore {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileHistoryStore {
    /// Use `base_dir`, creating it if needed.
    pub fn open(base_dir: PathBuf) -> Result<Self, LumoError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn log_path(&self, id: &ConversationId) -> PathBuf {
        self.base_dir.join(format!("{id}.jsonl"))
    }
}

impl HistoryStore for FileHistoryStore {
    fn append(&self, id: &ConversationId, message: &Message) -> Result<(), LumoError> {
        ensure_storable(message)?;
        let mut line = serde_json::to_string(message)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LumoError::Storage("history lock poisoned".into()))?;
        let path = self.log_path(id);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn get_all(&self, id: &ConversationId) -> Result<Vec<Message>, LumoError> {
        let path = self.log_path(id);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(LumoError::Io(err)),
        };

        let mut messages = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let message: Message = serde_json::from_str(&line).map_err(|e| {
                LumoError::Storage(format!(
                    "corrupt history line {} in {}: {e}",
                    index + 1,
                    path.display()
                ))
            })?;
            messages.push(message);
        }
        Ok(messages)
    }
}
