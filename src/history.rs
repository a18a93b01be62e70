use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: String,
    pub name: Option<String>,
    pub dream_type: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

pub struct HistoryStore {
    path: PathBuf,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let entries = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read history: {}", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse history: {}", err))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub async fn list(&self) -> Vec<HistoryEntry> {
        let guard = self.entries.lock().await;
        guard.clone()
    }

    pub async fn get(&self, entry_id: &str) -> Option<HistoryEntry> {
        let guard = self.entries.lock().await;
        guard.iter().find(|entry| entry.id == entry_id).cloned()
    }

    pub async fn add(&self, entry: HistoryEntry) -> Result<HistoryEntry, String> {
        let mut guard = self.entries.lock().await;
        guard.insert(0, entry.clone());
        if guard.len() > HISTORY_LIMIT {
            guard.truncate(HISTORY_LIMIT);
        }
        self.persist(&guard).await?;
        Ok(entry)
    }

    pub async fn delete(&self, entry_id: &str) -> Result<bool, String> {
        let mut guard = self.entries.lock().await;
        let before = guard.len();
        guard.retain(|entry| entry.id != entry_id);
        let removed = guard.len() != before;
        if removed {
            self.persist(&guard).await?;
        }
        Ok(removed)
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(entries)
            .map_err(|err| format!("failed to serialize history: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write history: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize history: {}", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create history dir: {}", err))
}
