use crate::domain::ports::{Entity, Storage};
use crate::utils::error::{MarketError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // 先寫暫存檔再改名，避免寫到一半的 JSON
        let tmp_path = full_path.with_extension("tmp");
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &full_path).await?;
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Volatile storage, handy for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            MarketError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        let files = self.files.lock().await;
        Ok(files.keys().cloned().collect())
    }
}

/// One JSON array file per entity type, read and rewritten whole on every call.
///
/// Each operation holds the repository's lock for the full
/// read-modify-write, so writers inside one process never lose updates.
/// Clones share the lock.
pub struct JsonRepository<T: Entity> {
    storage: Arc<dyn Storage>,
    lock: Arc<Mutex<()>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for JsonRepository<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            lock: Arc::clone(&self.lock),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> JsonRepository<T> {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
            _entity: PhantomData,
        }
    }

    async fn load(&self) -> Result<Vec<T>> {
        let bytes = match self.storage.read_file(T::COLLECTION).await {
            Ok(bytes) => bytes,
            Err(MarketError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} missing, initialising empty collection", T::COLLECTION);
                self.store(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            self.store(&[]).await?;
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn store(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        self.storage.write_file(T::COLLECTION, &json).await
    }

    pub async fn find_all(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    /// Like [`find_by_id`](Self::find_by_id) but absence is an error.
    pub async fn get(&self, id: &str) -> Result<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found(T::KIND, id))
    }

    pub async fn find_where<P>(&self, predicate: P) -> Result<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().filter(|r| predicate(r)).collect())
    }

    pub async fn count(&self) -> Result<usize> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.len())
    }

    pub async fn save(&self, record: T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.store(&records).await?;
        Ok(record)
    }

    /// Replaces the stored record with the same id, keeping its position.
    /// Returns `false` when no such record exists.
    pub async fn update(&self, record: T) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                self.store(&records).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read-modify-write of one record under the lock.
    pub async fn modify<F>(&self, id: &str, change: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| MarketError::not_found(T::KIND, id))?;
        change(slot)?;
        let updated = slot.clone();
        self.store(&records).await?;
        Ok(updated)
    }

    /// Removes every record carrying `id`; returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store(&records).await?;
        Ok(true)
    }
}

/// Reads a collection without writing to the store. A missing or blank
/// file reads as an empty collection.
pub async fn read_collection<T: Entity>(storage: &dyn Storage) -> Result<Vec<T>> {
    let bytes = match storage.read_file(T::COLLECTION).await {
        Ok(bytes) => bytes,
        Err(MarketError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Vec::new())
        }
        Err(e) => return Err(e),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Zips every JSON collection in the data directory.
pub async fn archive_data_dir(storage: &dyn Storage) -> Result<Vec<u8>> {
    let mut collections = Vec::new();
    for name in storage.list_files().await? {
        if name.ends_with(".json") {
            let data = storage.read_file(&name).await?;
            collections.push((name, data));
        }
    }

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in &collections {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    let bytes = cursor.into_inner();
    tracing::info!("Archived {} data files ({} bytes)", collections.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Task;
    use tempfile::TempDir;

    fn task(id: &str, name: &str) -> Task {
        Task {
            task_id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn repo() -> (JsonRepository<Task>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (JsonRepository::new(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn test_missing_file_is_initialised_empty() {
        let (repo, storage) = repo();
        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(storage.get_file("tasks.json").await.unwrap(), b"[]".to_vec());
    }

    #[tokio::test]
    async fn test_blank_file_is_treated_as_empty() {
        let (repo, storage) = repo();
        storage.write_file("tasks.json", b"  \n").await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_update_delete() {
        let (repo, _) = repo();
        repo.save(task("t-1", "Book venue")).await.unwrap();
        repo.save(task("t-2", "Send invites")).await.unwrap();

        assert!(repo.update(task("t-1", "Book garden venue")).await.unwrap());
        assert!(!repo.update(task("t-9", "Ghost")).await.unwrap());

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Book garden venue");

        assert!(repo.delete("t-1").await.unwrap());
        assert!(!repo.delete("t-1").await.unwrap());
        assert!(repo.find_by_id("t-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (repo, _) = repo();
        let err = repo.get("nope").await.unwrap_err();
        assert!(matches!(err, MarketError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_modify_applies_change() {
        let (repo, _) = repo();
        repo.save(task("t-1", "Cake tasting")).await.unwrap();
        let updated = repo
            .modify("t-1", |t| {
                t.is_completed = true;
                Ok(())
            })
            .await
            .unwrap();
        assert!(updated.is_completed);
        assert!(repo.get("t-1").await.unwrap().is_completed);
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let (repo, storage) = repo();
        storage.write_file("tasks.json", b"{not json").await.unwrap();
        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, MarketError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_not_lost() {
        let (repo, _) = repo();
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.save(task(&format!("t-{}", i), "parallel")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(repo.count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("tasks.json", b"[]").await.unwrap();
        assert_eq!(storage.read_file("tasks.json").await.unwrap(), b"[]".to_vec());
        assert_eq!(storage.list_files().await.unwrap(), vec!["tasks.json".to_string()]);

        let missing = storage.read_file("nope.json").await.unwrap_err();
        assert!(matches!(missing, MarketError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_local_storage_missing_dir_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("absent"));
        assert!(storage.list_files().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_collection_leaves_data_dir_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let storage = LocalStorage::new(&data_dir);

        let tasks: Vec<Task> = read_collection(&storage).await.unwrap();
        assert!(tasks.is_empty());
        assert!(!data_dir.exists());

        storage.write_file("tasks.json", b" \n").await.unwrap();
        let tasks: Vec<Task> = read_collection(&storage).await.unwrap();
        assert!(tasks.is_empty());
        assert_eq!(storage.read_file("tasks.json").await.unwrap(), b" \n".to_vec());

        let json = serde_json::to_vec(&vec![task("t-1", "Book venue")]).unwrap();
        storage.write_file("tasks.json", &json).await.unwrap();
        let tasks: Vec<Task> = read_collection(&storage).await.unwrap();
        assert_eq!(tasks[0].task_id, "t-1");
    }

    #[tokio::test]
    async fn test_archive_contains_json_files_only() {
        let storage = MemoryStorage::new();
        storage.write_file("vendors.json", b"[]").await.unwrap();
        storage.write_file("reviews.json", b"[]").await.unwrap();
        storage.write_file("notes.txt", b"skip me").await.unwrap();

        let bytes = archive_data_dir(&storage).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(names, vec!["reviews.json", "vendors.json"]);
    }
}
