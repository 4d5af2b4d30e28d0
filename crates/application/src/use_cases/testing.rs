//! In-memory port implementations shared by the use case tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use substvar_domain::variable::Profile;
use substvar_domain::{PropertyMap, TrustConfig};
use url::Url;

use crate::ports::{
    Clock, FileSystem, FileSystemError, ProfileError, ProfileRepository, PropertiesError,
    PropertiesRepository, RemoteFetchError, RemoteFetcher,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: &str) {
        self.files
            .lock()
            .expect("Lock poisoned")
            .insert(path.into(), contents.as_bytes().to_vec());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .expect("Lock poisoned")
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn exists_sync(&self, path: impl AsRef<Path>) -> bool {
        self.files
            .lock()
            .expect("Lock poisoned")
            .contains_key(path.as_ref())
    }
}

impl FileSystem for MemoryFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        self.files
            .lock()
            .expect("Lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        self.files
            .lock()
            .expect("Lock poisoned")
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn create_dir_all(&self, _path: &Path) -> Result<(), FileSystemError> {
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.exists_sync(path)
    }

    async fn is_file(&self, path: &Path) -> bool {
        self.exists_sync(path)
    }
}

/// Reads and writes plain `key=value` lines on top of a [`MemoryFileSystem`].
#[derive(Debug, Clone)]
pub struct MemoryPropertiesRepository {
    fs: MemoryFileSystem,
}

impl MemoryPropertiesRepository {
    pub const fn new(fs: MemoryFileSystem) -> Self {
        Self { fs }
    }
}

#[async_trait]
impl PropertiesRepository for MemoryPropertiesRepository {
    async fn load(&self, path: &Path) -> Result<HashMap<String, String>, PropertiesError> {
        let text = self
            .fs
            .contents(path)
            .ok_or_else(|| PropertiesError::NotFound(path.to_path_buf()))?;

        let properties = java_properties::read(text.as_bytes()).map_err(|e| PropertiesError::Format {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(properties)
    }

    async fn save(
        &self,
        path: &Path,
        properties: &PropertyMap,
        comments: &[String],
    ) -> Result<(), PropertiesError> {
        let mut text = String::new();
        for comment in comments {
            text.push_str(&format!("#{comment}\n"));
        }
        for (key, value) in properties {
            text.push_str(&format!("{key}={value}\n"));
        }
        self.fs.insert(path, &text);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.fs.exists_sync(path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<PathBuf, Profile>>>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, profile: Profile) {
        self.profiles
            .lock()
            .expect("Lock poisoned")
            .insert(path.into(), profile);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Profile> {
        self.profiles
            .lock()
            .expect("Lock poisoned")
            .get(path.as_ref())
            .cloned()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn load(&self, path: &Path) -> Result<Profile, ProfileError> {
        self.get(path)
            .ok_or_else(|| ProfileError::NotFound(path.to_path_buf()))
    }

    async fn save(&self, path: &Path, profile: &Profile) -> Result<(), ProfileError> {
        self.insert(path, profile.clone());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }
}

/// Serves a fixed body for every URL, or fails every request.
#[derive(Debug, Clone)]
pub struct StubFetcher {
    body: Option<String>,
}

impl StubFetcher {
    pub fn serving(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
        }
    }

    pub const fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self, url: &Url, _trust: &TrustConfig) -> Result<Vec<u8>, RemoteFetchError> {
        self.body
            .as_ref()
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| RemoteFetchError::Request {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
