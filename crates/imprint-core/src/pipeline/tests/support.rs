//! In-memory record store with injectable failures and instrumentation

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::hash::Fingerprint;
use crate::store::model::{ImageRecord, LabelScores};
use crate::store::{RecordStore, StoreError};

/// How a failing call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Unavailable,
    Query,
}

impl Failure {
    fn into_error(self) -> StoreError {
        match self {
            Self::Unavailable => StoreError::Unavailable("connection refused".into()),
            Self::Query => StoreError::Query("schema mismatch".into()),
        }
    }
}

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<HashMap<Fingerprint, ImageRecord>>,
    next_id: AtomicI64,
    /// Number of upcoming lookups that fail, and how
    failing_lookups: AtomicUsize,
    lookup_failure: Mutex<Option<Failure>>,
    insert_failure: Mutex<Option<Failure>>,
    panic_on: Mutex<Option<String>>,
    delay: Mutex<Duration>,
    pub lookups: AtomicUsize,
    pub inserts: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` lookups
    pub fn fail_lookups(self, failure: Failure, count: usize) -> Self {
        self.failing_lookups.store(count, Ordering::SeqCst);
        *self.lookup_failure.lock().unwrap() = Some(failure);
        self
    }

    /// Fail every insert
    pub fn fail_inserts(self, failure: Failure) -> Self {
        *self.insert_failure.lock().unwrap() = Some(failure);
        self
    }

    /// Panic when inserting a path ending in `suffix`
    pub fn panic_on(self, suffix: &str) -> Self {
        *self.panic_on.lock().unwrap() = Some(suffix.to_string());
        self
    }

    /// Hold each lookup open for `delay`
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    pub fn seed(&self, path: &str, fingerprint: Fingerprint) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.lock().unwrap().insert(
            fingerprint.clone(),
            ImageRecord {
                id,
                path: path.to_string(),
                fingerprint,
            },
        );
        id
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .values()
            .map(|r| r.path.clone())
            .collect();
        paths.sort();
        paths
    }

    /// Most store calls ever open at once
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn take_lookup_failure(&self) -> Option<StoreError> {
        let failure = (*self.lookup_failure.lock().unwrap())?;
        self.failing_lookups
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .ok()
            .map(|_| failure.into_error())
    }

    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<ImageRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.enter();
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = match self.take_lookup_failure() {
            Some(err) => Err(err),
            None => Ok(self.records.lock().unwrap().get(fingerprint).cloned()),
        };
        self.leave();
        result
    }

    async fn insert_image(
        &self,
        path: &str,
        fingerprint: &Fingerprint,
    ) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        // Cloned out first so the panic cannot poison the mutex
        let panic_on = self.panic_on.lock().unwrap().clone();
        if panic_on.is_some_and(|suffix| path.ends_with(&suffix)) {
            panic!("injected fault for {path}");
        }
        if let Some(failure) = *self.insert_failure.lock().unwrap() {
            return Err(failure.into_error());
        }

        let mut records = self.records.lock().unwrap();
        if records.contains_key(fingerprint) {
            return Err(StoreError::Conflict(fingerprint.to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        records.insert(
            fingerprint.clone(),
            ImageRecord {
                id,
                path: path.to_string(),
                fingerprint: fingerprint.clone(),
            },
        );
        Ok(())
    }

    async fn update_labels(&self, image_id: i64, _scores: &LabelScores) -> Result<(), StoreError> {
        let known = self
            .records
            .lock()
            .unwrap()
            .values()
            .any(|r| r.id == image_id);
        if known {
            Ok(())
        } else {
            Err(StoreError::NotFound(image_id))
        }
    }
}

/// Write `content` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Lines of a ledger file, or none if it was never created
pub fn ledger_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// A syntactically valid fingerprint made of one repeated hex digit
pub fn digest(c: char) -> Fingerprint {
    Fingerprint::from_hex(&c.to_string().repeat(Fingerprint::HEX_LEN)).unwrap()
}
