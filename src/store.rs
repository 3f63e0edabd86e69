//! State store
//!
//! In-memory device records and recent events, loaded from and flushed to a
//! single JSON snapshot. Only the reducer mutates it, and only one message at a
//! time, so nothing here is synchronised.

use crate::constants::MAX_EVENTS;
use crate::error::{CollectorError, Result};
use crate::types::{format_timestamp, DeviceRecord, Event, EventKind, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

/// What [`StateStore::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot was written
    Written { devices: usize, events: usize },
    /// Nothing changed since the last load or save
    Unchanged,
}

/// Device records and the capped event log, plus the dirty flag
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    devices: BTreeMap<String, DeviceRecord>,
    events: VecDeque<Event>,
    dirty: bool,
}

impl StateStore {
    /// An empty, clean store that will persist to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            devices: BTreeMap::new(),
            events: VecDeque::new(),
            dirty: false,
        }
    }

    /// A clean store seeded from an existing snapshot
    #[must_use]
    pub fn from_snapshot(path: impl Into<PathBuf>, snapshot: Snapshot) -> Self {
        let mut events: VecDeque<Event> = snapshot.events.into();
        events.truncate(MAX_EVENTS);
        Self {
            path: path.into(),
            devices: snapshot.devices,
            events,
            dirty: false,
        }
    }

    /// Loads the snapshot at `path`
    ///
    /// A missing file is an empty store. An unreadable or unparsable file is
    /// logged and also yields an empty store; loading never fails the run.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_snapshot(&path).await {
            Ok(Some(snapshot)) => {
                info!(
                    path = %path.display(),
                    devices = snapshot.devices.len(),
                    events = snapshot.events.len(),
                    "Loaded existing stats"
                );
                Self::from_snapshot(path, snapshot)
            }
            Ok(None) => {
                info!(path = %path.display(), "No existing stats file found, starting fresh");
                Self::new(path)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load existing stats, starting fresh");
                Self::new(path)
            }
        }
    }

    /// Writes the snapshot if anything changed, stamping `lastUpdate` with `now`
    ///
    /// The dirty flag is cleared only after the file is in place.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Persistence`] if the snapshot cannot be
    /// serialised or written. The in-memory state is left untouched and
    /// still dirty.
    pub async fn save(&mut self, now: DateTime<Utc>) -> Result<SaveOutcome> {
        if !self.dirty {
            info!("No data changes, skipping save");
            return Ok(SaveOutcome::Unchanged);
        }

        let snapshot = self.snapshot(now);
        if let Err(e) = write_snapshot_atomic(&self.path, &snapshot).await {
            error!(path = %self.path.display(), error = %e, "Failed to save stats");
            return Err(e);
        }

        self.dirty = false;
        info!(
            path = %self.path.display(),
            devices = snapshot.devices.len(),
            events = snapshot.events.len(),
            "Stats saved"
        );
        Ok(SaveOutcome::Written {
            devices: snapshot.devices.len(),
            events: snapshot.events.len(),
        })
    }

    /// The document [`save`](Self::save) would write at `now`
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        Snapshot::new(
            self.devices.clone(),
            self.events.iter().cloned().collect(),
            format_timestamp(now),
        )
    }

    /// Returns the record for `name`, creating it if needed, with `lastSeen`
    /// and `lastDeviceId` refreshed
    pub fn upsert_device(
        &mut self,
        name: &str,
        device_id: &str,
        now: DateTime<Utc>,
    ) -> &mut DeviceRecord {
        let seen_at = format_timestamp(now);
        self.dirty = true;
        let record = self.devices.entry(name.to_string()).or_insert_with(|| {
            debug!(device = %name, device_id = %device_id, "New device");
            DeviceRecord::new(device_id, seen_at.clone())
        });
        record.last_seen = seen_at;
        record.last_device_id = device_id.to_string();
        record
    }

    /// Sets the online flag of `name`, refreshing `lastSeen` if it flipped
    ///
    /// Returns `true` when the flag changed. Unknown names and unchanged flags
    /// leave the store (and its dirty flag) untouched.
    pub fn set_online(&mut self, name: &str, online: bool, now: DateTime<Utc>) -> bool {
        match self.devices.get_mut(name) {
            Some(record) if record.online != online => {
                record.online = online;
                record.last_seen = format_timestamp(now);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Prepends an event, dropping the oldest beyond [`MAX_EVENTS`]
    pub fn record_event(
        &mut self,
        kind: EventKind,
        message: impl Into<String>,
        device_name: &str,
        now: DateTime<Utc>,
    ) {
        self.events.push_front(Event::new(
            kind,
            message,
            device_name,
            format_timestamp(now),
        ));
        self.events.truncate(MAX_EVENTS);
        self.dirty = true;
    }

    /// Name of the first device (in name order) last seen on `device_id`
    #[must_use]
    pub fn find_by_device_id(&self, device_id: &str) -> Option<&str> {
        self.devices
            .iter()
            .find(|(_, record)| record.last_device_id == device_id)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn device(&self, name: &str) -> Option<&DeviceRecord> {
        self.devices.get(name)
    }

    #[must_use]
    pub fn devices(&self) -> &BTreeMap<String, DeviceRecord> {
        &self.devices
    }

    /// Events, newest first
    pub fn events(&self) -> impl ExactSizeIterator<Item = &Event> {
        self.events.iter()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads a snapshot, `Ok(None)` if the file does not exist
async fn read_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    match fs::read(path).await {
        Ok(data) => {
            let snapshot = serde_json::from_slice(&data).map_err(|e| CollectorError::Persistence {
                path: path.display().to_string(),
                reason: format!("invalid snapshot: {e}"),
            })?;
            Ok(Some(snapshot))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CollectorError::Persistence {
            path: path.display().to_string(),
            reason: format!("failed to read: {e}"),
        }),
    }
}

/// Writes to a sibling temp file, then renames it over `path`
async fn write_snapshot_atomic(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let persistence = |reason: String| CollectorError::Persistence {
        path: path.display().to_string(),
        reason,
    };

    let serialized = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| persistence(format!("failed to serialize: {e}")))?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = File::create(&temp_path)
        .await
        .map_err(|e| persistence(format!("failed to create temp file: {e}")))?;
    file.write_all(&serialized)
        .await
        .map_err(|e| persistence(format!("failed to write temp file: {e}")))?;
    file.flush()
        .await
        .map_err(|e| persistence(format!("failed to flush temp file: {e}")))?;
    drop(file);

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| persistence(format!("failed to rename temp file: {e}")))?;

    Ok(())
}
