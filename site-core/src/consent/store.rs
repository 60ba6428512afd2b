//! Durable storage of the single consent record.

use crate::persist::{KeyValueStore, PersistError};

use super::{ConsentRecord, CONSENT_STORAGE_KEY};

/// Reads and writes the consent record under [`CONSENT_STORAGE_KEY`].
///
/// No other key is touched.
#[derive(Debug, Clone)]
pub struct ConsentStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ConsentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Fetch the stored record.
    ///
    /// Returns `None` when the key is absent, the value is not JSON, required
    /// fields are missing or the medium itself fails. A corrupted or foreign
    /// value must never stop the page from rendering; it simply means the
    /// visitor is asked again.
    ///
    /// The version is not checked here; see [`ConsentRecord::is_current`].
    pub fn read(&self) -> Option<ConsentRecord> {
        let raw = match self.storage.get(CONSENT_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "consent storage unreadable; treating as absent");
                return None;
            }
        };

        match serde_json::from_str::<ConsentRecord>(&raw) {
            Ok(mut record) => {
                record.consent = record.consent.normalized();
                Some(record)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored consent record is malformed; treating as absent");
                None
            }
        }
    }

    /// Serialize `record` and replace whatever is stored.
    pub fn write(&mut self, record: &ConsentRecord) -> Result<(), PersistError> {
        let encoded = serde_json::to_string(record)?;
        self.storage.set(CONSENT_STORAGE_KEY, &encoded)
    }

    /// The underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the underlying medium.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}
