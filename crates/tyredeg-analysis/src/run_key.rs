//! Cache keys for assembled datasets
//!
//! A [`RunKey`] identifies the inputs of one build: the configuration and the
//! raw bytes of every session export. The key is written next to the dataset
//! in a [`DatasetMeta`] file, and a later build with the same key can reuse
//! the dataset instead of recomputing it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::{config::PipelineConfig, feature::AssemblyReport};

/// Number of digest bytes kept in the key.
const RUN_KEY_BYTES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunKey(String);

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl RunKey {
    /// Digests the configuration and one export per configured session.
    ///
    /// `exports` must be aligned with `config.sessions`.
    #[must_use]
    pub fn compute<B>(config: &PipelineConfig, exports: &[B]) -> Self
    where
        B: AsRef<[u8]>,
    {
        let mut hasher = Sha256::new();
        hasher.update(config.event.as_bytes());
        hasher.update([0u8]);
        hasher.update(config.year.to_le_bytes());
        hasher.update(config.push_lap_threshold.to_le_bytes());
        for (session, bytes) in config.sessions.iter().zip(exports) {
            let bytes = bytes.as_ref();
            hasher.update(session.as_bytes());
            hasher.update([0u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        let digest = hasher.finalize();
        Self(hex::encode(&digest[..RUN_KEY_BYTES]))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sidecar record written as `<dataset>.meta.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub run_key: RunKey,
    pub created_at: DateTime<Utc>,
    pub config: PipelineConfig,
    pub rows: usize,
    pub report: AssemblyReport,
}

impl DatasetMeta {
    /// Whether a dataset described by this record can stand in for a build
    /// keyed `key`.
    #[must_use]
    pub fn is_fresh(&self, key: &RunKey) -> bool {
        self.run_key == *key
    }
}
