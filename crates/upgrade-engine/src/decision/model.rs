use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::Quality;

/// Release revision used to order two copies of the same quality (proper, real, repack).
///
/// Ordering looks at `real` first and `version` second; `is_repack` is informational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Revision {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub real: u32,
    #[serde(default)]
    pub is_repack: bool,
}

fn default_version() -> u32 {
    1
}

impl Revision {
    pub fn new(version: u32, real: u32) -> Self {
        Self {
            version,
            real,
            is_repack: false,
        }
    }

    pub fn repack(version: u32) -> Self {
        Self {
            version,
            real: 0,
            is_repack: true,
        }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new(default_version(), 0)
    }
}

impl PartialEq for Revision {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Revision {}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.real
            .cmp(&other.real)
            .then_with(|| self.version.cmp(&other.version))
    }
}

/// A held or proposed file's quality together with its revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityModel {
    pub quality: Quality,
    #[serde(default)]
    pub revision: Revision,
}

impl QualityModel {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            revision: Revision::default(),
        }
    }

    pub fn with_revision(quality: Quality, revision: Revision) -> Self {
        Self { quality, revision }
    }
}

impl std::fmt::Display for QualityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.quality, self.revision.version)?;
        if self.revision.real > 0 {
            write!(f, " REAL")?;
        }
        Ok(())
    }
}
