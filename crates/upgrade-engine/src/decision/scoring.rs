use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use super::cache::ScoreCache;
use super::catalog::Quality;
use super::model::QualityModel;
use super::profiles::QualityProfile;

pub type QualityScoreTable = Arc<HashMap<u32, f64>>;

/// Normalised rank of every catalog quality within `profile`.
///
/// Ranks are 1-based and divided by the rank of the last allowed quality, so the
/// best allowed quality scores exactly `1.0` and unlisted qualities score `0.0`.
pub fn quality_scores(profile: &QualityProfile) -> HashMap<u32, f64> {
    let max_index = f64::from(profile.index_of(profile.last_allowed_quality()).index + 1);

    Quality::all()
        .iter()
        .map(|quality| {
            let rank = f64::from(profile.index_of(*quality).index + 1);
            (quality.id, rank / max_index)
        })
        .collect()
}

fn table_key(profile: &QualityProfile) -> String {
    let mut hasher = DefaultHasher::new();
    profile.hash(&mut hasher);
    format!("{}:{:016x}", profile.id, hasher.finish())
}

/// Reduces collections of qualities to one comparable score, memoising the
/// per-profile tables.
pub struct QualityScorer {
    tables: ScoreCache<QualityScoreTable>,
}

impl QualityScorer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tables: ScoreCache::new(ttl),
        }
    }

    /// Table for `profile`. Entries are keyed by the profile's content as well as
    /// its id, so a caller still holding a pre-edit copy never seeds the table
    /// that post-edit readers get.
    pub fn scores(&self, profile: &QualityProfile) -> QualityScoreTable {
        self.tables
            .get_or_compute(&table_key(profile), || Arc::new(quality_scores(profile)))
    }

    /// Arithmetic mean of the normalised scores of `qualities`.
    ///
    /// # Panics
    /// When `qualities` is empty.
    pub fn aggregate_quality_score<'q, I>(&self, profile: &QualityProfile, qualities: I) -> f64
    where
        I: IntoIterator<Item = &'q QualityModel>,
    {
        let table = self.scores(profile);

        let mut total = 0.0;
        let mut count = 0usize;
        for model in qualities {
            total += table.get(&model.quality.id).copied().unwrap_or(0.0);
            count += 1;
        }

        assert!(
            count > 0,
            "aggregate quality score needs at least one quality (profile {})",
            profile.id
        );

        total / count as f64
    }

    pub fn clear(&self) {
        self.tables.clear();
    }

    pub fn cached_profiles(&self) -> usize {
        self.tables.len()
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(super::cache::DEFAULT_TTL)
    }
}
