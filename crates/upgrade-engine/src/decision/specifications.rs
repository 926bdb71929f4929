//! Search and import decisions built on [`UpgradableSpecification`].
//!
//! Held media and preferred-word scoring live outside this crate; they are
//! reached through the [`HeldMediaLookup`] and [`PreferredWordScorer`] traits.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::ScoreCache;
use super::catalog::Language;
use super::comparer::QualityModelComparer;
use super::model::QualityModel;
use super::profiles::{LanguageProfile, QualityProfile};
use super::upgradable::UpgradableSpecification;

/// Outcome of a specification check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject { reason: String },
}

impl Decision {
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// A file already held for an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldFile {
    pub quality: QualityModel,
    pub language: Language,
    pub file_name: String,
    #[serde(default)]
    pub scene_name: Option<String>,
}

impl HeldFile {
    pub fn scene_or_file_name(&self) -> &str {
        self.scene_name.as_deref().unwrap_or(&self.file_name)
    }
}

/// Read access to the media already in the collection.
pub trait HeldMediaLookup: Send + Sync {
    fn has_missing_tracks(&self, album_id: u64) -> bool;
    fn files_for_album(&self, album_id: u64) -> Vec<HeldFile>;
}

/// Scores a release name against an artist's preferred-word rules.
pub trait PreferredWordScorer: Send + Sync {
    fn score(&self, artist_id: u64, release_name: &str) -> i32;
}

/// A release found by a search, covering one or more albums of one artist.
#[derive(Debug, Clone)]
pub struct RemoteRelease<'a> {
    pub artist_id: u64,
    pub quality_profile: &'a QualityProfile,
    pub language_profile: &'a LanguageProfile,
    pub album_ids: Vec<u64>,
    pub quality: QualityModel,
    pub preferred_word_score: i32,
}

/// Rejects search results for albums whose held files already meet the cutoff.
pub struct CutoffSpecification<M, W> {
    upgradable: Arc<UpgradableSpecification>,
    media: Arc<M>,
    preferred_words: Arc<W>,
    missing_tracks: ScoreCache<bool>,
}

impl<M, W> CutoffSpecification<M, W>
where
    M: HeldMediaLookup,
    W: PreferredWordScorer,
{
    pub fn new(
        upgradable: Arc<UpgradableSpecification>,
        media: Arc<M>,
        preferred_words: Arc<W>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            upgradable,
            media,
            preferred_words,
            missing_tracks: ScoreCache::new(cache_ttl),
        }
    }

    pub fn is_satisfied_by(&self, release: &RemoteRelease<'_>) -> Decision {
        let profile = release.quality_profile;
        let comparer = QualityModelComparer::new(profile);

        for album_id in &release.album_ids {
            let tracks_missing = self
                .missing_tracks
                .get_or_compute(&album_id.to_string(), || {
                    self.media.has_missing_tracks(*album_id)
                });
            if tracks_missing {
                continue;
            }

            let files = self.media.files_for_album(*album_id);
            let Some(lowest) = files
                .iter()
                .min_by(|a, b| comparer.compare_models(&a.quality, &b.quality))
            else {
                continue;
            };

            debug!(
                album_id = *album_id,
                "Comparing file quality and language with report. Existing file is {}",
                lowest.quality
            );

            let current_score = self
                .preferred_words
                .score(release.artist_id, files[0].scene_or_file_name());

            if !self.upgradable.cutoff_not_met_single(
                profile,
                release.language_profile,
                &lowest.quality,
                files[0].language,
                current_score,
                Some(&release.quality),
                release.preferred_word_score,
            ) {
                debug!("Cutoff already met, rejecting.");
                return Decision::reject(format!(
                    "Existing file meets cutoff: {} - {}",
                    profile.cutoff_label(),
                    release.language_profile.cutoff
                ));
            }
        }

        Decision::Accept
    }
}

/// A downloaded release about to be imported for an album.
#[derive(Debug, Clone)]
pub struct LocalRelease<'a> {
    pub album_id: u64,
    pub release_id: u64,
    /// Release currently monitored for the album.
    pub monitored_release_id: u64,
    pub quality_profile: &'a QualityProfile,
    pub tracks: Vec<QualityModel>,
}

/// Rejects imports that swap an album to a different release without a
/// quality gain over the files already held.
pub struct ReleaseUpgradeSpecification<M> {
    upgradable: Arc<UpgradableSpecification>,
    media: Arc<M>,
}

impl<M> ReleaseUpgradeSpecification<M>
where
    M: HeldMediaLookup,
{
    pub fn new(upgradable: Arc<UpgradableSpecification>, media: Arc<M>) -> Self {
        Self { upgradable, media }
    }

    pub fn is_satisfied_by(&self, release: &LocalRelease<'_>) -> Decision {
        if release.release_id == release.monitored_release_id {
            return Decision::Accept;
        }

        let current_qualities: Vec<QualityModel> = self
            .media
            .files_for_album(release.album_id)
            .into_iter()
            .map(|file| file.quality)
            .collect();
        if current_qualities.is_empty() {
            return Decision::Accept;
        }

        let comparer = QualityModelComparer::new(release.quality_profile);
        let Some(new_min_quality) = release
            .tracks
            .iter()
            .min_by(|a, b| comparer.compare_models(a, b))
        else {
            return Decision::reject("Release has no tracks to import");
        };
        debug!("Min quality of new files: {}", new_min_quality);

        if !self.upgradable.is_quality_upgradable(
            release.quality_profile,
            &current_qualities,
            Some(new_min_quality),
        ) {
            debug!(
                album_id = release.album_id,
                "This album isn't a quality upgrade. Skipping"
            );
            return Decision::reject("Not an upgrade for existing album file(s)");
        }

        Decision::Accept
    }
}
