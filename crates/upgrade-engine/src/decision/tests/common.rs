use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::decision::specifications::{HeldFile, HeldMediaLookup, PreferredWordScorer};
use crate::decision::{
    Language, LanguageProfile, ProfileLanguageItem, Quality, QualityModel, QualityProfile,
    QualityProfileItem, Revision, UpgradableSpecification,
};

/// MP3-192 < MP3-320 < FLAC, cutoff at MP3-320.
pub(super) fn quality_profile() -> QualityProfile {
    QualityProfile {
        id: 1,
        name: "Standard".to_string(),
        upgrade_allowed: true,
        cutoff: Quality::MP3_320.id,
        items: vec![
            QualityProfileItem::single(Quality::MP3_192, true),
            QualityProfileItem::single(Quality::MP3_320, true),
            QualityProfileItem::single(Quality::FLAC, true),
        ],
    }
}

/// Unknown < English, cutoff at English.
pub(super) fn language_profile() -> LanguageProfile {
    LanguageProfile {
        id: 1,
        name: "English".to_string(),
        upgrade_allowed: true,
        cutoff: Language::ENGLISH,
        languages: vec![
            ProfileLanguageItem {
                language: Language::UNKNOWN,
                allowed: true,
            },
            ProfileLanguageItem {
                language: Language::ENGLISH,
                allowed: true,
            },
        ],
    }
}

pub(super) fn specification() -> UpgradableSpecification {
    UpgradableSpecification::default()
}

pub(super) fn model(quality: Quality) -> QualityModel {
    QualityModel::new(quality)
}

pub(super) fn proper(quality: Quality) -> QualityModel {
    QualityModel::with_revision(quality, Revision::new(2, 0))
}

pub(super) fn held(quality: Quality, language: Language, file_name: &str) -> HeldFile {
    HeldFile {
        quality: model(quality),
        language,
        file_name: file_name.to_string(),
        scene_name: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryMedia {
    pub(super) files: Mutex<HashMap<u64, Vec<HeldFile>>>,
    pub(super) missing: Mutex<HashMap<u64, bool>>,
    pub(super) missing_lookups: AtomicUsize,
}

impl MemoryMedia {
    pub(super) fn with_files(album_id: u64, files: Vec<HeldFile>) -> Self {
        let media = Self::default();
        media
            .files
            .lock()
            .expect("files mutex poisoned")
            .insert(album_id, files);
        media
    }

    pub(super) fn mark_missing(&self, album_id: u64) {
        self.missing
            .lock()
            .expect("missing mutex poisoned")
            .insert(album_id, true);
    }
}

impl HeldMediaLookup for MemoryMedia {
    fn has_missing_tracks(&self, album_id: u64) -> bool {
        self.missing_lookups.fetch_add(1, Ordering::SeqCst);
        self.missing
            .lock()
            .expect("missing mutex poisoned")
            .get(&album_id)
            .copied()
            .unwrap_or(false)
    }

    fn files_for_album(&self, album_id: u64) -> Vec<HeldFile> {
        self.files
            .lock()
            .expect("files mutex poisoned")
            .get(&album_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// Scores 10 for any release name containing the word, 0 otherwise.
pub(super) struct KeywordScorer(pub(super) &'static str);

impl PreferredWordScorer for KeywordScorer {
    fn score(&self, _artist_id: u64, release_name: &str) -> i32 {
        if release_name.contains(self.0) {
            10
        } else {
            0
        }
    }
}
