use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::decision::specifications::{
    CutoffSpecification, LocalRelease, ReleaseUpgradeSpecification, RemoteRelease,
};
use crate::decision::{Decision, Language, LanguageProfile, Quality, QualityProfile};

fn remote<'a>(
    quality_profile: &'a QualityProfile,
    language_profile: &'a LanguageProfile,
    quality: Quality,
    preferred_word_score: i32,
) -> RemoteRelease<'a> {
    RemoteRelease {
        artist_id: 11,
        quality_profile,
        language_profile,
        album_ids: vec![7],
        quality: model(quality),
        preferred_word_score,
    }
}

fn cutoff_specification(media: MemoryMedia) -> CutoffSpecification<MemoryMedia, KeywordScorer> {
    CutoffSpecification::new(
        Arc::new(specification()),
        Arc::new(media),
        Arc::new(KeywordScorer("WEB")),
        Duration::from_secs(30),
    )
}

#[test]
fn rejects_release_when_held_files_meet_cutoff() {
    let spec = cutoff_specification(MemoryMedia::with_files(
        7,
        vec![held(Quality::FLAC, Language::ENGLISH, "Artist - Album (WEB).flac")],
    ));
    let quality = quality_profile();
    let language = language_profile();

    let decision = spec.is_satisfied_by(&remote(&quality, &language, Quality::MP3_320, 0));

    assert_eq!(
        decision,
        Decision::reject("Existing file meets cutoff: MP3-320 - English")
    );
}

#[test]
fn lowest_held_file_decides() {
    let spec = cutoff_specification(MemoryMedia::with_files(
        7,
        vec![
            held(Quality::FLAC, Language::ENGLISH, "01.flac"),
            held(Quality::MP3_192, Language::ENGLISH, "02.mp3"),
        ],
    ));
    let quality = quality_profile();
    let language = language_profile();

    assert!(spec
        .is_satisfied_by(&remote(&quality, &language, Quality::MP3_320, 0))
        .is_accepted());
}

#[test]
fn better_preferred_words_keep_release_in_play() {
    let spec = cutoff_specification(MemoryMedia::with_files(
        7,
        vec![held(Quality::FLAC, Language::ENGLISH, "Artist - Album (WEB).flac")],
    ));
    let quality = quality_profile();
    let language = language_profile();

    assert!(spec
        .is_satisfied_by(&remote(&quality, &language, Quality::FLAC, 20))
        .is_accepted());
}

#[test]
fn albums_with_missing_tracks_are_accepted_and_memoised() {
    let media = MemoryMedia::with_files(
        7,
        vec![held(Quality::FLAC, Language::ENGLISH, "01.flac")],
    );
    media.mark_missing(7);
    let media = Arc::new(media);
    let spec = CutoffSpecification::new(
        Arc::new(specification()),
        Arc::clone(&media),
        Arc::new(KeywordScorer("WEB")),
        Duration::from_secs(30),
    );
    let quality = quality_profile();
    let language = language_profile();
    let release = remote(&quality, &language, Quality::MP3_320, 0);

    assert!(spec.is_satisfied_by(&release).is_accepted());
    assert!(spec.is_satisfied_by(&release).is_accepted());
    assert_eq!(media.missing_lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn albums_without_files_are_accepted() {
    let spec = cutoff_specification(MemoryMedia::default());
    let quality = quality_profile();
    let language = language_profile();

    assert_eq!(
        spec.is_satisfied_by(&remote(&quality, &language, Quality::MP3_192, 0)),
        Decision::Accept
    );
}

fn local(profile: &QualityProfile, release_id: u64, tracks: Vec<Quality>) -> LocalRelease<'_> {
    LocalRelease {
        album_id: 7,
        release_id,
        monitored_release_id: 1,
        quality_profile: profile,
        tracks: tracks.into_iter().map(model).collect(),
    }
}

fn release_specification(media: MemoryMedia) -> ReleaseUpgradeSpecification<MemoryMedia> {
    ReleaseUpgradeSpecification::new(Arc::new(specification()), Arc::new(media))
}

#[test]
fn same_release_import_is_accepted() {
    let spec = release_specification(MemoryMedia::with_files(
        7,
        vec![held(Quality::FLAC, Language::ENGLISH, "01.flac")],
    ));
    let profile = quality_profile();

    assert!(spec
        .is_satisfied_by(&local(&profile, 1, vec![Quality::MP3_192]))
        .is_accepted());
}

#[test]
fn release_change_needs_quality_gain_from_its_worst_track() {
    let spec = release_specification(MemoryMedia::with_files(
        7,
        vec![held(Quality::MP3_320, Language::ENGLISH, "01.mp3")],
    ));
    let profile = quality_profile();

    assert_eq!(
        spec.is_satisfied_by(&local(&profile, 2, vec![Quality::FLAC, Quality::MP3_192])),
        Decision::reject("Not an upgrade for existing album file(s)")
    );
    assert!(spec
        .is_satisfied_by(&local(&profile, 2, vec![Quality::FLAC, Quality::FLAC]))
        .is_accepted());
}

#[test]
fn release_change_without_held_files_is_accepted() {
    let spec = release_specification(MemoryMedia::default());
    let profile = quality_profile();

    assert!(spec
        .is_satisfied_by(&local(&profile, 2, vec![Quality::MP3_192]))
        .is_accepted());
}

#[test]
fn release_change_without_tracks_is_rejected() {
    let spec = release_specification(MemoryMedia::with_files(
        7,
        vec![held(Quality::MP3_320, Language::ENGLISH, "01.mp3")],
    ));
    let profile = quality_profile();

    assert!(!spec
        .is_satisfied_by(&local(&profile, 2, Vec::new()))
        .is_accepted());
}
