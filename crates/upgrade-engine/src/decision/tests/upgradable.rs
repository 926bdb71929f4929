use super::common::*;
use crate::decision::{Language, Quality, QualityProfileItem};

#[test]
fn lower_ranked_quality_is_always_upgradable_to_higher() {
    let spec = specification();
    let mut profile = quality_profile();
    profile.items.push(QualityProfileItem::group(
        1000,
        "Hi-Res",
        vec![Quality::ALAC, Quality::FLAC_24],
        true,
    ));
    let ranked = [
        Quality::MP3_192,
        Quality::MP3_320,
        Quality::FLAC,
        Quality::FLAC_24,
    ];

    for (lower_rank, lower) in ranked.iter().enumerate() {
        for higher in &ranked[lower_rank + 1..] {
            assert!(
                spec.is_quality_upgradable(&profile, &[model(*lower)], Some(&model(*higher))),
                "{lower} -> {higher} should be an upgrade"
            );
            assert!(
                !spec.is_quality_upgradable(&profile, &[model(*higher)], Some(&model(*lower))),
                "{higher} -> {lower} should not be an upgrade"
            );
        }
    }
}

#[test]
fn missing_candidate_quality_is_never_rejected() {
    let spec = specification();
    assert!(spec.is_quality_upgradable(&quality_profile(), &[model(Quality::FLAC)], None));
}

#[test]
fn equal_quality_is_not_an_upgrade() {
    let spec = specification();
    assert!(!spec.is_quality_upgradable(
        &quality_profile(),
        &[model(Quality::FLAC)],
        Some(&model(Quality::FLAC))
    ));
}

#[test]
fn group_members_are_not_upgrades_of_each_other() {
    let spec = specification();
    let mut profile = quality_profile();
    profile.items.push(QualityProfileItem::group(
        1000,
        "Hi-Res",
        vec![Quality::ALAC, Quality::FLAC_24],
        true,
    ));

    assert!(!spec.is_quality_upgradable(
        &profile,
        &[model(Quality::ALAC)],
        Some(&model(Quality::FLAC_24))
    ));
}

#[test]
fn language_upgrade_requires_progress_over_some_current_language() {
    let spec = specification();
    let profile = language_profile();

    assert!(!spec.is_language_upgradable(
        &profile,
        &[Language::ENGLISH, Language::ENGLISH],
        Some(Language::ENGLISH)
    ));
    assert!(spec.is_language_upgradable(
        &profile,
        &[Language::UNKNOWN, Language::ENGLISH],
        Some(Language::ENGLISH)
    ));
    assert!(!spec.is_language_upgradable(
        &profile,
        &[Language::UNKNOWN, Language::ENGLISH],
        Some(Language::UNKNOWN)
    ));
    assert!(spec.is_language_upgradable(&profile, &[Language::ENGLISH], None));
}

#[test]
fn unlisted_language_ranks_below_listed_ones() {
    let spec = specification();
    assert!(spec.is_language_upgradable(
        &language_profile(),
        &[Language::FRENCH],
        Some(Language::UNKNOWN)
    ));
}

#[test]
fn quality_upgrade_wins_over_worse_language() {
    let spec = specification();
    assert!(spec.is_upgradable_single(
        &quality_profile(),
        &language_profile(),
        &model(Quality::MP3_192),
        Language::ENGLISH,
        10,
        &model(Quality::FLAC),
        Language::UNKNOWN,
        0,
    ));
}

#[test]
fn better_current_quality_blocks_language_upgrade() {
    let spec = specification();
    assert!(!spec.is_upgradable_single(
        &quality_profile(),
        &language_profile(),
        &model(Quality::FLAC),
        Language::UNKNOWN,
        0,
        &model(Quality::MP3_320),
        Language::ENGLISH,
        100,
    ));
}

#[test]
fn language_upgrade_applies_when_quality_is_equal() {
    let spec = specification();
    let profile = quality_profile();
    let languages = language_profile();

    assert!(spec.language_cutoff_not_met(&languages, Language::UNKNOWN));
    assert!(spec.is_upgradable_single(
        &profile,
        &languages,
        &model(Quality::FLAC),
        Language::UNKNOWN,
        0,
        &model(Quality::FLAC),
        Language::ENGLISH,
        0,
    ));
}

#[test]
fn worse_language_blocks_preferred_word_upgrade() {
    let spec = specification();
    assert!(!spec.is_upgradable_single(
        &quality_profile(),
        &language_profile(),
        &model(Quality::FLAC),
        Language::ENGLISH,
        0,
        &model(Quality::FLAC),
        Language::UNKNOWN,
        100,
    ));
}

#[test]
fn preferred_word_score_breaks_remaining_ties() {
    let spec = specification();
    let profile = quality_profile();
    let languages = language_profile();
    let current = model(Quality::MP3_320);

    assert!(spec.is_upgradable_single(
        &profile,
        &languages,
        &current,
        Language::ENGLISH,
        5,
        &current,
        Language::ENGLISH,
        6,
    ));
    assert!(!spec.is_upgradable_single(
        &profile,
        &languages,
        &current,
        Language::ENGLISH,
        5,
        &current,
        Language::ENGLISH,
        5,
    ));
}

#[test]
fn revision_alone_is_not_an_upgrade_but_an_older_revision_is_a_downgrade() {
    let spec = specification();
    let profile = quality_profile();
    let languages = language_profile();

    assert!(!spec.is_upgradable_single(
        &profile,
        &languages,
        &model(Quality::FLAC),
        Language::ENGLISH,
        0,
        &proper(Quality::FLAC),
        Language::ENGLISH,
        0,
    ));
    assert!(!spec.is_upgradable_single(
        &profile,
        &languages,
        &proper(Quality::FLAC),
        Language::ENGLISH,
        0,
        &model(Quality::FLAC),
        Language::ENGLISH,
        10,
    ));
}

#[test]
fn partially_upgraded_album_accepts_best_quality() {
    let spec = specification();
    assert!(spec.is_upgradable(
        &quality_profile(),
        &language_profile(),
        &[model(Quality::MP3_192), model(Quality::FLAC)],
        &[Language::ENGLISH, Language::ENGLISH],
        0,
        &model(Quality::FLAC),
        Language::ENGLISH,
        0,
    ));
}

#[test]
fn better_held_track_blocks_upgrade_despite_higher_aggregate() {
    let spec = specification();
    let profile = quality_profile();
    let current = [
        model(Quality::MP3_192),
        model(Quality::MP3_192),
        model(Quality::FLAC),
    ];
    let candidate = model(Quality::MP3_320);

    assert!(
        spec.is_quality_upgradable(&profile, &current, Some(&candidate)),
        "mean 0.556 < 0.667 favours the candidate"
    );
    assert!(!spec.is_upgradable(
        &profile,
        &language_profile(),
        &current,
        &[Language::UNKNOWN; 3],
        0,
        &candidate,
        Language::ENGLISH,
        100,
    ));
}

#[test]
#[should_panic(expected = "at least one quality")]
fn empty_holdings_violate_the_contract() {
    specification().is_upgradable(
        &quality_profile(),
        &language_profile(),
        &[],
        &[],
        0,
        &model(Quality::FLAC),
        Language::ENGLISH,
        0,
    );
}
