use std::cmp::Ordering;
use std::slice;
use std::time::Duration;

use tracing::debug;

use super::catalog::Language;
use super::comparer::{LanguageComparer, QualityModelComparer};
use super::model::QualityModel;
use super::profiles::{LanguageProfile, ProfileChangeHandler, ProfileEvent, QualityProfile};
use super::scoring::QualityScorer;

/// Decides whether a candidate improves on held files and whether searching
/// should continue, under a quality profile and a language profile.
///
/// The only state is the memoised quality score tables; everything else is a
/// pure function of the arguments. Multi-item holdings (several tracks of one
/// album) are compared through the mean of their normalised quality ranks.
pub struct UpgradableSpecification {
    scorer: QualityScorer,
}

impl UpgradableSpecification {
    pub fn new(score_cache_ttl: Duration) -> Self {
        Self {
            scorer: QualityScorer::new(score_cache_ttl),
        }
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// `true` when `new_quality` lifts the aggregate score of the current holdings.
    /// Without a proposed quality there is nothing to reject.
    pub fn is_quality_upgradable(
        &self,
        profile: &QualityProfile,
        current_qualities: &[QualityModel],
        new_quality: Option<&QualityModel>,
    ) -> bool {
        let Some(new_quality) = new_quality else {
            return true;
        };

        let current_score = self
            .scorer
            .aggregate_quality_score(profile, current_qualities);
        let new_score = self
            .scorer
            .aggregate_quality_score(profile, slice::from_ref(new_quality));

        debug!(
            "Current quality score {:.3} vs new quality score {:.3}",
            current_score, new_score
        );

        new_score > current_score
    }

    /// `true` when `new_language` is no worse than any current language and
    /// strictly better than at least one of them.
    pub fn is_language_upgradable(
        &self,
        profile: &LanguageProfile,
        current_languages: &[Language],
        new_language: Option<Language>,
    ) -> bool {
        let Some(new_language) = new_language else {
            return true;
        };

        let comparer = LanguageComparer::new(profile);
        let mut improves_any = false;
        for language in current_languages {
            match comparer.compare(new_language, *language) {
                Ordering::Less => return false,
                Ordering::Greater => improves_any = true,
                Ordering::Equal => {}
            }
        }

        improves_any
    }

    pub fn is_preferred_word_upgradable(&self, current_score: i32, new_score: i32) -> bool {
        new_score > current_score
    }

    /// Quality, then language, then preferred-word score; the first decisive
    /// dimension wins. No held file may be individually better in quality than
    /// the candidate, whatever the aggregate says.
    ///
    /// # Panics
    /// When `current_qualities` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn is_upgradable(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_qualities: &[QualityModel],
        current_languages: &[Language],
        current_score: i32,
        new_quality: &QualityModel,
        new_language: Language,
        new_score: i32,
    ) -> bool {
        // A better mean does not excuse downgrading one specific held file.
        let qualities = QualityModelComparer::new(quality_profile);
        if current_qualities
            .iter()
            .any(|current| qualities.compare_models(new_quality, current) == Ordering::Less)
        {
            debug!("Existing item has better quality, skipping");
            return false;
        }

        if self.is_quality_upgradable(quality_profile, current_qualities, Some(new_quality)) {
            return true;
        }

        if self.is_language_upgradable(language_profile, current_languages, Some(new_language)) {
            return true;
        }

        let languages = LanguageComparer::new(language_profile);
        if current_languages
            .iter()
            .any(|current| languages.compare(new_language, *current) == Ordering::Less)
        {
            debug!("Existing item has better language, skipping");
            return false;
        }

        if !self.is_preferred_word_upgradable(current_score, new_score) {
            debug!("Existing item has a better preferred word score, skipping");
            return false;
        }

        true
    }

    #[allow(clippy::too_many_arguments)]
    pub fn is_upgradable_single(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_quality: &QualityModel,
        current_language: Language,
        current_score: i32,
        new_quality: &QualityModel,
        new_language: Language,
        new_score: i32,
    ) -> bool {
        self.is_upgradable(
            quality_profile,
            language_profile,
            slice::from_ref(current_quality),
            slice::from_ref(&current_language),
            current_score,
            new_quality,
            new_language,
            new_score,
        )
    }

    /// `true` when `current_quality` sits below the cutoff, or at the cutoff with
    /// `new_quality` offering a newer revision of the very same quality.
    ///
    /// # Panics
    /// When the profile cutoff is not one of its items.
    pub fn quality_cutoff_not_met(
        &self,
        profile: &QualityProfile,
        current_quality: &QualityModel,
        new_quality: Option<&QualityModel>,
    ) -> bool {
        let comparer = QualityModelComparer::new(profile);
        match comparer.compare_to_item(current_quality.quality, profile.cutoff) {
            Ordering::Less => true,
            Ordering::Equal => new_quality
                .map(|new_quality| self.is_revision_upgrade(current_quality, new_quality))
                .unwrap_or(false),
            Ordering::Greater => false,
        }
    }

    /// # Panics
    /// When the profile's cutoff is not one of its languages.
    pub fn language_cutoff_not_met(
        &self,
        profile: &LanguageProfile,
        current_language: Language,
    ) -> bool {
        profile.index_of(current_language) < profile.cutoff_index()
    }

    /// Whether searching should continue for the current holdings.
    ///
    /// A language gap always keeps the search open: any allowed quality can
    /// still turn up in the preferred language.
    #[allow(clippy::too_many_arguments)]
    pub fn cutoff_not_met(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_qualities: &[QualityModel],
        current_languages: &[Language],
        current_score: i32,
        new_quality: Option<&QualityModel>,
        new_score: i32,
    ) -> bool {
        if current_languages
            .iter()
            .any(|language| self.language_cutoff_not_met(language_profile, *language))
        {
            return true;
        }

        if current_qualities
            .iter()
            .any(|quality| self.quality_cutoff_not_met(quality_profile, quality, new_quality))
        {
            return true;
        }

        if self.is_preferred_word_upgradable(current_score, new_score) {
            return true;
        }

        debug!("Existing item meets cut-off. skipping.");
        false
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cutoff_not_met_single(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_quality: &QualityModel,
        current_language: Language,
        current_score: i32,
        new_quality: Option<&QualityModel>,
        new_score: i32,
    ) -> bool {
        self.cutoff_not_met(
            quality_profile,
            language_profile,
            slice::from_ref(current_quality),
            slice::from_ref(&current_language),
            current_score,
            new_quality,
            new_score,
        )
    }

    /// Same quality, newer revision. A proper of a different quality never counts.
    pub fn is_revision_upgrade(
        &self,
        current_quality: &QualityModel,
        new_quality: &QualityModel,
    ) -> bool {
        if current_quality.quality == new_quality.quality
            && new_quality.revision > current_quality.revision
        {
            debug!("New quality is a better revision for existing quality");
            return true;
        }

        false
    }

    /// Applies each profile's upgrade switch to its own dimension. Either
    /// dimension's improvement, sanctioned by its own profile, is enough.
    /// Across several held items the quality side is judged on the aggregate.
    ///
    /// # Panics
    /// When `current_qualities` is empty.
    pub fn is_upgrade_allowed(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_qualities: &[QualityModel],
        current_languages: &[Language],
        new_quality: &QualityModel,
        new_language: Language,
    ) -> bool {
        let is_quality_upgrade =
            self.is_quality_upgradable(quality_profile, current_qualities, Some(new_quality));
        let is_language_upgrade =
            self.is_language_upgradable(language_profile, current_languages, Some(new_language));

        check_upgrade_allowed(
            quality_profile,
            language_profile,
            is_quality_upgrade,
            is_language_upgrade,
        )
    }

    /// Single-item gate. The quality side uses the full comparator, so a newer
    /// revision of the held quality counts as an upgrade.
    pub fn is_upgrade_allowed_single(
        &self,
        quality_profile: &QualityProfile,
        language_profile: &LanguageProfile,
        current_quality: &QualityModel,
        current_language: Language,
        new_quality: &QualityModel,
        new_language: Language,
    ) -> bool {
        let is_quality_upgrade = QualityModelComparer::new(quality_profile)
            .compare_models(new_quality, current_quality)
            == Ordering::Greater;
        let is_language_upgrade = LanguageComparer::new(language_profile)
            .compare(new_language, current_language)
            == Ordering::Greater;

        check_upgrade_allowed(
            quality_profile,
            language_profile,
            is_quality_upgrade,
            is_language_upgrade,
        )
    }
}

fn check_upgrade_allowed(
    quality_profile: &QualityProfile,
    language_profile: &LanguageProfile,
    is_quality_upgrade: bool,
    is_language_upgrade: bool,
) -> bool {
    if (is_quality_upgrade && quality_profile.upgrade_allowed)
        || (is_language_upgrade && language_profile.upgrade_allowed)
    {
        debug!("At least one profile allows upgrading");
        return true;
    }

    if is_quality_upgrade && !quality_profile.upgrade_allowed {
        debug!("Quality profile does not allow upgrades, skipping");
        return false;
    }

    if is_language_upgrade && !language_profile.upgrade_allowed {
        debug!("Language profile does not allow upgrades, skipping");
        return false;
    }

    true
}

impl Default for UpgradableSpecification {
    fn default() -> Self {
        Self::new(super::cache::DEFAULT_TTL)
    }
}

impl ProfileChangeHandler for UpgradableSpecification {
    fn profile_changed(&self, event: &ProfileEvent) {
        self.scorer.clear();
        debug!(
            profile_id = event.profile_id(),
            ?event,
            "quality profile changed, cleared score cache"
        );
    }
}
