use serde::{Deserialize, Serialize};
use upgrade_engine::decision::{
    Language, LanguageProfile, QualityModel, QualityProfile, UpgradableSpecification,
};
use upgrade_engine::error::AppError;

/// One file already held for the item being searched or imported.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct HeldItem {
    pub(crate) quality: QualityModel,
    pub(crate) language: Language,
}

/// The release proposed to replace the held files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct CandidateRelease {
    pub(crate) quality: QualityModel,
    pub(crate) language: Language,
    #[serde(default)]
    pub(crate) preferred_word_score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) quality_profile_id: u32,
    pub(crate) language_profile_id: u32,
    pub(crate) current: Vec<HeldItem>,
    #[serde(default)]
    pub(crate) current_preferred_word_score: i32,
    pub(crate) candidate: CandidateRelease,
}

/// Offline evaluation input: profiles travel with the holdings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DecisionScenario {
    pub(crate) quality_profile: QualityProfile,
    pub(crate) language_profile: LanguageProfile,
    pub(crate) current: Vec<HeldItem>,
    #[serde(default)]
    pub(crate) current_preferred_word_score: i32,
    pub(crate) candidate: CandidateRelease,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DecisionReport {
    pub(crate) upgradable: bool,
    pub(crate) upgrade_allowed: bool,
    pub(crate) cutoff_not_met: bool,
}

impl DecisionReport {
    /// Accept the candidate only when it is an upgrade the profiles permit and
    /// the held files have not reached the cutoff.
    pub(crate) fn accepted(&self) -> bool {
        self.upgradable && self.upgrade_allowed && self.cutoff_not_met
    }
}

pub(crate) fn evaluate(
    specification: &UpgradableSpecification,
    quality_profile: &QualityProfile,
    language_profile: &LanguageProfile,
    current: &[HeldItem],
    current_preferred_word_score: i32,
    candidate: &CandidateRelease,
) -> Result<DecisionReport, AppError> {
    if current.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one held item is required".to_string(),
        ));
    }
    quality_profile.validate()?;
    language_profile.validate()?;

    let qualities: Vec<QualityModel> = current.iter().map(|item| item.quality).collect();
    let languages: Vec<Language> = current.iter().map(|item| item.language).collect();

    let upgradable = specification.is_upgradable(
        quality_profile,
        language_profile,
        &qualities,
        &languages,
        current_preferred_word_score,
        &candidate.quality,
        candidate.language,
        candidate.preferred_word_score,
    );
    let upgrade_allowed = specification.is_upgrade_allowed(
        quality_profile,
        language_profile,
        &qualities,
        &languages,
        &candidate.quality,
        candidate.language,
    );
    let cutoff_not_met = specification.cutoff_not_met(
        quality_profile,
        language_profile,
        &qualities,
        &languages,
        current_preferred_word_score,
        Some(&candidate.quality),
        candidate.preferred_word_score,
    );

    Ok(DecisionReport {
        upgradable,
        upgrade_allowed,
        cutoff_not_met,
    })
}

impl DecisionScenario {
    pub(crate) fn evaluate(
        &self,
        specification: &UpgradableSpecification,
    ) -> Result<DecisionReport, AppError> {
        evaluate(
            specification,
            &self.quality_profile,
            &self.language_profile,
            &self.current,
            self.current_preferred_word_score,
            &self.candidate,
        )
    }
}
