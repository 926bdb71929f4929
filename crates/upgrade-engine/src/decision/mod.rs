//! Upgrade and cutoff decisions for held media under quality and language profiles.

mod cache;
mod catalog;
mod comparer;
mod model;
mod profiles;
mod scoring;
pub mod specifications;
mod upgradable;

#[cfg(test)]
mod tests;

pub use cache::{ScoreCache, DEFAULT_TTL};
pub use catalog::{CatalogError, Language, Quality};
pub use comparer::{LanguageComparer, QualityModelComparer};
pub use model::{QualityModel, Revision};
pub use profiles::{
    LanguageProfile, ProfileChangeHandler, ProfileError, ProfileEvent, ProfileLanguageItem,
    QualityIndex, QualityProfile, QualityProfileItem,
};
pub use scoring::{quality_scores, QualityScoreTable, QualityScorer};
pub use specifications::Decision;
pub use upgradable::UpgradableSpecification;
