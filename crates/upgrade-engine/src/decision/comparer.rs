use std::cmp::Ordering;

use super::catalog::{Language, Quality};
use super::model::QualityModel;
use super::profiles::{LanguageProfile, QualityProfile};

/// Ranks qualities by their position in a quality profile.
#[derive(Debug, Clone, Copy)]
pub struct QualityModelComparer<'a> {
    profile: &'a QualityProfile,
}

impl<'a> QualityModelComparer<'a> {
    pub fn new(profile: &'a QualityProfile) -> Self {
        Self { profile }
    }

    pub fn compare_qualities(&self, left: Quality, right: Quality) -> Ordering {
        self.profile
            .index_of(left)
            .compare(&self.profile.index_of(right), false)
    }

    /// Like [`compare_qualities`](Self::compare_qualities), but group members are
    /// ordered by their position inside the group.
    pub fn compare_qualities_respecting_groups(&self, left: Quality, right: Quality) -> Ordering {
        self.profile
            .index_of(left)
            .compare(&self.profile.index_of(right), true)
    }

    /// Quality rank first; the revision only decides between equal ranks.
    pub fn compare_models(&self, left: &QualityModel, right: &QualityModel) -> Ordering {
        match self.compare_qualities(left.quality, right.quality) {
            Ordering::Equal => left.revision.cmp(&right.revision),
            other => other,
        }
    }

    /// Compares a quality against a profile item (single quality or group) by id.
    ///
    /// # Panics
    /// When `item_id` is not an item of the profile.
    pub fn compare_to_item(&self, quality: Quality, item_id: u32) -> Ordering {
        let item_index = match self.profile.item_index(item_id) {
            Some(index) => index as i32,
            None => panic!(
                "quality profile {} has no item with id {}",
                self.profile.id, item_id
            ),
        };

        self.profile.index_of(quality).index.cmp(&item_index)
    }
}

/// Ranks languages by their position in a language profile.
#[derive(Debug, Clone, Copy)]
pub struct LanguageComparer<'a> {
    profile: &'a LanguageProfile,
}

impl<'a> LanguageComparer<'a> {
    pub fn new(profile: &'a LanguageProfile) -> Self {
        Self { profile }
    }

    pub fn compare(&self, left: Language, right: Language) -> Ordering {
        self.profile
            .index_of(left)
            .cmp(&self.profile.index_of(right))
    }
}
