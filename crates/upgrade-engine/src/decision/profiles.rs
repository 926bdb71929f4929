use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::{Language, Quality};

/// Validation failure for a user-edited profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile {profile_id}: cutoff {cutoff} is not one of the profile items")]
    MissingCutoff { profile_id: u32, cutoff: String },
    #[error("profile {profile_id}: cutoff {cutoff} is not an allowed item")]
    CutoffNotAllowed { profile_id: u32, cutoff: String },
    #[error("profile {profile_id}: no item is allowed")]
    NothingAllowed { profile_id: u32 },
    #[error("profile {profile_id}: {entry} appears more than once")]
    DuplicateEntry { profile_id: u32, entry: String },
}

/// Position of a quality inside a profile. Members of one group share `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityIndex {
    pub index: i32,
    pub group_index: i32,
}

impl QualityIndex {
    /// Rank given to qualities the profile does not mention; below every item.
    ///
    /// Scoring maps this to `0.0`, outside the `(0, 1]` range of listed
    /// qualities. It is not folded into the first item's rank, so an unlisted
    /// quality never ties with a configured one.
    pub const NOT_FOUND: QualityIndex = QualityIndex {
        index: -1,
        group_index: 0,
    };

    pub fn compare(&self, other: &QualityIndex, respect_group_order: bool) -> Ordering {
        let by_item = self.index.cmp(&other.index);
        if by_item == Ordering::Equal && respect_group_order {
            return self.group_index.cmp(&other.group_index);
        }
        by_item
    }
}

/// One ranked entry of a quality profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityProfileItem {
    Single {
        quality: Quality,
        allowed: bool,
    },
    /// Qualities ranked as equals; member order only matters when groups are respected.
    Group {
        id: u32,
        name: String,
        qualities: Vec<Quality>,
        allowed: bool,
    },
}

impl QualityProfileItem {
    pub fn single(quality: Quality, allowed: bool) -> Self {
        Self::Single { quality, allowed }
    }

    pub fn group(id: u32, name: impl Into<String>, qualities: Vec<Quality>, allowed: bool) -> Self {
        Self::Group {
            id,
            name: name.into(),
            qualities,
            allowed,
        }
    }

    /// Identifier a profile cutoff refers to: the quality id, or the group id.
    pub fn id(&self) -> u32 {
        match self {
            Self::Single { quality, .. } => quality.id,
            Self::Group { id, .. } => *id,
        }
    }

    pub fn allowed(&self) -> bool {
        match self {
            Self::Single { allowed, .. } | Self::Group { allowed, .. } => *allowed,
        }
    }

    pub fn qualities(&self) -> &[Quality] {
        match self {
            Self::Single { quality, .. } => std::slice::from_ref(quality),
            Self::Group { qualities, .. } => qualities,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Single { quality, .. } => quality.name.to_string(),
            Self::Group { name, .. } => name.clone(),
        }
    }
}

/// Ordered quality preferences (worst first), with a cutoff and an upgrade switch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: u32,
    pub name: String,
    pub upgrade_allowed: bool,
    /// Item id (quality id or group id) at which searching stops.
    pub cutoff: u32,
    pub items: Vec<QualityProfileItem>,
}

impl QualityProfile {
    pub fn index_of(&self, quality: Quality) -> QualityIndex {
        for (index, item) in self.items.iter().enumerate() {
            if let Some(group_index) = item.qualities().iter().position(|q| *q == quality) {
                return QualityIndex {
                    index: index as i32,
                    group_index: group_index as i32,
                };
            }
        }

        QualityIndex::NOT_FOUND
    }

    pub fn item_index(&self, item_id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }

    /// Rank of the cutoff item.
    ///
    /// # Panics
    /// When the cutoff does not name an item of this profile.
    pub fn cutoff_index(&self) -> QualityIndex {
        match self.item_index(self.cutoff) {
            Some(index) => QualityIndex {
                index: index as i32,
                group_index: 0,
            },
            None => panic!(
                "quality profile {} cutoff {} is not one of its items",
                self.id, self.cutoff
            ),
        }
    }

    pub fn cutoff_label(&self) -> String {
        self.item_index(self.cutoff)
            .map(|index| self.items[index].label())
            .unwrap_or_else(|| format!("#{}", self.cutoff))
    }

    /// Best quality the profile still accepts. For a group this is its last member.
    ///
    /// # Panics
    /// When no item is allowed.
    pub fn last_allowed_quality(&self) -> Quality {
        let item = self
            .items
            .iter()
            .rev()
            .find(|item| item.allowed() && !item.qualities().is_empty());

        match item.and_then(|item| item.qualities().last()) {
            Some(quality) => *quality,
            None => panic!("quality profile {} allows no quality", self.id),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut item_ids = HashSet::new();
        let mut qualities = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id()) {
                return Err(ProfileError::DuplicateEntry {
                    profile_id: self.id,
                    entry: format!("item {}", item.id()),
                });
            }
            for quality in item.qualities() {
                if !qualities.insert(quality.id) {
                    return Err(ProfileError::DuplicateEntry {
                        profile_id: self.id,
                        entry: quality.name.to_string(),
                    });
                }
            }
        }

        if !self
            .items
            .iter()
            .any(|item| item.allowed() && !item.qualities().is_empty())
        {
            return Err(ProfileError::NothingAllowed {
                profile_id: self.id,
            });
        }

        match self.item_index(self.cutoff) {
            None => Err(ProfileError::MissingCutoff {
                profile_id: self.id,
                cutoff: self.cutoff.to_string(),
            }),
            Some(index) if !self.items[index].allowed() => Err(ProfileError::CutoffNotAllowed {
                profile_id: self.id,
                cutoff: self.items[index].label(),
            }),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLanguageItem {
    pub language: Language,
    pub allowed: bool,
}

/// Ordered language preferences (worst first), with a cutoff and an upgrade switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: u32,
    pub name: String,
    pub upgrade_allowed: bool,
    pub cutoff: Language,
    pub languages: Vec<ProfileLanguageItem>,
}

impl LanguageProfile {
    /// Position in the language list, or `-1` when the profile does not list it.
    pub fn index_of(&self, language: Language) -> i32 {
        self.languages
            .iter()
            .position(|item| item.language == language)
            .map(|index| index as i32)
            .unwrap_or(-1)
    }

    /// Position of the cutoff language.
    ///
    /// # Panics
    /// When the cutoff is not one of the listed languages.
    pub fn cutoff_index(&self) -> i32 {
        match self.index_of(self.cutoff) {
            -1 => panic!(
                "language profile {} cutoff {} is not one of its languages",
                self.id, self.cutoff
            ),
            index => index,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut seen = HashSet::new();
        for item in &self.languages {
            if !seen.insert(item.language.id) {
                return Err(ProfileError::DuplicateEntry {
                    profile_id: self.id,
                    entry: item.language.name.to_string(),
                });
            }
        }

        if !self.languages.iter().any(|item| item.allowed) {
            return Err(ProfileError::NothingAllowed {
                profile_id: self.id,
            });
        }

        match self
            .languages
            .iter()
            .find(|item| item.language == self.cutoff)
        {
            None => Err(ProfileError::MissingCutoff {
                profile_id: self.id,
                cutoff: self.cutoff.name.to_string(),
            }),
            Some(item) if !item.allowed => Err(ProfileError::CutoffNotAllowed {
                profile_id: self.id,
                cutoff: self.cutoff.name.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }
}

/// Lifecycle notification emitted by whatever component manages quality profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileEvent {
    Created(u32),
    Updated(u32),
    Deleted(u32),
}

impl ProfileEvent {
    pub fn profile_id(&self) -> u32 {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Deleted(id) => *id,
        }
    }
}

/// Receiver of quality profile edits. Implementations must finish invalidating
/// derived state before returning.
pub trait ProfileChangeHandler: Send + Sync {
    fn profile_changed(&self, event: &ProfileEvent);
}
