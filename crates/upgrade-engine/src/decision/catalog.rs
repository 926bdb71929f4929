use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Lookup failure when a payload names a quality or language outside the fixed catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown quality id {0}")]
    UnknownQuality(u32),
    #[error("unknown language id {0}")]
    UnknownLanguage(u32),
}

/// Audio quality tier from the system-wide catalog.
///
/// Qualities are only ever ranked through a [`QualityProfile`](super::QualityProfile);
/// the numeric id is an identity, not an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Quality {
    pub id: u32,
    pub name: &'static str,
}

impl Quality {
    pub const UNKNOWN: Quality = Quality::define(0, "Unknown");
    pub const MP3_192: Quality = Quality::define(1, "MP3-192");
    pub const MP3_VBR: Quality = Quality::define(2, "MP3-VBR-V0");
    pub const MP3_256: Quality = Quality::define(3, "MP3-256");
    pub const MP3_320: Quality = Quality::define(4, "MP3-320");
    pub const MP3_160: Quality = Quality::define(5, "MP3-160");
    pub const FLAC: Quality = Quality::define(6, "FLAC");
    pub const ALAC: Quality = Quality::define(7, "ALAC");
    pub const MP3_VBR_V2: Quality = Quality::define(8, "MP3-VBR-V2");
    pub const AAC_192: Quality = Quality::define(9, "AAC-192");
    pub const AAC_256: Quality = Quality::define(10, "AAC-256");
    pub const AAC_320: Quality = Quality::define(11, "AAC-320");
    pub const AAC_VBR: Quality = Quality::define(12, "AAC-VBR");
    pub const WAV: Quality = Quality::define(13, "WAV");
    pub const VORBIS_Q10: Quality = Quality::define(14, "OGG Vorbis Q10");
    pub const FLAC_24: Quality = Quality::define(21, "FLAC 24bit");

    const fn define(id: u32, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Every quality the system knows about, in catalog order.
    pub fn all() -> &'static [Quality] {
        &ALL_QUALITIES
    }

    pub fn find(id: u32) -> Option<Quality> {
        ALL_QUALITIES.iter().copied().find(|quality| quality.id == id)
    }
}

const ALL_QUALITIES: [Quality; 16] = [
    Quality::UNKNOWN,
    Quality::MP3_192,
    Quality::MP3_VBR,
    Quality::MP3_256,
    Quality::MP3_320,
    Quality::MP3_160,
    Quality::FLAC,
    Quality::ALAC,
    Quality::MP3_VBR_V2,
    Quality::AAC_192,
    Quality::AAC_256,
    Quality::AAC_320,
    Quality::AAC_VBR,
    Quality::WAV,
    Quality::VORBIS_Q10,
    Quality::FLAC_24,
];

impl TryFrom<u32> for Quality {
    type Error = CatalogError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quality::find(value).ok_or(CatalogError::UnknownQuality(value))
    }
}

// Hand-written so the impl covers every `'de`; the `name` field is `'static`.
impl<'de> Deserialize<'de> for Quality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Quality::try_from(id).map_err(de::Error::custom)
    }
}

impl From<Quality> for u32 {
    fn from(value: Quality) -> Self {
        value.id
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Spoken or sung language from the system-wide catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Language {
    pub id: u32,
    pub name: &'static str,
}

impl Language {
    pub const UNKNOWN: Language = Language::define(0, "Unknown");
    pub const ENGLISH: Language = Language::define(1, "English");
    pub const FRENCH: Language = Language::define(2, "French");
    pub const SPANISH: Language = Language::define(3, "Spanish");
    pub const GERMAN: Language = Language::define(4, "German");
    pub const ITALIAN: Language = Language::define(5, "Italian");
    pub const DANISH: Language = Language::define(6, "Danish");
    pub const DUTCH: Language = Language::define(7, "Dutch");
    pub const JAPANESE: Language = Language::define(8, "Japanese");
    pub const PORTUGUESE: Language = Language::define(18, "Portuguese");

    const fn define(id: u32, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn all() -> &'static [Language] {
        &ALL_LANGUAGES
    }

    pub fn find(id: u32) -> Option<Language> {
        ALL_LANGUAGES.iter().copied().find(|language| language.id == id)
    }
}

const ALL_LANGUAGES: [Language; 10] = [
    Language::UNKNOWN,
    Language::ENGLISH,
    Language::FRENCH,
    Language::SPANISH,
    Language::GERMAN,
    Language::ITALIAN,
    Language::DANISH,
    Language::DUTCH,
    Language::JAPANESE,
    Language::PORTUGUESE,
];

impl TryFrom<u32> for Language {
    type Error = CatalogError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Language::find(value).ok_or(CatalogError::UnknownLanguage(value))
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Language::try_from(id).map_err(de::Error::custom)
    }
}

impl From<Language> for u32 {
    fn from(value: Language) -> Self {
        value.id
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
