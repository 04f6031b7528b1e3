use serde::{Serialize, Serializer};
use std::fmt;

use crate::ga4::DIMENSION_FALLBACK;

/// Content locales served by the site, in their fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ru,
    Uz,
}

pub const LOCALES: [Locale; 3] = [Locale::En, Locale::Ru, Locale::Uz];

/// Query value meaning "no locale filter".
pub const LOCALE_ALL: &str = "all";

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Uz => "uz",
        }
    }

    /// Case-insensitive lookup against the fixed locale set.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        LOCALES
            .into_iter()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(value))
    }
}

/// Grouping label for a row locale; rows outside the set report as `(not set)`.
pub fn locale_label(locale: Option<Locale>) -> &'static str {
    locale.map_or(DIMENSION_FALLBACK, Locale::as_str)
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale selection for a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleFilter {
    #[default]
    All,
    Only(Locale),
}

impl LocaleFilter {
    /// Unknown or missing values fall back to `All`.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(Locale::parse)
            .map_or(LocaleFilter::All, LocaleFilter::Only)
    }

    pub fn locale(self) -> Option<Locale> {
        match self {
            LocaleFilter::All => None,
            LocaleFilter::Only(locale) => Some(locale),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocaleFilter::All => LOCALE_ALL,
            LocaleFilter::Only(locale) => locale.as_str(),
        }
    }
}

impl Serialize for LocaleFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
