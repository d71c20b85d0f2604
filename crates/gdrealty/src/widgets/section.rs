//! Content section selector for the project detail page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which content block the project detail page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Image gallery with auto-advance.
    #[default]
    Gallery,
    /// Virtual tour video.
    Tour,
    /// Floor plan browser.
    FloorPlans,
}

impl Section {
    /// Every section, in display order.
    pub const ALL: [Section; 3] = [Self::Gallery, Self::Tour, Self::FloorPlans];

    /// URL slug.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Tour => "tour",
            Self::FloorPlans => "floor-plans",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gallery => "Gallery",
            Self::Tour => "Virtual Tour",
            Self::FloorPlans => "Floor Plans",
        }
    }

    /// Parse a slug, falling back to the default section when it is missing
    /// or unrecognized.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Whether the auto-advance timer should run while this section is shown.
    #[must_use]
    pub fn auto_advances(self) -> bool {
        matches!(self, Self::Gallery)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned for an unknown section slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gallery" | "images" => Ok(Self::Gallery),
            "tour" | "video" => Ok(Self::Tour),
            "floor-plans" | "floorplans" | "floorplan" => Ok(Self::FloorPlans),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_gallery() {
        assert_eq!(Section::default(), Section::Gallery);
    }

    #[test]
    fn test_slug_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.slug().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("images".parse::<Section>().unwrap(), Section::Gallery);
        assert_eq!("video".parse::<Section>().unwrap(), Section::Tour);
        assert_eq!("floorplan".parse::<Section>().unwrap(), Section::FloorPlans);
        assert_eq!(" Tour ".parse::<Section>().unwrap(), Section::Tour);
    }

    #[test]
    fn test_unknown_slug_is_error() {
        let err = "basement".parse::<Section>().unwrap_err();
        assert_eq!(err.to_string(), "unknown section: basement");
    }

    #[test]
    fn test_from_query_defaults() {
        assert_eq!(Section::from_query(None), Section::Gallery);
        assert_eq!(Section::from_query(Some("nope")), Section::Gallery);
        assert_eq!(Section::from_query(Some("tour")), Section::Tour);
    }

    #[test]
    fn test_only_gallery_auto_advances() {
        assert!(Section::Gallery.auto_advances());
        assert!(!Section::Tour.auto_advances());
        assert!(!Section::FloorPlans.auto_advances());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Section::Tour.label(), "Virtual Tour");
        assert_eq!(Section::FloorPlans.to_string(), "floor-plans");
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Section::FloorPlans).unwrap();
        assert_eq!(json, "\"floor-plans\"");
    }
}
