//! Content records shown on the site.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reference to an image or video, by URL or site-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaItem(String);

impl MediaItem {
    /// Wrap a URL or path.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The URL or path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this points at a video file, judged by extension.
    #[must_use]
    pub fn is_video(&self) -> bool {
        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        let lower = path.to_ascii_lowercase();
        [".mp4", ".webm", ".mov", ".m4v"]
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

impl From<&str> for MediaItem {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for MediaItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One layout option of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// Layout name ("Layout A").
    pub name: String,
    /// Total area in square feet.
    pub sqft: u32,
    /// Ceiling height as displayed ("10 ft").
    pub ceiling_height: String,
    /// Plan drawing.
    pub image: MediaItem,
}

/// A property listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Identifier used in `/projects/{id}`.
    pub id: u32,
    /// Listing title.
    pub title: String,
    /// Neighborhood or address line.
    pub location: String,
    /// Asking price in whole dollars.
    pub price: u64,
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Interior area in square feet.
    pub sqft: u32,
    /// Parking spaces.
    #[serde(default)]
    pub parking: u8,
    /// Year of construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u16>,
    /// Short text for cards.
    pub summary: String,
    /// Long text for the detail page.
    pub description: String,
    /// Bullet list of key features.
    #[serde(default)]
    pub features: Vec<String>,
    /// Card image.
    pub cover: MediaItem,
    /// Gallery images.
    #[serde(default)]
    pub images: Vec<MediaItem>,
    /// Available layouts.
    #[serde(default)]
    pub floor_plans: Vec<FloorPlan>,
    /// Virtual tour video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<MediaItem>,
    /// Shown in the home page's featured section.
    #[serde(default)]
    pub featured: bool,
}

impl Project {
    /// Gallery images, falling back to the cover when none are listed.
    #[must_use]
    pub fn gallery(&self) -> Vec<MediaItem> {
        if self.images.is_empty() {
            vec![self.cover.clone()]
        } else {
            self.images.clone()
        }
    }

    /// Projects shown as cards on the home page: the featured ones, or all
    /// of them when none is featured.
    #[must_use]
    pub fn home_cards(projects: &[Self]) -> Vec<&Self> {
        let featured: Vec<&Self> = projects.iter().filter(|p| p.featured).collect();
        if featured.is_empty() {
            projects.iter().collect()
        } else {
            featured
        }
    }

    /// Price formatted as `$850,000`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    /// Label/value pairs for the stat strip on the detail page.
    #[must_use]
    pub fn stats(&self) -> Vec<(&'static str, String)> {
        let mut stats = vec![
            ("Bedrooms", self.bedrooms.to_string()),
            ("Bathrooms", self.bathrooms.to_string()),
            ("Sq Ft", self.sqft.to_string()),
            ("Parking", self.parking.to_string()),
        ];
        if let Some(year) = self.year_built {
            stats.push(("Built", year.to_string()));
        }
        stats
    }
}

/// Format whole dollars with thousands separators.
#[must_use]
pub fn format_price(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A blog article teaser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Identifier.
    pub id: u32,
    /// Headline.
    pub title: String,
    /// Teaser text.
    pub excerpt: String,
    /// Category slug (`buying-tips`).
    pub category: String,
    /// Author name.
    pub author: String,
    /// Publication date.
    pub published: NaiveDate,
    /// Estimated reading time in minutes.
    pub read_minutes: u8,
    /// Header image.
    pub image: MediaItem,
    /// Pinned above the grid when no search is active.
    #[serde(default)]
    pub featured: bool,
}

impl BlogPost {
    /// Category slug rendered as words: `market-trends` → `Market Trends`.
    #[must_use]
    pub fn category_label(&self) -> String {
        title_case_slug(&self.category)
    }

    /// Date as `March 15, 2025`.
    #[must_use]
    pub fn published_label(&self) -> String {
        self.published.format("%B %-d, %Y").to_string()
    }

    /// Reading time as `5 min read`.
    #[must_use]
    pub fn read_time_label(&self) -> String {
        format!("{} min read", self.read_minutes)
    }

    /// Case-insensitive match against title or excerpt.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.excerpt.to_lowercase().contains(&term)
    }
}

/// Turn a dash-separated slug into capitalized words.
#[must_use]
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Blog posts selected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogListing<'a> {
    /// The pinned post; only present when no search term is active.
    pub featured: Option<&'a BlogPost>,
    /// Non-featured posts matching the search term.
    pub posts: Vec<&'a BlogPost>,
}

impl<'a> BlogListing<'a> {
    /// Filter `posts` by `term`.
    ///
    /// A blank term matches everything. The first featured post is pinned
    /// only when no search is active and never repeats in `posts`.
    #[must_use]
    pub fn search(posts: &'a [BlogPost], term: &str) -> Self {
        let term = term.trim();
        let featured = if term.is_empty() {
            posts.iter().find(|p| p.featured)
        } else {
            None
        };
        let posts = posts
            .iter()
            .filter(|p| !p.featured && p.matches(term))
            .collect();
        Self { featured, posts }
    }

    /// `true` when nothing at all will be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.posts.is_empty()
    }
}

/// A member of the agency team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Full name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Portrait.
    pub image: MediaItem,
    /// Short biography.
    pub bio: String,
}

/// One question/answer block on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutEntry {
    /// Heading ("Who We Are").
    pub question: String,
    /// Body text.
    pub answer: String,
}

/// The full content set of the site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Property listings.
    pub projects: Vec<Project>,
    /// Blog posts, newest first.
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    /// Team members.
    #[serde(default)]
    pub team: Vec<TeamMember>,
    /// About page entries.
    #[serde(default)]
    pub about: Vec<AboutEntry>,
}

impl Catalog {
    /// Check that the catalog can back the site.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentInvalid`] when there are no projects (the
    /// detail page's default record would be missing) or when project or
    /// post ids repeat.
    pub fn validate(&self) -> Result<()> {
        if self.projects.is_empty() {
            return Err(Error::content_invalid("catalog has no projects"));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id) {
                return Err(Error::content_invalid(format!(
                    "duplicate project id {}",
                    project.id
                )));
            }
        }

        seen.clear();
        for post in &self.posts {
            if !seen.insert(post.id) {
                return Err(Error::content_invalid(format!(
                    "duplicate blog post id {}",
                    post.id
                )));
            }
        }

        Ok(())
    }

    /// Project by id.
    #[must_use]
    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
