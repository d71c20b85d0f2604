//! Page routes and the parameters they accept.

use std::collections::HashMap;

use serde::Deserialize;

use crate::widgets::Section;

/// Project shown when the detail route carries no usable id.
pub const DEFAULT_PROJECT_ID: u32 = 1;

/// A top-level page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page with featured projects.
    Home,
    /// Agency story, team and Q&A.
    About,
    /// Project listing.
    Projects,
    /// One project in detail.
    ProjectDetail,
    /// Blog listing and search.
    Blog,
    /// Contact details and forms.
    Contact,
}

impl Page {
    /// Every page, in route table order.
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Projects,
        Page::ProjectDetail,
        Page::Blog,
        Page::Contact,
    ];

    /// Pages linked from the navbar, in display order.
    pub const NAV: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Projects,
        Page::Blog,
        Page::Contact,
    ];

    /// Route pattern as registered with the router.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Projects => "/projects",
            Self::ProjectDetail => "/projects/{id}",
            Self::Blog => "/blog",
            Self::Contact => "/contact",
        }
    }

    /// Navbar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Projects | Self::ProjectDetail => "Projects",
            Self::Blog => "Blog",
            Self::Contact => "Contact",
        }
    }

    /// Link target for the navbar. The detail page has none of its own.
    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Self::ProjectDetail => Self::Projects.pattern(),
            other => other.pattern(),
        }
    }

    /// Navbar entry highlighted while this page is shown.
    #[must_use]
    pub fn nav_entry(self) -> Page {
        match self {
            Self::ProjectDetail => Self::Projects,
            other => other,
        }
    }

    /// Short description, used by the `routes` command.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Home => "hero, featured projects and call-back form",
            Self::About => "agency story, team and Q&A",
            Self::Projects => "all projects",
            Self::ProjectDetail => {
                "gallery, virtual tour and floor plans (?section=&image=&plan=)"
            }
            Self::Blog => "articles with search (?q=)",
            Self::Contact => "contact details, call request and message forms",
        }
    }

    /// Slug used by the live channel to say which page a view shows.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Projects => "projects",
            Self::ProjectDetail => "project",
            Self::Blog => "blog",
            Self::Contact => "contact",
        }
    }

    /// Parse a live-channel page slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }
}

/// Project id from the raw `{id}` path segment.
///
/// A missing or non-numeric id selects [`DEFAULT_PROJECT_ID`].
#[must_use]
pub fn project_id_param(raw: Option<&str>) -> u32 {
    raw.and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEFAULT_PROJECT_ID)
}

/// Lenient index parsing for query strings: anything unusable is `0`.
#[must_use]
pub fn index_param(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(0)
}

/// Query string of the project detail page.
///
/// Fields are kept raw so that bad values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DetailQuery {
    /// Selected section slug.
    pub section: Option<String>,
    /// Gallery image index.
    pub image: Option<String>,
    /// Floor plan index.
    pub plan: Option<String>,
}

impl DetailQuery {
    /// Selected section, defaulting to the gallery.
    #[must_use]
    pub fn section(&self) -> Section {
        Section::from_query(self.section.as_deref())
    }

    /// Requested gallery index, not yet wrapped.
    #[must_use]
    pub fn image(&self) -> usize {
        index_param(self.image.as_deref())
    }

    /// Requested floor plan index, not yet wrapped.
    #[must_use]
    pub fn plan(&self) -> usize {
        index_param(self.plan.as_deref())
    }
}

/// Query string of the blog page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogQuery {
    /// Search term.
    pub q: String,
}

/// Query parameter holding the position of a project card's carousel on
/// the home page.
#[must_use]
pub fn card_image_param(project_id: u32) -> String {
    format!("img{project_id}")
}

/// Requested position of a project card's carousel, not yet wrapped.
#[must_use]
pub fn card_image(query: &HashMap<String, String>, project_id: u32) -> usize {
    index_param(query.get(&card_image_param(project_id)).map(String::as_str))
}

/// Live-channel carousel key for the detail page gallery.
pub const GALLERY_CAROUSEL: &str = "gallery";

/// Live-channel carousel key for the detail page floor plans.
pub const FLOOR_PLAN_CAROUSEL: &str = "floor-plans";

/// Live-channel carousel key for a project card on the home page.
#[must_use]
pub fn card_carousel(project_id: u32) -> String {
    format!("project-{project_id}")
}
