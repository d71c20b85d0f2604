//! Page handlers and their templates.
//!
//! Every page is rendered on the server from the request's query string.
//! Carousel arrows, thumbnails and section tabs are plain links that encode
//! the next state, so pages work without scripts; the live channel only
//! patches the same markup in place.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Utc};
use tracing::{debug, error};

use super::forms::{FormState, FormView};
use super::AppState;
use crate::config::SiteConfig;
use crate::content::{AboutEntry, BlogListing, BlogPost, FloorPlan, MediaItem, Project, TeamMember};
use crate::error::{Error, Result};
use crate::routes::{self, BlogQuery, DetailQuery, Page, FLOOR_PLAN_CAROUSEL, GALLERY_CAROUSEL};
use crate::widgets::{Carousel, FormKind, Section};

/// Hero video on the home page and virtual tour fallback.
const HERO_VIDEO: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// One navbar link.
#[derive(Debug, Clone)]
pub struct NavLink {
    /// Visible text.
    pub label: &'static str,
    /// Link target.
    pub href: &'static str,
    /// Whether this is the current page's entry.
    pub active: bool,
}

/// Navbar and footer data shared by every page.
#[derive(Debug, Clone)]
pub struct Chrome {
    /// Document title.
    pub title: String,
    /// Agency contact details for the footer.
    pub site: SiteConfig,
    /// `tel:` target for the navbar phone link.
    pub phone_href: String,
    /// Navbar entries.
    pub nav: Vec<NavLink>,
    /// Live channel URL for this view, when live updates are enabled.
    pub live_url: Option<String>,
    /// Copyright year.
    pub year: i32,
}

impl Chrome {
    fn new(state: &AppState, page: Page, title: impl Into<String>, live_query: &str) -> Self {
        let site = state.config.site.clone();
        let active = page.nav_entry();
        let title = title.into();
        let title = if title.is_empty() {
            site.name.clone()
        } else {
            format!("{title} | {}", site.name)
        };

        Self {
            title,
            phone_href: site.phone_href(),
            site,
            nav: Page::NAV
                .iter()
                .map(|&entry| NavLink {
                    label: entry.label(),
                    href: entry.href(),
                    active: entry == active,
                })
                .collect(),
            live_url: state
                .config
                .server
                .live_updates
                .then(|| format!("/live?page={}{live_query}", page.slug())),
            year: Utc::now().year(),
        }
    }
}

/// One slide of a carousel.
#[derive(Debug, Clone)]
pub struct SlideView {
    /// Position in the carousel.
    pub index: usize,
    /// Media URL.
    pub src: String,
    /// Whether the media is a video.
    pub is_video: bool,
    /// Link that shows this slide.
    pub href: String,
    /// Whether this is the current slide.
    pub active: bool,
}

/// A carousel as rendered: current slide, arrows and indicators.
#[derive(Debug, Clone)]
pub struct CarouselView {
    /// Key the live channel addresses this carousel by.
    pub key: String,
    /// Current position.
    pub index: usize,
    /// Number of slides.
    pub len: usize,
    /// Current media URL.
    pub src: String,
    /// Whether the current media is a video.
    pub is_video: bool,
    /// Link for the previous arrow.
    pub prev_href: String,
    /// Link for the next arrow.
    pub next_href: String,
    /// Every slide, for dots and thumbnails.
    pub slides: Vec<SlideView>,
    /// Whether the carousel advances on its own.
    pub auto_advance: bool,
}

impl CarouselView {
    fn new<F>(key: impl Into<String>, carousel: &Carousel<MediaItem>, href: F) -> Self
    where
        F: Fn(usize) -> String,
    {
        let current = carousel.current();
        Self {
            key: key.into(),
            index: carousel.index(),
            len: carousel.len(),
            src: current.as_str().to_string(),
            is_video: current.is_video(),
            prev_href: href(carousel.peek_previous()),
            next_href: href(carousel.peek_next()),
            slides: carousel
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| SlideView {
                    index,
                    src: item.as_str().to_string(),
                    is_video: item.is_video(),
                    href: href(index),
                    active: index == carousel.index(),
                })
                .collect(),
            auto_advance: false,
        }
    }

    fn auto_advancing(mut self, on: bool) -> Self {
        self.auto_advance = on;
        self
    }
}

/// A project card on the home page.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub href: String,
    pub carousel: CarouselView,
}

/// `GET /`
#[derive(Debug, Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub chrome: Chrome,
    pub hero_video: &'static str,
    pub cards: Vec<ProjectCard>,
    pub call_back: FormView,
}

/// `GET /about`
#[derive(Debug, Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub chrome: Chrome,
    pub team: Vec<TeamMember>,
    pub entries: Vec<AboutEntry>,
}

/// `GET /projects`
#[derive(Debug, Template)]
#[template(path = "projects.html")]
pub struct ProjectsPage {
    pub chrome: Chrome,
    pub projects: Vec<Project>,
}

/// A section tab on the detail page.
#[derive(Debug, Clone)]
pub struct SectionTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// A floor plan button and its details.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub index: usize,
    pub name: String,
    pub sqft: u32,
    pub ceiling_height: String,
    pub image: String,
    pub href: String,
    pub active: bool,
}

/// `GET /projects/{id}`
#[derive(Debug, Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailPage {
    pub chrome: Chrome,
    pub project: Project,
    pub stats: Vec<(&'static str, String)>,
    pub section: &'static str,
    pub tabs: Vec<SectionTab>,
    pub gallery: CarouselView,
    pub tour: Option<String>,
    pub poster: String,
    pub plans: Vec<PlanView>,
    pub plan_carousel: Option<CarouselView>,
    pub inquiry: FormView,
}

/// `GET /blog`
#[derive(Debug, Template)]
#[template(path = "blog.html")]
pub struct BlogPage {
    pub chrome: Chrome,
    pub term: String,
    pub featured: Option<BlogPost>,
    pub posts: Vec<BlogPost>,
    pub empty: bool,
    pub newsletter: FormView,
}

/// `GET /contact`
#[derive(Debug, Template)]
#[template(path = "contact.html")]
pub struct ContactPage {
    pub chrome: Chrome,
    pub call_request: FormView,
    pub message: FormView,
}

/// Any unknown path or project.
#[derive(Debug, Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub chrome: Chrome,
    pub message: String,
}

/// Rendered when a handler fails. Carries no shared chrome.
#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: &'static str,
}

fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}

fn html<T: Template>(status: StatusCode, page: &T) -> Result<Response> {
    Ok((status, render(page)?).into_response())
}

/// Status for a page carrying a form: rejected drafts are unprocessable.
fn form_status(forms: &[&FormState]) -> StatusCode {
    if forms.iter().any(|form| !form.missing().is_empty()) {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    }
}

/// Home link encoding every card's position. Zero positions are omitted.
fn home_href(positions: &[(u32, usize)]) -> String {
    let params: Vec<String> = positions
        .iter()
        .filter(|(_, index)| *index > 0)
        .map(|(id, index)| format!("{}={index}", routes::card_image_param(*id)))
        .collect();
    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

fn detail_href(id: u32, section: Section, image: usize, plan: usize) -> String {
    format!("/projects/{id}?section={section}&image={image}&plan={plan}")
}

pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    render_home(&state, &params, FormState::fresh(FormKind::CallBack)).await
}

pub(super) async fn render_home(
    state: &AppState,
    params: &HashMap<String, String>,
    call_back: FormState,
) -> Result<Response> {
    let projects = state.content.projects().await?;
    let carousels: Vec<(&Project, Carousel<MediaItem>)> = Project::home_cards(&projects)
        .into_iter()
        .filter_map(|project| {
            let start = routes::card_image(params, project.id);
            Carousel::starting_at(project.gallery(), start).map(|c| (project, c))
        })
        .collect();
    let positions: Vec<(u32, usize)> = carousels
        .iter()
        .map(|(project, carousel)| (project.id, carousel.index()))
        .collect();

    let cards = carousels
        .iter()
        .enumerate()
        .map(|(slot, (project, carousel))| {
            let href = |index: usize| {
                let mut moved = positions.clone();
                moved[slot].1 = index;
                home_href(&moved)
            };
            ProjectCard {
                id: project.id,
                title: project.title.clone(),
                summary: project.summary.clone(),
                href: format!("/projects/{}", project.id),
                carousel: CarouselView::new(routes::card_carousel(project.id), carousel, href),
            }
        })
        .collect();

    let live_query: String = positions
        .iter()
        .map(|(id, index)| format!("&{}={index}", routes::card_image_param(*id)))
        .collect();

    let status = form_status(&[&call_back]);
    let page = HomePage {
        chrome: Chrome::new(state, Page::Home, "", &live_query),
        hero_video: HERO_VIDEO,
        cards,
        call_back: call_back.view(Page::Home.pattern()),
    };
    html(status, &page)
}

pub async fn about(State(state): State<AppState>) -> Result<Response> {
    let page = AboutPage {
        chrome: Chrome::new(&state, Page::About, "About", ""),
        team: state.content.team().await?,
        entries: state.content.about().await?,
    };
    html(StatusCode::OK, &page)
}

pub async fn projects(State(state): State<AppState>) -> Result<Response> {
    let page = ProjectsPage {
        chrome: Chrome::new(&state, Page::Projects, "Projects", ""),
        projects: state.content.projects().await?,
    };
    html(StatusCode::OK, &page)
}

/// `GET /projects/{id}`
pub async fn project_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Response> {
    render_detail(&state, Some(&raw_id), &query, FormState::fresh(FormKind::Inquiry)).await
}

/// `GET /projects/` with no id: the default project.
pub async fn default_project(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Result<Response> {
    render_detail(&state, None, &query, FormState::fresh(FormKind::Inquiry)).await
}

pub(super) async fn render_detail(
    state: &AppState,
    raw_id: Option<&str>,
    query: &DetailQuery,
    inquiry: FormState,
) -> Result<Response> {
    let id = routes::project_id_param(raw_id);
    let Some(project) = state.content.project(id).await? else {
        debug!(id, "no such project");
        return render_not_found(state, format!("We couldn't find a project with id {id}."));
    };

    let section = query.section();
    let gallery = Carousel::starting_at(project.gallery(), query.image())
        .ok_or_else(|| Error::internal("project gallery is empty"))?;
    let plan_carousel = Carousel::starting_at(plan_images(&project.floor_plans), query.plan());
    let plan_index = plan_carousel.as_ref().map_or(0, Carousel::index);
    let image_index = gallery.index();

    let tabs = Section::ALL
        .iter()
        .map(|&tab| SectionTab {
            slug: tab.slug(),
            label: tab.label(),
            href: detail_href(id, tab, image_index, plan_index),
            active: tab == section,
        })
        .collect();

    let plans = project
        .floor_plans
        .iter()
        .enumerate()
        .map(|(index, plan)| PlanView {
            index,
            name: plan.name.clone(),
            sqft: plan.sqft,
            ceiling_height: plan.ceiling_height.clone(),
            image: plan.image.as_str().to_string(),
            href: detail_href(id, Section::FloorPlans, image_index, index),
            active: index == plan_index,
        })
        .collect();

    let gallery_view = CarouselView::new(GALLERY_CAROUSEL, &gallery, |index| {
        detail_href(id, section, index, plan_index)
    })
    .auto_advancing(section.auto_advances());
    let plan_view = plan_carousel.as_ref().map(|carousel| {
        CarouselView::new(FLOOR_PLAN_CAROUSEL, carousel, |index| {
            detail_href(id, Section::FloorPlans, image_index, index)
        })
    });

    let live_query =
        format!("&id={id}&section={section}&image={image_index}&plan={plan_index}");
    let status = form_status(&[&inquiry]);
    let page = ProjectDetailPage {
        chrome: Chrome::new(state, Page::ProjectDetail, project.title.as_str(), &live_query),
        stats: project.stats(),
        section: section.slug(),
        tabs,
        poster: poster_for(&project),
        gallery: gallery_view,
        tour: project.tour.as_ref().map(|tour| tour.as_str().to_string()),
        plans,
        plan_carousel: plan_view,
        inquiry: inquiry.view(format!("/projects/{id}/inquiry")),
        project,
    };
    html(status, &page)
}

/// First still image of the gallery, for the tour video's poster frame.
fn poster_for(project: &Project) -> String {
    project
        .gallery()
        .into_iter()
        .find(|item| !item.is_video())
        .unwrap_or_else(|| project.cover.clone())
        .as_str()
        .to_string()
}

fn plan_images(plans: &[FloorPlan]) -> Vec<MediaItem> {
    plans.iter().map(|plan| plan.image.clone()).collect()
}

pub async fn blog(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Response> {
    render_blog(&state, &query.q, FormState::fresh(FormKind::Newsletter)).await
}

pub(super) async fn render_blog(
    state: &AppState,
    term: &str,
    newsletter: FormState,
) -> Result<Response> {
    let posts = state.content.posts().await?;
    let listing = BlogListing::search(&posts, term);
    let status = form_status(&[&newsletter]);
    let page = BlogPage {
        chrome: Chrome::new(state, Page::Blog, "Blog", ""),
        term: term.trim().to_string(),
        empty: listing.is_empty(),
        featured: listing.featured.cloned(),
        posts: listing.posts.into_iter().cloned().collect(),
        newsletter: newsletter.view(Page::Blog.pattern()),
    };
    html(status, &page)
}

pub async fn contact(State(state): State<AppState>) -> Result<Response> {
    render_contact(
        &state,
        FormState::fresh(FormKind::CallRequest),
        FormState::fresh(FormKind::ContactMessage),
    )
}

pub(super) fn render_contact(
    state: &AppState,
    call_request: FormState,
    message: FormState,
) -> Result<Response> {
    let status = form_status(&[&call_request, &message]);
    let page = ContactPage {
        chrome: Chrome::new(state, Page::Contact, "Contact", ""),
        call_request: call_request.view("/contact/call"),
        message: message.view("/contact/message"),
    };
    html(status, &page)
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> Result<Response> {
    render_not_found(&state, "The page you're looking for doesn't exist.")
}

fn render_not_found(state: &AppState, message: impl Into<String>) -> Result<Response> {
    let page = NotFoundPage {
        chrome: Chrome::new(state, Page::Home, "Not Found", ""),
        message: message.into(),
    };
    html(StatusCode::NOT_FOUND, &page)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let page = ErrorPage {
            message: "Something went wrong on our side. Please try again shortly.",
        };
        let body = page
            .render()
            .unwrap_or_else(|_| page.message.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_href_omits_zero_positions() {
        assert_eq!(home_href(&[(1, 0), (2, 0)]), "/");
        assert_eq!(home_href(&[(1, 2), (2, 0)]), "/?img1=2");
        assert_eq!(home_href(&[(1, 1), (2, 2)]), "/?img1=1&img2=2");
    }

    #[test]
    fn test_detail_href() {
        assert_eq!(
            detail_href(3, Section::FloorPlans, 1, 0),
            "/projects/3?section=floor-plans&image=1&plan=0"
        );
    }

    #[test]
    fn test_carousel_view_links() {
        let items = vec![
            MediaItem::new("a.jpg"),
            MediaItem::new("b.jpg"),
            MediaItem::new("c.jpg"),
        ];
        let carousel = Carousel::starting_at(items, 0).unwrap();
        let view = CarouselView::new("gallery", &carousel, |i| format!("?image={i}"));

        assert_eq!(view.src, "a.jpg");
        assert_eq!(view.prev_href, "?image=2");
        assert_eq!(view.next_href, "?image=1");
        assert_eq!(view.slides.iter().filter(|s| s.active).count(), 1);
        assert!(!view.auto_advance);
    }

    #[test]
    fn test_carousel_view_flags_video() {
        let items = vec![MediaItem::new("front.jpg"), MediaItem::new("tour.MP4")];
        let carousel = Carousel::starting_at(items, 1).unwrap();
        let view = CarouselView::new("gallery", &carousel, |i| format!("?image={i}"));

        assert!(view.is_video);
        assert!(!view.slides[0].is_video);
        assert!(view.slides[1].is_video);
    }

    #[test]
    fn test_form_status() {
        let fresh = FormState::fresh(FormKind::CallBack);
        assert_eq!(form_status(&[&fresh]), StatusCode::OK);
    }

    #[test]
    fn test_error_page_renders() {
        let response = Error::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
