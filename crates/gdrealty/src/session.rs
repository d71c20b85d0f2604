//! Live view sessions.
//!
//! A [`LiveSession`] owns the transient state of one open page: its
//! carousels, the detail page section, and the navbar scroll toggle. It runs
//! as a single task that applies client [`UiEvent`]s, auto-advance
//! [`Tick`]s and scroll flips in the order they are received, and answers
//! with [`ViewUpdate`] patches.
//!
//! The gallery ticker only runs while the gallery section is shown. Leaving
//! the gallery stops it; ticks it had already queued carry a stale
//! generation and are dropped.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::UiConfig;
use crate::content::{MediaItem, Project};
use crate::routes::{self, DetailQuery, FLOOR_PLAN_CAROUSEL, GALLERY_CAROUSEL};
use crate::ticker::{AutoAdvance, AutoAdvanceGuard, Tick};
use crate::widgets::{wrap_index, Carousel, ScrollFeed, Section};

/// Message from the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The page was scrolled to `offset` pixels.
    Scroll {
        /// Vertical scroll offset.
        offset: u32,
    },
    /// Advance a carousel.
    Next {
        /// Carousel key.
        carousel: String,
    },
    /// Step a carousel back.
    Previous {
        /// Carousel key.
        carousel: String,
    },
    /// Show a specific slide, e.g. from a thumbnail or floor plan button.
    JumpTo {
        /// Carousel key.
        carousel: String,
        /// Requested position. Out-of-range positions wrap.
        index: usize,
    },
    /// Switch the detail page section.
    SelectSection {
        /// Section to show.
        section: Section,
    },
}

/// Patch sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewUpdate {
    /// Navbar treatment changed.
    Nav {
        /// Whether the page is scrolled past the threshold.
        scrolled: bool,
    },
    /// A carousel moved.
    Slide {
        /// Carousel key.
        carousel: String,
        /// New position.
        index: usize,
        /// Media shown at the new position.
        src: String,
        /// Whether that media is a video.
        video: bool,
    },
    /// The detail page section changed.
    Section {
        /// Section now shown.
        section: Section,
    },
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client stopped sending events.
    ClientClosed,
    /// The client stopped receiving updates.
    ClientGone,
    /// The server is shutting down.
    Shutdown,
}

/// State of one live page view.
#[derive(Debug, Clone)]
pub struct LiveSession {
    carousels: BTreeMap<String, Carousel<MediaItem>>,
    section: Option<Section>,
    scroll_threshold: u32,
    interval: Duration,
}

impl LiveSession {
    /// A session with only the navbar scroll toggle.
    #[must_use]
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            carousels: BTreeMap::new(),
            section: None,
            scroll_threshold: ui.scroll_threshold_px,
            interval: ui.auto_advance_interval(),
        }
    }

    /// Session for the home page: one manual carousel per project card,
    /// positioned from `img{id}` parameters.
    #[must_use]
    pub fn for_home(ui: &UiConfig, projects: &[Project], params: &HashMap<String, String>) -> Self {
        Project::home_cards(projects).into_iter().fold(Self::new(ui), |session, project| {
            let start = routes::card_image(params, project.id);
            match Carousel::starting_at(project.gallery(), start) {
                Some(carousel) => session.with_carousel(routes::card_carousel(project.id), carousel),
                None => session,
            }
        })
    }

    /// Session for a project detail page in the state described by `query`.
    #[must_use]
    pub fn for_project(ui: &UiConfig, project: &Project, query: &DetailQuery) -> Self {
        let mut session = Self::new(ui).with_section(query.section());

        if let Some(gallery) = Carousel::starting_at(project.gallery(), query.image()) {
            session = session.with_carousel(GALLERY_CAROUSEL, gallery);
        }

        let plans = project
            .floor_plans
            .iter()
            .map(|plan| plan.image.clone())
            .collect();
        if let Some(plans) = Carousel::starting_at(plans, query.plan()) {
            session = session.with_carousel(FLOOR_PLAN_CAROUSEL, plans);
        }

        session
    }

    /// Add a carousel under `key`.
    #[must_use]
    pub fn with_carousel(mut self, key: impl Into<String>, carousel: Carousel<MediaItem>) -> Self {
        self.carousels.insert(key.into(), carousel);
        self
    }

    /// Enable the section selector, starting at `section`.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    /// Current section, if this page has a selector.
    #[must_use]
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    /// Current position of a carousel.
    #[must_use]
    pub fn position(&self, carousel: &str) -> Option<usize> {
        self.carousels.get(carousel).map(Carousel::index)
    }

    /// Whether the gallery ticker should be running right now.
    #[must_use]
    pub fn auto_advance_active(&self) -> bool {
        self.section.is_some_and(Section::auto_advances)
            && self.carousels.contains_key(GALLERY_CAROUSEL)
    }

    /// Apply a carousel or section event.
    ///
    /// Scroll events are not state of the session itself; [`run`](Self::run)
    /// routes them through the scroll feed, so they produce nothing here.
    pub fn apply(&mut self, event: UiEvent) -> Vec<ViewUpdate> {
        match event {
            UiEvent::Scroll { .. } => Vec::new(),
            UiEvent::Next { carousel } => self.step(&carousel, Carousel::next),
            UiEvent::Previous { carousel } => self.step(&carousel, Carousel::previous),
            UiEvent::JumpTo { carousel, index } => self.step(&carousel, |c| {
                let index = wrap_index(index, c.len());
                c.jump_to(index)
            }),
            UiEvent::SelectSection { section } => match self.section {
                Some(current) if current != section => {
                    self.section = Some(section);
                    vec![ViewUpdate::Section { section }]
                }
                Some(_) => Vec::new(),
                None => {
                    debug!(%section, "section selected on a page without sections");
                    Vec::new()
                }
            },
        }
    }

    /// Apply a timer tick. Ticks not owned by `ticker` are stale and ignored.
    pub fn on_tick(&mut self, tick: Tick, ticker: Option<&AutoAdvanceGuard>) -> Option<ViewUpdate> {
        if !ticker.is_some_and(|guard| guard.owns(tick)) || !self.auto_advance_active() {
            trace!(generation = tick.generation, "dropping stale tick");
            return None;
        }
        self.step(GALLERY_CAROUSEL, Carousel::next).pop()
    }

    fn step<F>(&mut self, key: &str, mv: F) -> Vec<ViewUpdate>
    where
        F: FnOnce(&mut Carousel<MediaItem>) -> usize,
    {
        let Some(carousel) = self.carousels.get_mut(key) else {
            debug!(carousel = key, "event for unknown carousel");
            return Vec::new();
        };
        let index = mv(carousel);
        let current = carousel.current();
        vec![ViewUpdate::Slide {
            carousel: key.to_string(),
            index,
            src: current.as_str().to_string(),
            video: current.is_video(),
        }]
    }

    /// Drive the session until the client goes away or `shutdown` fires.
    ///
    /// The ticker and the scroll subscription are released on every exit
    /// path.
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<UiEvent>,
        outbound: mpsc::Sender<ViewUpdate>,
        shutdown: CancellationToken,
    ) -> SessionEnd {
        let feed = ScrollFeed::new();
        let mut scroll = feed.subscribe(self.scroll_threshold);

        let timers = shutdown.child_token();
        let (tick_tx, mut ticks) = mpsc::channel(4);
        let mut auto = AutoAdvance::new(self.interval, tick_tx, timers.clone());
        let mut ticker = self.auto_advance_active().then(|| auto.start());

        debug!(
            carousels = self.carousels.len(),
            section = ?self.section,
            auto_advance = ticker.is_some(),
            "live session started"
        );

        let end = loop {
            let updates = tokio::select! {
                biased;
                () = shutdown.cancelled() => break SessionEnd::Shutdown,
                Some(scrolled) = scroll.flipped() => vec![ViewUpdate::Nav { scrolled }],
                Some(tick) = ticks.recv() => self.on_tick(tick, ticker.as_ref()).into_iter().collect(),
                event = inbound.recv() => {
                    let Some(event) = event else {
                        break SessionEnd::ClientClosed;
                    };
                    trace!(?event, "ui event");
                    if let UiEvent::Scroll { offset } = event {
                        feed.publish(offset);
                        Vec::new()
                    } else {
                        let updates = self.apply(event);
                        match (self.auto_advance_active(), ticker.take()) {
                            (true, None) => ticker = Some(auto.start()),
                            (false, Some(guard)) => guard.stop().await,
                            (_, running) => ticker = running,
                        }
                        updates
                    }
                }
            };

            if !emit(&outbound, updates).await {
                break SessionEnd::ClientGone;
            }
        };

        timers.cancel();
        drop(ticker);
        drop(scroll);
        debug!(?end, "live session ended");
        end
    }
}

async fn emit(outbound: &mpsc::Sender<ViewUpdate>, updates: Vec<ViewUpdate>) -> bool {
    for update in updates {
        if outbound.send(update).await.is_err() {
            return false;
        }
    }
    true
}
