//! Scroll-section activation.
//!
//! The page is a stack of full-viewport sections. A visibility observer
//! reports when a section crosses [`ACTIVATION_THRESHOLD`] of its height in
//! view, and [`SectionTracker`] turns those reports into a single active
//! section for the dot navigation.
//!
//! When several sections cross the threshold in the same batch the last one
//! reported wins. Highlighting is cosmetic and settles once scrolling stops.

/// A scroll target on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Element id, also the URL fragment.
    pub id: &'static str,
    pub label: &'static str,
}

/// Full-viewport sections in page order, as listed by the dot navigation.
pub const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "problem", label: "The Problem" },
    Section { id: "operations-dilemma", label: "Dilemma" },
    Section { id: "benefits", label: "Benefits" },
    Section { id: "contact", label: "Contact" },
];

/// Links in the top navigation bar.
pub const NAV_LINKS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "problem", label: "The Problem" },
    Section { id: "benefits", label: "Why DAIV.PRO?" },
    Section { id: "contact", label: "Get Started" },
];

/// Fraction of a section that must be in view for it to become active.
pub const ACTIVATION_THRESHOLD: f64 = 0.5;

/// One visibility report for a tracked region.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub region: String,
    /// Visible fraction of the region, `0.0..=1.0`.
    pub ratio: f64,
    /// Whether `ratio` is at or above the observer's threshold.
    pub intersecting: bool,
}

/// A source of visibility reports.
///
/// Implementations stand in for whatever the platform offers (a browser
/// `IntersectionObserver`, a layout engine, a test script).
pub trait VisibilityObserver {
    /// Start tracking `regions`, reporting threshold crossings at `threshold`.
    ///
    /// Regions the observer has no geometry for are ignored.
    fn observe(&mut self, regions: &[&str], threshold: f64);

    /// Take all reports produced since the last call, in emission order.
    fn drain(&mut self) -> Vec<VisibilityEntry>;
}

/// A vertical span of the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    /// Visible fraction of this span inside `[scroll, scroll + viewport)`.
    pub fn visible_ratio(self, scroll: f64, viewport: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let top = self.top.max(scroll);
        let bottom = (self.top + self.height).min(scroll + viewport);
        ((bottom - top).max(0.0) / self.height).min(1.0)
    }
}

#[derive(Debug)]
struct Tracked {
    region: String,
    span: Span,
    above: bool,
}

/// A [`VisibilityObserver`] computed from page geometry.
///
/// Like a browser intersection observer, it reports every region once when
/// observation starts and afterwards only regions whose at-or-above
/// threshold state flipped.
#[derive(Debug)]
pub struct ViewportObserver {
    layout: Vec<(String, Span)>,
    tracked: Vec<Tracked>,
    threshold: f64,
    scroll: f64,
    viewport: f64,
    pending: Vec<VisibilityEntry>,
}

impl ViewportObserver {
    /// An observer with a viewport of `viewport` pixels and no regions.
    pub fn new(viewport: f64) -> Self {
        Self {
            layout: Vec::new(),
            tracked: Vec::new(),
            threshold: ACTIVATION_THRESHOLD,
            scroll: 0.0,
            viewport,
            pending: Vec::new(),
        }
    }

    /// Stack `ids` top to bottom, each exactly one viewport tall.
    pub fn full_page(ids: &[&str], viewport: f64) -> Self {
        let mut observer = Self::new(viewport);
        let mut top = 0.0;
        for id in ids {
            observer = observer.with_region(id, top, viewport);
            top += viewport;
        }
        observer
    }

    /// Declare the geometry of a region.
    #[must_use]
    pub fn with_region(mut self, id: &str, top: f64, height: f64) -> Self {
        self.layout.push((id.to_owned(), Span { top, height }));
        self
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Move the viewport to `offset` and report threshold crossings.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll = offset;
        self.recompute();
    }

    /// Change the viewport height and report threshold crossings.
    pub fn resize(&mut self, viewport: f64) {
        self.viewport = viewport;
        self.recompute();
    }

    fn entry(&self, tracked: &Tracked) -> VisibilityEntry {
        let ratio = tracked.span.visible_ratio(self.scroll, self.viewport);
        VisibilityEntry {
            region: tracked.region.clone(),
            ratio,
            intersecting: ratio >= self.threshold,
        }
    }

    fn recompute(&mut self) {
        let mut reports = Vec::new();
        for tracked in &self.tracked {
            let entry = self.entry(tracked);
            if entry.intersecting != tracked.above {
                reports.push(entry);
            }
        }
        for report in &reports {
            if let Some(tracked) = self.tracked.iter_mut().find(|t| t.region == report.region) {
                tracked.above = report.intersecting;
            }
        }
        self.pending.extend(reports);
    }
}

impl VisibilityObserver for ViewportObserver {
    fn observe(&mut self, regions: &[&str], threshold: f64) {
        self.threshold = threshold;
        self.tracked = regions
            .iter()
            .filter_map(|id| {
                self.layout
                    .iter()
                    .find(|(region, _)| region == id)
                    .map(|(region, span)| Tracked {
                        region: region.clone(),
                        span: *span,
                        above: false,
                    })
            })
            .collect();

        let initial: Vec<_> = self.tracked.iter().map(|t| self.entry(t)).collect();
        for (tracked, entry) in self.tracked.iter_mut().zip(&initial) {
            tracked.above = entry.intersecting;
        }
        self.pending.extend(initial);
    }

    fn drain(&mut self) -> Vec<VisibilityEntry> {
        std::mem::take(&mut self.pending)
    }
}

/// A change of the active section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub previous: String,
    pub current: String,
}

/// Keeps the active section in sync with an observer.
#[derive(Debug)]
pub struct SectionTracker<O> {
    observer: O,
    active: String,
}

impl<O: VisibilityObserver> SectionTracker<O> {
    /// Track `sections` through `observer`, starting on the first section.
    pub fn new(mut observer: O, sections: &[Section]) -> Self {
        let ids: Vec<&str> = sections.iter().map(|s| s.id).collect();
        observer.observe(&ids, ACTIVATION_THRESHOLD);
        Self {
            observer,
            active: sections.first().map(|s| s.id.to_owned()).unwrap_or_default(),
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Apply pending reports in order and return the resulting changes.
    ///
    /// Every intersecting report becomes active in turn, so the last one in
    /// a batch wins. Reports of regions dropping below the threshold are
    /// ignored.
    pub fn pump(&mut self) -> Vec<Activation> {
        let mut changes = Vec::new();
        for entry in self.observer.drain() {
            if !entry.intersecting || entry.region == self.active {
                continue;
            }
            let previous = std::mem::replace(&mut self.active, entry.region);
            changes.push(Activation {
                previous,
                current: self.active.clone(),
            });
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f64 = 800.0;

    fn page_tracker() -> SectionTracker<ViewportObserver> {
        let ids: Vec<&str> = SECTIONS.iter().map(|s| s.id).collect();
        SectionTracker::new(ViewportObserver::full_page(&ids, VIEWPORT), SECTIONS)
    }

    /// Replays canned batches of reports.
    struct ScriptedObserver {
        observed: Vec<String>,
        threshold: f64,
        batches: Vec<Vec<VisibilityEntry>>,
    }

    impl VisibilityObserver for ScriptedObserver {
        fn observe(&mut self, regions: &[&str], threshold: f64) {
            self.observed = regions.iter().map(|r| (*r).to_owned()).collect();
            self.threshold = threshold;
        }

        fn drain(&mut self) -> Vec<VisibilityEntry> {
            if self.batches.is_empty() {
                Vec::new()
            } else {
                self.batches.remove(0)
            }
        }
    }

    fn hit(region: &str) -> VisibilityEntry {
        VisibilityEntry {
            region: region.to_owned(),
            ratio: 0.6,
            intersecting: true,
        }
    }

    // ── geometry ─────────────────────────────────────────────────────

    #[test]
    fn visible_ratio_clamps_to_viewport() {
        let span = Span { top: 800.0, height: 800.0 };
        assert!((span.visible_ratio(0.0, 800.0) - 0.0).abs() < f64::EPSILON);
        assert!((span.visible_ratio(400.0, 800.0) - 0.5).abs() < f64::EPSILON);
        assert!((span.visible_ratio(800.0, 800.0) - 1.0).abs() < f64::EPSILON);
        assert!((span.visible_ratio(0.0, 5000.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_height_region_is_never_visible() {
        let span = Span { top: 0.0, height: 0.0 };
        assert!(span.visible_ratio(0.0, 800.0).abs() < f64::EPSILON);
    }

    // ── observer ─────────────────────────────────────────────────────

    #[test]
    fn observe_reports_every_region_once() {
        let mut observer = ViewportObserver::full_page(&["a", "b", "c"], VIEWPORT);
        observer.observe(&["a", "b", "c"], ACTIVATION_THRESHOLD);
        let entries = observer.drain();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].intersecting);
        assert!(!entries[1].intersecting);
        assert!(observer.drain().is_empty());
    }

    #[test]
    fn observe_ignores_regions_without_geometry() {
        let mut observer = ViewportObserver::full_page(&["a"], VIEWPORT);
        observer.observe(&["a", "ghost"], ACTIVATION_THRESHOLD);
        let regions: Vec<_> = observer.drain().into_iter().map(|e| e.region).collect();
        assert_eq!(regions, vec!["a"]);
    }

    #[test]
    fn scrolling_reports_only_threshold_crossings() {
        let mut observer = ViewportObserver::full_page(&["a", "b", "c"], VIEWPORT);
        observer.observe(&["a", "b", "c"], ACTIVATION_THRESHOLD);
        observer.drain();

        observer.scroll_to(200.0);
        assert!(observer.drain().is_empty(), "a still dominant at 25% scroll");

        observer.scroll_to(600.0);
        let entries = observer.drain();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.region.as_str(), e.intersecting))
            .collect();
        assert_eq!(summary, vec![("a", false), ("b", true)]);
    }

    #[test]
    fn resize_can_bring_regions_over_threshold() {
        let mut observer = ViewportObserver::full_page(&["a", "b"], VIEWPORT);
        observer.observe(&["a", "b"], ACTIVATION_THRESHOLD);
        observer.drain();
        observer.resize(1600.0);
        let entries = observer.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].region, "b");
        assert!(entries[0].intersecting);
    }

    // ── tracker ──────────────────────────────────────────────────────

    #[test]
    fn tracker_starts_on_first_section_and_registers_all() {
        let scripted = ScriptedObserver {
            observed: Vec::new(),
            threshold: 0.0,
            batches: Vec::new(),
        };
        let mut tracker = SectionTracker::new(scripted, SECTIONS);
        assert_eq!(tracker.active(), "home");
        assert_eq!(tracker.observer_mut().observed.len(), SECTIONS.len());
        assert!((tracker.observer_mut().threshold - ACTIVATION_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn tracker_follows_scroll() {
        let mut tracker = page_tracker();
        assert!(tracker.pump().is_empty(), "home is already active");

        tracker.observer_mut().scroll_to(VIEWPORT * 3.0);
        let changes = tracker.pump();
        assert_eq!(tracker.active(), "benefits");
        assert_eq!(
            changes,
            vec![Activation {
                previous: "home".to_owned(),
                current: "benefits".to_owned()
            }]
        );
    }

    #[test]
    fn last_writer_wins_within_a_batch() {
        let scripted = ScriptedObserver {
            observed: Vec::new(),
            threshold: 0.0,
            batches: vec![vec![hit("problem"), hit("benefits")]],
        };
        let mut tracker = SectionTracker::new(scripted, SECTIONS);
        let changes = tracker.pump();
        assert_eq!(changes.len(), 2);
        assert_eq!(tracker.active(), "benefits");
    }

    #[test]
    fn leaving_reports_do_not_change_active_section() {
        let scripted = ScriptedObserver {
            observed: Vec::new(),
            threshold: 0.0,
            batches: vec![vec![VisibilityEntry {
                region: "problem".to_owned(),
                ratio: 0.2,
                intersecting: false,
            }]],
        };
        let mut tracker = SectionTracker::new(scripted, SECTIONS);
        assert!(tracker.pump().is_empty());
        assert_eq!(tracker.active(), "home");
    }

    #[test]
    fn nav_links_point_at_existing_sections() {
        for link in NAV_LINKS {
            assert!(SECTIONS.iter().any(|s| s.id == link.id), "{} has no section", link.id);
        }
    }
}
