//! Per-session search state.

use std::time::{Duration, Instant};

use crate::config::SourceToggles;
use crate::pager::Pager;
use crate::state::types::Source;

/// How long autocomplete suggestions stay suppressed after a search is
/// committed, so the menu does not re-open on the query that was just run.
pub const SUGGESTION_COOLDOWN: Duration = Duration::from_millis(500);

/// What: Mutable state of one search session.
///
/// Inputs:
/// - Created at session start from the persisted source toggles.
/// - Mutated by query commits, toggle changes, and scroll events.
///
/// Output:
/// - Read by the query engine (query + toggles), the autocomplete index
///   (suppression deadline), and the pager embedded here.
///
/// Details:
/// - Discarded at session end; only the toggles round-trip through
///   [`crate::config`]. The per-source counts reflect the contribution of
///   each source to the most recent filter pass.
#[derive(Debug)]
pub struct SearchState {
    /// Committed free-text query.
    pub query: String,
    /// Which sources participate in filtering and autocomplete.
    pub toggles: SourceToggles,
    /// Items contributed by pacman in the last filter pass.
    pub pacman_count: usize,
    /// Items contributed by the AUR in the last filter pass.
    pub aur_count: usize,
    /// Items contributed by Flatpak in the last filter pass.
    pub flatpak_count: usize,
    /// Items contributed by Snap in the last filter pass.
    pub snap_count: usize,
    /// Incremental result window over the ranked sequence.
    pub pager: Pager,
    /// Deadline before which autocomplete stays quiet.
    suppress_suggestions_until: Option<Instant>,
}

impl SearchState {
    /// Create a session with an empty query and the given toggles.
    pub fn new(toggles: SourceToggles) -> Self {
        Self {
            query: String::new(),
            toggles,
            pacman_count: 0,
            aur_count: 0,
            flatpak_count: 0,
            snap_count: 0,
            pager: Pager::new(),
            suppress_suggestions_until: None,
        }
    }

    /// Commit a query and suppress autocomplete for [`SUGGESTION_COOLDOWN`].
    pub fn commit_search(&mut self, query: &str) {
        self.commit_search_at(query, Instant::now());
    }

    pub(crate) fn commit_search_at(&mut self, query: &str, now: Instant) {
        self.query = query.to_string();
        self.suppress_suggestions_until = Some(now + SUGGESTION_COOLDOWN);
    }

    /// Whether the autocomplete menu may currently open.
    pub fn suggestions_allowed(&self) -> bool {
        self.suggestions_allowed_at(Instant::now())
    }

    pub(crate) fn suggestions_allowed_at(&self, now: Instant) -> bool {
        self.suppress_suggestions_until.is_none_or(|until| now >= until)
    }

    /// Whether `source` is enabled for this session.
    pub fn enabled(&self, source: Source) -> bool {
        self.toggles.enabled(source)
    }

    /// Result count contributed by `source` in the last filter pass.
    pub fn source_count(&self, source: Source) -> usize {
        match source {
            Source::Pacman => self.pacman_count,
            Source::Aur => self.aur_count,
            Source::Flatpak => self.flatpak_count,
            Source::Snap => self.snap_count,
        }
    }

    pub(crate) fn reset_counts(&mut self) {
        self.pacman_count = 0;
        self.aur_count = 0;
        self.flatpak_count = 0;
        self.snap_count = 0;
    }
}
