//! Autocomplete suggestion index over package ids.

use std::collections::HashSet;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::state::search::SearchState;
use crate::state::types::Source;
use crate::text::tokenize;

/// Default cap on the suggestion menu length.
pub const MAX_SUGGESTIONS: usize = 10;

/// What: Produce name suggestions for a partial query.
///
/// Inputs:
/// - `state`: Session state; supplies the toggles and the suppression
///   deadline set by a committed search.
/// - `catalog`: Read-only item partitions.
/// - `partial`: Text typed so far.
/// - `max_results`: Menu cap, normally [`MAX_SUGGESTIONS`].
///
/// Output:
/// - Package ids from enabled sources, in fixed source order and first-seen
///   deduplicated, where every normalized term is a substring of the
///   lower-cased candidate. Empty while the partial is empty or suggestions
///   are suppressed.
pub fn suggest(
    state: &SearchState,
    catalog: &Catalog,
    partial: &str,
    max_results: usize,
) -> Vec<String> {
    suggest_at(state, catalog, partial, max_results, Instant::now())
}

pub(crate) fn suggest_at(
    state: &SearchState,
    catalog: &Catalog,
    partial: &str,
    max_results: usize,
    now: Instant,
) -> Vec<String> {
    if partial.is_empty() || max_results == 0 || !state.suggestions_allowed_at(now) {
        return Vec::new();
    }
    let terms = tokenize(partial);
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for source in Source::ALL {
        if !state.enabled(source) {
            continue;
        }
        for item in catalog.partition(source) {
            let lowered = item.package_id.to_lowercase();
            if terms.iter().all(|term| lowered.contains(term.as_str()))
                && seen.insert(item.package_id.clone())
            {
                out.push(item.package_id.clone());
                if out.len() == max_results {
                    return out;
                }
            }
        }
    }
    out
}
