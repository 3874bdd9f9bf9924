//! Query filtering, relevance scoring, and cross-source ranking.
//!
//! Each source family matches against its own ordered attribute list. The
//! pacman/AUR and Flatpak families are conjunctive: every search term must be
//! a substring of a single attribute for that attribute to count. The Snap
//! family is disjunctive across the whole item: one term hitting one
//! attribute includes it. That asymmetry is long-standing observed behavior
//! of the store and is kept as-is.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::state::search::SearchState;
use crate::state::types::{PackageItem, Source};
use crate::text::tokenize;

mod autocomplete;

pub use autocomplete::{MAX_SUGGESTIONS, suggest};

/// Flat score bonus for locally installed items.
const INSTALLED_BONUS: i32 = 4;

/// Queries shorter than this search package ids only, not descriptions.
const MIN_DESCRIPTION_QUERY_LEN: usize = 3;

/// Searchable attributes, in fixed priority order per source family.
///
/// The attribute's position in a family's list decides its score weight:
/// index 0 is worth 5, index 1 is worth 4, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attr {
    PackageId,
    NormalizedName,
    DisplayKey,
    NormalizedDescription,
}

const PACKAGE_ATTRS_SHORT: &[Attr] = &[Attr::PackageId];
const PACKAGE_ATTRS: &[Attr] = &[Attr::PackageId, Attr::NormalizedDescription];
const FLATPAK_ATTRS: &[Attr] = &[
    Attr::PackageId,
    Attr::NormalizedName,
    Attr::NormalizedDescription,
];
const SNAP_ATTRS: &[Attr] = &[
    Attr::PackageId,
    Attr::NormalizedName,
    Attr::DisplayKey,
    Attr::NormalizedDescription,
];

fn attr_value<'a>(item: &'a PackageItem, attr: Attr) -> &'a str {
    match attr {
        Attr::PackageId => &item.package_id,
        Attr::NormalizedName => &item.normalized_name,
        Attr::DisplayKey => &item.display_key,
        Attr::NormalizedDescription => &item.normalized_description,
    }
}

/// What: Filter the catalog against the committed query and rank the result.
///
/// Inputs:
/// - `catalog`: Read-only item partitions.
/// - `state`: Session state; supplies the query and toggles, receives the
///   per-source contribution counts as a side effect.
///
/// Output:
/// - One combined sequence: per-source ranked lists concatenated in fixed
///   source order, then stably re-sorted with installed items first and
///   higher scores next. Empty query yields an empty result.
pub fn filter(catalog: &Catalog, state: &mut SearchState) -> Vec<PackageItem> {
    state.reset_counts();
    if state.query.is_empty() {
        return Vec::new();
    }
    let terms = tokenize(&state.query);

    let mut combined: Vec<PackageItem> = Vec::new();
    if state.toggles.search_pacman {
        let hits = filter_packages(catalog.partition(Source::Pacman), &state.query, &terms);
        state.pacman_count = hits.len();
        combined.extend(hits);
    }
    if state.toggles.search_aur {
        let hits = filter_packages(catalog.partition(Source::Aur), &state.query, &terms);
        state.aur_count = hits.len();
        combined.extend(hits);
    }
    if state.toggles.search_flatpak {
        let hits = filter_flatpak(catalog.partition(Source::Flatpak), &state.query, &terms);
        state.flatpak_count = hits.len();
        combined.extend(hits);
    }
    if state.toggles.search_snap {
        let hits = filter_snap(catalog.partition(Source::Snap), &state.query, &terms);
        state.snap_count = hits.len();
        combined.extend(hits);
    }

    // Installed first regardless of source, then by score; stable, so equal
    // ranks keep the fixed source order from the concatenation above.
    combined.sort_by(|a, b| b.installed.cmp(&a.installed).then(b.score.cmp(&a.score)));
    combined
}

/// What: Conjunctive attribute filter shared by the pacman/AUR and Flatpak
/// families.
///
/// Inputs:
/// - `items`: One source partition.
/// - `terms`: Normalized search terms.
/// - `attrs`: Attribute list in priority order.
///
/// Output:
/// - Matching items, cloned with their pass-local score, grouped by first
///   matching attribute and sorted by score descending (stable).
///
/// Details:
/// - An item is added at most once per pass; its score accrues `5 - index`
///   at the first matching attribute only, plus the installed bonus.
fn filter_by_terms(items: &[PackageItem], terms: &[String], attrs: &[Attr]) -> Vec<PackageItem> {
    let mut added: HashSet<&str> = HashSet::new();
    let mut buckets: Vec<Vec<PackageItem>> = attrs.iter().map(|_| Vec::new()).collect();
    for item in items {
        let mut score = if item.installed { INSTALLED_BONUS } else { 0 };
        for (idx, attr) in attrs.iter().enumerate() {
            let value = attr_value(item, *attr);
            if terms.iter().all(|term| value.contains(term.as_str()))
                && !added.contains(item.package_id.as_str())
            {
                score += 5 - idx as i32;
                let mut matched = item.clone();
                matched.score = score;
                buckets[idx].push(matched);
                added.insert(item.package_id.as_str());
            }
        }
    }
    let mut out: Vec<PackageItem> = buckets.into_iter().flatten().collect();
    out.sort_by(|a, b| b.score.cmp(&a.score));
    out
}

/// Package-family filter: short queries search ids only.
fn filter_packages(items: &[PackageItem], query: &str, terms: &[String]) -> Vec<PackageItem> {
    let attrs = if query.chars().count() < MIN_DESCRIPTION_QUERY_LEN {
        PACKAGE_ATTRS_SHORT
    } else {
        PACKAGE_ATTRS
    };
    filter_by_terms(items, terms, attrs)
}

/// Flatpak filter: an empty query passes the partition through unfiltered.
fn filter_flatpak(items: &[PackageItem], query: &str, terms: &[String]) -> Vec<PackageItem> {
    if query.is_empty() {
        return pass_through(items);
    }
    filter_by_terms(items, terms, FLATPAK_ATTRS)
}

/// What: Snap filter, disjunctive across terms and attributes.
///
/// Inputs:
/// - `items`: The Snap partition.
/// - `query` / `terms`: Committed query and its normalized terms.
///
/// Output:
/// - Items where any term is a substring of any attribute, deduplicated by
///   package id, in partition order with score 0.
fn filter_snap(items: &[PackageItem], query: &str, terms: &[String]) -> Vec<PackageItem> {
    if query.is_empty() {
        return pass_through(items);
    }
    let mut added: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let hit = terms.iter().any(|term| {
            SNAP_ATTRS
                .iter()
                .any(|attr| attr_value(item, *attr).contains(term.as_str()))
        });
        if hit && added.insert(item.package_id.as_str()) {
            let mut matched = item.clone();
            matched.score = 0;
            out.push(matched);
        }
    }
    out
}

fn pass_through(items: &[PackageItem]) -> Vec<PackageItem> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            item.score = 0;
            item
        })
        .collect()
}
