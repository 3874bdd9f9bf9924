//! Unified in-memory catalog and its refresh orchestration.

use std::future::Future;

use crate::config::SourceToggles;
use crate::sources::{Endpoints, fetch_aur, fetch_flatpak, fetch_pacman, fetch_snap};
use crate::state::types::{PackageItem, Source};

/// What: The unified catalog, partitioned by source.
///
/// Inputs:
/// - Partitions are replaced wholesale by [`refresh`]; nothing else writes.
///
/// Output:
/// - Read-only views for the query engine and autocomplete index.
///
/// Details:
/// - A partition keeps its previous contents until its source is explicitly
///   re-fetched, so toggling a source off does not clear what was loaded.
#[derive(Debug, Default)]
pub struct Catalog {
    pacman: Vec<PackageItem>,
    aur: Vec<PackageItem>,
    flatpak: Vec<PackageItem>,
    snap: Vec<PackageItem>,
}

impl Catalog {
    /// Read one source's partition.
    pub fn partition(&self, source: Source) -> &[PackageItem] {
        match source {
            Source::Pacman => &self.pacman,
            Source::Aur => &self.aur,
            Source::Flatpak => &self.flatpak,
            Source::Snap => &self.snap,
        }
    }

    /// Total number of items across all partitions.
    pub fn len(&self) -> usize {
        Source::ALL.iter().map(|s| self.partition(*s).len()).sum()
    }

    /// Whether every partition is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn partition_mut(&mut self, source: Source) -> &mut Vec<PackageItem> {
        match source {
            Source::Pacman => &mut self.pacman,
            Source::Aur => &mut self.aur,
            Source::Flatpak => &mut self.flatpak,
            Source::Snap => &mut self.snap,
        }
    }

    /// Replace one partition wholesale.
    ///
    /// Exposed for embedders and tests that assemble a catalog without going
    /// through the network refresh.
    pub fn set_partition(&mut self, source: Source, items: Vec<PackageItem>) {
        *self.partition_mut(source) = items;
    }
}

/// What: Refresh the enabled sources' partitions concurrently.
///
/// Inputs:
/// - `catalog`: Catalog mutated in place after all fetches settle.
/// - `endpoints`: Local listing endpoints.
/// - `toggles`: Which sources to fetch; disabled partitions are untouched.
///
/// Output:
/// - Always resolves. A source that times out or errors contributes an empty
///   partition without delaying or failing the others.
///
/// Details:
/// - All enabled adapters run concurrently; assignment happens per partition
///   once everything has settled, so readers never observe a half-written
///   partition.
pub async fn refresh(catalog: &mut Catalog, endpoints: &Endpoints, toggles: &SourceToggles) {
    tracing::info!(
        pacman = toggles.search_pacman,
        aur = toggles.search_aur,
        flatpak = toggles.search_flatpak,
        snap = toggles.search_snap,
        "refreshing catalog"
    );
    let (pacman, aur, flatpak, snap) = tokio::join!(
        when_enabled(toggles.search_pacman, fetch_pacman(endpoints)),
        when_enabled(toggles.search_aur, fetch_aur(endpoints)),
        when_enabled(toggles.search_flatpak, fetch_flatpak(endpoints)),
        when_enabled(toggles.search_snap, fetch_snap(endpoints)),
    );
    for (source, fetched) in [
        (Source::Pacman, pacman),
        (Source::Aur, aur),
        (Source::Flatpak, flatpak),
        (Source::Snap, snap),
    ] {
        if let Some(items) = fetched {
            tracing::debug!(source = source.label(), count = items.len(), "partition updated");
            catalog.set_partition(source, items);
        }
    }
}

async fn when_enabled<F>(enabled: bool, fetch: F) -> Option<Vec<PackageItem>>
where
    F: Future<Output = Vec<PackageItem>>,
{
    if enabled { Some(fetch.await) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, source: Source) -> PackageItem {
        PackageItem::new(id.to_string(), id.to_string(), String::new(), source)
    }

    #[test]
    fn partitions_are_independent() {
        let mut catalog = Catalog::default();
        catalog.set_partition(Source::Snap, vec![item("vlc", Source::Snap)]);
        assert_eq!(catalog.partition(Source::Snap).len(), 1);
        assert!(catalog.partition(Source::Pacman).is_empty());
        assert_eq!(catalog.len(), 1);
    }

    #[cfg(not(target_os = "windows"))]
    #[tokio::test]
    async fn refresh_tolerates_partial_failure_and_keeps_disabled_partitions() {
        let _guard = crate::test_utils::lock_env_mutex();
        // pacman dump succeeds, everything else fails hard.
        let script = r##"#!/usr/bin/env bash
url="${!#}"
case "$url" in
  *json_dump_pacman*)
    echo '[{"p":"firefox","d":"Browser","i":"true"}]'
    ;;
  *)
    exit 22
    ;;
esac
"##;
        let (root, old_path) = crate::sources::shim::install_fake_curl("refresh", script);

        let mut catalog = Catalog::default();
        catalog.set_partition(Source::Snap, vec![item("vlc", Source::Snap)]);

        let toggles = crate::config::SourceToggles {
            search_pacman: true,
            search_aur: true,
            search_flatpak: true,
            search_snap: false,
        };
        let endpoints = Endpoints::new("http://localhost");
        refresh(&mut catalog, &endpoints, &toggles).await;

        // The healthy source landed despite its siblings failing.
        assert_eq!(catalog.partition(Source::Pacman).len(), 1);
        assert!(catalog.partition(Source::Pacman)[0].installed);
        // Failed sources degraded to empty.
        assert!(catalog.partition(Source::Aur).is_empty());
        assert!(catalog.partition(Source::Flatpak).is_empty());
        // The disabled source kept its previous contents.
        assert_eq!(catalog.partition(Source::Snap).len(), 1);

        crate::sources::shim::remove_fake_curl(root, old_path);
    }
}
