//! End-to-end flow over the public API: assemble a catalog, run a query,
//! and page through the ranked results the way the embedding UI does.

use omnipac::catalog::Catalog;
use omnipac::config::SourceToggles;
use omnipac::pager::PAGE_SIZE;
use omnipac::query;
use omnipac::state::{PackageItem, SearchState, Source};

fn pacman_item(id: &str, desc: &str, installed: bool) -> PackageItem {
    let mut item = PackageItem::new(id.to_string(), id.to_string(), desc.to_string(), Source::Pacman);
    item.installed = installed;
    item
}

fn demo_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    let mut pacman: Vec<PackageItem> = (0..45)
        .map(|i| pacman_item(&format!("app-{i:02}"), "demo application", i % 10 == 0))
        .collect();
    pacman.push(pacman_item("unrelated", "something else", false));
    catalog.set_partition(Source::Pacman, pacman);
    catalog.set_partition(
        Source::Snap,
        vec![PackageItem::new(
            "app-snap".into(),
            "app-snap".into(),
            "demo application".into(),
            Source::Snap,
        )],
    );
    catalog
}

#[test]
fn search_rank_and_page_through_results() {
    let catalog = demo_catalog();
    let mut state = SearchState::new(SourceToggles::default());

    // Suggestions are open before a search is committed.
    let suggestions = query::suggest(&state, &catalog, "app", query::MAX_SUGGESTIONS);
    assert_eq!(suggestions.len(), query::MAX_SUGGESTIONS);
    assert_eq!(suggestions[0], "app-00");

    state.commit_search("app");
    // Committing a search silences the menu for the cooldown window.
    assert!(query::suggest(&state, &catalog, "app", query::MAX_SUGGESTIONS).is_empty());

    let ranked = query::filter(&catalog, &mut state);
    assert_eq!(ranked.len(), 46); // 45 pacman matches + 1 snap match
    assert_eq!(state.source_count(Source::Pacman), 45);
    assert_eq!(state.source_count(Source::Snap), 1);

    // Installed items lead the combined sequence.
    let installed_count = ranked.iter().filter(|i| i.installed).count();
    assert!(ranked[..installed_count].iter().all(|i| i.installed));
    assert!(ranked[installed_count..].iter().all(|i| !i.installed));

    // First page, then a scroll trigger, then a second page.
    let first_page = state.pager.visible(&ranked);
    assert_eq!(first_page.len(), PAGE_SIZE);
    assert!(!state.pager.end_of_results());

    state.pager.load_more(ranked.len());
    assert_eq!(state.pager.visible(&ranked).len(), 2 * PAGE_SIZE);

    // Growing past the sequence end clamps and flags completion.
    std::thread::sleep(std::time::Duration::from_millis(120));
    state.pager.load_more(ranked.len());
    assert_eq!(state.pager.visible(&ranked).len(), ranked.len());
    assert!(state.pager.end_of_results());
}

#[test]
fn toggling_sources_narrows_results_without_touching_the_catalog() {
    let catalog = demo_catalog();
    let toggles = SourceToggles {
        search_pacman: false,
        ..SourceToggles::default()
    };
    let mut state = SearchState::new(toggles);
    state.commit_search("app");

    let ranked = query::filter(&catalog, &mut state);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].source, Source::Snap);
    // The disabled partition is still loaded, just not searched.
    assert_eq!(catalog.partition(Source::Pacman).len(), 46);
}
