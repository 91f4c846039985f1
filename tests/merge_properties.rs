//! Property-based tests for the entry list reconciler.
//!
//! The merge contract: no duplicate links ever, links already displayed
//! survive every merge, an empty batch is the identity, and re-merging the
//! same batch adds nothing.

use folio::entry::{Entry, EntryList};
use proptest::prelude::*;
use std::collections::HashSet;

fn entry(link: &str) -> Entry {
    Entry::new(link, format!("Title {}", link))
}

/// Drop repeated links, keeping first occurrence, to build a valid
/// starting list (the displayed list is duplicate-free by invariant).
fn unique_entries(links: &[String]) -> Vec<Entry> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|l| seen.insert(l.as_str().to_string()))
        .map(|l| entry(l))
        .collect()
}

fn link_strings(list: &EntryList) -> Vec<String> {
    list.entries().iter().map(|e| e.link.to_string()).collect()
}

// Small alphabets force collisions between the list and the batch.
fn links_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-h]", 0..max)
}

proptest! {
    #[test]
    fn merge_never_duplicates_links(
        current in links_strategy(8),
        batch in links_strategy(12),
    ) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        list.merge(batch.iter().map(|l| entry(l)).collect());

        let links = link_strings(&list);
        let distinct: HashSet<&String> = links.iter().collect();
        prop_assert_eq!(links.len(), distinct.len());
    }

    #[test]
    fn merge_preserves_prior_links(
        current in links_strategy(8),
        batch in links_strategy(12),
    ) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        let before = link_strings(&list);

        list.merge(batch.iter().map(|l| entry(l)).collect());

        let after: HashSet<String> = link_strings(&list).into_iter().collect();
        for link in before {
            prop_assert!(after.contains(&link), "link {} lost by merge", link);
        }
    }

    #[test]
    fn merge_reports_exact_growth(
        current in links_strategy(8),
        batch in links_strategy(12),
    ) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        let before = list.len();

        let added = list.merge(batch.iter().map(|l| entry(l)).collect());

        prop_assert_eq!(list.len(), before + added);
    }

    #[test]
    fn empty_batch_is_identity(current in links_strategy(8)) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        let before = link_strings(&list);

        let added = list.merge(Vec::new());

        prop_assert_eq!(added, 0);
        prop_assert_eq!(link_strings(&list), before);
    }

    #[test]
    fn remerging_same_batch_adds_nothing(
        current in links_strategy(8),
        batch in links_strategy(12),
    ) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        let entries: Vec<Entry> = batch.iter().map(|l| entry(l)).collect();

        list.merge(entries.clone());
        let snapshot = link_strings(&list);
        let added_again = list.merge(entries);

        prop_assert_eq!(added_again, 0);
        prop_assert_eq!(link_strings(&list), snapshot);
    }

    #[test]
    fn merge_does_not_reorder_existing(
        current in links_strategy(8),
        batch in links_strategy(12),
    ) {
        let mut list = EntryList::from_entries(unique_entries(&current));
        let before = link_strings(&list);

        list.merge(batch.iter().map(|l| entry(l)).collect());

        // The prior links must appear in their original relative order
        let after = link_strings(&list);
        let surviving: Vec<&String> = after.iter().filter(|l| before.contains(l)).collect();
        prop_assert_eq!(surviving, before.iter().collect::<Vec<_>>());
    }
}
