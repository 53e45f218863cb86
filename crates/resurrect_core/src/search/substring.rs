//! Linear case-insensitive substring search over items.
//!
//! # Invariants
//! - Hits keep store order.
//! - An empty keyword matches every item.
//! - Search never mutates or reloads the searched slice.

use crate::model::item::Item;

/// Single search hit returned by [`search_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// 0-based position of the item in the searched sequence.
    pub position: usize,
    pub item: Item,
}

/// Returns every item whose name, description or contact contains `keyword`,
/// ignoring case.
pub fn search_items(items: &[Item], keyword: &str) -> Vec<SearchHit> {
    let keyword_lower = keyword.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.contains_lowercase(&keyword_lower))
        .map(|(position, item)| SearchHit {
            position,
            item: item.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::search_items;
    use crate::model::item::Item;

    fn sample() -> Vec<Item> {
        vec![
            Item::new("Desk Lamp", "Works, unused", "alice@example.com"),
            Item::new("Bicycle", "Needs new tire", "bob@example.com"),
            Item::new("Lamp shade", "Beige", "carol@example.com"),
        ]
    }

    #[test]
    fn hits_carry_source_positions_in_order() {
        let hits = search_items(&sample(), "LAMP");
        let positions = hits.iter().map(|hit| hit.position).collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 2]);
        assert_eq!(hits[1].item.name(), "Lamp shade");
    }

    #[test]
    fn empty_keyword_matches_everything() {
        assert_eq!(search_items(&sample(), "").len(), 3);
    }

    #[test]
    fn unicode_keywords_fold_case() {
        let items = vec![Item::new("Ölkanne", "Émaillé", "Zoë")];
        assert_eq!(search_items(&items, "öl").len(), 1);
        assert_eq!(search_items(&items, "ÉMAIL").len(), 1);
        assert_eq!(search_items(&items, "ZOË").len(), 1);
    }
}
