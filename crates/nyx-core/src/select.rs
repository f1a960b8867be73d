//! Two-stage weighted selection.
//!
//! First a category is chosen by cumulative-weight inversion over the
//! categories in declaration order, then an entry is chosen uniformly
//! within that category. The iteration order is fixed so a given weight
//! table always partitions `[0, total)` the same way.

use crate::catalog::{Category, DrawEntry};
use crate::random::RandomSource;

fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Pick a category with probability `weight / total`.
///
/// Categories with a non-positive weight are never selected unless every
/// weight is unusable. Returns `None` only for an empty slice.
pub fn select_category<'a>(
    categories: &'a [Category],
    rng: &mut dyn RandomSource,
) -> Option<&'a Category> {
    let total: f64 = categories.iter().map(|c| usable(c.weight)).sum();
    category_at(categories, rng.next_f64() * total)
}

/// Walk the categories subtracting weights from `roll` until it drops to
/// zero or below. Falls back to the last usable category when rounding
/// leaves a positive remainder.
fn category_at(categories: &[Category], mut roll: f64) -> Option<&Category> {
    for category in categories {
        let weight = usable(category.weight);
        if weight == 0.0 {
            continue;
        }
        roll -= weight;
        if roll <= 0.0 {
            return Some(category);
        }
    }

    let fallback = categories
        .iter()
        .rev()
        .find(|c| usable(c.weight) > 0.0)
        .or_else(|| categories.last());
    if let Some(category) = fallback {
        tracing::debug!(category = %category.id, "weighted roll fell through, using last category");
    }
    fallback
}

/// Pick an entry uniformly among those in `category_id`.
///
/// Returns `None` when the category has no entries.
pub fn select_entry<'a>(
    entries: &'a [DrawEntry],
    category_id: &str,
    rng: &mut dyn RandomSource,
) -> Option<&'a DrawEntry> {
    let pool: Vec<&DrawEntry> = entries
        .iter()
        .filter(|e| e.category_id == category_id)
        .collect();
    if pool.is_empty() {
        return None;
    }
    let index = ((rng.next_f64() * pool.len() as f64).floor() as usize).min(pool.len() - 1);
    Some(pool[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table() -> Vec<Category> {
        vec![
            Category::new("a", 50.0),
            Category::new("b", 30.0),
            Category::new("c", 15.0),
            Category::new("d", 5.0),
        ]
    }

    #[test]
    fn cumulative_boundaries() {
        let cats = table();
        assert_eq!(category_at(&cats, 0.0).unwrap().id, "a");
        assert_eq!(category_at(&cats, 50.0).unwrap().id, "a");
        assert_eq!(category_at(&cats, 50.1).unwrap().id, "b");
        assert_eq!(category_at(&cats, 80.0).unwrap().id, "b");
        assert_eq!(category_at(&cats, 94.9).unwrap().id, "c");
        assert_eq!(category_at(&cats, 99.99).unwrap().id, "d");
    }

    #[test]
    fn overshoot_falls_back_to_last() {
        let cats = table();
        assert_eq!(category_at(&cats, 100.0 + 1e-9).unwrap().id, "d");
        assert_eq!(category_at(&cats, 1e12).unwrap().id, "d");
    }

    #[test]
    fn fallback_skips_trailing_zero_weight() {
        let cats = vec![Category::new("a", 1.0), Category::new("z", 0.0)];
        assert_eq!(category_at(&cats, 5.0).unwrap().id, "a");
    }

    #[test]
    fn empty_table_selects_nothing() {
        let mut rng = ScriptedRandom::new([0.5]);
        assert!(select_category(&[], &mut rng).is_none());
    }

    #[test]
    fn zero_weight_never_selected() {
        let cats = vec![
            Category::new("zero", 0.0),
            Category::new("one", 1.0),
            Category::new("neg", -3.0),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            assert_eq!(select_category(&cats, &mut rng).unwrap().id, "one");
        }
        // Exact zero roll must not land on the leading zero-weight bucket.
        let mut rng = ScriptedRandom::new([0.0]);
        assert_eq!(select_category(&cats, &mut rng).unwrap().id, "one");
    }

    #[test]
    fn empirical_frequencies_match_weights() {
        let cats = table();
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let picked = select_category(&cats, &mut rng).unwrap();
            let idx = cats.iter().position(|c| c.id == picked.id).unwrap();
            counts[idx] += 1;
        }
        for (cat, count) in cats.iter().zip(counts) {
            let expected = cat.weight / 100.0;
            let observed = count as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "{}: expected {expected}, observed {observed}",
                cat.id
            );
        }
    }

    #[test]
    fn single_category_always_selected() {
        let cats = vec![Category::new("only", 0.001)];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(select_category(&cats, &mut rng).unwrap().id, "only");
        }
    }

    #[test]
    fn entry_index_is_floor_of_scaled_roll() {
        let entries = vec![
            DrawEntry::new("x", "a", "X", "", ""),
            DrawEntry::new("other", "b", "O", "", ""),
            DrawEntry::new("y", "a", "Y", "", ""),
            DrawEntry::new("z", "a", "Z", "", ""),
        ];
        let mut rng = ScriptedRandom::new([0.0, 0.34, 0.67, 0.999]);
        let picks: Vec<&str> = (0..4)
            .map(|_| select_entry(&entries, "a", &mut rng).unwrap().id.as_str())
            .collect();
        assert_eq!(picks, vec!["x", "y", "z", "z"]);
    }

    #[test]
    fn entry_from_empty_category_is_none() {
        let entries = vec![DrawEntry::new("x", "a", "X", "", "")];
        let mut rng = ScriptedRandom::new([0.5]);
        assert!(select_entry(&entries, "missing", &mut rng).is_none());
    }
}
