//! The major arcana.
//!
//! All 22 cards share one category, so every card is equally likely and
//! the orientation roll carries the variety.

use nyx_core::{Catalog, Category, DrawEntry, DrawResult, RandomSource, is_reversed};

use crate::error::OracleResult;

/// Category id shared by every card.
pub const MAJOR_ARCANA: &str = "major_arcana";

/// `(id, name, imagery, upright, reversed)` for each card, in deck order.
pub const CARDS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "the_fool",
        "The Fool",
        "A wanderer steps toward the cliff's edge.",
        "A reckless new beginning calls.",
        "Hesitation or a careless misstep.",
    ),
    (
        "the_magician",
        "The Magician",
        "One hand raised to the sky, one to the earth.",
        "Skill and will shape what comes next.",
        "Trickery, or talent left unused.",
    ),
    (
        "the_high_priestess",
        "The High Priestess",
        "She sits between two pillars, veiled.",
        "Intuition knows what words do not.",
        "Secrets kept, inner voice ignored.",
    ),
    (
        "the_empress",
        "The Empress",
        "Wheat grows thick around her throne.",
        "Abundance, comfort, and care.",
        "Smothering, or creativity blocked.",
    ),
    (
        "the_emperor",
        "The Emperor",
        "A stone throne carved with rams.",
        "Order and authority take hold.",
        "Control turns rigid or tyrannical.",
    ),
    (
        "the_hierophant",
        "The Hierophant",
        "Two acolytes kneel before the keys.",
        "Tradition and counsel guide the way.",
        "Rules are questioned or broken.",
    ),
    (
        "the_lovers",
        "The Lovers",
        "An angel blesses two figures below.",
        "A bond deepens and a choice is made.",
        "Disharmony, a choice avoided.",
    ),
    (
        "the_chariot",
        "The Chariot",
        "Two sphinxes pull in opposite directions.",
        "Determination wins the day.",
        "The reins slip; direction is lost.",
    ),
    (
        "strength",
        "Strength",
        "A gentle hand closes a lion's jaw.",
        "Quiet courage tames the wild.",
        "Self-doubt saps the will.",
    ),
    (
        "the_hermit",
        "The Hermit",
        "A lantern glows on a snowy peak.",
        "Solitude brings insight.",
        "Isolation curdles into loneliness.",
    ),
    (
        "wheel_of_fortune",
        "Wheel of Fortune",
        "The great wheel turns in the clouds.",
        "Fate turns in an unexpected direction.",
        "Bad luck, resistance to change.",
    ),
    (
        "justice",
        "Justice",
        "Scales in one hand, a sword in the other.",
        "The truth is weighed fairly.",
        "Unfairness, accountability dodged.",
    ),
    (
        "the_hanged_man",
        "The Hanged Man",
        "He hangs serene from a living tree.",
        "Surrender reveals a new perspective.",
        "Stalling, a sacrifice refused.",
    ),
    (
        "death",
        "Death",
        "A pale rider passes; a king falls.",
        "An ending clears the way for change.",
        "Clinging to what must end.",
    ),
    (
        "temperance",
        "Temperance",
        "Water flows between two cups.",
        "Balance and patience restore calm.",
        "Excess and impatience upset the balance.",
    ),
    (
        "the_devil",
        "The Devil",
        "Two figures chained loosely below.",
        "Temptation tightens its grip.",
        "Chains loosen; release is near.",
    ),
    (
        "the_tower",
        "The Tower",
        "Lightning splits the crown from the tower.",
        "Sudden upheaval shakes everything.",
        "Disaster narrowly averted, or delayed.",
    ),
    (
        "the_star",
        "The Star",
        "She pours water beneath eight stars.",
        "Hope and renewal return.",
        "Faith falters, inspiration dims.",
    ),
    (
        "the_moon",
        "The Moon",
        "A crayfish crawls from the pool at night.",
        "Illusion and unease cloud judgment.",
        "Confusion lifts; truth surfaces.",
    ),
    (
        "the_sun",
        "The Sun",
        "A child rides beneath a blazing sun.",
        "Joy, warmth, and success.",
        "Joy dimmed, but not gone.",
    ),
    (
        "judgement",
        "Judgement",
        "A trumpet wakes the sleepers.",
        "A reckoning and a call to rise.",
        "Self-judgment and a call ignored.",
    ),
    (
        "the_world",
        "The World",
        "A dancer within a wreath of laurel.",
        "Completion and fulfillment.",
        "Loose ends keep the circle open.",
    ),
];

/// Build the tarot catalog.
pub fn tarot_catalog() -> OracleResult<Catalog> {
    let entries = CARDS
        .iter()
        .map(|(id, name, imagery, upright, reversed)| {
            DrawEntry::new(
                *id,
                MAJOR_ARCANA,
                *name,
                *imagery,
                format!("{name}: {upright}"),
            )
            .with_reversed(*reversed)
        })
        .collect();
    Ok(Catalog::new(
        vec![Category::new(MAJOR_ARCANA, 1.0)],
        entries,
    )?)
}

/// Draw one card and roll its orientation.
pub fn draw_card(
    catalog: &Catalog,
    reversal_chance: f64,
    rng: &mut dyn RandomSource,
    now: u64,
) -> DrawResult {
    let entry = catalog.draw(rng).clone();
    let reversed = is_reversed(reversal_chance, rng);
    DrawResult::new(entry, now).with_orientation(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_core::ScriptedRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn deck_has_twenty_two_cards() {
        let catalog = tarot_catalog().unwrap();
        assert_eq!(catalog.entries().len(), 22);
        assert!(catalog.entries().iter().all(|e| e.reversed_text.is_some()));
    }

    #[test]
    fn upright_injection_names_the_card() {
        let catalog = tarot_catalog().unwrap();
        let mut rng = ScriptedRandom::new([0.0, 16.5 / 22.0, 0.99]);
        let result = draw_card(&catalog, 50.0, &mut rng, 0);
        assert_eq!(result.entry.id, "the_tower");
        assert!(!result.is_reversed());
        assert_eq!(
            result.injection_text(),
            "The Tower: Sudden upheaval shakes everything."
        );
    }

    #[test]
    fn reversed_injection_uses_reversed_reading() {
        let catalog = tarot_catalog().unwrap();
        let mut rng = ScriptedRandom::new([0.0, 0.0, 0.0]);
        let result = draw_card(&catalog, 50.0, &mut rng, 0);
        assert!(result.is_reversed());
        assert_eq!(
            result.injection_text(),
            "The Fool (reversed): Hesitation or a careless misstep."
        );
    }

    #[test]
    fn orientation_extremes() {
        let catalog = tarot_catalog().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        assert!((0..500).all(|_| !draw_card(&catalog, 0.0, &mut rng, 0).is_reversed()));
        assert!((0..500).all(|_| draw_card(&catalog, 100.0, &mut rng, 0).is_reversed()));
    }

    #[test]
    fn every_card_reachable() {
        let catalog = tarot_catalog().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(draw_card(&catalog, 50.0, &mut rng, 0).entry.id);
        }
        assert_eq!(seen.len(), 22);
    }
}
