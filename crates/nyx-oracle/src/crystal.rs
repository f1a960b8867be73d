//! Built-in crystal ball effects.
//!
//! Six weighted categories. `guardian` is declared last so that the
//! selector's fall-through lands on the gentlest outcome.

use nyx_core::{Catalog, Category, DrawEntry};

use crate::error::OracleResult;

/// Category ids and weights, in selection order.
pub const CATEGORIES: &[(&str, f64)] = &[
    ("blessing", 30.0),
    ("omen", 20.0),
    ("chaos", 15.0),
    ("romance", 15.0),
    ("revelation", 15.0),
    ("guardian", 5.0),
];

/// `(id, category, display, flavor, injection)` for every effect.
pub const EFFECTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "golden_hour",
        "blessing",
        "Golden Hour",
        "Warm light pools inside the glass.",
        "A stroke of good fortune arrives unexpectedly for {{user}}.",
    ),
    (
        "lucky_find",
        "blessing",
        "Lucky Find",
        "Something glints at the bottom of the sphere.",
        "{{user}} stumbles upon something valuable they had given up on.",
    ),
    (
        "kind_stranger",
        "blessing",
        "Kind Stranger",
        "A silhouette offers an open hand.",
        "A stranger offers {{user}} help without asking anything in return.",
    ),
    (
        "second_wind",
        "blessing",
        "Second Wind",
        "The mist clears, then brightens.",
        "{{user}} feels a sudden surge of energy and resolve.",
    ),
    (
        "raven",
        "omen",
        "Raven's Visit",
        "Black feathers drift across the glass.",
        "A raven lands nearby and watches {{char}} with unsettling focus.",
    ),
    (
        "cracked_mirror",
        "omen",
        "Cracked Mirror",
        "A hairline fracture spreads through the reflection.",
        "A mirror cracks without cause, and everyone present notices.",
    ),
    (
        "cold_draft",
        "omen",
        "Cold Draft",
        "Frost creeps along the rim of the ball.",
        "A cold draft sweeps through the room and the candles gutter.",
    ),
    (
        "wild_weather",
        "chaos",
        "Wild Weather",
        "Storm clouds churn inside the sphere.",
        "The weather turns violently and without warning.",
    ),
    (
        "mistaken_identity",
        "chaos",
        "Mistaken Identity",
        "Two faces swap places in the glass.",
        "Someone mistakes {{char}} for a person they have never met.",
    ),
    (
        "sudden_visitor",
        "chaos",
        "Sudden Visitor",
        "A door bursts open in the vision.",
        "An unexpected visitor interrupts at the worst possible moment.",
    ),
    (
        "lingering_glance",
        "romance",
        "Lingering Glance",
        "Two reflections hold each other's gaze.",
        "{{char}} catches themselves staring at {{user}} a moment too long.",
    ),
    (
        "red_thread",
        "romance",
        "Red Thread",
        "A crimson filament winds through the mist.",
        "A small coincidence draws {{char}} and {{user}} closer together.",
    ),
    (
        "old_letter",
        "revelation",
        "Old Letter",
        "Faded ink surfaces in the fog.",
        "A forgotten letter resurfaces, revealing a long-kept secret.",
    ),
    (
        "overheard",
        "revelation",
        "Overheard Words",
        "Whispers echo from inside the glass.",
        "{{char}} overhears something they were never meant to hear.",
    ),
    (
        "true_name",
        "revelation",
        "True Name",
        "Letters rearrange themselves in the smoke.",
        "Someone's real identity or motive comes to light.",
    ),
    (
        "watchful_eye",
        "guardian",
        "Watchful Eye",
        "Nyx peers back at you from the glass.",
        "An unseen presence watches over {{user}}, keeping harm at bay.",
    ),
    (
        "quiet_ward",
        "guardian",
        "Quiet Ward",
        "A soft violet ring settles around the sphere.",
        "For a while, nothing can touch {{user}}. The air feels protected.",
    ),
];

/// Build the crystal ball catalog.
pub fn crystal_ball_catalog() -> OracleResult<Catalog> {
    let categories = CATEGORIES
        .iter()
        .map(|(id, weight)| Category::new(*id, *weight))
        .collect();
    let entries = EFFECTS
        .iter()
        .map(|(id, category, display, flavor, injection)| {
            DrawEntry::new(*id, *category, *display, *flavor, *injection)
        })
        .collect();
    Ok(Catalog::new(categories, entries)?)
}
