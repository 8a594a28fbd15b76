// Parsing of order-form labels such as `Vada Pav ($3)` back into menu items.
// Only this module knows the label format; the summarizer works on MenuItems.

use crate::menu::{self, MenuItem};

const PRICE_MARKER: &str = " ($";

/// The dish name part of a label: everything before the first ` ($`.
/// A label without the marker is taken as a bare name.
pub fn dish_name(label: &str) -> &str {
    label
        .split_once(PRICE_MARKER)
        .map_or(label, |(name, _)| name)
}

/// Resolves a label against the menu. The price written in the label is not
/// checked; the catalog price wins.
pub fn resolve(label: &str) -> Option<&'static MenuItem> {
    menu::find_by_name(dish_name(label))
}
