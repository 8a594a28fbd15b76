//! The fixed restaurant menu and the display strings derived from it.

use serde::Serialize;

use crate::constants::CURRENCY;

/// A dish on the menu. Prices are whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: &'static str,
    pub price: u32,
}

impl MenuItem {
    const fn new(name: &'static str, price: u32) -> Self {
        Self { name, price }
    }

    /// The label used to identify this dish in the order form, e.g. `Vada Pav ($3)`.
    pub fn label(&self) -> String {
        format!("{} ({}{})", self.name, CURRENCY, self.price)
    }
}

// Popular Maharashtrian dishes, in the order they are shown.
static MENU: [MenuItem; 30] = [
    MenuItem::new("Vada Pav", 3),
    MenuItem::new("Misal Pav", 4),
    MenuItem::new("Pav Bhaji", 5),
    MenuItem::new("Puran Poli", 6),
    MenuItem::new("Poha", 3),
    MenuItem::new("Sabudana Khichdi", 4),
    MenuItem::new("Thalipeeth", 5),
    MenuItem::new("Kothimbir Vadi", 4),
    MenuItem::new("Rassa", 8),
    MenuItem::new("Sol Kadhi", 2),
    MenuItem::new("Bhakri", 2),
    MenuItem::new("Zunka Bhakar", 5),
    MenuItem::new("Modak", 4),
    MenuItem::new("Sheera", 3),
    MenuItem::new("Shengdana Chutney", 2),
    MenuItem::new("Alu Vadi", 4),
    MenuItem::new("Batata Bhaji", 3),
    MenuItem::new("Matki Usal", 4),
    MenuItem::new("Kanda Poha", 3),
    MenuItem::new("Sreekhand", 5),
    MenuItem::new("Basundi", 5),
    MenuItem::new("Ukadiche Modak", 5),
    MenuItem::new("Chakli", 2),
    MenuItem::new("Bhakarwadi", 3),
    MenuItem::new("Dhokla", 3),
    MenuItem::new("Kharvas", 4),
    MenuItem::new("Pithla Bhakri", 5),
    MenuItem::new("Kolhapuri Mutton", 12),
    MenuItem::new("Bombil Fry", 10),
    MenuItem::new("Sabudana Vada", 4),
];

lazy_static::lazy_static! {
    /// `render_text()` computed once; embedded in the system prompt and the page.
    pub static ref MENU_TEXT: String = render_text();
}

pub fn list_items() -> &'static [MenuItem] {
    &MENU
}

/// Exact, case-sensitive lookup.
pub fn find_by_name(name: &str) -> Option<&'static MenuItem> {
    MENU.iter().find(|item| item.name == name)
}

/// Bullet list of `- name ($price)` lines followed by the dish count.
pub fn render_text() -> String {
    let lines = MENU
        .iter()
        .map(|item| format!("- {}", item.label()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n<b>Total number of dishes: {}</b>", lines, MENU.len())
}

pub fn option_labels() -> Vec<String> {
    MENU.iter().map(MenuItem::label).collect()
}
