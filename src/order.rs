//! Order summaries and confirmations rendered as HTML fragments.

use crate::constants::CURRENCY;
use crate::menu::MenuItem;
use crate::selection;

pub const NO_ITEMS_NOTICE: &str = "<b>No items selected.</b>";
pub const SELECT_AN_ITEM_NOTICE: &str = "<b>Please select at least one item to place an order.</b>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSummary {
    items: Vec<&'static MenuItem>,
}

impl OrderSummary {
    pub fn items(&self) -> &[&'static MenuItem] {
        &self.items
    }

    pub fn total(&self) -> u32 {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Header row, one row per item, then the bold total row.
    pub fn to_html(&self) -> String {
        let mut table = String::from("<table style='width:100%;border-collapse:collapse;'>");
        table.push_str("<tr style='background:#fbb13c22;'><th>Dish</th><th>Price</th></tr>");
        for item in &self.items {
            table.push_str(&format!(
                "<tr><td>{}</td><td>{}{}</td></tr>",
                item.name, CURRENCY, item.price
            ));
        }
        table.push_str(&format!(
            "<tr style='font-weight:bold;background:#fbb13c33;'><td>Total</td><td>{}{}</td></tr></table>",
            CURRENCY,
            self.total()
        ));
        table
    }
}

/// Resolves each label in order. Labels that match no dish are dropped.
pub fn summarize<S: AsRef<str>>(selections: &[S]) -> OrderSummary {
    let items = selections
        .iter()
        .filter_map(|label| selection::resolve(label.as_ref()))
        .collect();
    OrderSummary { items }
}

pub fn order_summary<S: AsRef<str>>(selections: &[S]) -> String {
    if selections.is_empty() {
        return NO_ITEMS_NOTICE.to_string();
    }
    summarize(selections).to_html()
}

pub fn place_order<S: AsRef<str>>(selections: &[S], customer_name: Option<&str>) -> String {
    if selections.is_empty() {
        return SELECT_AN_ITEM_NOTICE.to_string();
    }
    let name = customer_name.filter(|n| !n.is_empty()).unwrap_or("Guest");
    tracing::info!(customer = name, items = selections.len(), "Order placed");
    format!(
        "<div style='color:#d7263d;font-size:1.1rem;'><b>Thank you, {}! Your order has been placed.</b></div>{}",
        name,
        order_summary(selections)
    )
}
