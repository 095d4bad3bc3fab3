//! Plain-text tables for terminal output.

use std::fmt::Write;

use groceteria_core::{Cart, Item, ItemListView, Order};

pub fn items(items: &[Item]) -> String {
    if items.is_empty() {
        return "no items\n".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<24} {:<20} {:>9} {:>6}\n",
        "ID", "NAME", "CATEGORY", "PRICE", "QTY"
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<20} {:>9} {:>6}",
            opt(item.item_id),
            item.item_name,
            item.category.map(|c| c.as_str()).unwrap_or("-"),
            item.mrp_price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string()),
            opt(item.quantity),
        );
    }
    out
}

/// Item table plus the pager line the admin list shows under it.
pub fn item_list(view: &ItemListView) -> String {
    let mut out = items(view.items());
    let page = view.page_no() + 1;
    let _ = writeln!(
        out,
        "category {} | page {page} of {} | {} items",
        view.category(),
        view.page_count().max(1),
        view.total_items()
    );
    out
}

pub fn cart(lines: &[Cart]) -> String {
    if lines.is_empty() {
        return "cart is empty\n".to_string();
    }
    let mut out = format!(
        "{:>6}  {:>6} {:>6} {:>9} {:>6}\n",
        "CART", "ITEM", "USER", "PRICE", "QTY"
    );
    for line in lines {
        let _ = writeln!(
            out,
            "{:>6}  {:>6} {:>6} {:>9} {:>6}",
            opt(line.cart_id),
            opt(line.item_id),
            opt(line.user_id),
            line.mrp_price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string()),
            opt(line.quantity),
        );
    }
    out
}

pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "no orders\n".to_string();
    }
    let mut out = format!(
        "{:>6}  {:>6} {:>10} {:<10} {:<10} {}\n",
        "ORDER", "USER", "TOTAL", "STATUS", "PAYMENT", "ITEMS"
    );
    for order in orders {
        let item_ids: Vec<String> = order.item_ids.iter().map(u64::to_string).collect();
        let _ = writeln!(
            out,
            "{:>6}  {:>6} {:>10} {:<10} {:<10} {}",
            opt(order.order_id),
            opt(order.user_id),
            order.total_price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string()),
            order.order_status.as_deref().unwrap_or("-"),
            order.payment_status.as_deref().unwrap_or("-"),
            item_ids.join(","),
        );
    }
    out
}

fn opt(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use groceteria_core::Category;

    use super::*;

    #[test]
    fn empty_tables_say_so() {
        assert_eq!(items(&[]), "no items\n");
        assert_eq!(cart(&[]), "cart is empty\n");
        assert_eq!(orders(&[]), "no orders\n");
    }

    #[test]
    fn item_rows_show_missing_fields_as_dash() {
        let rows = items(&[Item {
            item_id: Some(7),
            item_name: "Milk".to_string(),
            category: Some(Category::DairyProducts),
            ..Item::default()
        }]);
        let line = rows.lines().nth(1).unwrap();
        assert!(line.contains("Milk"));
        assert!(line.contains("DAIRYPRODUCTS"));
        assert!(line.trim_end().ends_with('-'));
    }
}
