//! Cart view-models.
//!
//! Pure functions from cart contents to what the front end shows: the badge
//! next to the cart button and the cart panel. HTML templating lives only in
//! [`CartPanelView::to_html`], which escapes every field that came from
//! product data.

use std::fmt::Write as FmtWrite;

use crate::price::format_brl;
use crate::types::CartItem;

/// Directory product images are served from
pub const PRODUCT_IMAGE_DIR: &str = "/static/images/products/";

/// Shown when a product image fails to load
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/80x80/0B6A4A/FFFFFF?text=Produto";

/// Item-count indicator on the cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u64,
    /// Hidden when the cart is empty
    pub visible: bool,
}

/// One row of the cart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRowView {
    /// Position in the cart, used by the quantity and remove controls
    pub index: usize,
    pub image_src: String,
    pub fallback_image: &'static str,
    pub name: String,
    /// Formatted unit price
    pub price: String,
    pub quantity: u32,
}

/// The cart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPanelView {
    pub rows: Vec<CartRowView>,
    /// Formatted sum of all subtotals
    pub total: String,
    pub is_empty: bool,
}

/// Sum of price times quantity over all items.
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::subtotal).sum()
}

/// Sum of quantities over all items.
pub fn cart_item_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

pub fn render_badge(items: &[CartItem]) -> BadgeView {
    let count = cart_item_count(items);
    BadgeView {
        count,
        visible: count > 0,
    }
}

pub fn render_panel(items: &[CartItem]) -> CartPanelView {
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| CartRowView {
            index,
            image_src: format!("{}{}", PRODUCT_IMAGE_DIR, item.image),
            fallback_image: PLACEHOLDER_IMAGE,
            name: item.name.clone(),
            price: format_brl(item.price),
            quantity: item.quantity,
        })
        .collect();

    CartPanelView {
        rows,
        total: format_brl(cart_total(items)),
        is_empty: items.is_empty(),
    }
}

impl CartPanelView {
    /// Markup for the panel's item container.
    pub fn to_html(&self) -> String {
        if self.is_empty {
            return r#"<p class="cart-empty">Carrinho vazio</p>"#.to_string();
        }

        let mut html = String::new();
        for row in &self.rows {
            let name = escape_html(&row.name);
            // Writing into a String cannot fail
            let _ = write!(
                html,
                concat!(
                    r#"<div class="cart-item">"#,
                    r#"<img src="{src}" class="cart-item-image" alt="{name}" data-fallback="{fallback}">"#,
                    r#"<div class="cart-item-info">"#,
                    r#"<div class="cart-item-name">{name}</div>"#,
                    r#"<div class="cart-item-price">{price}</div>"#,
                    r#"<div class="cart-item-quantity">"#,
                    r#"<button data-action="decrease" data-index="{index}">-</button>"#,
                    r#"<span>{quantity}</span>"#,
                    r#"<button data-action="increase" data-index="{index}">+</button>"#,
                    r#"<button data-action="remove" data-index="{index}">Remover</button>"#,
                    "</div></div></div>"
                ),
                src = escape_html(&row.image_src),
                name = name,
                fallback = escape_html(row.fallback_image),
                price = escape_html(&row.price),
                index = row.index,
                quantity = row.quantity,
            );
        }
        html
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
