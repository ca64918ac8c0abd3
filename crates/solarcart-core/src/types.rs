//! Core types for SolarCart

use serde::{Deserialize, Deserializer, Serialize};

/// One product line in the cart
///
/// Field names on the wire follow the storefront's JSON shape
/// (`nome`, `preco`, `imagem`, `quantidade`), which is shared by the
/// local store and the `/api/carrinho` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque product identifier, unique within a cart
    pub id: String,
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Unit price (currency-agnostic, rendered as BRL)
    #[serde(rename = "preco", deserialize_with = "deserialize_price")]
    pub price: f64,
    /// Image filename relative to the product images directory
    #[serde(rename = "imagem")]
    pub image: String,
    /// Number of units, always at least 1
    #[serde(rename = "quantidade", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

impl CartItem {
    /// Create a new line with quantity 1
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Price multiplied by quantity
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Payload sent to `POST /api/carrinho`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartPayload {
    #[serde(rename = "produtos")]
    pub items: Vec<CartItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Number(f64),
    Text(String),
}

/// Prices arrive either as JSON numbers or as numeric strings (product
/// buttons carry them as data attributes). Both parse to the same value.
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let price = match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Number(n) => n,
        PriceRepr::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid price '{}'", s)))?,
    };

    if !price.is_finite() || price < 0.0 {
        return Err(D::Error::custom(format!("price must be non-negative, got {}", price)));
    }
    Ok(price)
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let quantity = u32::deserialize(deserializer)?;
    if quantity == 0 {
        return Err(D::Error::custom("quantity must be at least 1"));
    }
    Ok(quantity)
}
