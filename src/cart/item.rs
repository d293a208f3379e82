use serde::{Deserialize, Deserializer, Serialize};

/// One distinct product in the cart.
///
/// Serialized field names match the blob written by the legacy mobile
/// client, so existing device storage loads unchanged. That client never
/// floored decrements, so persisted quantities may be negative; they load
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier; the match key for every cart operation.
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Opaque to the cart. Never used in arithmetic.
    pub price: f64,
    #[serde(deserialize_with = "clamped_quantity")]
    pub quantity: u32,
}

fn clamped_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

/// A product offered to `add_to_cart`. Quantity is owned by the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewCartItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the product into a cart line with the given quantity.
    pub fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}
