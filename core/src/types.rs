//! Domain DTOs for the groceteria API.
//!
//! # Design
//! These types mirror the backend's JSON schema (camelCase field names) but
//! are defined independently of the mock-server crate; the integration tests
//! catch schema drift. Almost every field is optional: the records are owned
//! by the backend and this layer only holds transient copies, so it never
//! rejects a record for a missing attribute.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ParseCategoryError;

/// Fixed set of item categories understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Vegetables,
    Fruits,
    DairyProducts,
    Meat,
    GrainsAndOils,
    SpicesAndSeasonings,
    BakingIngredients,
    Condiments,
    Snacks,
    SkinCare,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Vegetables,
        Category::Fruits,
        Category::DairyProducts,
        Category::Meat,
        Category::GrainsAndOils,
        Category::SpicesAndSeasonings,
        Category::BakingIngredients,
        Category::Condiments,
        Category::Snacks,
        Category::SkinCare,
    ];

    /// Wire name, also used as the selector value and the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vegetables => "VEGETABLES",
            Category::Fruits => "FRUITS",
            Category::DairyProducts => "DAIRYPRODUCTS",
            Category::Meat => "MEAT",
            Category::GrainsAndOils => "GRAINSANDOILS",
            Category::SpicesAndSeasonings => "SPICESANDSEASONINGS",
            Category::BakingIngredients => "BAKINGINGREDIENTS",
            Category::Condiments => "CONDIMENTS",
            Category::Snacks => "SNACKS",
            Category::SkinCare => "SKINCARE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    /// Categories this client does not know read as absent.
    #[serde(default, deserialize_with = "known_category", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn known_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Category>, D::Error> {
    let Some(name) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match name.parse() {
        Ok(category) => Ok(Some(category)),
        Err(_) => {
            tracing::warn!(category = %name, "ignoring unknown item category");
            Ok(None)
        }
    }
}

/// Envelope form of a paginated item response.
///
/// Accepts both `content`/`totalElements` and the backend's
/// `items`/`totalItems` spelling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    #[serde(alias = "items")]
    pub content: Vec<Item>,
    #[serde(default, alias = "totalItems")]
    pub total_elements: Option<u64>,
}

impl PageEnvelope {
    /// Total to display: the reported count unless it is missing or zero,
    /// in which case the content length stands in.
    pub fn total(&self) -> u64 {
        match self.total_elements {
            Some(total) if total > 0 => total,
            _ => self.content.len() as u64,
        }
    }
}

/// Any response from an item listing endpoint.
///
/// The list endpoints answer with either a bare array or an envelope, and
/// nothing guarantees which. The shape decides the variant: an array is
/// `Bare`, an object carrying `content` or `items` is `Envelope`, and
/// anything else is kept verbatim as `Unrecognized`. An array or envelope
/// whose items do not decode is an error, never `Unrecognized`.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPage {
    Bare(Vec<Item>),
    Envelope(PageEnvelope),
    Unrecognized(serde_json::Value),
}

impl<'de> Deserialize<'de> for ItemPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_envelope = value.get("content").is_some() || value.get("items").is_some();
        match value {
            serde_json::Value::Array(_) => serde_json::from_value(value)
                .map(ItemPage::Bare)
                .map_err(de::Error::custom),
            serde_json::Value::Object(_) if is_envelope => serde_json::from_value(value)
                .map(ItemPage::Envelope)
                .map_err(de::Error::custom),
            other => Ok(ItemPage::Unrecognized(other)),
        }
    }
}

/// A shopping cart line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    /// Kept as raw JSON; the timestamp encoding is the backend's business.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub item_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// A platform user (customer, vendor or admin).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Sent on registration only; the server never echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Name shown in greetings: first name, falling back to the email.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_default()
    }
}

/// Login request body, shared by customer and admin sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}
