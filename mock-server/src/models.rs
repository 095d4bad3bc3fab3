use serde::{Deserialize, Serialize};

pub const CATEGORIES: [&str; 10] = [
    "VEGETABLES",
    "FRUITS",
    "DAIRYPRODUCTS",
    "MEAT",
    "GRAINSANDOILS",
    "SPICESANDSEASONINGS",
    "BAKINGINGREDIENTS",
    "CONDIMENTS",
    "SNACKS",
    "SKINCARE",
];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: u64,
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mrp_price: f64,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u64>,
}

/// Body of item create and update. Absent fields are left untouched on update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub item_name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub mrp_price: Option<f64>,
    pub quantity: Option<u64>,
    pub category: Option<String>,
}

impl ItemInput {
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.item_name {
            item.item_name = name;
        }
        if self.image.is_some() {
            item.image = self.image;
        }
        if self.description.is_some() {
            item.description = self.description;
        }
        if let Some(price) = self.mrp_price {
            item.mrp_price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if self.category.is_some() {
            item.category = self.category;
        }
    }
}

/// Paged listing in envelope form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub content: Vec<Item>,
    pub total_elements: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: u64,
    pub quantity: u64,
    pub mrp_price: f64,
    pub item_id: u64,
    pub user_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInput {
    pub quantity: Option<u64>,
    pub mrp_price: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: u64,
    pub total_price: f64,
    pub order_status: String,
    pub payment_status: String,
    /// Milliseconds since the Unix epoch.
    pub order_date: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub item_ids: Vec<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub total_price: Option<f64>,
    pub user_id: Option<u64>,
    #[serde(default)]
    pub item_ids: Vec<u64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub total_price: Option<f64>,
    pub order_id: Option<u64>,
    pub paid_date: Option<String>,
    pub paid_amount: Option<f64>,
    pub user_id: Option<u64>,
}

/// A user as the API exposes it. The password never leaves the server.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    pub role: String,
}

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub user: User,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub zipcode: Option<String>,
    pub role: Option<String>,
}

impl UserInput {
    /// Copy profile fields onto `user`. Email, password and role are handled
    /// by the caller.
    pub fn apply_profile(&self, user: &mut User) {
        let fields = [
            (&self.first_name, &mut user.first_name),
            (&self.last_name, &mut user.last_name),
            (&self.phone_number, &mut user.phone_number),
            (&self.district, &mut user.district),
            (&self.state, &mut user.state),
            (&self.address, &mut user.address),
            (&self.zipcode, &mut user.zipcode),
        ];
        for (input, target) in fields {
            if input.is_some() {
                target.clone_from(input);
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_camel_case() {
        let item = Item {
            item_id: 501,
            item_name: "Tomato".to_string(),
            mrp_price: 30.0,
            quantity: 100,
            category: Some("VEGETABLES".to_string()),
            ..Item::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemId"], 501);
        assert_eq!(json["itemName"], "Tomato");
        assert_eq!(json["mrpPrice"], 30.0);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn item_input_only_overwrites_present_fields() {
        let mut item = Item {
            item_id: 1,
            item_name: "Milk".to_string(),
            mrp_price: 2.5,
            quantity: 10,
            ..Item::default()
        };
        let input: ItemInput = serde_json::from_str(r#"{"mrpPrice":3.0}"#).unwrap();
        input.apply(&mut item);
        assert_eq!(item.item_name, "Milk");
        assert_eq!(item.mrp_price, 3.0);
        assert_eq!(item.quantity, 10);
    }

    #[test]
    fn user_never_serializes_a_password_field() {
        let user = User {
            user_id: 1,
            email: "a@b.c".to_string(),
            role: "USER".to_string(),
            ..User::default()
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn user_input_profile_update_keeps_missing_fields() {
        let mut user = User {
            first_name: Some("Ana".to_string()),
            state: Some("Goa".to_string()),
            ..User::default()
        };
        let input: UserInput = serde_json::from_str(r#"{"state":"Kerala"}"#).unwrap();
        input.apply_profile(&mut user);
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert_eq!(user.state.as_deref(), Some("Kerala"));
    }

    #[test]
    fn login_request_requires_both_fields() {
        let result: Result<LoginRequest, _> = serde_json::from_str(r#"{"email":"a@b.c"}"#);
        assert!(result.is_err());
    }
}
