//! Stateless HTTP request builder and response parser for the groceteria API.
//!
//! # Design
//! `GroceteriaClient` holds only a `base_url` and carries no mutable state
//! between calls. Each backend operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the round-trip in between. Inputs are
//! never validated here; whatever the caller passes is forwarded and the
//! backend's verdict comes back through `parse_*`.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Cart, Category, Credentials, EmailRequest, Item, ItemPage, Order, Payment, User};

/// Synchronous, stateless client for the groceteria API.
#[derive(Debug, Clone)]
pub struct GroceteriaClient {
    base_url: String,
}

impl GroceteriaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The fixed category list. Local data, no request involved.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn build_sign_up(&self, user: &User) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/users/register".to_string(), user)
    }

    pub fn parse_sign_up(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 201)
    }

    pub fn build_user_sign_in(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/users/login".to_string(), credentials)
    }

    pub fn parse_user_sign_in(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    /// Admins sign in through the same endpoint as customers.
    pub fn build_admin_sign_in(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.build_user_sign_in(credentials)
    }

    pub fn parse_admin_sign_in(&self, response: HttpResponse) -> Result<User, ApiError> {
        self.parse_user_sign_in(response)
    }

    pub fn build_get_user(&self, user_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/users/{user_id}"))
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    /// The target id comes from the body. A user without an id produces
    /// `/users/`, which the backend rejects.
    pub fn build_update_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        let id = user.user_id.map(|id| id.to_string()).unwrap_or_default();
        self.json(HttpMethod::Put, format!("/users/{id}"), user)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_forgot_password(&self, email: &str) -> Result<HttpRequest, ApiError> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.json(HttpMethod::Post, "/users/forgot-password".to_string(), &body)
    }

    pub fn parse_forgot_password(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    /// The backend takes the new password as a path segment with an empty
    /// JSON object as body.
    pub fn build_change_password(&self, user_id: u64, password: &str) -> HttpRequest {
        let password = encode(password);
        self.empty_json(HttpMethod::Post, format!("/users/{user_id}/{password}"))
    }

    pub fn parse_change_password(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    pub fn build_list_items(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/items".to_string())
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_list_items_paged(&self, page_no: u32, page_size: u32) -> HttpRequest {
        self.bare(
            HttpMethod::Get,
            format!("/items/paged?pageNo={page_no}&pageSize={page_size}"),
        )
    }

    pub fn build_list_items_by_category_paged(
        &self,
        category: Category,
        page_no: u32,
        page_size: u32,
    ) -> HttpRequest {
        self.bare(
            HttpMethod::Get,
            format!("/items/category/{category}/paged?pageNo={page_no}&pageSize={page_size}"),
        )
    }

    pub fn build_search_items(&self, keyword: &str, page_no: u32, page_size: u32) -> HttpRequest {
        let keyword = encode(keyword);
        self.bare(
            HttpMethod::Get,
            format!("/items/search?keyword={keyword}&pageNo={page_no}&pageSize={page_size}"),
        )
    }

    /// Parse the response of any item listing endpoint, paged or not.
    pub fn parse_item_page(&self, response: HttpResponse) -> Result<ItemPage, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_add_item(&self, item: &Item, vendor_id: u64) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("/items?vendorId={vendor_id}"), item)
    }

    pub fn parse_add_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 201)
    }

    pub fn build_get_item(&self, item_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/items/{item_id}"))
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_edit_item(&self, item_id: u64, item: &Item) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("/items/{item_id}"), item)
    }

    pub fn parse_edit_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_delete_item(&self, item_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/items/{item_id}"))
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    // -----------------------------------------------------------------------
    // Cart
    // -----------------------------------------------------------------------

    pub fn build_list_cart(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/cart".to_string())
    }

    pub fn build_list_cart_for_user(&self, user_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/cart/user/{user_id}"))
    }

    pub fn parse_list_cart(&self, response: HttpResponse) -> Result<Vec<Cart>, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_add_to_cart(
        &self,
        cart: &Cart,
        item_id: u64,
        user_id: u64,
    ) -> Result<HttpRequest, ApiError> {
        self.json(
            HttpMethod::Post,
            format!("/cart?itemId={item_id}&userId={user_id}"),
            cart,
        )
    }

    pub fn parse_add_to_cart(&self, response: HttpResponse) -> Result<Cart, ApiError> {
        parse_json(response, 201)
    }

    pub fn build_delete_cart(&self, cart_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/cart/{cart_id}"))
    }

    pub fn parse_delete_cart(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn build_update_cart_quantity(&self, cart_id: u64, quantity: u64) -> HttpRequest {
        self.empty_json(
            HttpMethod::Put,
            format!("/cart/{cart_id}/quantity?quantity={quantity}"),
        )
    }

    pub fn parse_update_cart_quantity(&self, response: HttpResponse) -> Result<Cart, ApiError> {
        parse_json(response, 200)
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    pub fn build_list_orders(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/orders".to_string())
    }

    pub fn build_list_orders_for_user(&self, user_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/orders/user/{user_id}"))
    }

    pub fn parse_list_orders(&self, response: HttpResponse) -> Result<Vec<Order>, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_get_order(&self, order_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/orders/{order_id}"))
    }

    pub fn parse_get_order(&self, response: HttpResponse) -> Result<Order, ApiError> {
        parse_json(response, 200)
    }

    pub fn build_place_order(&self, order: &Order) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/orders".to_string(), order)
    }

    pub fn build_place_order_for_user(
        &self,
        user_id: u64,
        order: &Order,
    ) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("/orders?userId={user_id}"), order)
    }

    pub fn parse_place_order(&self, response: HttpResponse) -> Result<Order, ApiError> {
        parse_json(response, 201)
    }

    // -----------------------------------------------------------------------
    // Payments
    // -----------------------------------------------------------------------

    /// `orderId` and `userId` are repeated as query parameters when the
    /// payment carries them.
    pub fn build_add_payment(&self, payment: &Payment) -> Result<HttpRequest, ApiError> {
        let mut params = Vec::new();
        if let Some(order_id) = payment.order_id {
            params.push(format!("orderId={order_id}"));
        }
        if let Some(user_id) = payment.user_id {
            params.push(format!("userId={user_id}"));
        }
        let path = if params.is_empty() {
            "/payments".to_string()
        } else {
            format!("/payments?{}", params.join("&"))
        };
        self.json(HttpMethod::Post, path, payment)
    }

    pub fn parse_add_payment(&self, response: HttpResponse) -> Result<Payment, ApiError> {
        parse_json(response, 201)
    }

    pub fn build_list_payments_for_user(&self, user_id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/payments/user/{user_id}"))
    }

    pub fn parse_list_payments(&self, response: HttpResponse) -> Result<Vec<Payment>, ApiError> {
        parse_json(response, 200)
    }

    // -----------------------------------------------------------------------
    // Request construction
    // -----------------------------------------------------------------------

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        self.request(method, path, Vec::new(), None)
    }

    fn json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        body: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(method, path, json_headers(), Some(body)))
    }

    fn empty_json(&self, method: HttpMethod, path: String) -> HttpRequest {
        self.request(method, path, json_headers(), Some("{}".to_string()))
    }

    fn request(
        &self,
        method: HttpMethod,
        path: String,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> HttpRequest {
        let path = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %path, "built request");
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(error = %e, "response body did not match the expected shape");
        ApiError::DeserializationError(e.to_string())
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    tracing::warn!(status = response.status, expected, "unexpected response status");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GroceteriaClient {
        GroceteriaClient::new("http://localhost:8080/api/v1")
    }

    fn json_header() -> Vec<(String, String)> {
        vec![("content-type".to_string(), "application/json".to_string())]
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/v1/items");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_category_paged_uses_wire_name() {
        let req = client().build_list_items_by_category_paged(Category::DairyProducts, 2, 5);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:8080/api/v1/items/category/DAIRYPRODUCTS/paged?pageNo=2&pageSize=5"
        );
    }

    #[test]
    fn build_search_items_encodes_keyword() {
        let req = client().build_search_items("red apple&co", 0, 10);
        assert_eq!(
            req.path,
            "http://localhost:8080/api/v1/items/search?keyword=red%20apple%26co&pageNo=0&pageSize=10"
        );
    }

    #[test]
    fn build_add_item_carries_vendor_and_body() {
        let item = Item {
            item_name: "Tomato".to_string(),
            category: Some(Category::Vegetables),
            ..Item::default()
        };
        let req = client().build_add_item(&item, 2001).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/items?vendorId=2001");
        assert_eq!(req.headers, json_header());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["itemName"], "Tomato");
        assert_eq!(body["category"], "VEGETABLES");
    }

    #[test]
    fn build_delete_item_produces_correct_request() {
        let req = client().build_delete_item(42);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/v1/items/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn sign_in_shares_the_login_endpoint() {
        let credentials = Credentials {
            email: "admin@shop.test".to_string(),
            password: "secret".to_string(),
        };
        let user = client().build_user_sign_in(&credentials).unwrap();
        let admin = client().build_admin_sign_in(&credentials).unwrap();
        assert_eq!(user, admin);
        assert_eq!(user.path, "http://localhost:8080/api/v1/users/login");
    }

    #[test]
    fn build_update_user_takes_id_from_body() {
        let user = User {
            user_id: Some(9),
            first_name: Some("Ana".to_string()),
            ..User::default()
        };
        let req = client().build_update_user(&user).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/v1/users/9");
    }

    #[test]
    fn build_change_password_sends_empty_object() {
        let req = client().build_change_password(9, "n3w/pass");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/users/9/n3w%2Fpass");
        assert_eq!(req.body.as_deref(), Some("{}"));
        assert_eq!(req.headers, json_header());
    }

    #[test]
    fn build_update_cart_quantity_uses_query() {
        let req = client().build_update_cart_quantity(5551, 3);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/v1/cart/5551/quantity?quantity=3");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn build_add_payment_repeats_ids_in_query() {
        let payment = Payment {
            order_id: Some(12),
            user_id: Some(3),
            paid_amount: Some(99.5),
            ..Payment::default()
        };
        let req = client().build_add_payment(&payment).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/v1/payments?orderId=12&userId=3");

        let req = client().build_add_payment(&Payment::default()).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/v1/payments");
    }

    #[test]
    fn build_place_order_for_user_uses_query() {
        let req = client()
            .build_place_order_for_user(3, &Order::default())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/orders?userId=3");
    }

    #[test]
    fn parse_item_page_branches_on_shape() {
        let bare = HttpResponse::new(200, r#"[{"itemId":1,"itemName":"Milk"}]"#);
        assert!(matches!(
            client().parse_item_page(bare).unwrap(),
            ItemPage::Bare(_)
        ));

        let envelope = HttpResponse::new(200, r#"{"content":[],"totalElements":0}"#);
        assert!(matches!(
            client().parse_item_page(envelope).unwrap(),
            ItemPage::Envelope(_)
        ));
    }

    #[test]
    fn parse_get_item_not_found() {
        let err = client()
            .parse_get_item(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_add_item_wrong_status() {
        let err = client()
            .parse_add_item(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_item_expects_ok() {
        assert!(client().parse_delete_item(HttpResponse::new(200, "")).is_ok());
        let err = client()
            .parse_delete_item(HttpResponse::new(204, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 204, .. }));
    }

    #[test]
    fn parse_list_orders_bad_json() {
        let err = client()
            .parse_list_orders(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_sign_in_returns_user() {
        let response = HttpResponse::new(
            200,
            r#"{"userId":1001,"firstName":"Ana","email":"ana@shop.test","role":"ADMIN"}"#,
        );
        let user = client().parse_admin_sign_in(response).unwrap();
        assert_eq!(user.user_id, Some(1001));
        assert_eq!(user.role.as_deref(), Some("ADMIN"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = GroceteriaClient::new("http://localhost:8080/api/v1/");
        assert_eq!(client.build_list_cart().path, "http://localhost:8080/api/v1/cart");
    }

    #[test]
    fn categories_are_the_fixed_list() {
        let categories = client().categories();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0], Category::Vegetables);
        assert_eq!(categories[9], Category::SkinCare);
    }
}
