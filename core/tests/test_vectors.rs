//! Verify request building and list-response handling against the JSON test
//! vectors stored in `test-vectors/`.

use groceteria_core::{
    ApiError, Category, GroceteriaClient, HttpMethod, HttpRequest, HttpResponse, ItemListView,
};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn client() -> GroceteriaClient {
    GroceteriaClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn arg_u64(args: &serde_json::Value, key: &str) -> u64 {
    args[key].as_u64().unwrap_or_else(|| panic!("missing numeric arg {key}"))
}

fn arg_u32(args: &serde_json::Value, key: &str) -> u32 {
    arg_u64(args, key) as u32
}

fn arg_str<'a>(args: &'a serde_json::Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

/// Dispatch a vector's operation name to the matching build method.
fn build(c: &GroceteriaClient, operation: &str, args: &serde_json::Value) -> HttpRequest {
    match operation {
        "list_items" => c.build_list_items(),
        "list_items_paged" => {
            c.build_list_items_paged(arg_u32(args, "page_no"), arg_u32(args, "page_size"))
        }
        "list_items_by_category_paged" => c.build_list_items_by_category_paged(
            arg_str(args, "category").parse::<Category>().unwrap(),
            arg_u32(args, "page_no"),
            arg_u32(args, "page_size"),
        ),
        "search_items" => c.build_search_items(
            arg_str(args, "keyword"),
            arg_u32(args, "page_no"),
            arg_u32(args, "page_size"),
        ),
        "get_item" => c.build_get_item(arg_u64(args, "id")),
        "delete_item" => c.build_delete_item(arg_u64(args, "id")),
        "list_cart" => c.build_list_cart(),
        "list_cart_for_user" => c.build_list_cart_for_user(arg_u64(args, "id")),
        "delete_cart" => c.build_delete_cart(arg_u64(args, "id")),
        "update_cart_quantity" => {
            c.build_update_cart_quantity(arg_u64(args, "id"), arg_u64(args, "quantity"))
        }
        "list_orders" => c.build_list_orders(),
        "list_orders_for_user" => c.build_list_orders_for_user(arg_u64(args, "id")),
        "get_order" => c.build_get_order(arg_u64(args, "id")),
        "list_payments_for_user" => c.build_list_payments_for_user(arg_u64(args, "id")),
        "get_user" => c.build_get_user(arg_u64(args, "id")),
        "change_password" => {
            c.build_change_password(arg_u64(args, "id"), arg_str(args, "password"))
        }
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[test]
fn route_test_vectors() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = build(&c, case["operation"].as_str().unwrap(), &case["args"]);
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
    }
}

// ---------------------------------------------------------------------------
// Item list responses
// ---------------------------------------------------------------------------

#[test]
fn item_page_test_vectors() {
    let raw = include_str!("../../test-vectors/item_page.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Every case starts from a view already showing items 100 and 101.
        let mut view = ItemListView::new(client());
        view.apply_list_response(HttpResponse::new(200, r#"[{"itemId":100},{"itemId":101}]"#))
            .unwrap();

        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = view.apply_list_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "HttpError" => assert!(
                    matches!(err, ApiError::HttpError { .. }),
                    "{name}: expected HttpError"
                ),
                "NotFound" => {
                    assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound")
                }
                "DeserializationError" => assert!(
                    matches!(err, ApiError::DeserializationError(_)),
                    "{name}: expected DeserializationError"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }

        let ids: Vec<u64> = view.items().iter().filter_map(|item| item.item_id).collect();
        let expected_ids: Vec<u64> = serde_json::from_value(case["expected_ids"].clone()).unwrap();
        assert_eq!(ids, expected_ids, "{name}: items");
        assert_eq!(view.total_items(), case["expected_total"].as_u64().unwrap(), "{name}: total");
    }
}
