use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::models::{Item, ItemInput, ItemPage, CATEGORIES};
use crate::{ApiFailure, Db};

pub(crate) fn routes() -> Router<Db> {
    Router::new()
        .route("/items", get(list_items).post(add_item))
        .route("/items/paged", get(list_items_paged))
        .route("/items/search", get(search_items))
        .route("/items/category/{category}/paged", get(list_by_category_paged))
        .route(
            "/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    #[serde(default)]
    page_no: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn default_page_size() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    keyword: String,
    #[serde(default)]
    page_no: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorQuery {
    vendor_id: u64,
}

fn paginate(items: Vec<Item>, query: &PageQuery) -> Result<ItemPage, ApiFailure> {
    if query.page_size == 0 {
        return Err(ApiFailure::bad_request("Page size must not be less than one"));
    }
    let total_elements = items.len();
    let content = items
        .into_iter()
        .skip(query.page_no.saturating_mul(query.page_size))
        .take(query.page_size)
        .collect();
    Ok(ItemPage {
        content,
        total_elements,
    })
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn list_items_paged(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ItemPage>, ApiFailure> {
    let store = db.read().await;
    paginate(store.items.values().cloned().collect(), &query).map(Json)
}

async fn list_by_category_paged(
    State(db): State<Db>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ItemPage>, ApiFailure> {
    if !CATEGORIES.contains(&category.as_str()) {
        return Err(ApiFailure::bad_request(format!("unknown category {category}")));
    }
    let store = db.read().await;
    let items = store
        .items
        .values()
        .filter(|item| item.category.as_deref() == Some(category.as_str()))
        .cloned()
        .collect();
    paginate(items, &query).map(Json)
}

async fn search_items(
    State(db): State<Db>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ItemPage>, ApiFailure> {
    let keyword = query.keyword.to_lowercase();
    let store = db.read().await;
    let items = store
        .items
        .values()
        .filter(|item| item.item_name.to_lowercase().contains(&keyword))
        .cloned()
        .collect();
    let page = PageQuery {
        page_no: query.page_no,
        page_size: query.page_size,
    };
    paginate(items, &page).map(Json)
}

async fn add_item(
    State(db): State<Db>,
    Query(vendor): Query<VendorQuery>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>), ApiFailure> {
    if input.item_name.as_deref().is_none_or(str::is_empty) {
        return Err(ApiFailure::bad_request("itemName: must not be blank"));
    }
    let mut store = db.write().await;
    let mut item = Item {
        item_id: store.next_id(),
        vendor_id: Some(vendor.vendor_id),
        ..Item::default()
    };
    input.apply(&mut item);
    store.items.insert(item.item_id, item.clone());
    tracing::info!(item_id = item.item_id, name = %item.item_name, "item added");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(db): State<Db>,
    Path(item_id): Path<u64>,
) -> Result<Json<Item>, ApiFailure> {
    let store = db.read().await;
    store
        .items
        .get(&item_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Item", item_id))
}

async fn update_item(
    State(db): State<Db>,
    Path(item_id): Path<u64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, ApiFailure> {
    let mut store = db.write().await;
    let item = store
        .items
        .get_mut(&item_id)
        .ok_or_else(|| ApiFailure::not_found("Item", item_id))?;
    input.apply(item);
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(item_id): Path<u64>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store
        .items
        .remove(&item_id)
        .ok_or_else(|| ApiFailure::not_found("Item", item_id))?;
    tracing::info!(item_id, "item deleted");
    Ok(StatusCode::OK)
}
