//! Item CRUD and filter handlers

use crate::{
    error::Result,
    extractors::{PathParam, QueryParams, ValidatedJson},
    items::{ItemFilter, ItemRepositoryTrait},
    models::{DataResponse, Item, ItemFilterQuery, ItemPayload, MessageResponse},
    AppState,
};
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::info;

pub fn create_item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/filter", get(filter_items))
        .route("/items/filter/", get(filter_items))
        .route(
            "/items/:item_id",
            get(get_item)
                .post(create_item)
                .put(update_item)
                .delete(delete_item),
        )
}

pub async fn create_item(
    State(state): State<AppState>,
    PathParam(item_id): PathParam<i64>,
    ValidatedJson(payload): ValidatedJson<ItemPayload>,
) -> Result<Json<DataResponse<Item>>> {
    info!("POST /items/{} - name: {}", item_id, payload.name);

    let created = state.items.create(payload.into_record(item_id)).await?;
    Ok(Json(DataResponse::new("Item created", Item::from(created))))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    info!("GET /items");

    let items = state.items.list_all().await?;
    Ok(Json(items.into_iter().map(Item::from).collect()))
}

pub async fn filter_items(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ItemFilterQuery>,
) -> Result<Json<Vec<Item>>> {
    info!("GET /items/filter - {:?}", query);

    let filter = ItemFilter::try_from(query)?;
    let items = state.items.filter(&filter).await?;
    Ok(Json(items.into_iter().map(Item::from).collect()))
}

pub async fn get_item(
    State(state): State<AppState>,
    PathParam(item_id): PathParam<i64>,
) -> Result<Json<Item>> {
    info!("GET /items/{}", item_id);

    let item = state.items.get(item_id).await?;
    Ok(Json(Item::from(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    PathParam(item_id): PathParam<i64>,
    ValidatedJson(payload): ValidatedJson<ItemPayload>,
) -> Result<Json<DataResponse<Item>>> {
    info!("PUT /items/{} - name: {}", item_id, payload.name);

    let updated = state.items.update(payload.into_record(item_id)).await?;
    Ok(Json(DataResponse::new("Item updated", Item::from(updated))))
}

pub async fn delete_item(
    State(state): State<AppState>,
    PathParam(item_id): PathParam<i64>,
) -> Result<Json<MessageResponse>> {
    info!("DELETE /items/{}", item_id);

    state.items.delete(item_id).await?;
    Ok(Json(MessageResponse::new("Item deleted")))
}
