//! Product CRUD handlers.
//!
//! Every handler maps one HTTP request to store operations and renders the
//! uniform `{success, ...}` envelope. Store failures pass the underlying
//! error message through to the client.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    dtos::{
        CreateProductBody, DeleteEnvelope, ProductEnvelope, ProductsEnvelope, UpdateProductBody,
    },
    error::AppError,
    extractors::JsonOrForm,
    models::{NewProduct, ProductUpdate},
    AppState,
};

/// Create a new product from a JSON or form body.
pub async fn create_product(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<CreateProductBody>,
) -> Result<(StatusCode, Json<ProductEnvelope>), AppError> {
    let new_product = NewProduct::parse(body.name, body.description, body.price)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product = state.store.insert(new_product).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to insert product");
        AppError::store("Failed to create product", e)
    })?;

    tracing::info!(product_id = %product.id, name = %product.name, "Created product");

    Ok((
        StatusCode::CREATED,
        Json(ProductEnvelope {
            success: true,
            product: product.into(),
        }),
    ))
}

/// List every product in the collection.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsEnvelope>, AppError> {
    let products = state.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch products");
        AppError::store("Failed to fetch products", e)
    })?;

    Ok(Json(ProductsEnvelope {
        success: true,
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// Merge-update a product by id.
///
/// The path id is trimmed of surrounding whitespace before lookup. Fields
/// absent from the body are left untouched; a provided field that violates
/// the schema rules surfaces as a store-layer failure (500), not a 400.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(body): JsonOrForm<UpdateProductBody>,
) -> Result<Json<ProductEnvelope>, AppError> {
    let id = id.trim().to_string();

    let update = ProductUpdate::parse(body.name, body.description, body.price)
        .map_err(|e| AppError::store("Failed to update product", anyhow::Error::new(e)))?;

    let product = state
        .store
        .update_by_id(&id, update)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "Failed to update product");
            AppError::store("Failed to update product", e)
        })?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    tracing::info!(product_id = %id, "Updated product");

    Ok(Json(ProductEnvelope {
        success: true,
        product: product.into(),
    }))
}

/// Delete a product by id.
///
/// Lookup and delete are two separate operations against the same
/// identifier; the delete targets the id, not the fetched document.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteEnvelope>, AppError> {
    let existing = state.store.find_by_id(&id).await.map_err(|e| {
        tracing::error!(product_id = %id, error = %e, "Failed to look up product");
        AppError::store("Failed to delete product", e)
    })?;

    if existing.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    state.store.delete_by_id(&id).await.map_err(|e| {
        tracing::error!(product_id = %id, error = %e, "Failed to delete product");
        AppError::store("Failed to delete product", e)
    })?;

    tracing::info!(product_id = %id, "Deleted product");

    Ok(Json(DeleteEnvelope {
        success: true,
        message: "Product is successfully deleted".to_string(),
    }))
}
