//! Product catalog routes: public browsing and admin management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::product::{
    check_offer_price, resolve_offer_price, BulkUpdateResult, BulkVisibilityRequest,
    CreateProductRequest, Product, ProductQuery, UpdateProductRequest,
};
use persistence::repositories::{ProductFilter, ProductInput, ProductRepository};
use shared::pagination::{PageParams, Paginated};
use shared::validation::slugify;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn product_not_found() -> ApiError {
    ApiError::NotFound("Product not found".into())
}

async fn list_with_filter(
    state: &AppState,
    query: ProductQuery,
    visible_only: bool,
) -> Result<Paginated<Product>, ApiError> {
    let page = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let filter = ProductFilter {
        visible_only,
        category: query.category.filter(|c| !c.trim().is_empty()),
        featured: query.featured,
        search: query.search,
    };

    let repo = ProductRepository::new(state.pool.clone());
    let total = repo.count(&filter).await?;
    let products = repo
        .list(&filter, i64::from(page.limit()), page.offset())
        .await?;

    Ok(Paginated::new(
        products.into_iter().map(Product::from).collect(),
        &page,
        total,
    ))
}

/// Resolve the slug for a new or renamed product.
fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String, ApiError> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    };
    if slug.is_empty() {
        return Err(ApiError::validation(
            "Slug could not be derived from the product name",
        ));
    }
    Ok(slug)
}

/// Merge a partial update into the stored product.
///
/// The offer price is recomputed from the percentage when MRP or
/// percentage change without an explicit price.
fn apply_update(current: Product, request: UpdateProductRequest) -> Result<ProductInput, ApiError> {
    let mrp = request.mrp.unwrap_or(current.mrp);
    let offer_percentage = request.offer_percentage.unwrap_or(current.offer_percentage);
    let offer_price = match request.offer_price {
        Some(price) => price,
        None if request.mrp.is_some() || request.offer_percentage.is_some() => {
            resolve_offer_price(mrp, offer_percentage, None)
        }
        None => current.offer_price,
    };
    check_offer_price(mrp, offer_price)
        .map_err(|_| ApiError::validation("Offer price cannot exceed MRP"))?;

    let name = request
        .name
        .map(|n| n.trim().to_string())
        .unwrap_or(current.name);
    let slug = match request.slug {
        Some(slug) => resolve_slug(Some(&slug), &name)?,
        None => current.slug,
    };

    Ok(ProductInput {
        name,
        slug,
        description: request.description.unwrap_or(current.description),
        category: request.category.unwrap_or(current.category),
        mrp,
        offer_percentage,
        offer_price,
        images: request.images.unwrap_or(current.images),
        is_customizable: request.is_customizable.unwrap_or(current.is_customizable),
        customization_note: match request.customization_note {
            Some(note) if note.trim().is_empty() => None,
            Some(note) => Some(note),
            None => current.customization_note,
        },
        is_visible: request.is_visible.unwrap_or(current.is_visible),
        is_featured: request.is_featured.unwrap_or(current.is_featured),
    })
}

/// List visible products.
///
/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Paginated<Product>>, ApiError> {
    Ok(Json(list_with_filter(&state, query, true).await?))
}

/// Get a visible product.
///
/// GET /api/products/:product_id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product: Product = ProductRepository::new(state.pool.clone())
        .find_by_id(product_id)
        .await?
        .ok_or_else(product_not_found)?
        .into();

    // Hidden products look the same as missing ones to shoppers.
    if !product.is_visible {
        return Err(product_not_found());
    }
    Ok(Json(product))
}

/// List all products, hidden ones included.
///
/// GET /api/admin/products
pub async fn admin_list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Paginated<Product>>, ApiError> {
    Ok(Json(list_with_filter(&state, query, false).await?))
}

/// Get any product.
///
/// GET /api/admin/products/:product_id
pub async fn admin_get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = ProductRepository::new(state.pool.clone())
        .find_by_id(product_id)
        .await?
        .ok_or_else(product_not_found)?;
    Ok(Json(product.into()))
}

/// Create a product.
///
/// POST /api/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    request.validate()?;

    let name = request.name.trim().to_string();
    let slug = resolve_slug(request.slug.as_deref(), &name)?;
    let input = ProductInput {
        offer_price: resolve_offer_price(request.mrp, request.offer_percentage, request.offer_price),
        name,
        slug,
        description: request.description,
        category: request.category,
        mrp: request.mrp,
        offer_percentage: request.offer_percentage,
        images: request.images,
        is_customizable: request.is_customizable,
        customization_note: request.customization_note.filter(|n| !n.trim().is_empty()),
        is_visible: request.is_visible,
        is_featured: request.is_featured,
    };

    let product: Product = ProductRepository::new(state.pool.clone())
        .create(&input)
        .await?
        .into();

    info!(product_id = %product.id, slug = %product.slug, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
///
/// PUT /api/admin/products/:product_id
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    request.validate()?;

    let repo = ProductRepository::new(state.pool.clone());
    let current: Product = repo
        .find_by_id(product_id)
        .await?
        .ok_or_else(product_not_found)?
        .into();

    let input = apply_update(current, request)?;
    let product: Product = repo
        .update(product_id, &input)
        .await?
        .ok_or_else(product_not_found)?
        .into();

    info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/admin/products/:product_id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = ProductRepository::new(state.pool.clone())
        .delete(product_id)
        .await?;
    if deleted == 0 {
        return Err(product_not_found());
    }

    info!(product_id = %product_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Show or hide many products.
///
/// POST /api/admin/products/bulk-visibility
///
/// Each id is updated on its own; ids that fail are reported, not rolled back.
pub async fn bulk_set_visibility(
    State(state): State<AppState>,
    Json(request): Json<BulkVisibilityRequest>,
) -> Result<Json<BulkUpdateResult>, ApiError> {
    request.validate()?;

    let result = ProductRepository::new(state.pool.clone())
        .bulk_set_visibility(&request.ids, request.is_visible)
        .await;

    info!(
        updated = result.updated.len(),
        failed = result.failed.len(),
        is_visible = request.is_visible,
        "Bulk product visibility update"
    );
    Ok(Json(result))
}
