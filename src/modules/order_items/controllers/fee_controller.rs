use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::Map;

use crate::core::error::AppError;
use crate::modules::order_items::models::{CreateFeeRequest, MetaValue};
use crate::modules::order_items::services::OrderItemService;

/// Add a fee to an order
/// POST /orders/{order_id}/fees
pub async fn create_fee(
    service: web::Data<Arc<OrderItemService>>,
    path: web::Path<i64>,
    request: web::Json<CreateFeeRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let fee = service.create_fee(order_id, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(fee))
}

/// List the fees of an order
/// GET /orders/{order_id}/fees
pub async fn list_order_fees(
    service: web::Data<Arc<OrderItemService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let fees = service.list_order_fees(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(fees))
}

/// Get fee by ID
/// GET /fees/{id}
pub async fn get_fee(
    service: web::Data<Arc<OrderItemService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let fee = service.get_fee(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(fee))
}

/// Update fee fields by name
/// PATCH /fees/{id}
///
/// Accepts `line_total`, `line_tax` and `line_tax_data` for older clients.
pub async fn update_fee(
    service: web::Data<Arc<OrderItemService>>,
    path: web::Path<i64>,
    fields: web::Json<Map<String, MetaValue>>,
) -> Result<HttpResponse, AppError> {
    let fee = service
        .update_fee(path.into_inner(), fields.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(fee))
}

/// Delete a fee
/// DELETE /fees/{id}
pub async fn delete_fee(
    service: web::Data<Arc<OrderItemService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_fee(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure fee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders/{order_id}/fees")
            .route("", web::post().to(create_fee))
            .route("", web::get().to(list_order_fees)),
    )
    .service(
        web::scope("/fees")
            .route("/{id}", web::get().to(get_fee))
            .route("/{id}", web::patch().to(update_fee))
            .route("/{id}", web::delete().to(delete_fee)),
    );
}
