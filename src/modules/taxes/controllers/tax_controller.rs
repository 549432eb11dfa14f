//! Tax class endpoints
//!
//! Read-only: tax classes are managed through configuration.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::modules::taxes::services::TaxClassRegistry;

/// List the valid tax classes, the standard ("") class first
///
/// GET /tax-classes
pub async fn list_tax_classes(registry: web::Data<Arc<dyn TaxClassRegistry>>) -> HttpResponse {
    let mut classes = vec![String::new()];
    classes.extend(registry.tax_classes());

    HttpResponse::Ok().json(serde_json::json!({
        "tax_classes": classes,
    }))
}

/// Configure tax routes
pub fn configure_tax_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tax-classes", web::get().to(list_tax_classes));
}
