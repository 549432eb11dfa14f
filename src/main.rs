use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderitems::config::{Config, StorageBackend};
use orderitems::order_items::{
    controllers as fee_routes, InMemoryOrderItemStore, ItemContext, MySqlOrderItemStore,
    OrderItemService,
};
use orderitems::taxes::{controllers as tax_routes, TaxClassRegistry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("orderitems={},actix_web=info", config.app.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting order item service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let ctx = Arc::new(
        ItemContext::from_config(&config.store).expect("Failed to load store settings"),
    );

    let service = match (config.storage, &config.database) {
        (StorageBackend::MySql, Some(database)) => {
            let pool = database
                .create_pool()
                .await
                .expect("Failed to create database pool");
            tracing::info!(
                "Database pool initialized ({} connections)",
                database.max_connections
            );
            OrderItemService::with_store(Arc::new(MySqlOrderItemStore::new(pool)), ctx.clone())
        }
        _ => {
            tracing::warn!("Using in-memory storage; order items will not survive a restart");
            OrderItemService::with_store(Arc::new(InMemoryOrderItemStore::new()), ctx.clone())
        }
    };
    let service = Arc::new(service);
    let tax_classes: Arc<dyn TaxClassRegistry> = ctx.tax_classes.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(tax_classes.clone()))
            .route("/health", web::get().to(health_check))
            .configure(fee_routes::configure)
            .configure(tax_routes::configure_tax_routes)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "orderitems"
    }))
}
