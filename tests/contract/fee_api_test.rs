// Contract tests for the fee HTTP API
//
// Request/response shapes for /orders/{order_id}/fees and /fees/{id},
// served from the in-memory store.

use std::sync::Arc;

use actix_web::{test, web, App};
use orderitems::order_items::{controllers, InMemoryOrderItemStore, ItemContext, OrderItemService};
use serde_json::{json, Value};

fn service() -> web::Data<Arc<OrderItemService>> {
    let store = Arc::new(InMemoryOrderItemStore::new());
    web::Data::new(Arc::new(OrderItemService::with_store(
        store,
        Arc::new(ItemContext::default()),
    )))
}

#[actix_web::test]
async fn test_create_fee_returns_created_fee() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders/7/fees")
        .set_json(json!({
            "name": "Processing",
            "tax_status": "bogus",
            "total": 5,
            "taxes": {"total": {"1": "0.5"}}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["order_id"], 7);
    assert_eq!(body["type"], "fee");
    assert_eq!(body["name"], "Processing");
    assert_eq!(body["tax_class"], "");
    assert_eq!(body["tax_status"], "taxable");
    assert_eq!(body["total"], "5.00");
    assert_eq!(body["total_tax"], "0.50");
    assert_eq!(body["taxes"], json!({"total": {"1": "0.50"}}));
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn test_create_fee_with_unknown_tax_class_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders/7/fees")
        .set_json(json!({"tax_class": "bogus-class-not-in-registry"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["reason"], "order_item_fee_invalid_tax_class");
    assert_eq!(body["error"]["message"], "Invalid tax class");

    let req = test::TestRequest::get().uri("/orders/7/fees").to_request();
    let fees: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(fees.is_empty());
}

#[actix_web::test]
async fn test_patch_accepts_legacy_field_names() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders/1/fees")
        .set_json(json!({}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Fee");

    let req = test::TestRequest::patch()
        .uri(&format!("/fees/{}", id))
        .set_json(json!({
            "line_total": "12.5",
            "line_tax_data": {"total": {"2": "1", "5": "0.25"}},
            "name": "Rush handling"
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["total"], "12.50");
    assert_eq!(updated["total_tax"], "1.25");
    assert_eq!(updated["name"], "Rush handling");

    let req = test::TestRequest::get()
        .uri(&format!("/fees/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, updated);
}

#[actix_web::test]
async fn test_patch_rejects_derived_total_tax() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders/1/fees")
        .set_json(json!({"taxes": {"total": {"1": "2"}}}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/fees/{}", id))
        .set_json(json!({"total_tax": "99"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri(&format!("/fees/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["total_tax"], "2.00");
}

#[actix_web::test]
async fn test_oversized_tax_amounts_do_not_crash() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/orders/1/fees")
        .set_json(json!({"taxes": {"total": {
            "1": "79228162514264337593543950335",
            "2": "79228162514264337593543950335"
        }}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_tax"], "792281625142643375935439503.35");
}

#[actix_web::test]
async fn test_list_and_delete_fees() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    for total in ["1", "2"] {
        let req = test::TestRequest::post()
            .uri("/orders/3/fees")
            .set_json(json!({"total": total}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
    }

    let req = test::TestRequest::get().uri("/orders/3/fees").to_request();
    let fees: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fees.len(), 2);
    assert_eq!(fees[1]["total"], "2.00");

    let id = fees[0]["id"].as_i64().unwrap();
    let req = test::TestRequest::delete()
        .uri(&format!("/fees/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/fees/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_get_unknown_fee_is_not_found() {
    let app = test::init_service(
        App::new()
            .app_data(service())
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/fees/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
