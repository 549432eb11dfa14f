// Fee persistence through the generic item + metadata stores
//
// Runs against the in-memory store, which keeps values as given; the
// serialized-text cases write raw strings the way a SQL store returns them.

use std::sync::Arc;

use orderitems::order_items::{
    InMemoryOrderItemStore, ItemContext, ItemStore, MetaStore, OrderItemService, TaxStatus,
};
use serde_json::json;

fn setup() -> (Arc<InMemoryOrderItemStore>, OrderItemService) {
    let store = Arc::new(InMemoryOrderItemStore::new());
    let service = OrderItemService::with_store(store.clone(), Arc::new(ItemContext::default()));
    (store, service)
}

#[tokio::test]
async fn test_fee_round_trip() {
    let (_, service) = setup();

    let mut fee = service.new_fee();
    fee.set_order_id(12);
    fee.set_name("Processing");
    fee.data_mut().set_tax_class("").unwrap();
    fee.data_mut().set_tax_status("taxable");
    fee.data_mut().set_total("5.00");
    fee.data_mut().set_taxes(&json!({"total": {"1": "0.50"}}));
    let id = service.save(&mut fee).await.unwrap();
    assert!(id > 0);

    let mut loaded = service.new_fee();
    service.read(&mut loaded, id).await.unwrap();

    assert_eq!(loaded.get_id(), id);
    assert_eq!(loaded.get_order_id(), 12);
    assert_eq!(loaded.get_name(), "Processing");
    assert_eq!(loaded.data().get_tax_class(), "");
    assert_eq!(loaded.data().get_tax_status(), TaxStatus::Taxable);
    assert_eq!(loaded.data().get_total(), "5.00");
    assert_eq!(loaded.data().get_taxes(), fee.data().get_taxes());
    assert_eq!(loaded.data().get_total_tax(), "0.50");
}

#[tokio::test]
async fn test_save_writes_the_five_fee_keys() {
    let (store, service) = setup();

    let mut fee = service.new_fee();
    fee.data_mut().set_tax_class("Zero rate").unwrap();
    fee.data_mut().set_tax_status("none");
    fee.data_mut().set_total("2");
    fee.data_mut().set_taxes(&json!({"total": {"3": "0.2"}}));
    let id = service.save(&mut fee).await.unwrap();

    let get = |key: &'static str| {
        let store = store.clone();
        async move { store.get_meta(id, key).await.unwrap() }
    };
    assert_eq!(get("_tax_class").await, Some(json!("Zero rate")));
    assert_eq!(get("_tax_status").await, Some(json!("none")));
    assert_eq!(get("_line_total").await, Some(json!("2.00")));
    assert_eq!(get("_line_tax").await, Some(json!("0.20")));
    assert_eq!(get("_line_tax_data").await, Some(json!({"total": {"3": "0.20"}})));
    assert_eq!(get("_line_subtotal").await, None);
    assert_eq!(get("_line_subtotal_tax").await, None);

    let record = store.find_item(id).await.unwrap().unwrap();
    assert_eq!(record.item_type, "fee");
    assert_eq!(record.name, "Fee");
}

#[tokio::test]
async fn test_internal_keys_are_not_exposed_as_meta_data() {
    let (_, service) = setup();

    let mut fee = service.new_fee();
    fee.add_meta_data("colour", json!("red")).unwrap();
    fee.data_mut().set_total("1");
    let id = service.save(&mut fee).await.unwrap();

    let mut loaded = service.new_fee();
    service.read(&mut loaded, id).await.unwrap();

    let keys: Vec<_> = loaded.meta_data().iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["colour"]);
    assert!(loaded.meta_data()[0].id.is_some());
}

#[tokio::test]
async fn test_read_decodes_serialized_tax_data() {
    let (store, service) = setup();

    let mut fee = service.new_fee();
    let id = service.save(&mut fee).await.unwrap();
    store
        .update_meta(id, "_line_tax_data", &json!(r#"{"total":{"1":"1.5","2":"0.25"}}"#))
        .await
        .unwrap();
    store.update_meta(id, "_line_total", &json!("10")).await.unwrap();

    let mut loaded = service.new_fee();
    service.read(&mut loaded, id).await.unwrap();

    assert_eq!(loaded.data().get_total(), "10.00");
    assert_eq!(loaded.data().get_total_tax(), "1.75");
    assert_eq!(
        loaded.get_field("line_tax_data"),
        Some(json!({"total": {"1": "1.50", "2": "0.25"}}))
    );
}

#[tokio::test]
async fn test_read_of_item_without_fee_meta_uses_defaults() {
    let (store, service) = setup();

    let id = store
        .insert_item(&orderitems::order_items::repositories::ItemRecord {
            id: 0,
            order_id: 3,
            name: String::new(),
            item_type: "fee".to_string(),
        })
        .await
        .unwrap();

    let mut loaded = service.new_fee();
    service.read(&mut loaded, id).await.unwrap();

    assert_eq!(loaded.get_name(), "Fee");
    assert_eq!(loaded.data().get_tax_status(), TaxStatus::Taxable);
    assert_eq!(loaded.data().get_total(), "");
    assert_eq!(loaded.data().get_total_tax(), "0.00");
    assert!(loaded.data().get_taxes().is_empty());
}

#[tokio::test]
async fn test_deleted_meta_is_removed_on_save() {
    let (store, service) = setup();

    let mut fee = service.new_fee();
    fee.add_meta_data("colour", json!("red")).unwrap();
    let id = service.save(&mut fee).await.unwrap();

    fee.delete_meta_data("colour");
    service.save(&mut fee).await.unwrap();

    assert!(store.get_meta(id, "colour").await.unwrap().is_none());
    // fee props are still there
    assert!(store.get_meta(id, "_tax_status").await.unwrap().is_some());
}

#[tokio::test]
async fn test_legacy_writes_persist_under_canonical_keys() {
    let (store, service) = setup();

    let mut fee = service.new_fee();
    fee.set_field("line_total", &json!("12.50")).unwrap();
    fee.set_field("line_tax_data", &json!({"total": {"9": "2.5"}})).unwrap();
    let id = service.save(&mut fee).await.unwrap();

    assert_eq!(store.get_meta(id, "_line_total").await.unwrap(), Some(json!("12.50")));
    assert_eq!(store.get_meta(id, "_line_tax").await.unwrap(), Some(json!("2.50")));
    assert!(fee.meta_data().is_empty());
}

#[tokio::test]
async fn test_list_order_fees_skips_other_orders() {
    let (_, service) = setup();

    for order_id in [1, 1, 2] {
        let mut fee = service.new_fee();
        fee.set_order_id(order_id);
        service.save(&mut fee).await.unwrap();
    }

    assert_eq!(service.list_order_fees(1).await.unwrap().len(), 2);
    assert_eq!(service.list_order_fees(2).await.unwrap().len(), 1);
    assert!(service.list_order_fees(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_meta_keys_round_trip() {
    let (_, service) = setup();

    let mut fee = service.new_fee();
    fee.add_meta_data("colour", json!("red")).unwrap();
    fee.add_meta_data("colour", json!("blue")).unwrap();
    let id = service.save(&mut fee).await.unwrap();

    let mut loaded = service.new_fee();
    service.read(&mut loaded, id).await.unwrap();
    let values: Vec<_> = loaded.meta_data().iter().map(|m| m.value.clone()).collect();
    assert_eq!(values, vec![json!("red"), json!("blue")]);

    // updating by key touches the first row only
    loaded.update_meta_data("colour", json!("green")).unwrap();
    service.save(&mut loaded).await.unwrap();
    // saving twice doesn't duplicate rows
    service.save(&mut loaded).await.unwrap();

    let mut reloaded = service.new_fee();
    service.read(&mut reloaded, id).await.unwrap();
    let values: Vec<_> = reloaded.meta_data().iter().map(|m| m.value.clone()).collect();
    assert_eq!(values, vec![json!("green"), json!("blue")]);
}

#[tokio::test]
async fn test_delete_then_re_add_meta_key() {
    let (store, service) = setup();

    let mut fee = service.new_fee();
    fee.add_meta_data("colour", json!("red")).unwrap();
    let id = service.save(&mut fee).await.unwrap();

    fee.delete_meta_data("colour");
    fee.add_meta_data("colour", json!("blue")).unwrap();
    service.save(&mut fee).await.unwrap();

    let rows: Vec<_> = store
        .list_meta(id)
        .await
        .unwrap()
        .into_iter()
        .filter(|m| m.key == "colour")
        .map(|m| m.value)
        .collect();
    assert_eq!(rows, vec![json!("blue")]);
}
