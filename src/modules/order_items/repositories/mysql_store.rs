// MySQL storage for order items and their metadata
//
// Tables (see migrations/):
// - order_items:    order_item_id, order_id, order_item_name, order_item_type
// - order_itemmeta: meta_id, order_item_id, meta_key, meta_value
//
// meta_value is text. Structured values are written as JSON and come back
// as the raw string; callers decode them where they expect structure.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use super::store::{ItemRecord, ItemStore, MetaStore};
use crate::core::{AppError, Result};
use crate::modules::order_items::models::meta::value_to_text;
use crate::modules::order_items::models::{ItemType, MetaEntry, MetaValue};

/// Repository for order item database operations
pub struct MySqlOrderItemStore {
    pool: MySqlPool,
}

impl MySqlOrderItemStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: &MySqlRow) -> Result<ItemRecord> {
        Ok(ItemRecord {
            id: row.try_get("order_item_id")?,
            order_id: row.try_get("order_id")?,
            name: row.try_get("order_item_name")?,
            item_type: row.try_get("order_item_type")?,
        })
    }
}

#[async_trait]
impl ItemStore for MySqlOrderItemStore {
    async fn find_item(&self, id: i64) -> Result<Option<ItemRecord>> {
        let row = sqlx::query(
            r#"
            SELECT order_item_id, order_id, order_item_name, order_item_type
            FROM order_items
            WHERE order_item_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch order item: {}", e)))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn insert_item(&self, record: &ItemRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO order_items (order_id, order_item_name, order_item_type)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.order_id)
        .bind(&record.name)
        .bind(&record.item_type)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create order item: {}", e)))?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::internal("Order item id out of range"))
    }

    async fn update_item(&self, record: &ItemRecord) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE order_items
            SET order_id = ?, order_item_name = ?, order_item_type = ?
            WHERE order_item_id = ?
            "#,
        )
        .bind(record.order_id)
        .bind(&record.name)
        .bind(&record.item_type)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update order item: {}", e)))?;

        Ok(())
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM order_items WHERE order_item_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete order item: {}", e)))?;

        Ok(())
    }

    async fn list_order_items(
        &self,
        order_id: i64,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ItemRecord>> {
        let rows = match item_type {
            Some(item_type) => {
                sqlx::query(
                    r#"
                    SELECT order_item_id, order_id, order_item_name, order_item_type
                    FROM order_items
                    WHERE order_id = ? AND order_item_type = ?
                    ORDER BY order_item_id
                    "#,
                )
                .bind(order_id)
                .bind(item_type.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT order_item_id, order_id, order_item_name, order_item_type
                    FROM order_items
                    WHERE order_id = ?
                    ORDER BY order_item_id
                    "#,
                )
                .bind(order_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to list order items: {}", e)))?;

        rows.iter().map(Self::record_from_row).collect()
    }
}

#[async_trait]
impl MetaStore for MySqlOrderItemStore {
    async fn get_meta(&self, item_id: i64, key: &str) -> Result<Option<MetaValue>> {
        let value: Option<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT meta_value
            FROM order_itemmeta
            WHERE order_item_id = ? AND meta_key = ?
            ORDER BY meta_id
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch order item meta: {}", e)))?;

        Ok(value.map(|text| MetaValue::String(text.unwrap_or_default())))
    }

    async fn list_meta(&self, item_id: i64) -> Result<Vec<MetaEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT meta_id, meta_key, meta_value
            FROM order_itemmeta
            WHERE order_item_id = ?
            ORDER BY meta_id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list order item meta: {}", e)))?;

        rows.iter()
            .map(|row| -> Result<MetaEntry> {
                let value: Option<String> = row.try_get("meta_value")?;
                Ok(MetaEntry {
                    id: Some(row.try_get("meta_id")?),
                    key: row.try_get("meta_key")?,
                    value: MetaValue::String(value.unwrap_or_default()),
                })
            })
            .collect()
    }

    async fn add_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO order_itemmeta (order_item_id, meta_key, meta_value)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(key)
        .bind(value_to_text(value))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add order item meta: {}", e)))?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::internal("Order item meta id out of range"))
    }

    async fn update_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<()> {
        let text = value_to_text(value);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let meta_id: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT meta_id
            FROM order_itemmeta
            WHERE order_item_id = ? AND meta_key = ?
            ORDER BY meta_id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .bind(key)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch order item meta: {}", e)))?;

        match meta_id {
            Some(meta_id) => {
                sqlx::query("UPDATE order_itemmeta SET meta_value = ? WHERE meta_id = ?")
                    .bind(&text)
                    .bind(meta_id)
                    .execute(&mut *tx)
                    .await
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO order_itemmeta (order_item_id, meta_key, meta_value)
                    VALUES (?, ?, ?)
                    "#,
                )
                .bind(item_id)
                .bind(key)
                .bind(&text)
                .execute(&mut *tx)
                .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to write order item meta: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update_meta_by_id(&self, meta_id: i64, value: &MetaValue) -> Result<()> {
        let result = sqlx::query("UPDATE order_itemmeta SET meta_value = ? WHERE meta_id = ?")
            .bind(value_to_text(value))
            .bind(meta_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update order item meta: {}", e)))?;

        // MySQL counts changed rows only, so an unchanged value reports zero
        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT meta_id FROM order_itemmeta WHERE meta_id = ?")
                    .bind(meta_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::Internal(format!("Failed to fetch order item meta: {}", e))
                    })?;
            if exists.is_none() {
                return Err(AppError::not_found(format!("Order item meta {}", meta_id)));
            }
        }

        Ok(())
    }

    async fn delete_meta_by_id(&self, meta_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM order_itemmeta WHERE meta_id = ?")
            .bind(meta_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete order item meta: {}", e)))?;

        Ok(())
    }

    async fn delete_all_meta(&self, item_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM order_itemmeta WHERE order_item_id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete order item meta: {}", e)))?;

        Ok(())
    }
}
