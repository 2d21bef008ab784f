// src/db/orders_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderItem, OrderStatus, PickingStatus},
};

#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CABEÇALHO
    // =========================================================================

    // Id legível tipo "ORD-1001", tirado de uma sequence do banco.
    pub async fn next_order_id<'e, E>(&self, executor: E) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: String =
            sqlx::query_scalar("SELECT 'ORD-' || nextval('orders_display_seq')::TEXT")
                .fetch_one(executor)
                .await?;

        Ok(id)
    }

    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        id: &str,
        customer_id: Option<Uuid>,
        customer_name: &str,
        customer_phone: Option<&str>,
        customer_address: Option<&str>,
        discount_percent: i32,
        total_amount: Decimal,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, customer_id, customer_name, customer_phone,
                customer_address, discount_percent, total_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(customer_address)
        .bind(discount_percent)
        .bind(total_amount)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn list_orders<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(executor)
            .await?;

        Ok(orders)
    }

    pub async fn get_order<'e, E>(&self, executor: E, id: &str) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    // O token de picking é único: é a credencial inteira do separador.
    pub async fn get_order_by_picking_token<'e, E>(
        &self,
        executor: E,
        token: &str,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE picking_token = $1")
            .bind(token)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn update_order_header<'e, E>(
        &self,
        executor: E,
        id: &str,
        customer_name: &str,
        customer_phone: Option<&str>,
        customer_address: Option<&str>,
        discount_percent: i32,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_name = $2, customer_phone = $3, customer_address = $4,
                discount_percent = $5, status = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(customer_address)
        .bind(discount_percent)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn set_picking_token<'e, E>(
        &self,
        executor: E,
        id: &str,
        token: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE orders SET picking_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn set_total_and_status<'e, E>(
        &self,
        executor: E,
        id: &str,
        total_amount: Decimal,
        status: OrderStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE orders SET total_amount = $2, status = $3 WHERE id = $1")
            .bind(id)
            .bind(total_amount)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Chamado fora de transação, depois do commit do checkout: o link do
    // documento é best-effort e chega atrasado.
    pub async fn set_document_link(&self, id: &str, link: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE orders SET document_link = $2 WHERE id = $1")
            .bind(id)
            .bind(link)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: &str,
        position: i32,
        product_id: i32,
        title: &str,
        price: Decimal,
        quantity: i32,
        discount_percent: i32,
        total: Decimal,
        image_url: Option<&str>,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (
                order_id, position, product_id, title, price,
                quantity, discount_percent, total, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(position)
        .bind(product_id)
        .bind(title)
        .bind(price)
        .bind(quantity)
        .bind(discount_percent)
        .bind(total)
        .bind(image_url)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn list_order_items<'e, E>(
        &self,
        executor: E,
        order_id: &str,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY position",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    // Substituição integral: a edição de itens é delete-all + insert,
    // nunca merge por id.
    pub async fn delete_order_items<'e, E>(
        &self,
        executor: E,
        order_id: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Salva o progresso de um item durante a separação (sem mexer na
    // quantidade pedida).
    pub async fn update_item_picking<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        status: PickingStatus,
        picked_quantity: Option<i32>,
    ) -> Result<Option<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            UPDATE order_items
            SET picking_status = $2, picked_quantity = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(status)
        .bind(picked_quantity)
        .fetch_optional(executor)
        .await?;

        Ok(item)
    }

    // Fechamento da separação: a quantidade separada vira a quantidade do
    // item e o total da linha é regravado.
    pub async fn apply_picked_item<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        status: PickingStatus,
        quantity: i32,
        total: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE order_items
            SET picking_status = $2, quantity = $3, picked_quantity = $3, total = $4
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .bind(status)
        .bind(quantity)
        .bind(total)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Recalcula e atualiza em UMA única query, com subquery no UPDATE.
    pub async fn recalculate_order_total<'e, E>(
        &self,
        executor: E,
        order_id: &str,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: Decimal = sqlx::query_scalar(
            r#"
            UPDATE orders
            SET total_amount = (
                SELECT COALESCE(SUM(total), 0)
                FROM order_items
                WHERE order_items.order_id = orders.id
            )
            WHERE id = $1
            RETURNING total_amount
            "#,
        )
        .bind(order_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}
