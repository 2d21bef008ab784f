// src/db/pricing_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::{PriceList, PriceListItem},
};

#[derive(Clone)]
pub struct PricingRepository {
    pool: PgPool,
}

impl PricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_price_list<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
    ) -> Result<PriceList, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let list = sqlx::query_as::<_, PriceList>(
            "INSERT INTO price_lists (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(list)
    }

    pub async fn list_price_lists<'e, E>(&self, executor: E) -> Result<Vec<PriceList>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lists = sqlx::query_as::<_, PriceList>("SELECT * FROM price_lists ORDER BY name")
            .fetch_all(executor)
            .await?;

        Ok(lists)
    }

    pub async fn get_price_list<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<PriceList>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let list = sqlx::query_as::<_, PriceList>("SELECT * FROM price_lists WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(list)
    }

    pub async fn rename_price_list<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
    ) -> Result<Option<PriceList>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let list = sqlx::query_as::<_, PriceList>(
            "UPDATE price_lists SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(list)
    }

    // O CASCADE da FK limpa os overrides junto. Clientes que apontavam para
    // a lista ficam com a referência pendurada, o resolver cai no preço base.
    pub async fn delete_price_list<'e, E>(&self, executor: E, id: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM price_lists WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_overrides<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
    ) -> Result<Vec<PriceListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, PriceListItem>(
            "SELECT * FROM price_list_items WHERE price_list_id = $1 ORDER BY product_id",
        )
        .bind(price_list_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    // Overrides de TODAS as listas de uma vez, para montar o mapa do resolver
    // sem uma query por lista.
    pub async fn list_all_overrides<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<PriceListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, PriceListItem>("SELECT * FROM price_list_items")
            .fetch_all(executor)
            .await?;

        Ok(items)
    }

    // Lookup pontual usado no checkout: uma linha ou nada.
    pub async fn get_override<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
        product_id: i32,
    ) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let price: Option<Decimal> = sqlx::query_scalar(
            "SELECT price FROM price_list_items WHERE price_list_id = $1 AND product_id = $2",
        )
        .bind(price_list_id)
        .bind(product_id)
        .fetch_optional(executor)
        .await?;

        Ok(price)
    }

    pub async fn upsert_override<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
        product_id: i32,
        price: Decimal,
    ) -> Result<PriceListItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, PriceListItem>(
            r#"
            INSERT INTO price_list_items (price_list_id, product_id, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (price_list_id, product_id) DO UPDATE SET price = EXCLUDED.price
            RETURNING *
            "#,
        )
        .bind(price_list_id)
        .bind(product_id)
        .bind(price)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn delete_override<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
        product_id: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM price_list_items WHERE price_list_id = $1 AND product_id = $2",
        )
        .bind(price_list_id)
        .bind(product_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
