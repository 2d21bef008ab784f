// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Product},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        title: &str,
        description: Option<&str>,
        base_price: Decimal,
        original_price: Option<Decimal>,
        discount_percent: Option<i32>,
        category: &str,
        image_url: Option<&str>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                title, description, base_price, original_price,
                discount_percent, category, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(base_price)
        .bind(original_price)
        .bind(discount_percent)
        .bind(category)
        .bind(image_url)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn list_products<'e, E>(&self, executor: E) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY category, title")
                .fetch_all(executor)
                .await?;

        Ok(products)
    }

    pub async fn get_product<'e, E>(
        &self,
        executor: E,
        product_id: i32,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(executor)
            .await?;

        Ok(product)
    }

    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        title: &str,
        description: Option<&str>,
        base_price: Decimal,
        original_price: Option<Decimal>,
        discount_percent: Option<i32>,
        category: &str,
        image_url: Option<&str>,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET title = $2, description = $3, base_price = $4, original_price = $5,
                discount_percent = $6, category = $7, image_url = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(title)
        .bind(description)
        .bind(base_price)
        .bind(original_price)
        .bind(discount_percent)
        .bind(category)
        .bind(image_url)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    // Não apaga itens de pedidos antigos: eles guardam snapshot próprio.
    pub async fn delete_product<'e, E>(&self, executor: E, product_id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn create_category<'e, E>(&self, executor: E, name: &str) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(category)
    }

    pub async fn list_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
                .fetch_all(executor)
                .await?;

        Ok(categories)
    }

    pub async fn delete_category<'e, E>(
        &self,
        executor: E,
        category_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
