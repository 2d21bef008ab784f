// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Category, Product},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    // --- PRODUTOS ---

    #[allow(clippy::too_many_arguments)]
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
        self.repo
            .create_product(
                executor,
                title,
                description,
                base_price,
                original_price,
                discount_percent,
                category,
                image_url,
            )
            .await
    }

    pub async fn list_products<'e, E>(&self, executor: E) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_products(executor).await
    }

    pub async fn get_product<'e, E>(
        &self,
        executor: E,
        product_id: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_product(executor, product_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Produto {}", product_id)))
    }

    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_product(
                executor,
                product_id,
                title,
                description,
                base_price,
                original_price,
                discount_percent,
                category,
                image_url,
            )
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Produto {}", product_id)))
    }

    pub async fn delete_product<'e, E>(&self, executor: E, product_id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete_product(executor, product_id).await? {
            return Err(AppError::ResourceNotFound(format!("Produto {}", product_id)));
        }
        Ok(())
    }

    // --- CATEGORIAS ---

    pub async fn create_category<'e, E>(&self, executor: E, name: &str) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.create_category(executor, name).await
    }

    pub async fn list_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_categories(executor).await
    }

    pub async fn delete_category<'e, E>(
        &self,
        executor: E,
        category_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete_category(executor, category_id).await? {
            return Err(AppError::ResourceNotFound(format!(
                "Categoria {}",
                category_id
            )));
        }
        Ok(())
    }
}
