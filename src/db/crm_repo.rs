// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::crm::Customer};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        price_list_id: Option<&str>,
        token: &str,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (full_name, email, phone, price_list_id, token)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(price_list_id)
        .bind(token)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY full_name")
                .fetch_all(executor)
                .await?;

        Ok(customers)
    }

    pub async fn get_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }

    // Identifica o cliente ativo da vitrine a partir do ?token= da URL.
    pub async fn get_customer_by_token<'e, E>(
        &self,
        executor: E,
        token: &str,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE token = $1")
            .bind(token)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        price_list_id: Option<&str>,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET full_name = $2, email = $3, phone = $4, price_list_id = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(price_list_id)
        .fetch_optional(executor)
        .await?;

        Ok(customer)
    }

    pub async fn delete_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
