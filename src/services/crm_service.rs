// src/services/crm_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::CrmRepository, models::crm::Customer};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
    }

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        price_list_id: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O token da vitrine nasce junto com o cliente e não muda.
        let token = Uuid::new_v4().simple().to_string();

        self.repo
            .create_customer(executor, full_name, email, phone, price_list_id, &token)
            .await
    }

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_customers(executor).await
    }

    pub async fn get_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_customer(executor, customer_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Cliente {}", customer_id)))
    }

    /// Cliente ativo da vitrine; token desconhecido vale como anônimo.
    pub async fn find_customer_by_token<'e, E>(
        &self,
        executor: E,
        token: &str,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_customer_by_token(executor, token).await
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        price_list_id: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_customer(executor, customer_id, full_name, email, phone, price_list_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Cliente {}", customer_id)))
    }

    pub async fn delete_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete_customer(executor, customer_id).await? {
            return Err(AppError::ResourceNotFound(format!(
                "Cliente {}",
                customer_id
            )));
        }
        Ok(())
    }
}
