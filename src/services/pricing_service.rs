// src/services/pricing_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::PricingRepository,
    models::{
        catalog::{EffectivePrice, PriceListDetail, Product, StoreProduct},
        crm::Customer,
    },
};

/// Mapa de overrides em memória: lista de preço -> (produto -> preço).
pub type OverrideMaps = HashMap<String, HashMap<i32, Decimal>>;

// =============================================================================
//  RESOLUÇÃO DE PREÇO EFETIVO
// =============================================================================

// Núcleo puro: decide entre override e preço base. Quando o override vence,
// o preço base vira o "de" riscado; quando não, o "de" promocional do próprio
// produto passa intacto.
fn apply_override(product: &Product, override_price: Option<Decimal>) -> EffectivePrice {
    match override_price {
        Some(price) => EffectivePrice {
            price,
            original_price: Some(product.base_price),
            is_special_price: true,
        },
        None => EffectivePrice {
            price: product.base_price,
            original_price: product.original_price,
            is_special_price: false,
        },
    }
}

/// Preço que este cliente paga por este produto. Função total: cliente sem
/// lista, lista sem override ou referência pendurada caem todos no preço
/// base, nunca em erro.
pub fn resolve_effective_price(
    product: &Product,
    customer: Option<&Customer>,
    overrides: &OverrideMaps,
) -> EffectivePrice {
    let override_price = customer
        .and_then(|c| c.price_list_id.as_deref())
        .and_then(|list_id| overrides.get(list_id))
        .and_then(|prices| prices.get(&product.id))
        .copied();

    apply_override(product, override_price)
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct PricingService {
    repo: PricingRepository,
}

impl PricingService {
    pub fn new(repo: PricingRepository) -> Self {
        Self { repo }
    }

    // --- LISTAS DE PREÇO (back-office) ---

    pub async fn create_price_list<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
    ) -> Result<crate::models::catalog::PriceList, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.create_price_list(executor, id, name).await
    }

    pub async fn list_price_lists<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<crate::models::catalog::PriceList>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_price_lists(executor).await
    }

    pub async fn get_price_list_detail<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<PriceListDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let list = self
            .repo
            .get_price_list(&mut *conn, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Lista de preço {}", id)))?;

        let items = self.repo.list_overrides(&mut *conn, id).await?;

        Ok(PriceListDetail { list, items })
    }

    pub async fn rename_price_list<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
    ) -> Result<crate::models::catalog::PriceList, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .rename_price_list(executor, id, name)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Lista de preço {}", id)))
    }

    pub async fn delete_price_list<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete_price_list(executor, id).await? {
            return Err(AppError::ResourceNotFound(format!("Lista de preço {}", id)));
        }
        Ok(())
    }

    // Editar um override NUNCA toca nos snapshots de pedidos já criados.
    pub async fn set_override<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
        product_id: i32,
        price: Decimal,
    ) -> Result<crate::models::catalog::PriceListItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .upsert_override(executor, price_list_id, product_id, price)
            .await
    }

    pub async fn remove_override<'e, E>(
        &self,
        executor: E,
        price_list_id: &str,
        product_id: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self
            .repo
            .delete_override(executor, price_list_id, product_id)
            .await?
        {
            return Err(AppError::ResourceNotFound(format!(
                "Override do produto {} na lista {}",
                product_id, price_list_id
            )));
        }
        Ok(())
    }

    // --- RESOLUÇÃO ---

    /// Preço efetivo de um único produto, com lookup pontual no banco.
    pub async fn effective_price_for<'e, E>(
        &self,
        executor: E,
        product: &Product,
        customer: Option<&Customer>,
    ) -> Result<EffectivePrice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let override_price = match customer.and_then(|c| c.price_list_id.as_deref()) {
            Some(list_id) => self.repo.get_override(executor, list_id, product.id).await?,
            None => None,
        };

        Ok(apply_override(product, override_price))
    }

    /// Decora a lista de produtos da vitrine com o preço do cliente ativo.
    /// Uma query para os overrides, lookups O(1) por produto.
    pub async fn storefront_view<'e, E>(
        &self,
        executor: E,
        products: Vec<Product>,
        customer: Option<&Customer>,
    ) -> Result<Vec<StoreProduct>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let overrides = self.load_override_maps(executor).await?;

        Ok(products
            .into_iter()
            .map(|product| {
                let effective = resolve_effective_price(&product, customer, &overrides);
                StoreProduct {
                    id: product.id,
                    title: product.title,
                    description: product.description,
                    price: effective.price,
                    original_price: effective.original_price,
                    discount_percent: product.discount_percent,
                    category: product.category,
                    image_url: product.image_url,
                    is_special_price: effective.is_special_price,
                }
            })
            .collect())
    }

    async fn load_override_maps<'e, E>(&self, executor: E) -> Result<OverrideMaps, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut maps: OverrideMaps = HashMap::new();
        for row in self.repo.list_all_overrides(executor).await? {
            maps.entry(row.price_list_id)
                .or_default()
                .insert(row.product_id, row.price);
        }
        Ok(maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(id: i32, base: &str, original: Option<&str>) -> Product {
        Product {
            id,
            title: format!("Produto {}", id),
            description: None,
            base_price: dec(base),
            original_price: original.map(dec),
            discount_percent: None,
            category: "Mercearia".to_string(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(price_list_id: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            full_name: "Maria Souza".to_string(),
            email: None,
            phone: None,
            price_list_id: price_list_id.map(str::to_string),
            token: "tok".to_string(),
            created_at: Utc::now(),
        }
    }

    fn vip_overrides() -> OverrideMaps {
        let mut maps = OverrideMaps::new();
        maps.entry("vip".to_string())
            .or_default()
            .insert(9, dec("17.90"));
        maps
    }

    #[test]
    fn no_customer_falls_back_to_base_price() {
        let p = product(9, "19.90", None);
        let resolved = resolve_effective_price(&p, None, &vip_overrides());
        assert_eq!(resolved.price, dec("19.90"));
        assert!(!resolved.is_special_price);
        assert_eq!(resolved.original_price, None);
    }

    #[test]
    fn customer_without_price_list_falls_back_to_base_price() {
        let p = product(9, "19.90", None);
        let c = customer(None);
        let resolved = resolve_effective_price(&p, Some(&c), &vip_overrides());
        assert_eq!(resolved.price, dec("19.90"));
        assert!(!resolved.is_special_price);
    }

    #[test]
    fn override_takes_precedence_and_exposes_base_as_original() {
        // Mesmo com "de" promocional próprio, o riscado vira o preço base.
        let p = product(9, "19.90", Some("24.90"));
        let c = customer(Some("vip"));
        let resolved = resolve_effective_price(&p, Some(&c), &vip_overrides());
        assert_eq!(resolved.price, dec("17.90"));
        assert!(resolved.is_special_price);
        assert_eq!(resolved.original_price, Some(dec("19.90")));
    }

    #[test]
    fn list_without_entry_for_product_falls_back() {
        let p = product(7, "5.00", Some("6.50"));
        let c = customer(Some("vip"));
        let resolved = resolve_effective_price(&p, Some(&c), &vip_overrides());
        assert_eq!(resolved.price, dec("5.00"));
        assert!(!resolved.is_special_price);
        // O "de" promocional do produto passa intacto no caminho base.
        assert_eq!(resolved.original_price, Some(dec("6.50")));
    }

    #[test]
    fn dangling_price_list_reference_falls_back_without_error() {
        let p = product(9, "19.90", None);
        let c = customer(Some("lista-apagada"));
        let resolved = resolve_effective_price(&p, Some(&c), &vip_overrides());
        assert_eq!(resolved.price, dec("19.90"));
        assert!(!resolved.is_special_price);
    }

    #[test]
    fn editing_an_override_does_not_touch_snapshotted_order_items() {
        use crate::models::orders::{line_total, OrderItem, PickingStatus};

        let p = product(9, "19.90", None);
        let c = customer(Some("vip"));
        let mut maps = vip_overrides();

        // Checkout: o item nasce com o preço efetivo resolvido na hora.
        let resolved = resolve_effective_price(&p, Some(&c), &maps);
        let item = OrderItem {
            id: Uuid::new_v4(),
            order_id: "ORD-1001".to_string(),
            position: 0,
            product_id: p.id,
            title: p.title.clone(),
            price: resolved.price,
            quantity: 2,
            discount_percent: 0,
            total: line_total(resolved.price, 2, 0),
            image_url: None,
            picking_status: PickingStatus::Pending,
            picked_quantity: None,
        };
        assert_eq!(item.price, dec("17.90"));
        assert_eq!(item.total, dec("35.80"));

        // O admin edita (e depois remove) o override da lista.
        maps.entry("vip".to_string())
            .or_default()
            .insert(9, dec("12.00"));
        assert_eq!(item.price, dec("17.90"));
        assert_eq!(item.total, dec("35.80"));

        maps.remove("vip");
        assert_eq!(item.price, dec("17.90"));
        assert_eq!(item.total, dec("35.80"));

        // Só um novo checkout enxerga o estado novo das listas.
        let renewed = resolve_effective_price(&p, Some(&c), &maps);
        assert_eq!(renewed.price, dec("19.90"));
        assert!(!renewed.is_special_price);
    }

    #[test]
    fn override_is_honored_as_is_even_below_or_above_base() {
        // Sem clamp: o admin é a fronteira de confiança.
        let p = product(9, "19.90", None);
        let c = customer(Some("vip"));
        let mut maps = OverrideMaps::new();
        maps.entry("vip".to_string())
            .or_default()
            .insert(9, dec("99.00"));
        let resolved = resolve_effective_price(&p, Some(&c), &maps);
        assert_eq!(resolved.price, dec("99.00"));
        assert!(resolved.is_special_price);
    }
}
