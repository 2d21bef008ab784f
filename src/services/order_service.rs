// src/services/order_service.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Acquire, Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, OrdersRepository},
    models::{
        crm::Customer,
        orders::{line_total, Order, OrderDetail, OrderItem, OrderStatus, PickingStatus},
    },
    services::{InvoiceService, NotificationService, PricingService},
};

// =============================================================================
//  ENTRADAS
// =============================================================================

// Linha do carrinho no checkout: o cliente só manda produto e quantidade,
// o preço quem decide é o resolver (cliente adulterado não grava preço).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: i32,

    #[validate(range(min = 1, message = "min_quantity"))]
    #[schema(example = 2)]
    pub quantity: i32,

    // Superfície pública: o desconto vindo do cliente é limitado a um
    // percentual real (0..=100), nada de pedido grátis ou total negativo.
    #[validate(range(min = 0, max = 100, message = "invalid_discount"))]
    #[serde(default)]
    pub discount_percent: i32,
}

// Linha de edição administrativa: aqui o back-office manda preço e título
// explícitos (correção manual de pedido).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub product_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    #[schema(example = "19.90")]
    pub price: Decimal,

    #[validate(range(min = 1, message = "min_quantity"))]
    pub quantity: i32,

    #[serde(default)]
    pub discount_percent: i32,

    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickedLineInput {
    pub id: Uuid,
    pub status: PickingStatus,
    #[schema(example = 2)]
    pub picked_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickingLink {
    pub picking_url: String,
    pub picking_token: String,
}

// =============================================================================
//  REGRAS PURAS
// =============================================================================

/// Emissão idempotente: token existente nunca é rotacionado.
/// Retorna o token e se ele acabou de ser cunhado.
pub(crate) fn ensure_picking_token(existing: Option<&str>) -> (String, bool) {
    match existing {
        Some(token) => (token.to_string(), false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Reconcilia os itens do pedido com o que o separador reportou.
/// Colapsa quantidade pedida em quantidade separada e regrava os totais
/// de linha; itens não mencionados ficam como estão (comportamento
/// permissivo preservado).
pub(crate) fn reconcile_picked_items(
    mut items: Vec<OrderItem>,
    lines: &[PickedLineInput],
) -> Result<Vec<OrderItem>, AppError> {
    for line in lines {
        let item = items
            .iter_mut()
            .find(|i| i.id == line.id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Item {}", line.id)))?;

        // Acoplamento quantidade/status: em falta zera a quantidade;
        // coletado com quantidade zerada volta para a quantidade pedida;
        // quantidade zero em qualquer outro caso derruba para em falta.
        let (status, quantity) = match line.status {
            PickingStatus::OutOfStock => (PickingStatus::OutOfStock, 0),
            PickingStatus::Collected if line.picked_quantity <= 0 => {
                (PickingStatus::Collected, item.quantity)
            }
            PickingStatus::Collected => (PickingStatus::Collected, line.picked_quantity),
            PickingStatus::Pending if line.picked_quantity <= 0 => (PickingStatus::OutOfStock, 0),
            PickingStatus::Pending => (PickingStatus::Pending, line.picked_quantity),
        };

        item.picking_status = status;
        item.quantity = quantity;
        item.picked_quantity = Some(quantity);
        item.total = line_total(item.price, quantity, item.discount_percent);
    }

    Ok(items)
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct OrderService {
    repo: OrdersRepository,
    catalog_repo: CatalogRepository,
    pricing_service: PricingService,
    invoice_service: InvoiceService,
    notification_service: NotificationService,
    frontend_url: String,
}

impl OrderService {
    pub fn new(
        repo: OrdersRepository,
        catalog_repo: CatalogRepository,
        pricing_service: PricingService,
        invoice_service: InvoiceService,
        notification_service: NotificationService,
        frontend_url: String,
    ) -> Self {
        Self {
            repo,
            catalog_repo,
            pricing_service,
            invoice_service,
            notification_service,
            frontend_url,
        }
    }

    // --- CHECKOUT ---

    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        customer: Option<&Customer>,
        customer_name: &str,
        customer_phone: Option<&str>,
        customer_address: Option<&str>,
        discount_percent: i32,
        lines: &[CheckoutLine],
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if lines.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let mut tx = executor.begin().await?;

        let order_id = self.repo.next_order_id(&mut *tx).await?;
        let mut order = self
            .repo
            .create_order(
                &mut *tx,
                &order_id,
                customer.map(|c| c.id),
                customer_name,
                customer_phone,
                customer_address,
                discount_percent,
                Decimal::ZERO,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;

        for (position, line) in lines.iter().enumerate() {
            let product = self
                .catalog_repo
                .get_product(&mut *tx, line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::ResourceNotFound(format!("Produto {}", line.product_id))
                })?;

            // Snapshot no preço efetivo do cliente ativo: editar o produto ou
            // a lista de preço depois não altera este pedido.
            let effective = self
                .pricing_service
                .effective_price_for(&mut *tx, &product, customer)
                .await?;

            let item_total = line_total(effective.price, line.quantity, line.discount_percent);

            let item = self
                .repo
                .insert_item(
                    &mut *tx,
                    &order_id,
                    position as i32,
                    product.id,
                    &product.title,
                    effective.price,
                    line.quantity,
                    line.discount_percent,
                    item_total,
                    product.image_url.as_deref(),
                )
                .await?;

            total += item.total;
            items.push(item);
        }

        let total = total.round_dp(2);
        self.repo
            .set_total_and_status(&mut *tx, &order_id, total, OrderStatus::Pending)
            .await?;

        tx.commit().await?;

        order.total_amount = total;

        // Pós-commit: documento de faturamento best-effort, fora do caminho
        // crítico do checkout.
        self.spawn_invoice_request(order.clone(), items.clone());

        Ok(OrderDetail {
            header: order,
            items,
        })
    }

    // --- LEITURA ---

    pub async fn list_orders<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_orders(executor).await
    }

    pub async fn get_order<'e, E>(&self, executor: E, id: &str) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let header = self
            .repo
            .get_order(&mut *conn, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", id)))?;

        let items = self.repo.list_order_items(&mut *conn, id).await?;

        Ok(OrderDetail { header, items })
    }

    // --- ATUALIZAÇÃO / MÁQUINA DE STATUS ---

    #[allow(clippy::too_many_arguments)]
    pub async fn update_order<'e, E>(
        &self,
        executor: E,
        id: &str,
        customer_name: Option<&str>,
        customer_phone: Option<&str>,
        customer_address: Option<&str>,
        discount_percent: Option<i32>,
        status: Option<OrderStatus>,
        items: Option<&[OrderLineInput]>,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .get_order(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", id)))?;

        let new_status = match status {
            Some(requested) => {
                if !current.status.can_transition_to(requested) {
                    return Err(AppError::InvalidStatusTransition(format!(
                        "{:?} -> {:?}",
                        current.status, requested
                    )));
                }
                requested
            }
            None => current.status,
        };
        let entered_processing =
            new_status == OrderStatus::Processing && current.status != OrderStatus::Processing;

        // Semântica de PATCH: campo ausente preserva o valor atual. Não há
        // como limpar telefone/endereço para NULL por aqui; limpar é mandar
        // string vazia.
        self.repo
            .update_order_header(
                &mut *tx,
                id,
                customer_name.unwrap_or(&current.customer_name),
                customer_phone.or(current.customer_phone.as_deref()),
                customer_address.or(current.customer_address.as_deref()),
                discount_percent.unwrap_or(current.discount_percent),
                new_status,
            )
            .await?;

        // Entrar em separação cunha o token exatamente uma vez; repetir a
        // transição reaproveita o existente.
        let mut picking_token = current.picking_token.clone();
        if new_status == OrderStatus::Processing {
            let (token, minted) = ensure_picking_token(picking_token.as_deref());
            if minted {
                self.repo.set_picking_token(&mut *tx, id, &token).await?;
            }
            picking_token = Some(token);
        }

        // Itens: substituição integral, nunca merge.
        if let Some(lines) = items {
            self.repo.delete_order_items(&mut *tx, id).await?;
            for (position, line) in lines.iter().enumerate() {
                let item_total = line_total(line.price, line.quantity, line.discount_percent);
                self.repo
                    .insert_item(
                        &mut *tx,
                        id,
                        position as i32,
                        line.product_id,
                        &line.title,
                        line.price,
                        line.quantity,
                        line.discount_percent,
                        item_total,
                        line.image_url.as_deref(),
                    )
                    .await?;
            }
            self.repo.recalculate_order_total(&mut *tx, id).await?;
        }

        let header = self
            .repo
            .get_order(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", id)))?;
        let updated_items = self.repo.list_order_items(&mut *tx, id).await?;

        tx.commit().await?;

        if entered_processing {
            if let Some(token) = picking_token {
                self.spawn_picking_notification(header.id.clone(), token);
            }
        }

        Ok(OrderDetail {
            header,
            items: updated_items,
        })
    }

    // --- PICKING ---

    pub async fn get_order_by_picking_token<'e, E>(
        &self,
        executor: E,
        token: &str,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let header = self
            .repo
            .get_order_by_picking_token(&mut *conn, token)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Token de picking".to_string()))?;

        let mut items = self.repo.list_order_items(&mut *conn, &header.id).await?;

        // O separador começa de "tudo disponível", não de zero.
        for item in &mut items {
            item.picked_quantity = Some(item.effective_picked_quantity());
        }

        Ok(OrderDetail { header, items })
    }

    /// Salva o progresso de um item durante a separação, aplicando as
    /// auto-transições assimétricas de quantidade/status.
    pub async fn update_item_picking<'e, E>(
        &self,
        executor: E,
        token: &str,
        item_id: Uuid,
        status: Option<PickingStatus>,
        picked_quantity: Option<i32>,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let order = self
            .repo
            .get_order_by_picking_token(&mut *tx, token)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Token de picking".to_string()))?;

        let items = self.repo.list_order_items(&mut *tx, &order.id).await?;
        let mut item = items
            .into_iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Item {}", item_id)))?;

        // Quantidade primeiro; um status explícito no mesmo request vence.
        if let Some(quantity) = picked_quantity {
            item.apply_picked_quantity(quantity);
        }
        if let Some(status) = status {
            item.apply_picking_status(status);
        }

        let saved = self
            .repo
            .update_item_picking(&mut *tx, item.id, item.picking_status, item.picked_quantity)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Item {}", item_id)))?;

        tx.commit().await?;

        Ok(saved)
    }

    /// Fecha a separação: atualização dos itens, recomputação do total e
    /// escrita do status committam juntos ou não committam.
    pub async fn complete_picking<'e, E>(
        &self,
        executor: E,
        token: &str,
        lines: &[PickedLineInput],
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let order = self
            .repo
            .get_order_by_picking_token(&mut *tx, token)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Token de picking".to_string()))?;

        let items = self.repo.list_order_items(&mut *tx, &order.id).await?;
        let reconciled = reconcile_picked_items(items, lines)?;

        for item in &reconciled {
            self.repo
                .apply_picked_item(&mut *tx, item.id, item.picking_status, item.quantity, item.total)
                .await?;
        }

        let total: Decimal = reconciled.iter().map(|i| i.total).sum();
        self.repo
            .set_total_and_status(
                &mut *tx,
                &order.id,
                total.round_dp(2),
                OrderStatus::ReadyForShipping,
            )
            .await?;

        let header = self
            .repo
            .get_order(&mut *tx, &order.id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", order.id)))?;

        tx.commit().await?;

        Ok(OrderDetail {
            header,
            items: reconciled,
        })
    }

    /// Emissão (re)disparável do link de separação. Não mexe em mais nada
    /// do pedido.
    pub async fn issue_picking_link<'e, E>(
        &self,
        executor: E,
        order_id: &str,
    ) -> Result<PickingLink, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let order = self
            .repo
            .get_order(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", order_id)))?;

        let (token, minted) = ensure_picking_token(order.picking_token.as_deref());
        if minted {
            self.repo.set_picking_token(&mut *tx, order_id, &token).await?;
        }

        tx.commit().await?;

        self.spawn_picking_notification(order.id, token.clone());

        Ok(PickingLink {
            picking_url: self.picking_url(&token),
            picking_token: token,
        })
    }

    // --- PÓS-COMMIT ---

    fn picking_url(&self, token: &str) -> String {
        format!("{}/picker/{}", self.frontend_url.trim_end_matches('/'), token)
    }

    fn spawn_picking_notification(&self, order_id: String, token: String) {
        let notifier = self.notification_service.clone();
        let url = self.picking_url(&token);
        tokio::spawn(async move {
            let text = format!("Pedido {} pronto para separação: {}", order_id, url);
            notifier.send_manager_message(&text).await;
        });
    }

    fn spawn_invoice_request(&self, order: Order, items: Vec<OrderItem>) {
        let invoices = self.invoice_service.clone();
        let repo = self.repo.clone();
        tokio::spawn(async move {
            if let Some(link) = invoices.request_document(&order, &items).await {
                if let Err(e) = repo.set_document_link(&order.id, &link).await {
                    tracing::warn!(
                        "Falha ao gravar o link do documento de {}: {}",
                        order.id,
                        e
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(order_id: &str, position: i32, price: &str, quantity: i32, discount: i32) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            order_id: order_id.to_string(),
            position,
            product_id: position + 1,
            title: format!("Produto {}", position + 1),
            price: dec(price),
            quantity,
            discount_percent: discount,
            total: line_total(dec(price), quantity, discount),
            image_url: None,
            picking_status: PickingStatus::Pending,
            picked_quantity: None,
        }
    }

    #[test]
    fn checkout_line_rejects_discount_outside_percentage_range() {
        let mut line = CheckoutLine {
            product_id: 1,
            quantity: 1,
            discount_percent: 250,
        };
        // 250% renderia um total de linha negativo; 100% renderia pedido grátis
        // decidido pelo cliente. Ambos barrados antes de chegar ao serviço.
        assert!(line.validate().is_err());

        line.discount_percent = -5;
        assert!(line.validate().is_err());

        line.discount_percent = 100;
        assert!(line.validate().is_ok());
        line.discount_percent = 0;
        assert!(line.validate().is_ok());
    }

    #[test]
    fn existing_token_is_reused_never_rotated() {
        let (token, minted) = ensure_picking_token(Some("abc123"));
        assert_eq!(token, "abc123");
        assert!(!minted);

        // Repetir a emissão sobre o mesmo token continua idempotente.
        let (again, minted_again) = ensure_picking_token(Some(&token));
        assert_eq!(again, "abc123");
        assert!(!minted_again);
    }

    #[test]
    fn missing_token_mints_an_opaque_string() {
        let (token, minted) = ensure_picking_token(None);
        assert!(minted);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn full_picking_scenario_recomputes_line_totals_and_sum() {
        // ORD-1001: 3 × 10.00 + 2 × 5.00 com 10% = 39.00 no checkout.
        let items = vec![
            item("ORD-1001", 0, "10.00", 3, 0),
            item("ORD-1001", 1, "5.00", 2, 10),
        ];
        let initial: Decimal = items.iter().map(|i| i.total).sum();
        assert_eq!(initial, dec("39.00"));

        // Separador: item 1 coletado com 2 unidades, item 2 em falta.
        let lines = vec![
            PickedLineInput {
                id: items[0].id,
                status: PickingStatus::Collected,
                picked_quantity: 2,
            },
            PickedLineInput {
                id: items[1].id,
                status: PickingStatus::OutOfStock,
                picked_quantity: 0,
            },
        ];

        let reconciled = reconcile_picked_items(items, &lines).unwrap();

        assert_eq!(reconciled[0].total, dec("20.00"));
        assert_eq!(reconciled[0].quantity, 2);
        assert_eq!(reconciled[0].picked_quantity, Some(2));
        assert_eq!(reconciled[1].total, dec("0.00"));
        assert_eq!(reconciled[1].quantity, 0);
        assert_eq!(reconciled[1].picking_status, PickingStatus::OutOfStock);

        let total: Decimal = reconciled.iter().map(|i| i.total).sum();
        assert_eq!(total, dec("20.00"));
    }

    #[test]
    fn collected_with_zero_quantity_falls_back_to_ordered_quantity() {
        let items = vec![item("ORD-1002", 0, "8.00", 5, 0)];
        let lines = vec![PickedLineInput {
            id: items[0].id,
            status: PickingStatus::Collected,
            picked_quantity: 0,
        }];

        let reconciled = reconcile_picked_items(items, &lines).unwrap();

        assert_eq!(reconciled[0].quantity, 5);
        assert_eq!(reconciled[0].picking_status, PickingStatus::Collected);
        assert_eq!(reconciled[0].total, dec("40.00"));
    }

    #[test]
    fn pending_line_with_zero_quantity_becomes_out_of_stock() {
        let items = vec![item("ORD-1003", 0, "8.00", 5, 0)];
        let lines = vec![PickedLineInput {
            id: items[0].id,
            status: PickingStatus::Pending,
            picked_quantity: 0,
        }];

        let reconciled = reconcile_picked_items(items, &lines).unwrap();

        assert_eq!(reconciled[0].picking_status, PickingStatus::OutOfStock);
        assert_eq!(reconciled[0].quantity, 0);
    }

    #[test]
    fn unmentioned_items_are_left_untouched() {
        let items = vec![
            item("ORD-1004", 0, "10.00", 1, 0),
            item("ORD-1004", 1, "3.50", 4, 0),
        ];
        let lines = vec![PickedLineInput {
            id: items[0].id,
            status: PickingStatus::Collected,
            picked_quantity: 1,
        }];

        let reconciled = reconcile_picked_items(items, &lines).unwrap();

        assert_eq!(reconciled[1].picking_status, PickingStatus::Pending);
        assert_eq!(reconciled[1].quantity, 4);
        assert_eq!(reconciled[1].total, dec("14.00"));
    }

    #[test]
    fn unknown_item_id_is_rejected_without_partial_result() {
        let items = vec![item("ORD-1005", 0, "10.00", 1, 0)];
        let lines = vec![PickedLineInput {
            id: Uuid::new_v4(),
            status: PickingStatus::Collected,
            picked_quantity: 1,
        }];

        assert!(matches!(
            reconcile_picked_items(items, &lines),
            Err(AppError::ResourceNotFound(_))
        ));
    }
}
