// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    ReadyForShipping,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Um pedido entregue ou cancelado não muda mais de status.
    /// Entre os demais, qualquer escrita é aceita (inclusive voltar etapa:
    /// o back-office corrige pedidos na mão).
    pub fn can_transition_to(&self, new: OrderStatus) -> bool {
        if *self == new {
            return true;
        }
        !self.is_terminal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "picking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PickingStatus {
    Pending,
    Collected,
    OutOfStock,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = "ORD-1001")]
    pub id: String,
    pub customer_id: Option<Uuid>,
    #[schema(example = "Maria Souza")]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[schema(example = "150.50")]
    pub total_amount: Decimal,
    #[schema(example = 0)]
    pub discount_percent: i32,
    pub status: OrderStatus,
    pub picking_token: Option<String>,
    pub document_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    #[schema(example = "ORD-1001")]
    pub order_id: String,
    pub position: i32,
    pub product_id: i32,
    // Snapshot do momento da compra: editar o produto depois não mexe aqui.
    pub title: String,
    #[schema(example = "50.00")]
    pub price: Decimal,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = 0)]
    pub discount_percent: i32,
    #[schema(example = "100.00")]
    pub total: Decimal,
    pub image_url: Option<String>,
    pub picking_status: PickingStatus,
    pub picked_quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub items: Vec<OrderItem>,
}

// --- Regras de domínio ---

/// Total de uma linha: preço × quantidade × (1 − desconto/100), em 2 casas.
pub fn line_total(price: Decimal, quantity: i32, discount_percent: i32) -> Decimal {
    let factor = Decimal::ONE - Decimal::from(discount_percent) / Decimal::ONE_HUNDRED;
    (price * Decimal::from(quantity) * factor).round_dp(2)
}

impl OrderItem {
    /// Quantidade separada ainda não informada conta como "tudo disponível".
    pub fn effective_picked_quantity(&self) -> i32 {
        self.picked_quantity.unwrap_or(self.quantity)
    }

    /// O separador editou a quantidade. Zerar derruba o item para
    /// `out_of_stock`; subir de zero volta para `pending`, nunca para
    /// `collected`: confirmar a coleta é sempre um gesto explícito.
    pub fn apply_picked_quantity(&mut self, quantity: i32) {
        if quantity <= 0 {
            self.picked_quantity = Some(0);
            self.picking_status = PickingStatus::OutOfStock;
        } else {
            let was_zero = self.picked_quantity == Some(0);
            self.picked_quantity = Some(quantity);
            if was_zero && self.picking_status == PickingStatus::OutOfStock {
                self.picking_status = PickingStatus::Pending;
            }
        }
    }

    /// O separador trocou o status do item diretamente.
    pub fn apply_picking_status(&mut self, status: PickingStatus) {
        match status {
            PickingStatus::OutOfStock => {
                self.picked_quantity = Some(0);
            }
            PickingStatus::Collected => {
                // Coletado com quantidade zerada não existe: volta para a
                // quantidade originalmente pedida.
                if self.effective_picked_quantity() == 0 {
                    self.picked_quantity = Some(self.quantity);
                } else if self.picked_quantity.is_none() {
                    self.picked_quantity = Some(self.quantity);
                }
            }
            PickingStatus::Pending => {}
        }
        self.picking_status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: i32) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            order_id: "ORD-1001".to_string(),
            position: 0,
            product_id: 1,
            title: "Café torrado 500g".to_string(),
            price: dec("10.00"),
            quantity,
            discount_percent: 0,
            total: line_total(dec("10.00"), quantity, 0),
            image_url: None,
            picking_status: PickingStatus::Pending,
            picked_quantity: None,
        }
    }

    #[test]
    fn line_total_applies_item_discount() {
        assert_eq!(line_total(dec("10.00"), 3, 0), dec("30.00"));
        assert_eq!(line_total(dec("5.00"), 2, 10), dec("9.00"));
        assert_eq!(line_total(dec("19.90"), 0, 0), dec("0.00"));
    }

    #[test]
    fn terminal_states_reject_transitions() {
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        // Reescrever o mesmo status é um no-op aceito.
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn zero_quantity_forces_out_of_stock() {
        let mut it = item(3);
        it.apply_picked_quantity(0);
        assert_eq!(it.picking_status, PickingStatus::OutOfStock);
        assert_eq!(it.picked_quantity, Some(0));
    }

    #[test]
    fn raising_quantity_from_zero_goes_back_to_pending_not_collected() {
        let mut it = item(3);
        it.apply_picked_quantity(0);
        it.apply_picked_quantity(2);
        assert_eq!(it.picking_status, PickingStatus::Pending);
        assert_eq!(it.picked_quantity, Some(2));
    }

    #[test]
    fn lowering_quantity_keeps_collected_status() {
        let mut it = item(3);
        it.apply_picking_status(PickingStatus::Collected);
        it.apply_picked_quantity(2);
        assert_eq!(it.picking_status, PickingStatus::Collected);
        assert_eq!(it.picked_quantity, Some(2));
    }

    #[test]
    fn collecting_with_zero_quantity_resets_to_ordered_quantity() {
        let mut it = item(5);
        it.apply_picked_quantity(0);
        it.apply_picking_status(PickingStatus::Collected);
        assert_eq!(it.picking_status, PickingStatus::Collected);
        assert_eq!(it.picked_quantity, Some(5));
    }

    #[test]
    fn collecting_untouched_item_defaults_to_ordered_quantity() {
        let mut it = item(4);
        it.apply_picking_status(PickingStatus::Collected);
        assert_eq!(it.picked_quantity, Some(4));
    }

    #[test]
    fn out_of_stock_always_zeroes_quantity() {
        let mut it = item(4);
        it.apply_picking_status(PickingStatus::Collected);
        it.apply_picking_status(PickingStatus::OutOfStock);
        assert_eq!(it.picked_quantity, Some(0));
    }

    #[test]
    fn untouched_item_reads_as_fully_available() {
        let it = item(7);
        assert_eq!(it.effective_picked_quantity(), 7);
    }
}
