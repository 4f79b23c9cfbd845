//! Order aggregation for the payout view

use crate::DeskResult;
use altia_client::AltiaClient;
use shared::models::Order;
use shared::money;

/// Every unbilled order for one table, plus their sum.
///
/// The sum is pure: no discounting, tax, or rounding beyond two-decimal
/// currency rounding.
#[derive(Debug, Clone)]
pub struct TableBill {
    pub table_id: i64,
    pub orders: Vec<Order>,
    pub total: f64,
}

impl TableBill {
    /// Sum order totals with decimal arithmetic
    pub fn from_orders(table_id: i64, orders: Vec<Order>) -> Self {
        let total = money::sum_amounts(orders.iter().map(|o| o.total));
        Self {
            table_id,
            orders,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Collects the not-yet-billed orders for a table
#[derive(Debug, Clone)]
pub struct OrderAggregator {
    client: AltiaClient,
}

impl OrderAggregator {
    pub fn new(client: AltiaClient) -> Self {
        Self { client }
    }

    /// Fetch every unbilled order for the table and sum their totals.
    /// An order-free table yields an empty bill with total zero, which is
    /// also how an interrupted payout is resolved manually.
    pub async fn outstanding(&self, table_id: i64) -> DeskResult<TableBill> {
        let resp = self.client.table_orders(table_id).await?;
        Ok(TableBill::from_orders(table_id, resp.orders))
    }
}
