//! Customer credit view
//!
//! The ledger is backend-owned. Balances are always fetched fresh, never
//! computed locally; the only writes go through payments and payouts.

use crate::{DeskError, DeskResult};
use altia_client::AltiaClient;
use shared::models::{Customer, CustomerBalance, Payment, PaymentCreate};
use shared::money;
use validator::Validate;

/// Read side of the customer credit ledger
#[derive(Debug, Clone)]
pub struct CreditLedger {
    client: AltiaClient,
}

impl CreditLedger {
    pub fn new(client: AltiaClient) -> Self {
        Self { client }
    }

    /// Fetch a customer's current balance
    pub async fn balance(&self, customer_id: i64) -> DeskResult<CustomerBalance> {
        Ok(self.client.customer_balance(customer_id).await?)
    }

    /// Customers currently owing money (the payments page picker). A
    /// failed fetch logs and yields an empty list.
    pub async fn debtors(&self) -> Vec<Customer> {
        match self.client.list_customers().await {
            Ok(customers) => customers
                .into_iter()
                .filter(Customer::has_outstanding_balance)
                .collect(),
            Err(e) => {
                tracing::warn!("customer list fetch failed: {e}");
                Vec::new()
            }
        }
    }

    /// Record a standalone payment against a customer's balance
    pub async fn record_payment(&self, payload: &PaymentCreate) -> DeskResult<Payment> {
        payload.validate()?;
        Ok(self.client.create_payment(payload).await?)
    }

    /// Delete a customer; refused locally while a balance is outstanding.
    /// The backend enforces the same rule.
    pub async fn delete_customer(&self, customer: &Customer) -> DeskResult<()> {
        if customer.has_outstanding_balance() {
            return Err(DeskError::BusinessRule(format!(
                "Customer {} has an outstanding balance of {}",
                customer.name,
                money::format_amount(customer.credit_balance)
            )));
        }
        self.client.delete_customer(customer.id).await?;
        Ok(())
    }
}
