//! Billing and payout workflow
//!
//! Settling a table walks collecting-input → confirmed → applied. The
//! settlement itself is a sequence of independent requests with no
//! client-side retry or rollback: a failure partway leaves the backend
//! exactly as the last successful step left it, and re-opening the payout
//! view recomputes a reduced (possibly zero) bill.

use crate::aggregator::TableBill;
use crate::{DeskError, DeskResult};
use altia_client::{AltiaClient, ClientError};
use serde::{Deserialize, Serialize};
use shared::models::{
    OrderStatus, OrderUpdate, Payment, PaymentCreate, PaymentMethod, PayoutRequest, Table,
    TableAssign, TableStatus,
};
use shared::money;
use thiserror::Error;

/// Payment method chosen in the payout dialog. `Credit` defers the whole
/// bill to the customer ledger and forces the collected amount to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMethod {
    Cash,
    Online,
    Card,
    Upi,
    Credit,
}

impl PayoutMethod {
    /// Wire payment method; `None` for credit, where nothing is collected
    pub fn as_payment_method(self) -> Option<PaymentMethod> {
        match self {
            PayoutMethod::Cash => Some(PaymentMethod::Cash),
            PayoutMethod::Online => Some(PaymentMethod::Online),
            PayoutMethod::Card => Some(PaymentMethod::Card),
            PayoutMethod::Upi => Some(PaymentMethod::Upi),
            PayoutMethod::Credit => None,
        }
    }
}

/// Operator input for a payout
#[derive(Debug, Clone)]
pub struct PayoutInput {
    /// Amount to collect now; zero or more, may exceed or fall short of
    /// the total
    pub collect_amount: f64,
    pub method: PayoutMethod,
    pub notes: String,
}

impl PayoutInput {
    pub fn new(collect_amount: f64, method: PayoutMethod) -> Self {
        Self {
            collect_amount,
            method,
            notes: String::new(),
        }
    }
}

/// The split between money collected now and the shortfall deferred to
/// the customer credit ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutSplit {
    pub total_due: f64,
    pub collected: f64,
    pub deferred_credit: f64,
    /// Collected exceeds the total; flagged for display, not blocked
    pub exceeds_total: bool,
}

impl PayoutSplit {
    /// Pure arithmetic: collected is the input amount (zero for credit),
    /// deferred credit is max(0, total − collected), two-decimal rounded
    pub fn plan(total_due: f64, input: &PayoutInput) -> Self {
        let total_due = money::round_amount(total_due);
        let collected = if input.method == PayoutMethod::Credit {
            0.0
        } else {
            money::round_amount(input.collect_amount)
        };
        let deferred_credit = money::round_amount((total_due - collected).max(0.0));
        Self {
            total_due,
            collected,
            deferred_credit,
            exceeds_total: collected > total_due,
        }
    }
}

/// Workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutState {
    CollectingInput,
    Confirmed,
    Applied,
}

/// Step of the settlement sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStep {
    BillOrders,
    RecordPayment,
    FreeTable,
}

/// Workflow failure
#[derive(Debug, Error)]
pub enum PayoutError {
    /// A settlement request failed. Earlier steps are not rolled back;
    /// the backend keeps whatever the last successful step wrote.
    #[error("payout step {step:?} failed: {source}")]
    Step {
        step: PayoutStep,
        #[source]
        source: ClientError,
    },

    #[error("payout has not been confirmed")]
    NotConfirmed,

    #[error("payout was already applied")]
    AlreadyApplied,
}

/// What a settlement wrote
#[derive(Debug, Clone)]
pub struct PayoutOutcome {
    pub billed_orders: Vec<i64>,
    pub payment: Option<Payment>,
    pub deferred_credit: f64,
    pub table: Table,
}

/// One payout settlement for one occupied table. Dropping the value
/// before `apply` abandons the workflow with no side effects.
#[derive(Debug)]
pub struct Payout {
    table: Table,
    bill: TableBill,
    state: PayoutState,
    input: Option<PayoutInput>,
}

impl Payout {
    /// Open the payout for an occupied table
    pub fn open(table: Table, bill: TableBill) -> DeskResult<Self> {
        if table.status != TableStatus::Occupied {
            return Err(DeskError::BusinessRule(format!(
                "Table {} is not occupied",
                table.name
            )));
        }
        Ok(Self {
            table,
            bill,
            state: PayoutState::CollectingInput,
            input: None,
        })
    }

    pub fn state(&self) -> PayoutState {
        self.state
    }

    pub fn total_due(&self) -> f64 {
        self.bill.total
    }

    /// Preview the split for an input without committing to it
    pub fn preview(&self, input: &PayoutInput) -> PayoutSplit {
        PayoutSplit::plan(self.bill.total, input)
    }

    /// Validate the input and move to confirmed.
    ///
    /// A walk-in guest has no credit ledger, so a split whose deferred
    /// credit would be positive on a guest table is refused; full
    /// collection (or overcollection) remains allowed.
    pub fn confirm(&mut self, input: PayoutInput) -> DeskResult<PayoutSplit> {
        if self.state == PayoutState::Applied {
            return Err(PayoutError::AlreadyApplied.into());
        }
        if !input.collect_amount.is_finite() || input.collect_amount < 0.0 {
            return Err(DeskError::Validation(
                "collect amount must be zero or more".to_string(),
            ));
        }

        let split = PayoutSplit::plan(self.bill.total, &input);
        if split.deferred_credit > 0.0 && self.table.customer_id.is_none() {
            return Err(DeskError::BusinessRule(
                "Walk-in guests have no credit ledger; collect the full amount".to_string(),
            ));
        }

        self.input = Some(input);
        self.state = PayoutState::Confirmed;
        Ok(split)
    }

    /// Perform the settlement as independent sequential requests: mark
    /// every order billed, record the payment if anything was collected,
    /// then free the table. The deferred figure is never written by the
    /// client; it is the arithmetic consequence of the billed orders and
    /// the payment on the backend ledger.
    pub async fn apply(&mut self, client: &AltiaClient) -> DeskResult<PayoutOutcome> {
        let input = self.confirmed_input()?;
        let split = PayoutSplit::plan(self.bill.total, &input);

        let mut billed_orders = Vec::with_capacity(self.bill.orders.len());
        for order in &self.bill.orders {
            let update = OrderUpdate {
                status: Some(OrderStatus::Billed),
                notes: None,
            };
            client
                .update_order(order.id, &update)
                .await
                .map_err(|source| PayoutError::Step {
                    step: PayoutStep::BillOrders,
                    source,
                })?;
            billed_orders.push(order.id);
        }

        let payment = match (split.collected > 0.0, input.method.as_payment_method()) {
            (true, Some(method)) => {
                let create = PaymentCreate {
                    customer_id: self.table.customer_id,
                    order_id: None,
                    amount: split.collected,
                    method,
                    notes: input.notes.clone(),
                };
                let payment =
                    client
                        .create_payment(&create)
                        .await
                        .map_err(|source| PayoutError::Step {
                            step: PayoutStep::RecordPayment,
                            source,
                        })?;
                Some(payment)
            }
            _ => None,
        };

        let table = client
            .assign_table(self.table.id, &TableAssign::free())
            .await
            .map_err(|source| PayoutError::Step {
                step: PayoutStep::FreeTable,
                source,
            })?;

        self.state = PayoutState::Applied;
        tracing::info!(
            table = self.table.id,
            collected = split.collected,
            deferred = split.deferred_credit,
            "payout applied"
        );

        Ok(PayoutOutcome {
            billed_orders,
            payment,
            deferred_credit: split.deferred_credit,
            table,
        })
    }

    /// Settle through the backend's combined payout endpoint in a single
    /// request instead of the sequential path
    pub async fn apply_combined(&mut self, client: &AltiaClient) -> DeskResult<PayoutOutcome> {
        let input = self.confirmed_input()?;
        let split = PayoutSplit::plan(self.bill.total, &input);

        let req = PayoutRequest {
            amount: split.collected,
            method: input.method.as_payment_method(),
            notes: input.notes.clone(),
        };
        let resp = client.table_payout(self.table.id, &req).await?;

        self.state = PayoutState::Applied;
        Ok(PayoutOutcome {
            billed_orders: resp.billed_orders,
            payment: resp.payment,
            deferred_credit: resp.deferred_credit,
            table: resp.table,
        })
    }

    fn confirmed_input(&self) -> Result<PayoutInput, PayoutError> {
        match (self.state, &self.input) {
            (PayoutState::Applied, _) => Err(PayoutError::AlreadyApplied),
            (PayoutState::Confirmed, Some(input)) => Ok(input.clone()),
            _ => Err(PayoutError::NotConfirmed),
        }
    }
}
