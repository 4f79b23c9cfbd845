//! In-memory backend state

use chrono::Utc;
use shared::models::{Customer, MenuItem, Order, OrderStatus, Payment, Table, User};
use shared::money;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Stored user record; the password hash never serializes
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

/// The whole in-memory database. One instance lives behind one lock;
/// requests serialize on it, which is how concurrent desks racing on the
/// same table get arbitrated.
#[derive(Debug, Default)]
pub struct Db {
    pub tables: Vec<Table>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub payments: Vec<Payment>,
    pub menu: Vec<MenuItem>,
    pub users: Vec<StoredUser>,
    next_id: i64,
}

impl Db {
    /// Allocate the next entity id
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn find_table(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn find_table_mut(&mut self, id: i64) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn find_customer(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn find_customer_mut(&mut self, id: i64) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    pub fn find_order(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn find_order_mut(&mut self, id: i64) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    pub fn find_payment(&self, id: i64) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn find_menu_item(&self, id: i64) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == id)
    }

    pub fn find_menu_item_mut(&mut self, id: i64) -> Option<&mut MenuItem> {
        self.menu.iter_mut().find(|m| m.id == id)
    }

    pub fn find_user_by_name(&self, username: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.user.username == username)
    }

    pub fn find_user(&self, id: i64) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.user.id == id)
    }

    /// Tables store `customer_id` only; embed the customer on the way out
    pub fn table_view(&self, table: &Table) -> Table {
        let mut view = table.clone();
        view.customer = view
            .customer_id
            .and_then(|id| self.find_customer(id))
            .cloned();
        view
    }

    /// Mark an order billed and credit its total to the customer ledger.
    /// The credit happens exactly once, on the edge into billed; guest
    /// orders with no customer credit nothing.
    pub fn bill_order(&mut self, order_id: i64) {
        let Some(order) = self.find_order_mut(order_id) else {
            return;
        };
        if order.status.is_billed() {
            return;
        }
        order.status = OrderStatus::Billed;
        order.updated_at = Utc::now();
        let total = order.total;
        let customer_id = order.customer_id;

        if let Some(customer) = customer_id.and_then(|id| self.find_customer_mut(id)) {
            customer.credit_balance = money::round_amount(customer.credit_balance + total);
            customer.updated_at = Utc::now();
        }
    }

    /// Debit a customer's balance, clamping at zero
    pub fn debit_customer(&mut self, customer_id: i64, amount: f64) {
        if let Some(customer) = self.find_customer_mut(customer_id) {
            customer.credit_balance =
                money::round_amount((customer.credit_balance - amount).max(0.0));
            customer.updated_at = Utc::now();
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<Db>>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Db::default())),
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Lock the database; every request serializes on this
    pub fn db(&self) -> MutexGuard<'_, Db> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{OrderItem, OrderStatus};

    fn sample_customer(id: i64) -> Customer {
        Customer {
            id,
            name: "Sita".to_string(),
            phone: String::new(),
            credit_balance: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_order(id: i64, customer_id: Option<i64>, total: f64) -> Order {
        Order {
            id,
            table_id: 1,
            customer_id,
            items: vec![OrderItem {
                item_name: "Tea".to_string(),
                quantity: 1,
                price: total,
                subtotal: total,
            }],
            status: OrderStatus::Pending,
            total,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bill_order_credits_ledger_exactly_once() {
        let mut db = Db::default();
        db.customers.push(sample_customer(1));
        db.orders.push(sample_order(10, Some(1), 250.0));

        db.bill_order(10);
        assert_eq!(db.find_customer(1).map(|c| c.credit_balance), Some(250.0));

        // Second call is a no-op on an already-billed order
        db.bill_order(10);
        assert_eq!(db.find_customer(1).map(|c| c.credit_balance), Some(250.0));
    }

    #[test]
    fn test_bill_guest_order_credits_nothing() {
        let mut db = Db::default();
        db.customers.push(sample_customer(1));
        db.orders.push(sample_order(10, None, 250.0));

        db.bill_order(10);
        assert_eq!(db.find_customer(1).map(|c| c.credit_balance), Some(0.0));
        assert_eq!(
            db.find_order(10).map(|o| o.status),
            Some(OrderStatus::Billed)
        );
    }

    #[test]
    fn test_debit_clamps_at_zero() {
        let mut db = Db::default();
        let mut customer = sample_customer(1);
        customer.credit_balance = 100.0;
        db.customers.push(customer);

        db.debit_customer(1, 250.0);
        assert_eq!(db.find_customer(1).map(|c| c.credit_balance), Some(0.0));
    }
}
