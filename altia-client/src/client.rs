//! Typed client over the cafe backend REST surface

use crate::{ClientConfig, ClientResult, HttpClient};
use shared::auth::{LoginRequest, LoginResponse, SignupRequest};
use shared::error::MessageBody;
use shared::models::{
    Customer, CustomerBalance, CustomerCreate, CustomerUpdate, MenuFilter, MenuItem,
    MenuItemCreate, MenuItemUpdate, NewOrderItem, Order, OrderCreate, OrderFilter, OrderUpdate,
    Payment, PaymentCreate, PayoutRequest, PayoutResponse, Table, TableAssign, TableCreate,
    TableOrders, TableUpdate, User,
};

/// API client with one strongly-typed method per backend endpoint
#[derive(Debug, Clone)]
pub struct AltiaClient {
    http: HttpClient,
}

impl AltiaClient {
    /// Create a client with the default configuration
    pub fn new(base_url: &str) -> Self {
        Self::with_config(&ClientConfig::new(base_url))
    }

    /// Create a client from configuration
    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Current bearer token, if authenticated
    pub fn token(&self) -> Option<String> {
        self.http.token()
    }

    // ==================== Auth ====================

    /// POST /auth/login - authenticate and store the returned token
    pub async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        let resp: LoginResponse = self.http.post("auth/login", req).await?;
        self.http.set_token(resp.token.clone());
        Ok(resp)
    }

    /// POST /auth/signup - register a staff account and store the token
    pub async fn signup(&self, req: &SignupRequest) -> ClientResult<LoginResponse> {
        let resp: LoginResponse = self.http.post("auth/signup", req).await?;
        self.http.set_token(resp.token.clone());
        Ok(resp)
    }

    /// GET /auth/me
    pub async fn me(&self) -> ClientResult<User> {
        self.http.get("auth/me").await
    }

    // ==================== Tables ====================

    /// GET /tables
    pub async fn list_tables(&self) -> ClientResult<Vec<Table>> {
        self.http.get("tables").await
    }

    /// GET /tables/{id}
    pub async fn get_table(&self, id: i64) -> ClientResult<Table> {
        self.http.get(&format!("tables/{}", id)).await
    }

    /// POST /tables
    pub async fn create_table(&self, payload: &TableCreate) -> ClientResult<Table> {
        self.http.post("tables", payload).await
    }

    /// PUT /tables/{id}
    pub async fn update_table(&self, id: i64, payload: &TableUpdate) -> ClientResult<Table> {
        self.http.put(&format!("tables/{}", id), payload).await
    }

    /// DELETE /tables/{id} - refused by the backend unless the table is free
    pub async fn delete_table(&self, id: i64) -> ClientResult<MessageBody> {
        self.http.delete(&format!("tables/{}", id)).await
    }

    /// POST /tables/{id}/assign - set or clear the occupant
    pub async fn assign_table(&self, id: i64, payload: &TableAssign) -> ClientResult<Table> {
        self.http.post(&format!("tables/{}/assign", id), payload).await
    }

    /// GET /tables/{id}/orders - unbilled orders plus their sum
    pub async fn table_orders(&self, id: i64) -> ClientResult<TableOrders> {
        self.http.get(&format!("tables/{}/orders", id)).await
    }

    /// POST /tables/{id}/payout - combined settlement in one request
    pub async fn table_payout(
        &self,
        id: i64,
        payload: &PayoutRequest,
    ) -> ClientResult<PayoutResponse> {
        self.http.post(&format!("tables/{}/payout", id), payload).await
    }

    // ==================== Customers ====================

    /// GET /customers
    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("customers").await
    }

    /// GET /customers/{id}
    pub async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.http.get(&format!("customers/{}", id)).await
    }

    /// POST /customers
    pub async fn create_customer(&self, payload: &CustomerCreate) -> ClientResult<Customer> {
        self.http.post("customers", payload).await
    }

    /// PUT /customers/{id}
    pub async fn update_customer(
        &self,
        id: i64,
        payload: &CustomerUpdate,
    ) -> ClientResult<Customer> {
        self.http.put(&format!("customers/{}", id), payload).await
    }

    /// DELETE /customers/{id} - refused while a balance is outstanding
    pub async fn delete_customer(&self, id: i64) -> ClientResult<MessageBody> {
        self.http.delete(&format!("customers/{}", id)).await
    }

    /// GET /customers/{id}/balance - always fetched fresh, never cached
    pub async fn customer_balance(&self, id: i64) -> ClientResult<CustomerBalance> {
        self.http.get(&format!("customers/{}/balance", id)).await
    }

    // ==================== Orders ====================

    /// GET /orders with optional status/table/customer filters
    pub async fn list_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        self.http.get_query("orders", filter).await
    }

    /// GET /orders/{id}
    pub async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.http.get(&format!("orders/{}", id)).await
    }

    /// POST /orders
    pub async fn create_order(&self, payload: &OrderCreate) -> ClientResult<Order> {
        self.http.post("orders", payload).await
    }

    /// PUT /orders/{id} - refused once the order is billed
    pub async fn update_order(&self, id: i64, payload: &OrderUpdate) -> ClientResult<Order> {
        self.http.put(&format!("orders/{}", id), payload).await
    }

    /// DELETE /orders/{id} - refused once the order is billed
    pub async fn delete_order(&self, id: i64) -> ClientResult<MessageBody> {
        self.http.delete(&format!("orders/{}", id)).await
    }

    /// POST /orders/{id}/items - append a line item
    pub async fn add_order_item(&self, id: i64, payload: &NewOrderItem) -> ClientResult<Order> {
        self.http.post(&format!("orders/{}/items", id), payload).await
    }

    // ==================== Payments ====================

    /// GET /payments
    pub async fn list_payments(&self) -> ClientResult<Vec<Payment>> {
        self.http.get("payments").await
    }

    /// GET /payments/{id}
    pub async fn get_payment(&self, id: i64) -> ClientResult<Payment> {
        self.http.get(&format!("payments/{}", id)).await
    }

    /// POST /payments
    pub async fn create_payment(&self, payload: &PaymentCreate) -> ClientResult<Payment> {
        self.http.post("payments", payload).await
    }

    /// DELETE /payments/{id} - administrative; restores the customer balance
    pub async fn delete_payment(&self, id: i64) -> ClientResult<MessageBody> {
        self.http.delete(&format!("payments/{}", id)).await
    }

    // ==================== Menu ====================

    /// GET /menu with optional category/availability filters
    pub async fn list_menu(&self, filter: &MenuFilter) -> ClientResult<Vec<MenuItem>> {
        self.http.get_query("menu", filter).await
    }

    /// GET /menu/categories - distinct category names
    pub async fn menu_categories(&self) -> ClientResult<Vec<String>> {
        self.http.get("menu/categories").await
    }

    /// GET /menu/{id}
    pub async fn get_menu_item(&self, id: i64) -> ClientResult<MenuItem> {
        self.http.get(&format!("menu/{}", id)).await
    }

    /// POST /menu
    pub async fn create_menu_item(&self, payload: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.http.post("menu", payload).await
    }

    /// PUT /menu/{id}
    pub async fn update_menu_item(
        &self,
        id: i64,
        payload: &MenuItemUpdate,
    ) -> ClientResult<MenuItem> {
        self.http.put(&format!("menu/{}", id), payload).await
    }

    /// DELETE /menu/{id}
    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<MessageBody> {
        self.http.delete(&format!("menu/{}", id)).await
    }
}
