//! Business-rule guards and auth behavior over real HTTP

use altia_client::{AltiaClient, ClientConfig, ClientError};
use altia_desk::{CreditLedger, DeskError, Payout, PayoutInput, PayoutMethod, TableRegistry};
use altia_mock::MockServer;
use shared::auth::SignupRequest;
use shared::models::{
    CustomerCreate, MenuItemCreate, MenuItemUpdate, NewOrderItem, OrderCreate, OrderStatus,
    OrderUpdate, PaymentCreate, PaymentMethod, TableCreate, TableStatus,
};

async fn setup() -> (MockServer, AltiaClient) {
    let server = MockServer::spawn().await.expect("spawn mock backend");
    let client = AltiaClient::new(&server.base_url());
    client
        .signup(&SignupRequest {
            username: "kanchha".to_string(),
            password: "front-desk".to_string(),
            full_name: "Kanchha Shrestha".to_string(),
            role: None,
        })
        .await
        .expect("signup");
    (server, client)
}

fn table_create(name: &str) -> TableCreate {
    TableCreate {
        name: name.to_string(),
        position_x: 0.0,
        position_y: 0.0,
        width: 80.0,
        height: 80.0,
    }
}

#[tokio::test]
async fn test_occupied_table_cannot_be_deleted() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());

    let table = registry.create(table_create("T1")).await.expect("create");
    let table = registry
        .assign_guest(&table, "Ram", None, false)
        .await
        .expect("seat guest");

    // Refused locally before any request goes out
    let err = registry.delete(&table).await.expect_err("local refusal");
    assert!(matches!(err, DeskError::BusinessRule(_)));

    // The backend refuses the same way if called directly
    let err = client
        .delete_table(table.id)
        .await
        .expect_err("backend refusal");
    assert!(matches!(err, ClientError::Conflict(_)));

    let tables = registry.list().await.expect("list");
    assert!(tables.iter().any(|t| t.id == table.id));

    // Clearing the table makes deletion legal
    let table = registry.clear(&table).await.expect("clear");
    assert_eq!(table.status, TableStatus::Free);
    assert!(!table.has_occupant());
    registry.delete(&table).await.expect("delete free table");
}

#[tokio::test]
async fn test_customer_with_outstanding_balance_cannot_be_deleted() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let ledger = CreditLedger::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Sita".to_string(),
            phone: String::new(),
        })
        .await
        .expect("create customer");

    // Build up a 50 balance by deferring a whole bill to credit
    let table = registry.create(table_create("T2")).await.expect("create");
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat customer");
    client
        .create_order(&OrderCreate {
            table_id: table.id,
            customer_id: Some(customer.id),
            items: vec![NewOrderItem {
                item_name: "Milk Tea".to_string(),
                quantity: 1,
                price: 50.0,
            }],
            notes: String::new(),
        })
        .await
        .expect("create order");
    let bill = altia_desk::OrderAggregator::new(client.clone())
        .outstanding(table.id)
        .await
        .expect("bill");
    let mut payout = Payout::open(table, bill).expect("open payout");
    payout
        .confirm(PayoutInput::new(0.0, PayoutMethod::Credit))
        .expect("confirm");
    payout.apply(&client).await.expect("apply");

    let customer = client.get_customer(customer.id).await.expect("fetch");
    assert_eq!(customer.credit_balance, 50.0);

    // Both the desk pre-check and the backend refuse deletion
    let err = ledger
        .delete_customer(&customer)
        .await
        .expect_err("local refusal");
    assert!(err.to_string().contains("outstanding balance"));

    let err = client
        .delete_customer(customer.id)
        .await
        .expect_err("backend refusal");
    assert!(matches!(err, ClientError::Conflict(_)));
    assert!(err.to_string().contains("outstanding balance"));

    let customers = client.list_customers().await.expect("list");
    assert!(customers.iter().any(|c| c.id == customer.id));

    // Settling the balance unblocks deletion
    ledger
        .record_payment(&PaymentCreate {
            customer_id: Some(customer.id),
            order_id: None,
            amount: 50.0,
            method: PaymentMethod::Cash,
            notes: String::new(),
        })
        .await
        .expect("settle balance");
    let customer = client.get_customer(customer.id).await.expect("fetch");
    assert_eq!(customer.credit_balance, 0.0);
    ledger
        .delete_customer(&customer)
        .await
        .expect("delete settled customer");
}

#[tokio::test]
async fn test_billed_order_is_immutable_and_non_deletable() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());

    let table = registry.create(table_create("T3")).await.expect("create");
    let table = registry
        .assign_guest(&table, "Ram", None, false)
        .await
        .expect("seat guest");

    let order = client
        .create_order(&OrderCreate {
            table_id: table.id,
            customer_id: None,
            items: vec![NewOrderItem {
                item_name: "Thukpa".to_string(),
                quantity: 1,
                price: 180.0,
            }],
            notes: String::new(),
        })
        .await
        .expect("create order");

    client
        .update_order(
            order.id,
            &OrderUpdate {
                status: Some(OrderStatus::Billed),
                notes: None,
            },
        )
        .await
        .expect("bill order");

    let err = client
        .update_order(
            order.id,
            &OrderUpdate {
                status: Some(OrderStatus::Served),
                notes: None,
            },
        )
        .await
        .expect_err("billed order refuses update");
    assert!(matches!(err, ClientError::Conflict(_)));

    let err = client
        .delete_order(order.id)
        .await
        .expect_err("billed order refuses delete");
    assert!(matches!(err, ClientError::Conflict(_)));

    let fetched = client.get_order(order.id).await.expect("still present");
    assert_eq!(fetched.status, OrderStatus::Billed);
    assert_eq!(fetched.total, 180.0);
}

#[tokio::test]
async fn test_reassignment_requires_confirmation() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Hari".to_string(),
            phone: String::new(),
        })
        .await
        .expect("create customer");

    let table = registry.create(table_create("T4")).await.expect("create");

    // free → reserved → occupied
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Reserved, false)
        .await
        .expect("reserve");
    assert_eq!(table.status, TableStatus::Reserved);
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat");

    // occupied → reserved is not a legal transition
    let err = registry
        .assign_customer(&table, customer.id, TableStatus::Reserved, false)
        .await
        .expect_err("illegal transition");
    assert!(matches!(err, DeskError::Transition { .. }));

    // Reassigning an occupied table needs explicit confirmation
    let err = registry
        .assign_guest(&table, "Ram", None, false)
        .await
        .expect_err("unconfirmed reassignment");
    assert!(matches!(err, DeskError::BusinessRule(_)));

    let table = registry
        .assign_guest(&table, "Ram", None, true)
        .await
        .expect("confirmed reassignment");
    assert_eq!(table.guest_name.as_deref(), Some("Ram"));
    assert_eq!(table.customer_id, None);
}

#[tokio::test]
async fn test_login_round_trip() {
    let (server, _client) = setup().await;

    // A fresh client can log into the account created at setup
    let client = AltiaClient::new(&server.base_url());
    let resp = client
        .login(&shared::auth::LoginRequest {
            username: "kanchha".to_string(),
            password: "front-desk".to_string(),
        })
        .await
        .expect("login");
    assert_eq!(resp.user.username, "kanchha");
    assert!(client.token().is_some());

    let me = client.me().await.expect("me");
    assert_eq!(me.id, resp.user.id);

    let err = client
        .login(&shared::auth::LoginRequest {
            username: "kanchha".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .expect_err("bad credentials");
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_requests_without_valid_token_are_unauthorized() {
    let (server, _client) = setup().await;

    let anonymous = AltiaClient::new(&server.base_url());
    let err = anonymous
        .list_tables()
        .await
        .expect_err("no token, no access");
    assert!(matches!(err, ClientError::Unauthorized));

    // A 401 clears the stored token: hard client-side logout
    let stale = AltiaClient::with_config(
        &ClientConfig::new(server.base_url()).with_token("not-a-real-token"),
    );
    assert!(stale.token().is_some());
    let err = stale.list_tables().await.expect_err("bad token");
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(stale.token().is_none());
}

#[tokio::test]
async fn test_menu_edits_do_not_touch_existing_orders() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());

    let item = client
        .create_menu_item(&MenuItemCreate {
            name: "Sel Roti".to_string(),
            category: "Snacks".to_string(),
            price: 150.0,
            description: String::new(),
            available: true,
        })
        .await
        .expect("create menu item");

    let table = registry.create(table_create("T5")).await.expect("create");
    let table = registry
        .assign_guest(&table, "Ram", None, false)
        .await
        .expect("seat guest");

    // The line item copies the menu price at creation time
    let order = client
        .create_order(&OrderCreate {
            table_id: table.id,
            customer_id: None,
            items: vec![NewOrderItem {
                item_name: item.name.clone(),
                quantity: 2,
                price: item.price,
            }],
            notes: String::new(),
        })
        .await
        .expect("create order");
    assert_eq!(order.total, 300.0);

    client
        .update_menu_item(
            item.id,
            &MenuItemUpdate {
                price: Some(200.0),
                ..Default::default()
            },
        )
        .await
        .expect("raise price");

    let fetched = client.get_order(order.id).await.expect("fetch order");
    assert_eq!(fetched.total, 300.0);
    assert_eq!(fetched.items[0].price, 150.0);
}
