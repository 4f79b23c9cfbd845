//! End-to-end payout scenarios: real client against the in-memory backend

use altia_client::AltiaClient;
use altia_desk::{
    DeskError, OrderAggregator, Payout, PayoutInput, PayoutMethod, TableRegistry,
};
use altia_mock::MockServer;
use shared::auth::SignupRequest;
use shared::models::{
    CustomerCreate, NewOrderItem, Order, OrderCreate, OrderStatus, OrderUpdate, TableCreate,
    TableStatus,
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

async fn place_order(
    client: &AltiaClient,
    table_id: i64,
    customer_id: Option<i64>,
    quantity: i32,
    price: f64,
) -> Order {
    client
        .create_order(&OrderCreate {
            table_id,
            customer_id,
            items: vec![NewOrderItem {
                item_name: "Sel Roti".to_string(),
                quantity,
                price,
            }],
            notes: String::new(),
        })
        .await
        .expect("create order")
}

#[tokio::test]
async fn test_guest_table_cash_settlement() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());

    let table = registry
        .create(TableCreate {
            name: "T1".to_string(),
            position_x: 0.0,
            position_y: 0.0,
            width: 80.0,
            height: 80.0,
        })
        .await
        .expect("create table");
    assert_eq!(table.status, TableStatus::Free);

    let table = registry
        .assign_guest(&table, "Ram", None, false)
        .await
        .expect("seat guest");
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.guest_name.as_deref(), Some("Ram"));

    let order = place_order(&client, table.id, None, 2, 150.0).await;
    assert_eq!(order.total, 300.0);

    client
        .update_order(
            order.id,
            &OrderUpdate {
                status: Some(OrderStatus::Served),
                notes: None,
            },
        )
        .await
        .expect("mark served");

    let bill = aggregator.outstanding(table.id).await.expect("bill");
    assert_eq!(bill.total, 300.0);

    let mut payout = Payout::open(table, bill).expect("open payout");

    // A guest has no ledger; a shortfall cannot be deferred
    let err = payout
        .confirm(PayoutInput::new(200.0, PayoutMethod::Cash))
        .expect_err("guest shortfall must be refused");
    assert!(matches!(err, DeskError::BusinessRule(_)));

    payout
        .confirm(PayoutInput::new(300.0, PayoutMethod::Cash))
        .expect("full collection");
    let outcome = payout.apply(&client).await.expect("apply payout");

    let payment = outcome.payment.expect("payment recorded");
    assert_eq!(payment.amount, 300.0);
    assert_eq!(outcome.deferred_credit, 0.0);

    let billed = client.get_order(order.id).await.expect("fetch order");
    assert_eq!(billed.status, OrderStatus::Billed);

    assert_eq!(outcome.table.status, TableStatus::Free);
    assert!(!outcome.table.has_occupant());
}

#[tokio::test]
async fn test_customer_partial_payout_accrues_credit() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Sita".to_string(),
            phone: "9841000000".to_string(),
        })
        .await
        .expect("create customer");

    let table = registry
        .create(TableCreate {
            name: "T2".to_string(),
            position_x: 0.0,
            position_y: 0.0,
            width: 80.0,
            height: 80.0,
        })
        .await
        .expect("create table");
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat customer");

    let order = place_order(&client, table.id, Some(customer.id), 2, 150.0).await;
    client
        .update_order(
            order.id,
            &OrderUpdate {
                status: Some(OrderStatus::Served),
                notes: None,
            },
        )
        .await
        .expect("mark served");

    let bill = aggregator.outstanding(table.id).await.expect("bill");
    let mut payout = Payout::open(table, bill).expect("open payout");
    let split = payout
        .confirm(PayoutInput::new(200.0, PayoutMethod::Cash))
        .expect("confirm");
    assert_eq!(split.deferred_credit, 100.0);

    let outcome = payout.apply(&client).await.expect("apply payout");
    assert_eq!(outcome.payment.as_ref().map(|p| p.amount), Some(200.0));
    assert_eq!(outcome.deferred_credit, 100.0);
    assert_eq!(outcome.table.status, TableStatus::Free);
    assert!(!outcome.table.has_occupant());

    // The shortfall landed on the backend ledger
    let balance = client
        .customer_balance(customer.id)
        .await
        .expect("balance");
    assert_eq!(balance.credit_balance, 100.0);
}

#[tokio::test]
async fn test_credit_method_defers_entire_bill() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Hari".to_string(),
            phone: String::new(),
        })
        .await
        .expect("create customer");

    let table = registry
        .create(TableCreate {
            name: "T3".to_string(),
            position_x: 0.0,
            position_y: 0.0,
            width: 80.0,
            height: 80.0,
        })
        .await
        .expect("create table");
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat customer");

    place_order(&client, table.id, Some(customer.id), 4, 100.0).await;

    let bill = aggregator.outstanding(table.id).await.expect("bill");
    assert_eq!(bill.total, 400.0);

    let mut payout = Payout::open(table, bill).expect("open payout");
    let split = payout
        .confirm(PayoutInput::new(400.0, PayoutMethod::Credit))
        .expect("confirm");
    assert_eq!(split.collected, 0.0);
    assert_eq!(split.deferred_credit, 400.0);

    let outcome = payout.apply(&client).await.expect("apply payout");
    assert!(outcome.payment.is_none());
    assert_eq!(outcome.table.status, TableStatus::Free);

    let balance = client
        .customer_balance(customer.id)
        .await
        .expect("balance");
    assert_eq!(balance.credit_balance, 400.0);
}

#[tokio::test]
async fn test_combined_endpoint_settles_in_one_request() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Gita".to_string(),
            phone: String::new(),
        })
        .await
        .expect("create customer");

    let table = registry
        .create(TableCreate {
            name: "T4".to_string(),
            position_x: 0.0,
            position_y: 0.0,
            width: 80.0,
            height: 80.0,
        })
        .await
        .expect("create table");
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat customer");

    let order = place_order(&client, table.id, Some(customer.id), 3, 100.0).await;

    let bill = aggregator.outstanding(table.id).await.expect("bill");
    let mut payout = Payout::open(table, bill).expect("open payout");
    payout
        .confirm(PayoutInput::new(250.0, PayoutMethod::Upi))
        .expect("confirm");

    let outcome = payout.apply_combined(&client).await.expect("settle");
    assert_eq!(outcome.billed_orders, vec![order.id]);
    assert_eq!(outcome.payment.as_ref().map(|p| p.amount), Some(250.0));
    assert_eq!(outcome.deferred_credit, 50.0);
    assert_eq!(outcome.table.status, TableStatus::Free);

    let balance = client
        .customer_balance(customer.id)
        .await
        .expect("balance");
    assert_eq!(balance.credit_balance, 50.0);
}

#[tokio::test]
async fn test_interrupted_payout_resolves_to_zero_bill() {
    let (_server, client) = setup().await;
    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Maya".to_string(),
            phone: String::new(),
        })
        .await
        .expect("create customer");

    let table = registry
        .create(TableCreate {
            name: "T5".to_string(),
            position_x: 0.0,
            position_y: 0.0,
            width: 80.0,
            height: 80.0,
        })
        .await
        .expect("create table");
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await
        .expect("seat customer");

    let order = place_order(&client, table.id, Some(customer.id), 2, 150.0).await;

    // Simulate a payout interrupted after billing: the order is billed,
    // the table is still occupied
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

    let fetched = client.get_table(table.id).await.expect("fetch table");
    assert_eq!(fetched.status, TableStatus::Occupied);

    // Re-opening the payout view computes a zero remaining total, which
    // allows freeing the table
    let bill = aggregator.outstanding(table.id).await.expect("bill");
    assert!(bill.is_empty());
    assert_eq!(bill.total, 0.0);

    let mut payout = Payout::open(fetched, bill).expect("reopen payout");
    payout
        .confirm(PayoutInput::new(0.0, PayoutMethod::Cash))
        .expect("confirm zero bill");
    let outcome = payout.apply(&client).await.expect("free table");

    assert!(outcome.payment.is_none());
    assert_eq!(outcome.table.status, TableStatus::Free);
    assert!(!outcome.table.has_occupant());

    // The earlier billing already credited the ledger
    let balance = client
        .customer_balance(customer.id)
        .await
        .expect("balance");
    assert_eq!(balance.credit_balance, 300.0);
}
