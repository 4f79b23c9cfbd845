//! Front-desk walkthrough against the in-memory backend: seat a party,
//! take an order, split the bill between cash and credit.
//!
//! Run with: cargo run -p altia-desk --example front_desk_demo

use altia_client::AltiaClient;
use altia_desk::{CreditLedger, OrderAggregator, Payout, PayoutInput, PayoutMethod, TableRegistry};
use altia_mock::MockServer;
use shared::auth::SignupRequest;
use shared::models::{
    CustomerCreate, MenuItemCreate, NewOrderItem, OrderCreate, OrderStatus, OrderUpdate,
    TableCreate, TableStatus,
};
use shared::money;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let server = MockServer::spawn().await?;
    let client = AltiaClient::new(&server.base_url());

    client
        .signup(&SignupRequest {
            username: "kanchha".to_string(),
            password: "front-desk".to_string(),
            full_name: "Kanchha Shrestha".to_string(),
            role: None,
        })
        .await?;

    let registry = TableRegistry::new(client.clone());
    let aggregator = OrderAggregator::new(client.clone());
    let ledger = CreditLedger::new(client.clone());

    let tea = client
        .create_menu_item(&MenuItemCreate {
            name: "Milk Tea".to_string(),
            category: "Drinks".to_string(),
            price: 50.0,
            description: String::new(),
            available: true,
        })
        .await?;
    let momo = client
        .create_menu_item(&MenuItemCreate {
            name: "Chicken Momo".to_string(),
            category: "Snacks".to_string(),
            price: 150.0,
            description: "Steamed, ten pieces".to_string(),
            available: true,
        })
        .await?;

    let customer = client
        .create_customer(&CustomerCreate {
            name: "Sita Gurung".to_string(),
            phone: "9841000000".to_string(),
        })
        .await?;

    let table = registry
        .create(TableCreate {
            name: "T1".to_string(),
            position_x: 40.0,
            position_y: 40.0,
            width: 80.0,
            height: 80.0,
        })
        .await?;
    let table = registry
        .assign_customer(&table, customer.id, TableStatus::Occupied, false)
        .await?;
    println!("seated {} at {}", customer.name, table.name);

    let order = client
        .create_order(&OrderCreate {
            table_id: table.id,
            customer_id: Some(customer.id),
            items: vec![
                NewOrderItem {
                    item_name: tea.name.clone(),
                    quantity: 2,
                    price: tea.price,
                },
                NewOrderItem {
                    item_name: momo.name.clone(),
                    quantity: 1,
                    price: momo.price,
                },
            ],
            notes: String::new(),
        })
        .await?;
    client
        .update_order(
            order.id,
            &OrderUpdate {
                status: Some(OrderStatus::Served),
                notes: None,
            },
        )
        .await?;

    let bill = aggregator.outstanding(table.id).await?;
    println!(
        "bill for {}: {} across {} order(s)",
        table.name,
        money::format_amount(bill.total),
        bill.orders.len()
    );

    // Collect 200 in cash; the rest goes on Sita's tab
    let mut payout = Payout::open(table, bill)?;
    let split = payout.confirm(PayoutInput::new(200.0, PayoutMethod::Cash))?;
    println!(
        "collecting {} now, {} deferred to credit",
        money::format_amount(split.collected),
        money::format_amount(split.deferred_credit)
    );
    let outcome = payout.apply(&client).await?;
    println!(
        "table {} is {} again",
        outcome.table.name, outcome.table.status
    );

    let balance = ledger.balance(customer.id).await?;
    println!(
        "{} now owes {}",
        balance.name,
        money::format_amount(balance.credit_balance)
    );

    Ok(())
}
