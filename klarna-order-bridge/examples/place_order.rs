//! Order placement example.
//!
//! Prints the payload built for a JSON order and, when an authorization token
//! is available, places the order.
//!
//! # Running this example
//!
//! ```bash
//! export KLARNA_API_USERNAME=<username>
//! export KLARNA_API_PASSWORD=<password>
//! export KLARNA_AUTHORIZATION_TOKEN=<token from the payment widget>
//! cargo run --example place_order -- klarna.toml order.json
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::env;

use klarna_order_bridge::{
    HttpKlarnaClient, KlarnaConfig,
    models::Order,
    service::{PaymentSource, PlaceOrderService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(config_path), Some(order_path)) = (args.next(), args.next()) else {
        return Err("usage: place_order <config.toml> <order.json>".into());
    };

    let config = KlarnaConfig::from_file(&config_path)?;
    let order: Order = serde_json::from_str(&std::fs::read_to_string(&order_path)?)?;

    let client = HttpKlarnaClient::from_config(&config)?;
    let service = PlaceOrderService::from_config(client, &config);

    let payload = service.serializer(&order, None).to_hash();
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let Ok(token) = env::var("KLARNA_AUTHORIZATION_TOKEN") else {
        eprintln!("KLARNA_AUTHORIZATION_TOKEN not set, skipping order placement");
        return Ok(());
    };

    match service.call(&order, None, &PaymentSource::new(token)).await {
        Ok(placed) => {
            println!("Provider order: {}", placed.order_id);
            if let Some(url) = placed.redirect_url {
                println!("Redirect: {url}");
            }
        }
        Err(e) => eprintln!("Order placement failed: {e}"),
    }

    Ok(())
}
