//! Basic usage example for the RIPEstat client
//!
//! This example demonstrates how to:
//! - Create a configured client
//! - Query the whats-my-ip and network-info data calls
//! - Handle responses
//!
//! Run with: `cargo run --example basic_usage`

use ripestat_client::RipeStat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let ripe = RipeStat::builder().sourceapp("ripestat-client-demo").build()?;

    // Example 1: the caller's public IP address
    println!("1. Fetching our public IP address...");
    let my_ip = ripe.whats_my_ip().await?;
    println!("   We are {my_ip}");

    // Example 2: which network announces that address
    println!("\n2. Looking up network info for {my_ip}...");
    match ripe.network_info(my_ip.ip).await {
        Ok(info) => {
            println!("   Prefix: {}", info.prefix);
            for asn in &info.asns {
                println!("   Announced by AS{asn}");
            }
        }
        Err(e) => println!("   Error: {e}"),
    }

    Ok(())
}
