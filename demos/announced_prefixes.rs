//! Announced prefixes example
//!
//! Lists the prefixes announced by AS3333 (RIPE NCC) together with the
//! intervals during which they were visible.
//!
//! Run with: `cargo run --example announced_prefixes`

use ripestat_client::RipeStat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let ripe = RipeStat::builder().sourceapp("ripestat-client-demo").build()?;

    let prefixes = ripe
        .announced_prefixes(3333)
        .min_peers_seeing(20)
        .fetch()
        .await?;

    println!(
        "AS3333 announces {} prefixes (data {} .. {})",
        prefixes.len(),
        prefixes.earliest_time,
        prefixes.latest_time
    );

    for announced in &prefixes {
        println!("{}", announced.prefix);
        for timeline in &announced.timelines {
            println!("  visible {} .. {}", timeline.starttime, timeline.endtime);
        }
    }

    Ok(())
}
