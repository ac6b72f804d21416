//! RPKI validation example
//!
//! Checks the RPKI validity state of an announcement (origin ASN + prefix)
//! and prints the validating ROAs.
//!
//! Run with: `cargo run --example rpki_validation`

use ripestat_client::{RipeStat, RpkiStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let ripe = RipeStat::builder().sourceapp("ripestat-client-demo").build()?;

    let result = ripe
        .rpki_validation_status(3333, "193.0.0.0/21".parse()?)
        .await?;

    match result.status {
        RpkiStatus::Valid => println!("announcement is RPKI valid"),
        status => println!("announcement is not valid: {status}"),
    }

    for roa in &result.validating_roas {
        println!(
            "ROA: AS{} {} max /{} from {} ({})",
            roa.origin, roa.prefix, roa.max_length, roa.source, roa.validity
        );
    }

    Ok(())
}
