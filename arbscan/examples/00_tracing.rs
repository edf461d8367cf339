mod common;

use arbscan::{Arbscan, CompareRequest};
use common::get_connectors;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,arbscan=trace,arbscan_binance=debug
    // and run with `--features tracing`.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let mut builder = Arbscan::builder();
    for c in get_connectors()? {
        builder = builder.with_connector(c);
    }
    let arbscan = builder.build()?;

    let names: Vec<&str> = arbscan.exchanges().collect();
    let req = CompareRequest::new(&names, "ETH/USDT", "1h", "2022-09-14")?;
    let report = arbscan.compare_closes(&req).await?;
    println!("{} aligned rows", report.table.len());
    Ok(())
}
