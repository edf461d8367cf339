mod common;

use arbscan::{Arbscan, Timeframe};
use common::get_connectors;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Arbscan::builder().page_limit(500);
    for c in get_connectors()? {
        builder = builder.with_connector(c);
    }
    let arbscan = builder.build()?;

    let since = arbscan_core::determine_ms_timestamp("2022-09-14")?;
    for name in arbscan.exchanges().collect::<Vec<_>>() {
        let connector = arbscan.connector(name)?;
        let series = arbscan
            .fetch_series(&connector, "ETH/USDT", Timeframe::M1, since)
            .await?;
        println!(
            "{name:<8} {:>5} candles in {} pages",
            series.candles.len(),
            series.coverage.pages
        );
    }
    Ok(())
}
