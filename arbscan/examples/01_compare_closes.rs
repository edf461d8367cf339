mod common;

use arbscan::{Arbscan, CompareRequest};
use common::{EXCHANGES, get_connectors};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let day = args.next().unwrap_or_else(|| "2022-09-14".to_string());
    let timeframe = args.next().unwrap_or_else(|| "1m".to_string());

    let mut builder = Arbscan::builder();
    for c in get_connectors()? {
        builder = builder.with_connector(c);
    }
    let arbscan = builder.build()?;

    let req = CompareRequest::new(EXCHANGES, "ETH/USDT", &timeframe, &day)?;
    let report = arbscan.compare_closes(&req).await?;

    for cov in &report.coverage {
        println!(
            "{:<8} {:>5} candles, {} pages, span {:?}",
            cov.exchange, cov.records, cov.pages, cov.span
        );
    }
    println!("\n{}", report.header().join(" | "));
    for row in report.rows().iter().take(10) {
        let values: Vec<String> = row.values.iter().map(|v| format!("{v:.2}")).collect();
        println!("{} | {}", row.timestamp, values.join(" | "));
    }
    println!("... {} rows total", report.table.len());

    #[cfg(feature = "dataframe")]
    {
        let out = arbscan::OutputConfig::default().dir.join(format!(
            "closes_{}_{timeframe}_{day}.csv",
            report.symbol.replace('/', "")
        ));
        arbscan::output::write_comparison(&report, &out)?;
        println!("wrote {}", out.display());
    }
    Ok(())
}
