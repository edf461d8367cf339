mod common;

use std::path::PathBuf;

use arbscan::output::{write_daily_means, write_minute_summary};
use arbscan::{OutputConfig, PriceField, QuoteSource, daily_means, minute_summary, pair_differences};
use arbscan_core::load_quote_dir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: 04_daily_means [QUOTE_DIR] [OUT_DIR]
    let mut args = std::env::args().skip(1);
    let synthetic = tempfile::tempdir()?;
    let input = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => {
            common::write_synthetic_quotes(synthetic.path())?;
            synthetic.path().to_path_buf()
        }
    };
    let out = OutputConfig {
        dir: args.next().map_or_else(|| OutputConfig::default().dir, PathBuf::from),
        ..OutputConfig::default()
    };

    let sources: Vec<QuoteSource> = load_quote_dir(&input)?
        .into_iter()
        .map(|(exchange, rows)| QuoteSource::new(exchange, rows))
        .collect();

    let means = daily_means(&sources, out.minute_precision)?;
    for (field, table) in &means {
        let names: Vec<&str> = table.columns().iter().map(|c| c.name()).collect();
        println!("{field}: {}", names.join(", "));
        for (i, day) in table.days().iter().enumerate() {
            let values: Vec<String> = table
                .columns()
                .iter()
                .map(|col| format!("{:.2}", col.values()[i]))
                .collect();
            println!("  {day} {}", values.join(" "));
        }
    }
    let written = write_daily_means(&means, &out.dir)?;

    // Per-minute spread summary for mid prices.
    let diffs = pair_differences(&sources, PriceField::Mid)?;
    let pair_columns: Vec<String> = diffs
        .columns()
        .map(|c| c.name().to_string())
        .filter(|n| n.contains('-'))
        .collect();
    let summary = minute_summary(&diffs, &pair_columns)?;
    write_minute_summary(&summary, &out.dir.join("minute_stats_mid.csv"))?;

    println!("wrote {} files to {}", written.len() + 1, out.dir.display());
    Ok(())
}
