mod common;

use std::path::PathBuf;

use arbscan::output::write_daily_pair_stats;
use arbscan::{OutputConfig, QuoteSource, daily_pair_stats};
use arbscan_core::load_quote_dir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: 03_daily_pair_stats [QUOTE_DIR] [OUT_DIR]
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
    let stats = daily_pair_stats(&sources, out.daily_precision)?;

    for (field, pairs) in &stats {
        for pair in pairs {
            for row in &pair.rows {
                println!(
                    "{field:<4} {:<16} {} max={:.3} min={:.3} mean={:.3}",
                    pair.column, row.day, row.max, row.min, row.mean
                );
            }
        }
    }
    let written = write_daily_pair_stats(&stats, &out.dir)?;
    println!("wrote {} files to {}", written.len(), out.dir.display());
    Ok(())
}
