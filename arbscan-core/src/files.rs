use std::path::Path;

use crate::ArbscanError;

/// Derive the exchange identifier from a quote file path.
///
/// The identifier is the final hyphen-delimited token of the file name up to
/// its first dot: `ethusdt-2022-09-binance.csv` yields `binance`.
///
/// # Errors
/// Returns `InvalidArg` if the path has no file name or the token is empty.
pub fn exchange_from_file_stem(path: &Path) -> Result<String, ArbscanError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArbscanError::InvalidArg(format!("no file name in {}", path.display())))?;
    let stem = name.split('.').next().unwrap_or(name);
    match stem.rsplit('-').next() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ArbscanError::InvalidArg(format!(
            "no exchange identifier in file name `{name}`"
        ))),
    }
}
