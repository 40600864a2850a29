//! Ledger persistence, saved to ~/.runeforge/enchantments.json

use super::types::EnchantLedger;
use std::fs;
use std::io;
use std::path::PathBuf;

pub fn ledger_save_path() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".runeforge").join("enchantments.json"))
}

/// Load the ledger from disk, or return an empty one if not found.
pub fn load_ledger() -> EnchantLedger {
    let path = match ledger_save_path() {
        Ok(p) => p,
        Err(_) => return EnchantLedger::new(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => EnchantLedger::new(),
    }
}

/// Save the ledger to disk
pub fn save_ledger(ledger: &EnchantLedger) -> io::Result<()> {
    let path = ledger_save_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
