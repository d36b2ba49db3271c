use crate::{FIELD_DELIMITER, error::StoreError};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// CartEntry
///
/// One line of a per-user cart file: `productName;quantity`. Quantity is
/// the only trailing field, so product names may contain the delimiter on
/// this surface (the split is on the last occurrence).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CartEntry {
    pub product: String,
    pub quantity: u32,
}

/// Path of a user's cart file inside the data directory.
#[must_use]
pub fn cart_path(dir: impl AsRef<Path>, username: &str) -> PathBuf {
    dir.as_ref().join(format!("cart_{username}.txt"))
}

/// Decode one cart line. A malformed or missing quantity degrades to 1;
/// blank lines yield no entry.
#[must_use]
pub fn parse_cart_line(line: &str) -> Option<CartEntry> {
    if line.trim().is_empty() {
        return None;
    }

    let (product, quantity) = match line.rsplit_once(FIELD_DELIMITER) {
        Some((product, token)) => (product, token.trim().parse().unwrap_or(1)),
        None => (line, 1),
    };

    Some(CartEntry {
        product: product.to_string(),
        quantity,
    })
}

/// Load a cart, merging duplicate product lines by summing quantities in
/// first-occurrence order. A missing file is an empty cart.
#[must_use]
pub fn load_cart(path: impl AsRef<Path>) -> Vec<CartEntry> {
    let Ok(text) = fs::read_to_string(path.as_ref()) else {
        return Vec::new();
    };

    let mut entries: Vec<CartEntry> = Vec::new();
    for entry in text.lines().filter_map(parse_cart_line) {
        match entries.iter_mut().find(|e| e.product == entry.product) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(entry.quantity),
            None => entries.push(entry),
        }
    }

    entries
}

/// Rewrite a cart file in full.
pub fn save_cart(path: impl AsRef<Path>, entries: &[CartEntry]) -> Result<(), StoreError> {
    let path = path.as_ref();

    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.product);
        text.push(FIELD_DELIMITER);
        text.push_str(&entry.quantity.to_string());
        text.push('\n');
    }

    fs::write(path, text).map_err(|source| StoreError::write(path, source))
}

///
/// TESTS
///
