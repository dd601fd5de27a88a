//! Spreadsheet column labels (A, B, ..., Z, AA, ...).

use crate::error_handling::SheetError;

/// Converts a column label to a zero-based index.
///
/// Each letter is worth `letter - 'A' + 1` in base 26, and the sum is shifted
/// down by one: `A` is 0, `Z` is 25, `AA` is 26. Lowercase letters are accepted.
///
/// # Errors
///
/// Returns `SheetError::InvalidColumn` for an empty label, any non-letter
/// character, or a label too long to fit in `usize`.
pub fn column_to_index(label: &str) -> Result<usize, SheetError> {
    let invalid = || SheetError::InvalidColumn(label.to_string());
    if label.is_empty() {
        return Err(invalid());
    }

    let mut index: usize = 0;
    for ch in label.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let value = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(value))
            .ok_or_else(invalid)?;
    }
    Ok(index - 1)
}

/// Converts a zero-based index back to its column label.
pub fn index_to_column(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
