use crate::{FIELD_DELIMITER, record::ProductRecord};
use rust_decimal::Decimal;

///
/// Text Codec
///
/// Emits the canonical (newest) seven-field layout:
/// `name;price;size;fabric;sex;sale;description`.
///
/// Known format limitations, documented rather than papered over:
/// - absent price and absent sale both serialize as `0`, so absence does
///   not survive a rewrite (the format has no absent marker);
/// - delimiters inside the description are written verbatim, which is safe
///   only because the description is the trailing field;
/// - legacy 4/5/6-token lines are lossy-upgraded to this layout the first
///   time they are rewritten.
///

#[must_use]
pub fn serialize_line(record: &ProductRecord) -> String {
    let d = FIELD_DELIMITER;
    let price = record.price.unwrap_or(Decimal::ZERO);
    let sale = record.sale_percent.unwrap_or(Decimal::ZERO);

    format!(
        "{}{d}{price}{d}{}{d}{}{d}{}{d}{sale}{d}{}",
        record.name, record.size, record.fabric, record.sex, record.description
    )
}

///
/// TESTS
///
