use crate::{FIELD_DELIMITER, record::ProductRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

///
/// Record Parser
///
/// Decodes one catalog line into a [`ProductRecord`]. The layout is
/// positional and the token count selects the schema version the line was
/// written under:
///
/// - `>= 7` — `name;price;size;fabric;sex;sale;description...`; everything
///   from the seventh token onward is rejoined into the description.
/// - `6` — ambiguous legacy layout: the sixth token is a sale percentage
///   iff every character is a digit, `.`, or `-`; otherwise it is the
///   description and no sale is recorded.
/// - `5` — `name;price;size;fabric;description` (no sex, no sale).
/// - `4` — `name;price;size;description` (no fabric, sex, or sale).
/// - fewer — missing fields stay empty/absent.
///
/// Parsing is total: malformed numeric tokens degrade to absent attributes
/// and never drop the record. Blank lines produce no record at all.
///

#[must_use]
pub fn parse_line(line: &str) -> Option<ProductRecord> {
    if line.trim().is_empty() {
        return None;
    }

    let tokens: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    let mut record = ProductRecord {
        name: tokens.first().copied().unwrap_or_default().to_string(),
        price: tokens.get(1).and_then(|token| parse_price_token(token)),
        size: tokens.get(2).copied().unwrap_or_default().to_string(),
        ..ProductRecord::default()
    };

    match tokens.len() {
        n if n >= 7 => {
            record.fabric = tokens[3].to_string();
            record.sex = tokens[4].to_string();
            record.sale_percent = Decimal::from_str(tokens[5]).ok();

            let delimiter = FIELD_DELIMITER.to_string();
            record.description = tokens[6..].join(delimiter.as_str());
        }
        6 => {
            record.fabric = tokens[3].to_string();
            record.sex = tokens[4].to_string();
            // Lossy legacy heuristic: a numeric-looking tail is a sale
            // percentage, anything else is the description. Preserved
            // as-is for file compatibility.
            if is_numeric_token(tokens[5]) {
                record.sale_percent = Decimal::from_str(tokens[5]).ok();
            } else {
                record.description = tokens[5].to_string();
            }
        }
        5 => {
            record.fabric = tokens[3].to_string();
            record.description = tokens[4].to_string();
        }
        4 => {
            record.description = tokens[3].to_string();
        }
        _ => {}
    }

    Some(record)
}

/// Parse a price token, skipping leading currency symbols or other
/// non-numeric prefixes. An empty or unparseable remainder means the
/// record has no price.
fn parse_price_token(token: &str) -> Option<Decimal> {
    let stripped = token.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
    if stripped.is_empty() {
        return None;
    }

    Decimal::from_str(stripped).ok()
}

// Every character is a digit, '.', or '-'. Vacuously true for the empty
// token, which then fails the decimal parse and records no sale.
fn is_numeric_token(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn legacy_four_field_line() {
        let record = parse_line("Red Shirt;19.99;M;A cotton shirt").unwrap();

        assert_eq!(record.name, "Red Shirt");
        assert_eq!(record.price, Some(dec("19.99")));
        assert_eq!(record.size, "M");
        assert_eq!(record.fabric, "");
        assert_eq!(record.sex, "");
        assert_eq!(record.sale_percent, None);
        assert_eq!(record.description, "A cotton shirt");
    }

    #[test]
    fn five_field_line_has_fabric_but_no_sex() {
        let record = parse_line("Scarf;12.50;S;silk;Light and warm").unwrap();

        assert_eq!(record.fabric, "silk");
        assert_eq!(record.sex, "");
        assert_eq!(record.sale_percent, None);
        assert_eq!(record.description, "Light and warm");
    }

    #[test]
    fn modern_seven_field_line_with_sale() {
        let record = parse_line("Blue Jeans;49.99;L;denim;M;20;Slim fit").unwrap();

        assert_eq!(record.price, Some(dec("49.99")));
        assert_eq!(record.size, "L");
        assert_eq!(record.fabric, "denim");
        assert_eq!(record.sex, "M");
        assert_eq!(record.sale_percent, Some(dec("20")));
        assert_eq!(record.description, "Slim fit");
        assert_eq!(record.effective_price(), Some(dec("39.992")));
    }

    #[test]
    fn description_keeps_embedded_delimiters() {
        let record = parse_line("Belt;5;M;leather;M;0;brown; buckle; stitched").unwrap();

        assert_eq!(record.description, "brown; buckle; stitched");
    }

    #[test]
    fn ambiguous_six_field_numeric_tail_is_sale() {
        let record = parse_line("Cap;9.99;S;wool;M;15").unwrap();

        assert_eq!(record.sale_percent, Some(dec("15")));
        assert_eq!(record.description, "");
    }

    #[test]
    fn ambiguous_six_field_text_tail_is_description() {
        let record = parse_line("Cap;9.99;S;wool;M;Good for winter").unwrap();

        assert_eq!(record.sale_percent, None);
        assert_eq!(record.description, "Good for winter");
    }

    #[test]
    fn unparseable_sale_token_degrades_to_absent() {
        let record = parse_line("Hat;5.00;M;felt;W;soon%;On sale soon").unwrap();

        assert_eq!(record.sale_percent, None);
        assert_eq!(record.description, "On sale soon");
    }

    #[test]
    fn unparseable_price_keeps_the_record() {
        let record = parse_line("Mystery Item;free;M;").unwrap();

        assert_eq!(record.name, "Mystery Item");
        assert_eq!(record.price, None);
        assert_eq!(record.price_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn currency_prefix_is_stripped_from_price() {
        let record = parse_line("Gloves;$8.25;S;knit").unwrap();

        assert_eq!(record.price, Some(dec("8.25")));
    }

    #[test]
    fn short_lines_default_missing_fields() {
        let record = parse_line("Just A Name").unwrap();

        assert_eq!(record.name, "Just A Name");
        assert_eq!(record.price, None);
        assert_eq!(record.size, "");
        assert_eq!(record.description, "");

        let record = parse_line("Socks;3.99").unwrap();
        assert_eq!(record.price, Some(dec("3.99")));
        assert_eq!(record.size, "");
    }

    #[test]
    fn blank_lines_produce_no_record() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
    }

    #[test]
    fn parsing_is_deterministic_per_schema() {
        let lines = [
            "A;1;M;d",
            "A;1;M;f;d",
            "A;1;M;f;W;15",
            "A;1;M;f;W;text tail",
            "A;1;M;f;W;15;d;with;extra",
        ];

        for line in lines {
            assert_eq!(parse_line(line), parse_line(line), "line: {line}");
        }
    }

    #[test]
    fn negative_and_dotted_tails_count_as_numeric() {
        // "-" and "." pass the character test but fail the decimal parse;
        // the slot is still consumed as the sale position.
        let record = parse_line("Cap;9.99;S;wool;M;-").unwrap();
        assert_eq!(record.sale_percent, None);
        assert_eq!(record.description, "");

        let record = parse_line("Cap;9.99;S;wool;M;-5").unwrap();
        assert_eq!(record.sale_percent, Some(dec("-5")));
    }
}
