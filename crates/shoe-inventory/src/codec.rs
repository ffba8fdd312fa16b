//! Line codec for the inventory file.
//!
//! One record per line, five comma-separated fields, no quoting:
//!
//! ```text
//! Country,code,product,cost,quantity
//! South Africa,SC01,Nike Air Max,109.99,32
//! ```
//!
//! The first line of a file is always a header and is never parsed as data.

use std::io::{BufRead, Write};

use csv::StringRecord;

use crate::{error::RecordError, record::InventoryRecord};

/// Header line written on every full rewrite.
pub const HEADER: &str = "Country,code,product,cost,quantity";

/// Field delimiter.
pub const DELIMITER: u8 = b',';

/// Number of fields in a data line.
pub const FIELD_COUNT: usize = 5;

/// Parses a single data line into a record.
///
/// The line terminator and surrounding whitespace are stripped first.
/// Numeric fields are trimmed before conversion; text fields are kept as-is.
///
/// # Errors
///
/// - [`RecordError::MalformedRecord`] if the line does not split into exactly 5 fields
/// - [`RecordError::InvalidNumericField`] if cost or quantity cannot be converted
///
/// # Example
///
/// ```
/// use shoe_inventory::codec::parse_line;
///
/// let record = parse_line("Vietnam,SC02,Adidas Ultraboost,120,4\n").unwrap();
/// assert_eq!(record.cost, 120.0);
/// assert!(parse_line("Vietnam,SC02,Adidas Ultraboost,120").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<InventoryRecord, RecordError> {
    let fields = split_fields(line.trim())?;
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::MalformedRecord { fields: fields.len() });
    }

    Ok(InventoryRecord {
        country: fields[0].to_string(),
        code: fields[1].to_string(),
        product: fields[2].to_string(),
        cost: parse_cost(&fields[3])?,
        quantity: parse_quantity(&fields[4])?,
    })
}

/// Serializes a record into `country,code,product,cost,quantity` (no terminator).
///
/// # Example
///
/// ```
/// use shoe_inventory::{codec::format_line, record::InventoryRecord};
///
/// let record = InventoryRecord::new("Vietnam", "SC02", "Adidas Ultraboost", 120.0, 4).unwrap();
/// assert_eq!(format_line(&record), "Vietnam,SC02,Adidas Ultraboost,120.0,4");
/// ```
#[must_use]
pub fn format_line(record: &InventoryRecord) -> String {
    format!(
        "{},{},{},{},{}",
        record.country,
        record.code,
        record.product,
        format_cost(record.cost),
        record.quantity
    )
}

/// Skips the header line.
///
/// Returns `Ok(false)` when the source is empty.
pub fn skip_header<R: BufRead>(reader: &mut R) -> std::io::Result<bool> {
    let mut header = Vec::new();
    // Header content is not validated (not even as UTF-8), only consumed.
    let bytes_read = reader.read_until(b'\n', &mut header)?;
    Ok(bytes_read > 0)
}

/// Writes the header line.
pub fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")
}

/// Writes a single record terminated by `\n`.
pub fn write_one<W: Write>(writer: &mut W, record: &InventoryRecord) -> std::io::Result<()> {
    writeln!(writer, "{}", format_line(record))
}

fn split_fields(line: &str) -> Result<StringRecord, RecordError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(DELIMITER)
        .buffer_capacity(line.len().max(1))
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record)
    } else {
        // Blank line
        Err(RecordError::MalformedRecord { fields: 0 })
    }
}

fn parse_cost(raw: &str) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
        .ok_or_else(|| RecordError::InvalidNumericField {
            field: "cost",
            expected: "a non-negative number",
            value: raw.to_string(),
        })
}

fn parse_quantity(raw: &str) -> Result<u64, RecordError> {
    raw.trim().parse::<u64>().map_err(|_| RecordError::InvalidNumericField {
        field: "quantity",
        expected: "a non-negative integer",
        value: raw.to_string(),
    })
}

/// Shortest round-tripping form with a fractional part: `100.0`, `109.99`.
fn format_cost(cost: f64) -> String {
    format!("{cost:?}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;

    use super::*;

    fn sample_record() -> InventoryRecord {
        InventoryRecord {
            country: "South Africa".to_string(),
            code: "SC01".to_string(),
            product: "Nike Air Max".to_string(),
            cost: 109.99,
            quantity: 32,
        }
    }

    #[test]
    fn test_parse_line() {
        let record = parse_line("South Africa,SC01,Nike Air Max,109.99,32").unwrap();
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_parse_line_strips_terminator() {
        let record = parse_line("South Africa,SC01,Nike Air Max,109.99,32\r\n").unwrap();
        assert_eq!(record.quantity, 32);
    }

    #[test]
    fn test_parse_line_trims_numeric_fields() {
        let record = parse_line("China,SC03,Puma, 45.5 , 7").unwrap();
        assert_eq!(record.cost, 45.5);
        assert_eq!(record.quantity, 7);
    }

    #[test]
    fn test_parse_line_four_fields() {
        let err = parse_line("South Africa,SC01,Nike Air Max,109.99").unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { fields: 4 }));
    }

    #[test]
    fn test_parse_line_comma_in_product_is_malformed() {
        let err = parse_line("South Africa,SC01,Nike, Air Max,109.99,32").unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { fields: 6 }));
    }

    #[test]
    fn test_parse_line_quotes_are_literal() {
        let record = parse_line(r#"USA,SC09,"Jordan 1",150.0,2"#).unwrap();
        assert_eq!(record.product, r#""Jordan 1""#);
    }

    #[test]
    fn test_parse_blank_line() {
        let err = parse_line("   \n").unwrap_err();
        assert!(matches!(err, RecordError::MalformedRecord { fields: 0 }));
    }

    #[test]
    fn test_parse_invalid_cost() {
        let err = parse_line("South Africa,SC01,Nike Air Max,abc,32").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumericField { field: "cost", .. }));
    }

    #[test]
    fn test_parse_negative_cost() {
        let err = parse_line("South Africa,SC01,Nike Air Max,-1.5,32").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumericField { field: "cost", .. }));
    }

    #[test]
    fn test_parse_fractional_quantity() {
        let err = parse_line("South Africa,SC01,Nike Air Max,109.99,3.5").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumericField { field: "quantity", .. }));
    }

    #[test]
    fn test_parse_negative_quantity() {
        let err = parse_line("South Africa,SC01,Nike Air Max,109.99,-2").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumericField { field: "quantity", .. }));
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(&sample_record()), "South Africa,SC01,Nike Air Max,109.99,32");
    }

    #[test]
    fn test_format_whole_cost_keeps_fraction() {
        let mut record = sample_record();
        record.cost = 100.0;
        assert_eq!(format_line(&record), "South Africa,SC01,Nike Air Max,100.0,32");
    }

    #[test]
    fn test_padded_cost_is_normalized() {
        let record = parse_line("South Africa,SC01,Nike Air Max,100.00,32").unwrap();
        assert_eq!(format_line(&record), "South Africa,SC01,Nike Air Max,100.0,32");
    }

    #[test]
    fn test_write_header_and_record() {
        let mut buffer = Vec::new();
        write_header(&mut buffer).unwrap();
        write_one(&mut buffer, &sample_record()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, format!("{HEADER}\nSouth Africa,SC01,Nike Air Max,109.99,32\n"));
    }

    #[test]
    fn test_skip_header() {
        let mut reader = Cursor::new(format!("{HEADER}\nrest"));
        assert!(skip_header(&mut reader).unwrap());

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "rest");
    }

    #[test]
    fn test_skip_header_empty_source() {
        let mut reader = Cursor::new("");
        assert!(!skip_header(&mut reader).unwrap());
    }

    #[test]
    fn test_parse_long_line() {
        let product = "X".repeat(20_000);
        let record = parse_line(&format!("Vietnam,SC02,{product},10.0,4")).unwrap();
        assert_eq!(record.product.len(), 20_000);
        assert_eq!(record.quantity, 4);
    }

    #[test]
    fn test_padded_country_cannot_be_created() {
        // Строка обрезается при разборе, поэтому такая запись не пережила бы перечитывание
        let err = InventoryRecord::new(" Vietnam", "SC02", "Runner", 10.0, 4).unwrap_err();
        assert!(matches!(err, RecordError::InvalidTextField { field: "country", .. }));
    }

    proptest! {
        #[test]
        fn created_records_survive_format_and_parse(
            country in "[ ]{0,2}[A-Za-z][A-Za-z ]{0,19}",
            code in "[ ]{0,1}[A-Z0-9]{1,8}",
            product in "[A-Za-z0-9 ]{0,24}",
            cost in 0.0f64..100_000.0,
            quantity in 0..=i64::MAX,
        ) {
            match InventoryRecord::new(&country, &code, &product, cost, quantity) {
                Ok(record) => prop_assert_eq!(parse_line(&format_line(&record)).unwrap(), record),
                Err(_) => prop_assert!(
                    country.trim() != country || code.trim() != code || product.trim() != product
                ),
            }
        }

        #[test]
        fn format_then_parse_preserves_fields(
            country in "[A-Za-z]([A-Za-z ]{0,18}[A-Za-z])?",
            code in "[A-Z0-9]{1,8}",
            product in "([A-Za-z0-9]([A-Za-z0-9 ]{0,22}[A-Za-z0-9])?)?",
            cost in 0.0f64..100_000.0,
            quantity in any::<u64>(),
        ) {
            let record = InventoryRecord { country, code, product, cost, quantity };
            let decoded = parse_line(&format_line(&record)).unwrap();
            prop_assert_eq!(decoded, record);
        }
    }
}
