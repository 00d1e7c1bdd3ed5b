//! Customizing date and date-time text with `ConversionOptions`.
//!
//! Run with: cargo run --example custom_options

use chrono::{NaiveDate, NaiveDateTime};
use recmarshal::{marshal, marshal_with_options, record, unmarshal_with_options, ConversionOptions};
use std::error::Error;

record! {
    #[derive(Debug, PartialEq)]
    struct Event {
        name: String,
        day: NaiveDate,
        starts_at: NaiveDateTime => { json: "startsAt" },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let event = Event {
        name: "Launch".to_string(),
        day: NaiveDate::from_ymd_opt(2020, 6, 11).ok_or("invalid date")?,
        starts_at: NaiveDate::from_ymd_opt(2020, 6, 11)
            .and_then(|d| d.and_hms_opt(14, 32, 0))
            .ok_or("invalid date-time")?,
    };

    // Default patterns (%Y-%m-%d and %Y-%m-%dT%H:%M:%S)
    println!("Default patterns:");
    println!("{}\n", marshal(&event)?);

    // Human-readable patterns
    println!("Custom patterns:");
    let options = ConversionOptions::new()
        .with_date_pattern("%d/%m/%Y")
        .with_datetime_pattern("%d %b %Y %H:%M");
    let document = marshal_with_options(&event, &options)?;
    println!("{}\n", document);

    // Parsing uses the same patterns and is exact
    let back: Event = unmarshal_with_options(&document, &options)?;
    assert_eq!(back, event);
    println!("✓ Round-trip with custom patterns");

    let mismatched = ConversionOptions::new().with_date_pattern("%Y.%m.%d");
    if let Err(err) = unmarshal_with_options::<Event>(&document, &mismatched) {
        println!("Mismatched pattern: {}", err);
    }

    // Invalid patterns fail before any conversion
    let broken = ConversionOptions::new().with_datetime_pattern("%Y-%J");
    if let Err(err) = marshal_with_options(&event, &broken) {
        println!("Invalid pattern: {}", err);
    }

    Ok(())
}
