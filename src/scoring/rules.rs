use chrono::{Datelike, NaiveDateTime, Timelike};
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::receipt::Item;

/// Layout of the combined purchase date and time
pub const PURCHASED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const ROUND_DOLLAR_POINTS: u64 = 50;
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub const ITEM_PAIR_POINTS: u64 = 5;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

/// Inclusive hour range of the afternoon window (14:00 through 16:59)
pub const AFTERNOON_HOURS: std::ops::RangeInclusive<u32> = 14..=16;

const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;

/// A receipt field that could not be parsed for scoring.
///
/// These never abort scoring. The rules that depend on the field contribute
/// zero and the engine logs the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("total '{0}' does not split into dollars and cents")]
    TotalShape(String),

    #[error("total '{total}' has a non-numeric part: {source}")]
    TotalNumber {
        total: String,
        #[source]
        source: ParseIntError,
    },

    #[error("price '{price}' is not a number: {source}")]
    Price {
        price: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("purchase time '{0}' is not zero-padded as YYYY-MM-DD HH:MM")]
    PurchasedAtPadding(String),

    #[error("purchase time '{value}' does not match YYYY-MM-DD HH:MM: {source}")]
    PurchasedAt {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// The scoring rules, in the order the engine evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RetailerName,
    RoundDollar,
    QuarterMultiple,
    ItemPairs,
    DescriptionLength,
    OddDay,
    AfternoonWindow,
}

impl Rule {
    pub fn label(&self) -> &'static str {
        match self {
            Rule::RetailerName => "Retailer name",
            Rule::RoundDollar => "Round dollar",
            Rule::QuarterMultiple => "Quarter multiple",
            Rule::ItemPairs => "Item pairs",
            Rule::DescriptionLength => "Description length",
            Rule::OddDay => "Odd day",
            Rule::AfternoonWindow => "Afternoon window",
        }
    }
}

/// Receipt total split at the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalAmount {
    pub dollars: i64,
    pub cents: i64,
}

impl TotalAmount {
    /// Split "D+.DD" into whole dollars and cents.
    ///
    /// Exactly one decimal point is required and both sides must parse as
    /// integers. The cents part is read as written ("1.5" has 5 cents).
    pub fn parse(total: &str) -> Result<Self, FieldError> {
        let (dollars, cents) = match total.split_once('.') {
            Some((d, c)) if !c.contains('.') => (d, c),
            _ => return Err(FieldError::TotalShape(total.to_string())),
        };

        let parse_part = |part: &str| {
            part.parse::<i64>().map_err(|source| FieldError::TotalNumber {
                total: total.to_string(),
                source,
            })
        };

        Ok(TotalAmount {
            dollars: parse_part(dollars)?,
            cents: parse_part(cents)?,
        })
    }
}

/// One point per letter (general category L*) or decimal digit (Nd) in the
/// retailer name. Other numbers, letter numbers and combining marks score
/// nothing.
pub fn retailer_points(retailer: &str) -> u64 {
    retailer
        .chars()
        .filter(|&c| is_letter_or_digit(c))
        .count() as u64
}

fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// 50 points when the total has no cents
pub fn round_dollar_points(total: &TotalAmount) -> u64 {
    if total.cents == 0 {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// 25 points when the cents are a multiple of 25.
///
/// A zero-cent total only counts when there is at least one dollar, so
/// "0.00" earns nothing here.
pub fn quarter_multiple_points(total: &TotalAmount) -> u64 {
    let quarter = total.cents != 0 && total.cents % 25 == 0;
    let whole_dollars = total.cents == 0 && total.dollars > 0;
    if quarter || whole_dollars {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// 5 points for every two items; an odd item out earns nothing
pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * ITEM_PAIR_POINTS
}

/// Points for an item whose trimmed description length is a multiple of 3.
///
/// Length is the UTF-8 byte length of the trimmed text. An empty or
/// whitespace-only description has length 0 and qualifies. The price is only
/// parsed for qualifying items, so a bad price on any other item is ignored.
pub fn description_points(item: &Item) -> Result<u64, FieldError> {
    let trimmed = item.short_description.trim();
    if trimmed.len() % 3 != 0 {
        return Ok(0);
    }

    let price: f64 = item
        .price
        .parse()
        .map_err(|source| FieldError::Price {
            price: item.price.clone(),
            source,
        })?;

    // NaN and negative prices floor to zero; the cast saturates.
    Ok((price * DESCRIPTION_PRICE_MULTIPLIER).ceil().max(0.0) as u64)
}

/// Parse "YYYY-MM-DD HH:MM" into a local (zone-less) timestamp.
///
/// Month, day and minute must be two digits; chrono alone would take
/// "2022-1-3". The hour may be one or two digits.
pub fn parse_purchased_at(value: &str) -> Result<NaiveDateTime, FieldError> {
    if !is_zero_padded(value) {
        return Err(FieldError::PurchasedAtPadding(value.to_string()));
    }

    NaiveDateTime::parse_from_str(value, PURCHASED_AT_FORMAT).map_err(|source| {
        FieldError::PurchasedAt {
            value: value.to_string(),
            source,
        }
    })
}

fn is_zero_padded(value: &str) -> bool {
    let Some((date, time)) = value.split_once(' ') else {
        return false;
    };
    let date = date.as_bytes();
    let date_ok = date.len() == 10 && date[4] == b'-' && date[7] == b'-';
    let minute_ok = time
        .split_once(':')
        .map_or(false, |(_, minute)| minute.len() == 2);
    date_ok && minute_ok
}

/// 6 points if the day of the month is odd
pub fn odd_day_points(purchased_at: &NaiveDateTime) -> u64 {
    if purchased_at.day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// 10 points if the purchase hour is 14, 15 or 16, whatever the minute
pub fn afternoon_points(purchased_at: &NaiveDateTime) -> u64 {
    if AFTERNOON_HOURS.contains(&purchased_at.hour()) {
        AFTERNOON_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retailer_counts_letters_and_digits() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("7-Eleven"), 7);
        assert_eq!(retailer_points("  &&  "), 0);
        assert_eq!(retailer_points(""), 0);
    }

    #[test]
    fn test_retailer_is_unicode_aware() {
        assert_eq!(retailer_points("Café"), 4);
        assert_eq!(retailer_points("東京 ストア"), 5);
    }

    #[test]
    fn test_retailer_ignores_non_decimal_numbers_and_marks() {
        // Vulgar fraction, superscript (No) and Roman numeral (Nl)
        assert_eq!(retailer_points("½²Ⅻ"), 0);
        // KA (Lo) followed by vowel sign I (Mc)
        assert_eq!(retailer_points("कि"), 1);
        // Non-ASCII decimal digits still count
        assert_eq!(retailer_points("٣٤"), 2);
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(
            TotalAmount::parse("35.35").unwrap(),
            TotalAmount { dollars: 35, cents: 35 }
        );
        assert_eq!(
            TotalAmount::parse("0.00").unwrap(),
            TotalAmount { dollars: 0, cents: 0 }
        );
    }

    #[test]
    fn test_parse_total_wrong_shape() {
        assert!(matches!(TotalAmount::parse("12"), Err(FieldError::TotalShape(_))));
        assert!(matches!(TotalAmount::parse("1.2.3"), Err(FieldError::TotalShape(_))));
    }

    #[test]
    fn test_parse_total_non_numeric() {
        assert!(matches!(
            TotalAmount::parse("ab.00"),
            Err(FieldError::TotalNumber { .. })
        ));
        assert!(matches!(
            TotalAmount::parse("12."),
            Err(FieldError::TotalNumber { .. })
        ));
    }

    #[test]
    fn test_round_dollar() {
        assert_eq!(round_dollar_points(&TotalAmount::parse("9.00").unwrap()), 50);
        assert_eq!(round_dollar_points(&TotalAmount::parse("0.00").unwrap()), 50);
        assert_eq!(round_dollar_points(&TotalAmount::parse("9.25").unwrap()), 0);
    }

    #[test]
    fn test_quarter_multiple() {
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("1.25").unwrap()), 25);
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("1.50").unwrap()), 25);
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("1.75").unwrap()), 25);
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("9.00").unwrap()), 25);
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("2.65").unwrap()), 0);
    }

    #[test]
    fn test_quarter_multiple_zero_total() {
        // No dollars and no cents: only the round-dollar rule applies
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("0.00").unwrap()), 0);
        assert_eq!(quarter_multiple_points(&TotalAmount::parse("0.25").unwrap()), 25);
    }

    #[test]
    fn test_item_pairs() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(2), 5);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_description_multiple_of_three() {
        // "Emils Cheese Pizza" is 18 bytes: ceil(12.25 * 0.2) = 3
        assert_eq!(description_points(&Item::new("Emils Cheese Pizza", "12.25")).unwrap(), 3);
        // Trimmed "Klarbrunn 12-PK 12 FL OZ" is 24 bytes: ceil(12.00 * 0.2) = 3
        assert_eq!(
            description_points(&Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")).unwrap(),
            3
        );
    }

    #[test]
    fn test_description_not_multiple_of_three() {
        assert_eq!(description_points(&Item::new("Gatorade", "2.25")).unwrap(), 0);
        // Price is never parsed when the length does not qualify
        assert_eq!(description_points(&Item::new("Gatorade", "free")).unwrap(), 0);
    }

    #[test]
    fn test_description_empty_qualifies() {
        assert_eq!(description_points(&Item::new("   ", "5.00")).unwrap(), 1);
        assert_eq!(description_points(&Item::new("", "0.00")).unwrap(), 0);
    }

    #[test]
    fn test_description_bad_price() {
        let result = description_points(&Item::new("Dasani", "n/a"));
        assert!(matches!(result, Err(FieldError::Price { .. })));
    }

    #[test]
    fn test_description_negative_price_floors_at_zero() {
        assert_eq!(description_points(&Item::new("abc", "-10.00")).unwrap(), 0);
    }

    #[test]
    fn test_parse_purchased_at() {
        let parsed = parse_purchased_at("2022-03-20 14:33").unwrap();
        assert_eq!(parsed.day(), 20);
        assert_eq!(parsed.hour(), 14);
        assert_eq!(parsed.minute(), 33);
    }

    #[test]
    fn test_parse_purchased_at_rejects_garbage() {
        assert!(parse_purchased_at("2022-13-01 10:00").is_err());
        assert!(parse_purchased_at("2022-01-01 25:00").is_err());
        assert!(parse_purchased_at("yesterday 10:00").is_err());
        assert!(parse_purchased_at("2022-01-01").is_err());
    }

    #[test]
    fn test_parse_purchased_at_requires_padded_fields() {
        assert!(matches!(
            parse_purchased_at("2022-1-3 14:00"),
            Err(FieldError::PurchasedAtPadding(_))
        ));
        assert!(parse_purchased_at("2022-01-3 14:00").is_err());
        assert!(parse_purchased_at("2022-01-03 14:5").is_err());
        // A one-digit hour is accepted
        assert_eq!(parse_purchased_at("2022-01-03 9:05").unwrap().hour(), 9);
    }

    #[test]
    fn test_odd_day() {
        assert_eq!(odd_day_points(&parse_purchased_at("2022-01-01 13:01").unwrap()), 6);
        assert_eq!(odd_day_points(&parse_purchased_at("2022-01-02 13:01").unwrap()), 0);
    }

    #[test]
    fn test_afternoon_window_is_hour_inclusive() {
        assert_eq!(afternoon_points(&parse_purchased_at("2022-01-02 13:59").unwrap()), 0);
        assert_eq!(afternoon_points(&parse_purchased_at("2022-01-02 14:00").unwrap()), 10);
        assert_eq!(afternoon_points(&parse_purchased_at("2022-01-02 15:30").unwrap()), 10);
        assert_eq!(afternoon_points(&parse_purchased_at("2022-01-02 16:45").unwrap()), 10);
        assert_eq!(afternoon_points(&parse_purchased_at("2022-01-02 17:00").unwrap()), 0);
    }
}
