//! Value-level type detection.
//!
//! Every detector answers with a plain `bool`: a failed parse means "not
//! this type" and classification moves on to the next candidate, ending
//! at [`ColType::String`] which accepts anything.

use rust_decimal::Decimal;

use crate::{col_type::ColType, parser::ValueParser, value::RawValue};

#[derive(Debug, Clone, Default)]
pub struct ValueTypeClassifier {
    parser: ValueParser,
}

impl ValueTypeClassifier {
    pub fn new(parser: ValueParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &ValueParser {
        &self.parser
    }

    pub fn is_integer(&self, value: &RawValue) -> bool {
        match value {
            RawValue::Integer(_) => true,
            RawValue::Float(f) => float_is_integral(*f),
            RawValue::Text(s) => self.parser.get_long(s).is_ok(),
            _ => false,
        }
    }

    pub fn is_decimal(&self, value: &RawValue) -> bool {
        match value {
            RawValue::Integer(_) => true,
            RawValue::Float(f) => f.is_finite(),
            RawValue::Text(s) => self.parser.get_big_decimal(s).is_ok(),
            _ => false,
        }
    }

    pub fn is_date(&self, value: &RawValue) -> bool {
        match value {
            RawValue::Date(_) => true,
            RawValue::Text(s) => self.parser.parse_date(s).is_ok(),
            _ => false,
        }
    }

    pub fn is_timestamp(&self, value: &RawValue) -> bool {
        match value {
            RawValue::Timestamp(_) => true,
            RawValue::Text(s) => self.parser.parse_timestamp(s).is_ok(),
            _ => false,
        }
    }

    /// Validator for a single type; `String` accepts every value.
    pub fn matches(&self, ty: ColType, value: &RawValue) -> bool {
        match ty {
            ColType::Integer => self.is_integer(value),
            ColType::Decimal => self.is_decimal(value),
            ColType::Date => self.is_date(value),
            ColType::Timestamp => self.is_timestamp(value),
            ColType::String => true,
        }
    }

    /// First type in classification order whose validator accepts the value.
    pub fn classify(&self, value: &RawValue) -> ColType {
        ColType::CLASSIFICATION_ORDER
            .into_iter()
            .find(|ty| self.matches(*ty, value))
            .unwrap_or(ColType::String)
    }

    /// Decimal scale of the value when `ty` is `Decimal`, otherwise 0.
    /// Returns 0 when the scale cannot be determined.
    pub fn digits(&self, ty: ColType, value: &RawValue) -> u32 {
        if ty != ColType::Decimal {
            return 0;
        }
        let decimal = match value {
            RawValue::Text(s) => self.parser.get_big_decimal(s).ok(),
            RawValue::Float(f) => shortest_decimal(*f),
            _ => None,
        };
        decimal.map(|d| d.scale()).unwrap_or(0)
    }

    /// Digits left of the decimal point for numeric types, otherwise 0.
    /// A zero integer part counts as no digits.
    pub fn integer_digits(&self, ty: ColType, value: &RawValue) -> u32 {
        if !matches!(ty, ColType::Integer | ColType::Decimal) {
            return 0;
        }
        let decimal = match value {
            RawValue::Integer(i) => Some(Decimal::from(*i)),
            RawValue::Text(s) => self.parser.get_big_decimal(s).ok(),
            RawValue::Float(f) => shortest_decimal(*f),
            _ => None,
        };
        decimal.map(integer_part_digits).unwrap_or(0)
    }
}

fn integer_part_digits(value: Decimal) -> u32 {
    let whole = value.trunc().abs();
    if whole.is_zero() {
        0
    } else {
        whole.to_string().chars().filter(char::is_ascii_digit).count() as u32
    }
}

fn float_is_integral(value: f64) -> bool {
    value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
}

fn shortest_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let rendered = value.to_string();
    if rendered.contains(['e', 'E']) {
        Decimal::from_scientific(&rendered).ok()
    } else {
        rendered.parse::<Decimal>().ok()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn classifier() -> ValueTypeClassifier {
        ValueTypeClassifier::default()
    }

    #[test]
    fn classify_follows_precedence_order() {
        let c = classifier();
        assert_eq!(c.classify(&RawValue::text("42")), ColType::Integer);
        assert_eq!(c.classify(&RawValue::text("4.25")), ColType::Decimal);
        assert_eq!(
            c.classify(&RawValue::text("2024-01-02 10:00:00")),
            ColType::Timestamp
        );
        assert_eq!(c.classify(&RawValue::text("2024-01-02")), ColType::Date);
        assert_eq!(c.classify(&RawValue::text("apple")), ColType::String);
    }

    #[test]
    fn oversized_integers_fall_back_to_decimal() {
        let c = classifier();
        assert_eq!(
            c.classify(&RawValue::text("123456789012345678901")),
            ColType::Decimal
        );
    }

    #[test]
    fn integers_are_valid_decimals() {
        let c = classifier();
        assert!(c.is_decimal(&RawValue::text("7")));
        assert!(!c.is_integer(&RawValue::text("7.5")));
    }

    #[test]
    fn digits_only_apply_to_decimal() {
        let c = classifier();
        let value = RawValue::text("10.125");
        assert_eq!(c.digits(ColType::Decimal, &value), 3);
        assert_eq!(c.digits(ColType::String, &value), 0);
        assert_eq!(c.digits(ColType::Decimal, &RawValue::text("abc")), 0);
    }

    #[test]
    fn integer_digits_count_the_whole_part() {
        let c = classifier();
        assert_eq!(c.integer_digits(ColType::Decimal, &RawValue::text("1234567")), 7);
        assert_eq!(c.integer_digits(ColType::Decimal, &RawValue::text("-120.50")), 3);
        assert_eq!(c.integer_digits(ColType::Decimal, &RawValue::text("0.12345")), 0);
        assert_eq!(c.integer_digits(ColType::Integer, &RawValue::Integer(-42)), 2);
        assert_eq!(c.integer_digits(ColType::Decimal, &RawValue::Float(12.5)), 2);
        assert_eq!(c.integer_digits(ColType::String, &RawValue::text("123")), 0);
    }

    #[test]
    fn native_scalars_are_classified_by_kind() {
        let c = classifier();
        assert_eq!(c.classify(&RawValue::Integer(5)), ColType::Integer);
        assert_eq!(c.classify(&RawValue::Float(5.0)), ColType::Integer);
        assert_eq!(c.classify(&RawValue::Float(5.75)), ColType::Decimal);
        assert_eq!(c.digits(ColType::Decimal, &RawValue::Float(5.75)), 2);
        assert_eq!(c.classify(&RawValue::Boolean(true)), ColType::String);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(c.classify(&RawValue::Date(date)), ColType::Date);
        let ts = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(c.classify(&RawValue::Timestamp(ts)), ColType::Timestamp);
    }

    #[test]
    fn string_validator_accepts_everything() {
        let c = classifier();
        assert!(c.matches(ColType::String, &RawValue::Integer(1)));
        assert!(c.matches(ColType::String, &RawValue::text("x")));
    }
}
