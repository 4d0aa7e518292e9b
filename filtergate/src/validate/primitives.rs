//! Default primitive value checks, one per field type, substitutable at
//! schema build time.

use crate::schema::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// A pure per-type literal check: `(literal) -> bool`.
///
/// Plain function pointers keep the compiled schema `Copy`-cheap, `Send`,
/// and `Sync`.
pub type PrimitiveCheck = fn(&Value) -> bool;

/// The four per-type checks consulted while validating bare literals and
/// operator operands. Defaults cover JSON strings/numbers/booleans and
/// ISO-8601 date strings; any check can be substituted via
/// [`SchemaBuilder::primitive`](crate::SchemaBuilder::primitive).
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveChecks {
    string: PrimitiveCheck,
    number: PrimitiveCheck,
    boolean: PrimitiveCheck,
    date: PrimitiveCheck,
}

impl PrimitiveChecks {
    /// Create the default per-type checks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            string: is_string,
            number: is_number,
            boolean: is_boolean,
            date: is_date,
        }
    }

    pub(crate) const fn set(&mut self, field_type: FieldType, check: PrimitiveCheck) {
        match field_type {
            FieldType::String => self.string = check,
            FieldType::Number => self.number = check,
            FieldType::Boolean => self.boolean = check,
            FieldType::Date => self.date = check,
        }
    }

    /// Run the check registered for `field_type` against a literal.
    #[must_use]
    pub fn check(&self, field_type: FieldType, value: &Value) -> bool {
        let check = match field_type {
            FieldType::String => self.string,
            FieldType::Number => self.number,
            FieldType::Boolean => self.boolean,
            FieldType::Date => self.date,
        };
        check(value)
    }
}

impl Default for PrimitiveChecks {
    fn default() -> Self {
        Self::new()
    }
}

/// Default string check: any JSON string.
#[must_use]
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Default number check: any JSON number, integer or float.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// Default boolean check: any JSON boolean.
#[must_use]
pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// Default date check: a string in one of the accepted ISO-8601 forms.
///
/// Accepted: full date-times with an offset (`2024-01-15T10:00:00Z`,
/// `2024-01-15T10:00:00+02:00`), offset-less "local" date-times
/// (`2024-01-15T10:00:00`, fractional seconds allowed), and date-only
/// strings (`2024-01-15`). JSON has no native date values, so the check is
/// string-based.
#[must_use]
pub fn is_date(value: &Value) -> bool {
    value.as_str().is_some_and(is_date_string)
}

fn is_date_string(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_check() {
        assert!(is_string(&json!("hello")));
        assert!(!is_string(&json!(42)));
        assert!(!is_string(&json!(null)));
    }

    #[test]
    fn test_number_check() {
        assert!(is_number(&json!(42)));
        assert!(is_number(&json!(-1)));
        assert!(is_number(&json!(2.5)));
        assert!(!is_number(&json!("42")));
        assert!(!is_number(&json!(true)));
    }

    #[test]
    fn test_boolean_check() {
        assert!(is_boolean(&json!(true)));
        assert!(is_boolean(&json!(false)));
        assert!(!is_boolean(&json!(0)));
        assert!(!is_boolean(&json!("true")));
    }

    #[test]
    fn test_date_accepts_offset_forms() {
        assert!(is_date(&json!("2024-01-15T10:00:00Z")));
        assert!(is_date(&json!("2024-01-15T10:00:00+02:00")));
        assert!(is_date(&json!("2024-01-15T10:00:00.123-05:00")));
    }

    #[test]
    fn test_date_accepts_local_form() {
        assert!(is_date(&json!("2024-01-15T10:00:00")));
        assert!(is_date(&json!("2024-01-15T10:00:00.5")));
    }

    #[test]
    fn test_date_accepts_date_only() {
        assert!(is_date(&json!("2024-01-15")));
        assert!(is_date(&json!("1970-01-01")));
    }

    #[test]
    fn test_date_rejects_malformed() {
        assert!(!is_date(&json!("not a date")));
        assert!(!is_date(&json!("2024-13-45")));
        assert!(!is_date(&json!("2024-01-15T99:00:00Z")));
        assert!(!is_date(&json!("15/01/2024")));
        assert!(!is_date(&json!(1_705_312_800)));
        assert!(!is_date(&json!(null)));
    }

    #[test]
    fn test_dispatch_by_type() {
        let checks = PrimitiveChecks::new();
        assert!(checks.check(FieldType::String, &json!("x")));
        assert!(checks.check(FieldType::Number, &json!(1)));
        assert!(checks.check(FieldType::Boolean, &json!(true)));
        assert!(checks.check(FieldType::Date, &json!("2024-01-15")));
        assert!(!checks.check(FieldType::Date, &json!("x")));
    }

    #[test]
    fn test_substituted_check() {
        // A stricter number check: non-negative integers only
        fn non_negative_int(value: &Value) -> bool {
            value.as_u64().is_some()
        }

        let mut checks = PrimitiveChecks::new();
        checks.set(FieldType::Number, non_negative_int);
        assert!(checks.check(FieldType::Number, &json!(3)));
        assert!(!checks.check(FieldType::Number, &json!(-3)));
        assert!(!checks.check(FieldType::Number, &json!(2.5)));
    }
}
