//! Classification of tree differences.
//!
//! Shape changes are schema changes. A value change is dynamic noise when
//! the candidate value looks generated (UUID, ULID, timestamp, epoch string)
//! or when both sides are integer epoch timestamps, and a data update
//! otherwise. The category is informational only.

use std::ops::Range;
use std::sync::LazyLock;

use regex::RegexSet;
use serde_json::Value;
use tandem_core::diff::DiffDetail;
use tandem_core::enums::DiffCategory;

const DYNAMIC_PATTERNS: [&str; 4] = [
    // UUID v1-v8
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-8][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    // ULID
    r"^[0-9A-HJKMNP-TV-Z]{26}$",
    // RFC 3339
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})$",
    // SQL-style datetime
    r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}(?:\.\d+)?$",
];

/// Epoch seconds from 2001-09-09 up to 2286-11-20.
const EPOCH_SECONDS: Range<u64> = 1_000_000_000..10_000_000_000;

/// The same span in epoch milliseconds.
const EPOCH_MILLIS: Range<u64> = 1_000_000_000_000..10_000_000_000_000;

static DYNAMIC: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(DYNAMIC_PATTERNS).expect("dynamic-value patterns are valid")
});

/// Category of a difference.
///
/// With `classify_noise` off, every value change is a data update.
#[must_use]
pub fn categorize(detail: &DiffDetail, classify_noise: bool) -> DiffCategory {
    match detail {
        _ if detail.is_structural() => DiffCategory::SchemaChange,
        DiffDetail::ValueMismatch { expected, actual }
            if classify_noise && looks_generated(expected, actual) =>
        {
            DiffCategory::DynamicNoise
        }
        _ => DiffCategory::DataUpdate,
    }
}

/// A changed number is noise only when both sides are epoch timestamps, so
/// large prices or ids stay data updates.
fn looks_generated(expected: &Value, actual: &Value) -> bool {
    match actual {
        Value::Number(_) => is_dynamic(expected) && is_dynamic(actual),
        _ => is_dynamic(actual),
    }
}

/// Whether a scalar looks like a generated identifier or a timestamp.
#[must_use]
pub fn is_dynamic(value: &Value) -> bool {
    match value {
        Value::String(s) => DYNAMIC.is_match(s) || looks_like_epoch(s),
        Value::Number(n) => n
            .as_u64()
            .is_some_and(|v| EPOCH_SECONDS.contains(&v) || EPOCH_MILLIS.contains(&v)),
        _ => false,
    }
}

/// 10 to 13 digit integers: epoch seconds through epoch milliseconds.
fn looks_like_epoch(s: &str) -> bool {
    (10..=13).contains(&s.len()) && s.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tandem_core::enums::NodeKind;

    #[test]
    fn patterns_compile() {
        assert_eq!(DYNAMIC.len(), DYNAMIC_PATTERNS.len());
    }

    #[rstest]
    #[case(json!("0b8e7a52-4bd2-4c11-9d8f-3e1c2f6a7b90"))]
    #[case(json!("01890a5d-ac96-774b-bcce-b302099a8057"))]
    #[case(json!("1ef21d2f-1207-6660-8c4f-419efbd44d48"))]
    #[case(json!("01HV3K4Z8Q9W7X6Y5T4R3E2W1Q"))]
    #[case(json!("2024-04-05T10:11:12Z"))]
    #[case(json!("2024-04-05T10:11:12.345+02:00"))]
    #[case(json!("2024-04-05 10:11:12"))]
    #[case(json!("1712345678"))]
    #[case(json!("1712345678901"))]
    #[case(json!(1_712_345_678))]
    #[case(json!(1_712_345_678_901_u64))]
    fn generated_values_are_dynamic(#[case] value: Value) {
        assert!(is_dynamic(&value), "{value}");
    }

    #[rstest]
    #[case(json!("completed"))]
    #[case(json!("2024-04-05"))]
    #[case(json!("123456789"))]
    #[case(json!("12345678901234"))]
    #[case(json!(42))]
    #[case(json!(1.5e9))]
    #[case(json!(25_000_000_000_u64))]
    #[case(json!("0b8e7a52-4bd2-9c11-9d8f-3e1c2f6a7b90"))]
    #[case(json!(true))]
    #[case(json!(null))]
    fn ordinary_values_are_not_dynamic(#[case] value: Value) {
        assert!(!is_dynamic(&value), "{value}");
    }

    #[test]
    fn structural_details_are_schema_changes() {
        let detail = DiffDetail::TypeMismatch {
            expected: NodeKind::String,
            actual: NodeKind::Number,
        };
        assert_eq!(categorize(&detail, true), DiffCategory::SchemaChange);

        let detail = DiffDetail::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(categorize(&detail, false), DiffCategory::SchemaChange);
    }

    #[test]
    fn classification_can_be_disabled() {
        let detail = DiffDetail::ValueMismatch {
            expected: json!("2024-01-01T00:00:00Z"),
            actual: json!("2024-04-05T10:11:12Z"),
        };
        assert_eq!(categorize(&detail, true), DiffCategory::DynamicNoise);
        assert_eq!(categorize(&detail, false), DiffCategory::DataUpdate);
    }

    #[test]
    fn large_numbers_are_noise_only_between_epochs() {
        let price = DiffDetail::ValueMismatch {
            expected: json!(12),
            actual: json!(2_500_000_000_u64),
        };
        assert_eq!(categorize(&price, true), DiffCategory::DataUpdate);

        let clock = DiffDetail::ValueMismatch {
            expected: json!(1_700_000_000),
            actual: json!(1_712_345_678),
        };
        assert_eq!(categorize(&clock, true), DiffCategory::DynamicNoise);
    }

    #[test]
    fn uuid_v7_change_is_noise() {
        let detail = DiffDetail::ValueMismatch {
            expected: json!("01890a5d-ac96-774b-bcce-b302099a8057"),
            actual: json!("01890a5e-0c12-7a3f-9d21-5f1e2c3b4a59"),
        };
        assert_eq!(categorize(&detail, true), DiffCategory::DynamicNoise);
    }
}
