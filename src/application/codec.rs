//! Flat string codec for exercise records.
//!
//! Persisted form: `name, TYPE, field1, field2, ...` joined by `", "`,
//! with a fixed field order per variant.

use crate::domain::{format_decimal, AppError, ExerciseKind, ExerciseRecord, ExerciseType, Result};

/// Separator between fields.
pub const DELIMITER: &str = ", ";

/// Renders a record in its persisted form.
#[must_use]
pub fn serialize(record: &ExerciseRecord) -> String {
    let mut fields = vec![
        record.name.clone(),
        record.exercise_type().tag().to_string(),
    ];

    match &record.kind {
        ExerciseKind::Resistance { weight, sets, reps } => {
            fields.push(format_decimal(*weight));
            fields.push(sets.to_string());
            fields.push(reps.to_string());
        }
        ExerciseKind::Calories { calories } => {
            fields.push(calories.to_string());
        }
        ExerciseKind::Distance { distance, unit } => {
            fields.push(format_decimal(*distance));
            if let Some(unit) = unit {
                fields.push(unit.clone());
            }
        }
    }

    fields.join(DELIMITER)
}

/// Parses a record from its persisted form.
///
/// # Errors
/// Returns `UnknownVariant` for an unrecognized type tag and `Parse` for
/// a wrong field count or an unparseable field.
pub fn deserialize(text: &str) -> Result<ExerciseRecord> {
    let fields: Vec<&str> = text.split(DELIMITER).collect();

    if fields.len() < 2 {
        return Err(AppError::parse(text, "expected at least a name and a type"));
    }

    let name = fields[0];
    if name.trim().is_empty() {
        return Err(AppError::parse(text, "name is empty"));
    }

    let tag = fields[1];
    let exercise_type = ExerciseType::from_tag(tag).ok_or_else(|| AppError::UnknownVariant {
        tag: tag.to_string(),
    })?;

    let values = &fields[2..];
    let kind = match exercise_type {
        ExerciseType::Resistance => parse_resistance(text, values)?,
        ExerciseType::Calories => parse_calories(text, values)?,
        ExerciseType::Distance => parse_distance(text, values)?,
    };

    Ok(ExerciseRecord {
        name: name.to_string(),
        kind,
    })
}

fn parse_resistance(text: &str, values: &[&str]) -> Result<ExerciseKind> {
    let [weight, sets, reps] = values else {
        return Err(field_count(text, "3", values.len()));
    };

    Ok(ExerciseKind::Resistance {
        weight: parse_decimal(text, "weight", weight)?,
        sets: parse_count(text, "sets", sets)?,
        reps: parse_count(text, "reps", reps)?,
    })
}

fn parse_calories(text: &str, values: &[&str]) -> Result<ExerciseKind> {
    let [calories] = values else {
        return Err(field_count(text, "1", values.len()));
    };

    Ok(ExerciseKind::Calories {
        calories: parse_count(text, "calories", calories)?,
    })
}

fn parse_distance(text: &str, values: &[&str]) -> Result<ExerciseKind> {
    let (distance, unit) = match values {
        [distance] => (distance, None),
        [distance, unit] if !unit.trim().is_empty() => (distance, Some((*unit).to_string())),
        _ => return Err(field_count(text, "1 or 2", values.len())),
    };

    Ok(ExerciseKind::Distance {
        distance: parse_decimal(text, "distance", distance)?,
        unit,
    })
}

fn field_count(text: &str, expected: &str, found: usize) -> AppError {
    AppError::parse(
        text,
        format!("expected {expected} value field(s), found {found}"),
    )
}

fn parse_decimal(text: &str, field: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(AppError::parse(
            text,
            format!("{field} '{value}' is not a non-negative number"),
        )),
    }
}

fn parse_count(text: &str, field: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        AppError::parse(
            text,
            format!("{field} '{value}' is not a non-negative integer"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_resistance() {
        let record = ExerciseRecord::resistance("Bicep curl", 15.0, 3, 10);
        assert_eq!(serialize(&record), "Bicep curl, RESISTANCE, 15.0, 3, 10");
    }

    #[test]
    fn test_serialize_calories_and_distance() {
        assert_eq!(
            serialize(&ExerciseRecord::calories("Rowing machine", 200)),
            "Rowing machine, CALORIES, 200"
        );
        assert_eq!(
            serialize(&ExerciseRecord::distance("Treadmill", 5.0, None)),
            "Treadmill, DISTANCE, 5.0"
        );
        assert_eq!(
            serialize(&ExerciseRecord::distance("Swim", 0.75, Some("mi".into()))),
            "Swim, DISTANCE, 0.75, mi"
        );
    }

    #[test]
    fn test_roundtrip_every_variant() {
        let records = [
            ExerciseRecord::resistance("Bicep curl", 15.0, 3, 10),
            ExerciseRecord::resistance("Deadlift", 102.5, 5, 1),
            ExerciseRecord::calories("Rowing machine", 0),
            ExerciseRecord::distance("Treadmill", 5.0, None),
            ExerciseRecord::distance("Swim", 0.75, Some("mi".into())),
            ExerciseRecord::resistance(" Leg press ", 1e16, u32::MAX, u32::MAX),
            ExerciseRecord::distance("Crawl", 1e-7, Some(" laps ".into())),
        ];

        for record in records {
            assert_eq!(deserialize(&serialize(&record)).unwrap(), record);
        }
    }

    #[test]
    fn test_deserialize_example() {
        let record = deserialize("Bicep curl, RESISTANCE, 15.0, 3, 10").unwrap();
        assert_eq!(record, ExerciseRecord::resistance("Bicep curl", 15.0, 3, 10));
    }

    #[test]
    fn test_unknown_variant() {
        let err = deserialize("X, UNKNOWN, 1").unwrap_err();
        assert!(matches!(err, AppError::UnknownVariant { ref tag } if tag == "UNKNOWN"));
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            deserialize("Bicep curl, RESISTANCE, 15.0, 3"),
            Err(AppError::Parse { .. })
        ));
        assert!(matches!(
            deserialize("Rowing, CALORIES, 200, 3"),
            Err(AppError::Parse { .. })
        ));
        assert!(matches!(
            deserialize("Treadmill, DISTANCE"),
            Err(AppError::Parse { .. })
        ));
        assert!(matches!(deserialize("Plank"), Err(AppError::Parse { .. })));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = deserialize("Bicep curl, RESISTANCE, heavy, 3, 10").unwrap_err();
        match err {
            AppError::Parse { message, .. } => assert!(message.contains("weight")),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            deserialize("Rowing, CALORIES, -5"),
            Err(AppError::Parse { .. })
        ));
        assert!(matches!(
            deserialize("Treadmill, DISTANCE, NaN"),
            Err(AppError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_name() {
        assert!(matches!(
            deserialize(", CALORIES, 200"),
            Err(AppError::Parse { .. })
        ));
    }

    mod properties {
        use proptest::prelude::*;

        use crate::application::codec::{deserialize, serialize};
        use crate::domain::{ExerciseKind, ExerciseRecord};

        /// Comma-free text with at least one non-blank character.
        fn arb_label(max: usize) -> impl Strategy<Value = String> {
            proptest::string::string_regex(&format!("[^,]{{0,{max}}}[^,\\s][^,]{{0,{max}}}"))
                .expect("valid regex")
        }

        fn arb_amount() -> impl Strategy<Value = f64> {
            prop_oneof![
                Just(0.0),
                Just(f64::MIN_POSITIVE),
                Just(f64::MAX),
                0.0f64..1e-6,
                0.0f64..1e6,
                1e15f64..f64::MAX,
            ]
        }

        fn arb_record() -> impl Strategy<Value = ExerciseRecord> {
            let kind = prop_oneof![
                (arb_amount(), any::<u32>(), any::<u32>())
                    .prop_map(|(weight, sets, reps)| ExerciseKind::Resistance { weight, sets, reps }),
                any::<u32>().prop_map(|calories| ExerciseKind::Calories { calories }),
                (arb_amount(), proptest::option::of(arb_label(6)))
                    .prop_map(|(distance, unit)| ExerciseKind::Distance { distance, unit }),
            ];

            (arb_label(20), kind).prop_map(|(name, kind)| ExerciseRecord { name, kind })
        }

        proptest! {
            #[test]
            fn roundtrip_any_valid_record(record in arb_record()) {
                let text = serialize(&record);
                prop_assert_eq!(deserialize(&text).unwrap(), record);
            }
        }
    }
}
