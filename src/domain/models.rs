//! Domain models for logged exercises.
//!
//! An exercise is a name plus one of three closed shapes of measurement.

use std::fmt;

use serde::Serialize;

/// Unit assumed for distances logged without one.
pub const DEFAULT_DISTANCE_UNIT: &str = "km";

/// Stable identifier assigned by the store when a record enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Variant tag, as written in the persisted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseType {
    Resistance,
    Calories,
    Distance,
}

impl ExerciseType {
    /// Tag used in serialized records.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Resistance => "RESISTANCE",
            Self::Calories => "CALORIES",
            Self::Distance => "DISTANCE",
        }
    }

    /// Looks up a variant by its serialized tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "RESISTANCE" => Some(Self::Resistance),
            "CALORIES" => Some(Self::Calories),
            "DISTANCE" => Some(Self::Distance),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistance => write!(f, "Resistance"),
            Self::Calories => write!(f, "Calories"),
            Self::Distance => write!(f, "Distance"),
        }
    }
}

/// Measurement carried by an exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Weight lifted in kilograms over a number of sets.
    Resistance { weight: f64, sets: u32, reps: u32 },
    /// Energy burned.
    Calories { calories: u32 },
    /// Distance covered, in `unit` (kilometres when unset).
    Distance {
        distance: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
}

/// One logged exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseRecord {
    pub name: String,
    #[serde(flatten)]
    pub kind: ExerciseKind,
}

impl ExerciseRecord {
    #[must_use]
    pub fn resistance(name: impl Into<String>, weight: f64, sets: u32, reps: u32) -> Self {
        Self {
            name: name.into(),
            kind: ExerciseKind::Resistance { weight, sets, reps },
        }
    }

    #[must_use]
    pub fn calories(name: impl Into<String>, calories: u32) -> Self {
        Self {
            name: name.into(),
            kind: ExerciseKind::Calories { calories },
        }
    }

    #[must_use]
    pub fn distance(name: impl Into<String>, distance: f64, unit: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind: ExerciseKind::Distance { distance, unit },
        }
    }

    #[must_use]
    pub const fn exercise_type(&self) -> ExerciseType {
        match self.kind {
            ExerciseKind::Resistance { .. } => ExerciseType::Resistance,
            ExerciseKind::Calories { .. } => ExerciseType::Calories,
            ExerciseKind::Distance { .. } => ExerciseType::Distance,
        }
    }

    /// Short human-readable description of the measurement.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.kind {
            ExerciseKind::Resistance { weight, sets, reps } => {
                format!("{}kg | {sets} sets | {reps} reps", format_decimal(*weight))
            }
            ExerciseKind::Calories { calories } => format!("{calories} cals"),
            ExerciseKind::Distance { distance, unit } => format!(
                "{} {}",
                format_decimal(*distance),
                unit.as_deref().unwrap_or(DEFAULT_DISTANCE_UNIT)
            ),
        }
    }
}

/// A record together with the id the store knows it by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: RecordId,
    pub record: ExerciseRecord,
}

/// Records a fresh log starts out with.
#[must_use]
pub fn seed_records() -> Vec<ExerciseRecord> {
    vec![
        ExerciseRecord::resistance("Bicep curl", 15.0, 3, 10),
        ExerciseRecord::distance("Treadmill", 5.0, None),
        ExerciseRecord::calories("Rowing machine", 200),
    ]
}

/// Renders a decimal with at least one fractional digit (`15.0`, `2.5`).
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistance_summary() {
        let record = ExerciseRecord::resistance("Bicep curl", 15.0, 3, 10);
        assert_eq!(record.summary(), "15.0kg | 3 sets | 10 reps");
    }

    #[test]
    fn test_calories_summary() {
        let record = ExerciseRecord::calories("Rowing machine", 200);
        assert_eq!(record.summary(), "200 cals");
    }

    #[test]
    fn test_distance_summary_default_unit() {
        let record = ExerciseRecord::distance("Treadmill", 5.0, None);
        assert_eq!(record.summary(), "5.0 km");

        let record = ExerciseRecord::distance("Swim", 1.5, Some("mi".into()));
        assert_eq!(record.summary(), "1.5 mi");
    }

    #[test]
    fn test_exercise_type_tags() {
        for ty in [
            ExerciseType::Resistance,
            ExerciseType::Calories,
            ExerciseType::Distance,
        ] {
            assert_eq!(ExerciseType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ExerciseType::from_tag("resistance"), None);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(15.0), "15.0");
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(0.0), "0.0");
    }
}
