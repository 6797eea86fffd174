//! Form input validation.
//!
//! Forms hold raw text exactly as typed. Validation checks every field,
//! collects one message per failing field and only then builds a record.

use crate::domain::{
    format_decimal, AppError, ExerciseKind, ExerciseRecord, ExerciseType, Result,
    ValidationErrors,
};

/// Raw field values of an exercise entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseForm {
    Resistance {
        name: String,
        weight: String,
        sets: String,
        reps: String,
    },
    Calories {
        name: String,
        calories: String,
    },
    Distance {
        name: String,
        distance: String,
        unit: String,
    },
}

impl ExerciseForm {
    /// A form prefilled with an existing record, for editing.
    #[must_use]
    pub fn from_record(record: &ExerciseRecord) -> Self {
        let name = record.name.clone();
        match &record.kind {
            ExerciseKind::Resistance { weight, sets, reps } => Self::Resistance {
                name,
                weight: format_decimal(*weight),
                sets: sets.to_string(),
                reps: reps.to_string(),
            },
            ExerciseKind::Calories { calories } => Self::Calories {
                name,
                calories: calories.to_string(),
            },
            ExerciseKind::Distance { distance, unit } => Self::Distance {
                name,
                distance: format_decimal(*distance),
                unit: unit.clone().unwrap_or_default(),
            },
        }
    }

    #[must_use]
    pub const fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::Resistance { .. } => ExerciseType::Resistance,
            Self::Calories { .. } => ExerciseType::Calories,
            Self::Distance { .. } => ExerciseType::Distance,
        }
    }

    /// Overwrites one field's text.
    ///
    /// # Errors
    /// Returns a validation error if this form has no such field.
    pub fn set(&mut self, field: &'static str, value: impl Into<String>) -> Result<()> {
        let exercise_type = self.exercise_type();
        let slot = match (self, field) {
            (
                Self::Resistance { name, .. }
                | Self::Calories { name, .. }
                | Self::Distance { name, .. },
                "name",
            ) => name,
            (Self::Resistance { weight, .. }, "weight") => weight,
            (Self::Resistance { sets, .. }, "sets") => sets,
            (Self::Resistance { reps, .. }, "reps") => reps,
            (Self::Calories { calories, .. }, "calories") => calories,
            (Self::Distance { distance, .. }, "distance") => distance,
            (Self::Distance { unit, .. }, "unit") => unit,
            _ => {
                let mut errors = ValidationErrors::default();
                errors.push(
                    field,
                    format!("{field} does not apply to {exercise_type} exercises."),
                );
                return Err(errors.into());
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Checks every field and builds the record.
    ///
    /// # Errors
    /// Returns `AppError::Validation` listing every failing field.
    pub fn validate(&self) -> Result<ExerciseRecord> {
        let mut errors = ValidationErrors::default();

        let record = match self {
            Self::Resistance {
                name,
                weight,
                sets,
                reps,
            } => {
                let name = check_name(name, &mut errors);
                let weight = check_decimal("weight", "Weight", weight, &mut errors);
                let sets = check_count("sets", "Number of sets", sets, &mut errors);
                let reps = check_count("reps", "Number of reps", reps, &mut errors);
                match (name, weight, sets, reps) {
                    (Some(name), Some(weight), Some(sets), Some(reps)) => {
                        Some(ExerciseRecord::resistance(name, weight, sets, reps))
                    }
                    _ => None,
                }
            }
            Self::Calories { name, calories } => {
                let name = check_name(name, &mut errors);
                let calories = check_calories(calories, &mut errors);
                match (name, calories) {
                    (Some(name), Some(calories)) => Some(ExerciseRecord::calories(name, calories)),
                    _ => None,
                }
            }
            Self::Distance {
                name,
                distance,
                unit,
            } => {
                let name = check_name(name, &mut errors);
                let distance = check_decimal("distance", "Distance", distance, &mut errors);
                let unit = check_unit(unit, &mut errors);
                match (name, distance, unit) {
                    (Some(name), Some(distance), Some(unit)) => {
                        Some(ExerciseRecord::distance(name, distance, unit))
                    }
                    _ => None,
                }
            }
        };

        match record {
            Some(record) if errors.is_empty() => Ok(record),
            _ => Err(AppError::Validation { errors }),
        }
    }
}

fn check_name(raw: &str, errors: &mut ValidationErrors) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        errors.push("name", "Name cannot be empty.");
        None
    } else if name.contains(',') {
        errors.push("name", "Name cannot contain commas.");
        None
    } else {
        Some(name.to_string())
    }
}

fn check_decimal(
    field: &'static str,
    label: &str,
    raw: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(field, format!("{label} cannot be empty."));
        return None;
    }

    match raw.parse::<f64>() {
        Ok(v) if !v.is_finite() => {
            errors.push(field, format!("{label} must be an integer or decimal."));
            None
        }
        Ok(v) if v < 0.0 => {
            errors.push(field, format!("{label} cannot be negative."));
            None
        }
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(field, format!("{label} must be an integer or decimal."));
            None
        }
    }
}

fn check_count(
    field: &'static str,
    label: &str,
    raw: &str,
    errors: &mut ValidationErrors,
) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(field, format!("{label} cannot be empty."));
        return None;
    }

    match raw.parse::<i64>() {
        Ok(v) if v < 1 => {
            errors.push(field, format!("{label} must be at least 1."));
            None
        }
        Ok(v) => u32::try_from(v).map_or_else(
            |_| {
                errors.push(field, format!("{label} is too large."));
                None
            },
            Some,
        ),
        Err(_) => {
            errors.push(field, format!("{label} must be a whole number."));
            None
        }
    }
}

fn check_calories(raw: &str, errors: &mut ValidationErrors) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push("calories", "Calories cannot be empty.");
        return None;
    }

    match raw.parse::<i64>() {
        Ok(v) if v < 0 => {
            errors.push("calories", "Calories cannot be negative.");
            None
        }
        Ok(v) => u32::try_from(v).map_or_else(
            |_| {
                errors.push("calories", "Calories is too large.");
                None
            },
            Some,
        ),
        Err(_) => {
            errors.push("calories", "Calories must be an integer.");
            None
        }
    }
}

/// Blank means "no unit"; the outer `Option` is `None` on failure.
fn check_unit(raw: &str, errors: &mut ValidationErrors) -> Option<Option<String>> {
    let unit = raw.trim();
    if unit.contains(',') {
        errors.push("unit", "Unit cannot contain commas.");
        None
    } else if unit.is_empty() {
        Some(None)
    } else {
        Some(Some(unit.to_string()))
    }
}
