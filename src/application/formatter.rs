//! Output formatting for the exercise list.
//!
//! Supports multiple output formats: plain list, table, and JSON.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{format_decimal, Entry, ExerciseKind, ExerciseRecord};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// One line per exercise, name then summary.
    #[default]
    Plain,
    /// Bordered table listing.
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "list" => Ok(Self::Plain),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: plain, table, json")),
        }
    }
}

/// JSON view of one list entry.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    index: usize,
    #[serde(flatten)]
    record: &'a ExerciseRecord,
    summary: String,
}

/// Formats entries in the requested format. `first_index` is the 1-based
/// position of the first entry in the full list.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_entries(
    entries: &[Entry],
    first_index: usize,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(format_entries_plain(entries, first_index)),
        OutputFormat::Table => Ok(format_entries_table(entries, first_index)),
        OutputFormat::Json => format_entries_json(entries, first_index),
    }
}

/// Formats entries as a numbered list.
pub fn format_entries_plain(entries: &[Entry], first_index: usize) -> String {
    if entries.is_empty() {
        return "No exercises logged.".dimmed().to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.record.name.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{:>3}. {:<width$}  {}",
                first_index + i,
                e.record.name.bold(),
                e.record.summary()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a table listing of entries.
pub fn format_entries_table(entries: &[Entry], first_index: usize) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Type", "Summary"]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            (first_index + i).to_string(),
            truncate(&e.record.name, 30),
            e.record.exercise_type().to_string(),
            e.record.summary(),
        ]);
    }

    table.to_string()
}

/// Formats entries as a JSON array.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_entries_json(
    entries: &[Entry],
    first_index: usize,
) -> Result<String, serde_json::Error> {
    let view: Vec<JsonEntry<'_>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| JsonEntry {
            index: first_index + i,
            record: &e.record,
            summary: e.record.summary(),
        })
        .collect();

    serde_json::to_string_pretty(&view)
}

/// Formats one exercise in detail, the way the edit view shows it.
pub fn format_record_detail(index: usize, record: &ExerciseRecord) -> String {
    let mut out = format!(
        "{} {}\n  Type: {}\n",
        format!("{index}.").dimmed(),
        record.name.bold(),
        record.exercise_type()
    );

    match &record.kind {
        ExerciseKind::Resistance { weight, sets, reps } => {
            out.push_str(&format!("  Weight (kg): {}\n", format_decimal(*weight)));
            out.push_str(&format!("  Number of sets: {sets}\n"));
            out.push_str(&format!("  Reps per set: {reps}\n"));
        }
        ExerciseKind::Calories { calories } => {
            out.push_str(&format!("  Calories: {calories}\n"));
        }
        ExerciseKind::Distance { distance, unit } => {
            out.push_str(&format!("  Distance: {}\n", format_decimal(*distance)));
            if let Some(unit) = unit {
                out.push_str(&format!("  Unit: {unit}\n"));
            }
        }
    }

    out.push_str(&format!("  Summary: {}", record.summary().cyan()));
    out
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed_records, RecordId};

    fn seed_entries() -> Vec<Entry> {
        seed_records()
            .into_iter()
            .enumerate()
            .map(|(i, record)| Entry {
                id: RecordId(i as u64 + 1),
                record,
            })
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!(
            "plain".parse::<OutputFormat>(),
            Ok(OutputFormat::Plain)
        ));
        assert!(matches!(
            "TABLE".parse::<OutputFormat>(),
            Ok(OutputFormat::Table)
        ));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_plain_lists_name_and_summary() {
        colored::control::set_override(false);
        let out = format_entries_plain(&seed_entries(), 1);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  1. Bicep curl"));
        assert!(lines[0].ends_with("15.0kg | 3 sets | 10 reps"));
        assert!(lines[2].ends_with("200 cals"));
    }

    #[test]
    fn test_json_shape() {
        let out = format_entries_json(&seed_entries(), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["index"], 1);
        assert_eq!(value[0]["name"], "Bicep curl");
        assert_eq!(value[0]["type"], "resistance");
        assert_eq!(value[0]["sets"], 3);
        assert_eq!(value[1]["summary"], "5.0 km");
        assert!(value[1].get("unit").is_none());
        assert_eq!(value[2]["calories"], 200);
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let out = format_entries_table(&seed_entries(), 1);
        assert!(out.contains("Summary"));
        assert!(out.contains("Rowing machine"));
        assert!(out.contains("Distance"));
    }
}
