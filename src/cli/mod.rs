//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::OutputFormat;

/// gymlog - Log workout exercises from the terminal.
///
/// Exercises are numbered from 1 in list order; use those numbers with
/// show, edit and remove.
#[derive(Parser, Debug)]
#[command(name = "gymlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: plain, table, or json.
    #[arg(short, long, default_value = "plain", global = true)]
    pub format: String,

    /// Data directory (defaults to ~/.gymlog).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all logged exercises.
    List,

    /// Show one exercise in detail.
    Show {
        /// Exercise number from the list.
        number: usize,
    },

    /// Log a new exercise.
    #[command(subcommand)]
    Add(AddCommand),

    /// Change fields of an exercise, or delete it.
    Edit {
        /// Exercise number from the list.
        number: usize,

        #[command(flatten)]
        fields: FieldArgs,

        /// Delete the exercise instead of saving changes.
        #[arg(long, conflicts_with_all = ["name", "weight", "sets", "reps", "calories", "distance", "unit"])]
        delete: bool,
    },

    /// Remove an exercise.
    Remove {
        /// Exercise number from the list.
        number: usize,
    },

    /// Replace the whole log with the example exercises.
    Reset {
        /// Start from an empty log instead.
        #[arg(long)]
        empty: bool,
    },

    /// Print the stored form of every exercise.
    Export {
        /// Output file path (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change configuration.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Weight lifted over sets of reps.
    Resistance {
        /// Exercise name.
        name: String,
        /// Weight in kg.
        #[arg(short, long)]
        weight: String,
        /// Number of sets.
        #[arg(short, long)]
        sets: String,
        /// Reps per set.
        #[arg(short, long)]
        reps: String,
    },

    /// Calories burned.
    Calories {
        /// Exercise name.
        name: String,
        /// Calories (cals).
        #[arg(short, long)]
        calories: String,
    },

    /// Distance covered.
    Distance {
        /// Exercise name.
        name: String,
        /// Distance, in km unless a unit is given.
        #[arg(short, long)]
        distance: String,
        /// Distance unit (e.g. mi).
        #[arg(short, long, default_value = "")]
        unit: String,
    },
}

/// Field overrides for `edit`. Only fields of the exercise's type apply.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// New weight in kg.
    #[arg(long)]
    pub weight: Option<String>,
    /// New number of sets.
    #[arg(long)]
    pub sets: Option<String>,
    /// New reps per set.
    #[arg(long)]
    pub reps: Option<String>,
    /// New calories.
    #[arg(long)]
    pub calories: Option<String>,
    /// New distance.
    #[arg(long)]
    pub distance: Option<String>,
    /// New distance unit (empty to clear).
    #[arg(long)]
    pub unit: Option<String>,
}

impl FieldArgs {
    /// Provided overrides as `(field, value)` pairs.
    pub fn overrides(self) -> Vec<(&'static str, String)> {
        [
            ("name", self.name),
            ("weight", self.weight),
            ("sets", self.sets),
            ("reps", self.reps),
            ("calories", self.calories),
            ("distance", self.distance),
            ("unit", self.unit),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved configuration and paths.
    Show,
    /// Write a default config file if there is none.
    Init,
    /// Change settings and save them.
    Set {
        /// Key the exercise list is stored under.
        #[arg(long)]
        key: Option<String>,
        /// Whether a never-saved log starts with example exercises.
        #[arg(long)]
        seed_examples: Option<bool>,
    },
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_resistance() {
        let cli = Cli::parse_from([
            "gymlog", "add", "resistance", "Bicep curl", "-w", "15", "-s", "3", "-r", "10",
        ]);

        match cli.command {
            Commands::Add(AddCommand::Resistance {
                name,
                weight,
                sets,
                reps,
            }) => {
                assert_eq!(name, "Bicep curl");
                assert_eq!((weight.as_str(), sets.as_str(), reps.as_str()), ("15", "3", "10"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_edit_overrides_in_order() {
        let cli = Cli::parse_from(["gymlog", "edit", "2", "--unit", "mi", "--name", "Run"]);

        match cli.command {
            Commands::Edit { number, fields, delete } => {
                assert_eq!(number, 2);
                assert!(!delete);
                assert_eq!(
                    fields.overrides(),
                    vec![("name", "Run".to_string()), ("unit", "mi".to_string())]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_delete_conflicts_with_fields() {
        assert!(Cli::try_parse_from(["gymlog", "edit", "1", "--delete", "--name", "X"]).is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["gymlog", "list", "-f", "json"]);
        assert!(matches!(cli.output_format(), Ok(OutputFormat::Json)));
    }
}
