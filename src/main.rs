//! gymlog - Log workout exercises from the terminal.
//!
//! Exercises come in three kinds (resistance, calories, distance) and are
//! kept in a local preferences database, one delimited string per exercise.
//!
//! Quick start:
//!   gymlog list                                   # Numbered list
//!   gymlog add resistance "Bench" -w 60 -s 3 -r 8 # Log an exercise
//!   gymlog edit 1 --weight 62.5                   # Change a field
//!   gymlog edit 1 --delete                        # Delete from the edit view
//!   gymlog export -o backup.txt                   # Raw stored lines

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_entries, format_record_detail, ExerciseForm, Journal, OutputFormat};
use cli::{AddCommand, Cli, Commands, ConfigAction, FieldArgs};
use domain::{seed_records, AppConfig, AppError, Entry, RecordId};
use infrastructure::{ensure_config_exists, load_config, save_config, SqlitePreferences};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;
    let config = load_config(cli.data_dir.as_deref())?;

    let command = match cli.command {
        Commands::Config { action } => return cmd_config(config, action),
        command => command,
    };

    let mut journal = open_journal(&config)?;

    match command {
        Commands::List => cmd_list(&journal, format)?,
        Commands::Show { number } => cmd_show(&journal, number, format)?,
        Commands::Add(add) => cmd_add(&mut journal, add)?,
        Commands::Edit {
            number,
            fields,
            delete,
        } => cmd_edit(&mut journal, number, fields, delete)?,
        Commands::Remove { number } => cmd_remove(&mut journal, number)?,
        Commands::Reset { empty } => cmd_reset(&mut journal, empty)?,
        Commands::Export { output } => cmd_export(&journal, output.as_deref())?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

type SqliteJournal = Journal<SqlitePreferences>;

/// Opens the journal from the configured preferences database.
fn open_journal(config: &AppConfig) -> domain::Result<SqliteJournal> {
    let storage = SqlitePreferences::open(&config.preferences_db_path())?;
    let (mut journal, report) =
        Journal::open(storage, config.storage.key.clone(), config.storage.seed_examples)?;

    if report.skipped > 0 {
        eprintln!(
            "{} skipped {} unreadable stored exercise(s); run with -v for details",
            "Warning:".yellow().bold(),
            report.skipped
        );
    }

    journal.subscribe(|entries| {
        tracing::debug!(count = entries.len(), "Exercise list changed");
    });

    Ok(journal)
}

/// Converts a 1-based list number to an index.
fn index_of(journal: &SqliteJournal, number: usize) -> domain::Result<usize> {
    let len = journal.store().len();
    if number == 0 || number > len {
        return Err(AppError::InvalidNumber { number, len });
    }
    Ok(number - 1)
}

/// Looks up an entry by its 1-based list number.
fn entry_at(journal: &SqliteJournal, number: usize) -> domain::Result<&Entry> {
    let len = journal.store().len();
    index_of(journal, number)
        .and_then(|index| journal.store().get(index).ok_or(AppError::InvalidNumber { number, len }))
}

/// List exercises command.
fn cmd_list(journal: &SqliteJournal, format: OutputFormat) -> domain::Result<()> {
    let output =
        format_entries(journal.store().entries(), 1, format).map_err(AppError::json_format)?;
    println!("{output}");
    Ok(())
}

/// Show a single exercise.
fn cmd_show(journal: &SqliteJournal, number: usize, format: OutputFormat) -> domain::Result<()> {
    let entry = entry_at(journal, number)?;

    let output = match format {
        OutputFormat::Plain => format_record_detail(number, &entry.record),
        other => format_entries(std::slice::from_ref(entry), number, other)
            .map_err(AppError::json_format)?,
    };

    println!("{output}");
    Ok(())
}

/// Log a new exercise.
fn cmd_add(journal: &mut SqliteJournal, add: AddCommand) -> domain::Result<()> {
    let form = match add {
        AddCommand::Resistance {
            name,
            weight,
            sets,
            reps,
        } => ExerciseForm::Resistance {
            name,
            weight,
            sets,
            reps,
        },
        AddCommand::Calories { name, calories } => ExerciseForm::Calories { name, calories },
        AddCommand::Distance {
            name,
            distance,
            unit,
        } => ExerciseForm::Distance {
            name,
            distance,
            unit,
        },
    };

    let record = form.validate()?;
    let summary = format!("{}  {}", record.name, record.summary());
    journal.add(record)?;

    println!(
        "{} Added {}. {}",
        "✓".green().bold(),
        journal.store().len(),
        summary
    );
    Ok(())
}

/// Edit or delete an exercise, going through the selected-exercise slot.
fn cmd_edit(
    journal: &mut SqliteJournal,
    number: usize,
    fields: FieldArgs,
    delete: bool,
) -> domain::Result<()> {
    let id = entry_at(journal, number)?.id;
    journal.select(id)?;

    let result = edit_selected(journal, id, number, fields, delete);
    journal.clear_selection();
    result
}

fn edit_selected(
    journal: &mut SqliteJournal,
    id: RecordId,
    number: usize,
    fields: FieldArgs,
    delete: bool,
) -> domain::Result<()> {
    let record = journal
        .store()
        .selected()
        .map(|entry| entry.record.clone())
        .ok_or(AppError::RecordNotFound { id })?;

    if delete {
        journal.remove_by_id(id)?;
        println!("{} Deleted {}", "✓".green().bold(), record.name);
        return Ok(());
    }

    let overrides = fields.overrides();
    if overrides.is_empty() {
        println!("{}", format_record_detail(number, &record));
        println!("{}", "Nothing to change; pass --<field> <value> to edit.".dimmed());
        return Ok(());
    }

    let mut form = ExerciseForm::from_record(&record);
    for (field, value) in overrides {
        form.set(field, value)?;
    }
    let updated = form.validate()?;

    if updated == record {
        println!("{}", "No changes.".dimmed());
        return Ok(());
    }

    journal.update(id, updated)?;
    if let Some(entry) = journal.store().find(id) {
        println!(
            "{} Saved {}. {}  {}",
            "✓".green().bold(),
            number,
            entry.record.name,
            entry.record.summary()
        );
    }
    Ok(())
}

/// Remove an exercise by list number.
fn cmd_remove(journal: &mut SqliteJournal, number: usize) -> domain::Result<()> {
    let index = index_of(journal, number)?;
    let entry = journal.remove(index)?;
    println!("{} Removed {}", "✓".green().bold(), entry.record.name);
    Ok(())
}

/// Replace the log with seed data (or nothing).
fn cmd_reset(journal: &mut SqliteJournal, empty: bool) -> domain::Result<()> {
    let records = if empty { Vec::new() } else { seed_records() };
    journal.replace_all(records)?;
    println!(
        "{} Log reset ({} exercise(s))",
        "✓".green().bold(),
        journal.store().len()
    );
    Ok(())
}

/// Write stored lines to a file or stdout.
fn cmd_export(journal: &SqliteJournal, output: Option<&Path>) -> domain::Result<()> {
    let lines = journal.export_lines();
    let mut content = lines.join("\n");
    content.push('\n');

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(|e| {
                AppError::io(format!("Failed to create {}", path.display()), e)
            })?;
            file.write_all(content.as_bytes())
                .map_err(|e| AppError::io("Failed to write file", e))?;
            println!(
                "{} Exported {} exercise(s) to {}",
                "✓".green().bold(),
                lines.len(),
                path.display()
            );
        }
        None => print!("{content}"),
    }

    Ok(())
}

/// Configuration command.
fn cmd_config(mut config: AppConfig, action: Option<ConfigAction>) -> domain::Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            println!("{}", "⚙ Configuration".bold());
            println!("  Data dir:      {}", config.data_dir().display());
            println!("  Config file:   {}", config.config_file_path().display());
            println!("  Preferences:   {}", config.preferences_db_path().display());
            println!("  Storage key:   {}", config.storage.key.cyan());
            println!("  Seed examples: {}", config.storage.seed_examples);
        }
        ConfigAction::Init => {
            let path = ensure_config_exists(&config)?;
            println!("{} Config at {}", "✓".green().bold(), path.display());
        }
        ConfigAction::Set { key, seed_examples } => {
            if let Some(key) = key {
                if key.trim().is_empty() {
                    return Err(AppError::Config {
                        message: "Storage key cannot be empty".into(),
                    });
                }
                config.storage.key = key;
            }
            if let Some(seed) = seed_examples {
                config.storage.seed_examples = seed;
            }
            save_config(&config)?;
            println!(
                "{} Saved {}",
                "✓".green().bold(),
                config.config_file_path().display()
            );
        }
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
