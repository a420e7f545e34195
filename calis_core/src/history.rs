//! Workout history export to CSV.
//!
//! One row is written per set, so a session with three muscle groups yields
//! twelve rows.

use crate::{Result, WorkoutSession};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    workout_type: &'static str,
    effort: &'static str,
    exercise: &'a str,
    set: u8,
    reps: Option<u32>,
    weight: Option<f64>,
}

/// Write every set of `sessions` as CSV, header first
///
/// Returns the number of data rows written.
pub fn export_csv<'a, I, W>(sessions: I, writer: W) -> Result<usize>
where
    I: IntoIterator<Item = &'a WorkoutSession>,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for session in sessions {
        let date = session.date.to_rfc3339();
        let effort = session.effort_rating.map(|e| e.label()).unwrap_or("");

        for set in &session.sets {
            writer.serialize(CsvRow {
                date: date.clone(),
                workout_type: session.workout_type.label(),
                effort,
                exercise: &set.exercise_name,
                set: set.set_number,
                reps: set.actual_reps,
                weight: set.weight,
            })?;
            rows += 1;
        }
    }

    // The csv crate only emits headers alongside the first record
    if rows == 0 {
        writer.write_record(["date", "workout_type", "effort", "exercise", "set", "reps", "weight"])?;
    }

    writer.flush()?;
    Ok(rows)
}

/// Export to a file, creating parent directories as needed
pub fn export_csv_to_path<'a, I>(sessions: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a WorkoutSession>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let rows = export_csv(sessions, std::io::BufWriter::new(file))?;
    tracing::info!("Exported {} set rows to {:?}", rows, path);
    Ok(rows)
}
