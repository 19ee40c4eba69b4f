use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;

use crate::error::SignupError;
use crate::schedule::{format_full_date, Schedule};

/// Writes a schedule laid out like the "Clinic Schedule" sheet
///
/// Title row, a "Dates" row with one column per date and the volunteers listed
/// beneath each date, then a "Waitlist" / "Dates Available" section.
pub fn write_schedule_csv<W: Write>(
    writer: W,
    title: &str,
    schedule: &Schedule,
) -> Result<(), SignupError> {
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    wtr.write_record([title])?;
    wtr.write_record([""])?;

    let mut header = vec!["Dates".to_string()];
    header.extend(schedule.slots.iter().map(|s| format_full_date(s.date)));
    wtr.write_record(&header)?;

    let deepest = schedule
        .slots
        .iter()
        .map(|s| s.assigned_volunteers.len())
        .max()
        .unwrap_or(0);
    for row in 0..deepest {
        let mut record = vec![String::new()];
        record.extend(schedule.slots.iter().map(|s| {
            s.assigned_volunteers
                .get(row)
                .map(|p| p.label())
                .unwrap_or_default()
        }));
        wtr.write_record(&record)?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["Waitlist", "Dates Available"])?;
    for person in &schedule.waitlist {
        wtr.write_record([person.label(), person.formatted_dates()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a schedule to a CSV file, replacing any previous export
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    title: &str,
    schedule: &Schedule,
) -> Result<(), SignupError> {
    let file = std::fs::File::create(path)?;
    write_schedule_csv(file, title, schedule)
}
