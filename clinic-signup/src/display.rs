use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use crate::schedule::{format_full_date, Schedule};

/// Writes a schedule as plain text: each date with its volunteers, then the waitlist
pub fn render_schedule<W: Write>(out: &mut W, title: &str, schedule: &Schedule) -> io::Result<()> {
    writeln!(out, "** {} **", title)?;
    writeln!(out, "Up to {} volunteer(s) per date", schedule.capacity)?;

    for slot in &schedule.slots {
        writeln!(out)?;
        writeln!(
            out,
            "{} ({} signed up, {} assigned)",
            format_full_date(slot.date),
            slot.signup_count,
            slot.assigned_volunteers.len()
        )?;
        if slot.assigned_volunteers.is_empty() {
            writeln!(out, "  [EMPTY]")?;
        }
        for person in &slot.assigned_volunteers {
            writeln!(out, "  {}", person.label())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Waitlist ({})", schedule.waitlist.len())?;
    for person in &schedule.waitlist {
        writeln!(out, "  {} | {}", person.label(), person.formatted_dates())?;
    }

    Ok(())
}

/// Writes a schedule to a text file
pub fn write_schedule_to_file<P: AsRef<Path>>(
    title: &str,
    schedule: &Schedule,
    path: P,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    render_schedule(&mut file, title, schedule)
}

/// Prints a schedule in a readable format
pub fn print_schedule(title: &str, schedule: &Schedule) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_schedule(&mut handle, title, schedule)?;

    if !schedule.duplicate_identities.is_empty() {
        writeln!(handle)?;
        writeln!(
            handle,
            "⚠️  Emails used on more than one row ({}):",
            schedule.duplicate_identities.len()
        )?;
        for duplicate in &schedule.duplicate_identities {
            let rows: Vec<String> = duplicate.rows.iter().map(|r| r.to_string()).collect();
            writeln!(handle, "  - {} (rows {})", duplicate.email, rows.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capacity;
    use crate::schedule::date_utils::parse_date;
    use crate::schedule::{assemble_schedule, parse_date_list, DateSlot, Person};

    #[test]
    fn test_render_schedule() {
        let mut first = DateSlot::new(parse_date("6/2/16").unwrap());
        first.signup_count = 2;
        let ann_dates = parse_date_list("6/2/16").unwrap();
        first.assigned_volunteers.push(Person::new("Ann", "ann@x", ann_dates));
        let mut empty = DateSlot::new(parse_date("6/1/16").unwrap());
        empty.signup_count = 1;
        let ben_dates = parse_date_list("6/2/16, 6/10/16").unwrap();
        let waitlist = vec![Person::new("Ben", "ben@x", ben_dates)];

        let capacity = Capacity::new(1).unwrap();
        let schedule = assemble_schedule(capacity, vec![first, empty], waitlist, vec![]);
        let mut out = Vec::new();
        render_schedule(&mut out, "Summer Clinic", &schedule).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
** Summer Clinic **
Up to 1 volunteer(s) per date

6/1/16 (1 signed up, 0 assigned)
  [EMPTY]

6/2/16 (2 signed up, 1 assigned)
  Ann ann@x

Waitlist (1)
  Ben ben@x | 6/2, 6/10
";
        assert_eq!(text, expected);
    }
}
