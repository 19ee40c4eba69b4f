use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::error::SignupError;
use crate::schedule::{parse_date_list, Person};

/// Everything read from one form-responses export
#[derive(Debug, Clone)]
pub struct Roster {
    pub people: Vec<Person>,
    /// Raw text of the first cell of the first data row, where the sheet keeps capacity
    pub capacity_cell: Option<String>,
}

/// Column positions for the fields we need
struct Columns {
    name: usize,
    email: usize,
    dates: usize,
}

/// Lowercase alphanumeric words of a header ("Dates Available" -> ["dates", "available"])
fn header_words(header: &str) -> Vec<String> {
    header
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl Columns {
    /// Finds columns by whole words in the header text, falling back to B, C and D
    ///
    /// Each column is claimed once, so "Candidate Name" can only ever be the name
    /// column and "Last updated" or "Username" match nothing.
    fn from_headers(headers: &StringRecord) -> Self {
        let words: Vec<Vec<String>> = headers.iter().map(header_words).collect();
        let mut claimed: Vec<usize> = Vec::new();

        let mut claim = |wanted: &[&str], fallback: usize| {
            let found = words.iter().enumerate().position(|(i, header)| {
                !claimed.contains(&i) && header.iter().any(|w| wanted.contains(&w.as_str()))
            });
            let column = match found {
                Some(column) => column,
                None if !claimed.contains(&fallback) => fallback,
                // Fallback already taken; pick the first column nobody claimed
                None => (0..).find(|i| !claimed.contains(i)).unwrap_or(fallback),
            };
            claimed.push(column);
            column
        };

        let email = claim(&["email", "mail"], 2);
        let dates = claim(&["date", "dates"], 3);
        let name = claim(&["name"], 1);
        Columns { name, email, dates }
    }
}

/// Loads a roster from a CSV file
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Roster, SignupError> {
    let file = File::open(csv_path.as_ref())?;
    info!(path = %csv_path.as_ref().display(), "loading roster");
    load_roster_from_reader(file)
}

/// Loads a roster from any CSV source
///
/// The first row is a header. Each later row is one person; a date that fails to
/// parse aborts the whole load with the offending row number.
pub fn load_roster_from_reader<R: Read>(source: R) -> Result<Roster, SignupError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers);

    let mut people = Vec::new();
    let mut capacity_cell = None;

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        if row == 1 {
            capacity_cell = record
                .get(0)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);
        }

        let name = record.get(columns.name).unwrap_or("");
        let email = record.get(columns.email).unwrap_or("");
        let dates = record.get(columns.dates).unwrap_or("");

        // Skip blank rows (the sheet often has trailing empties)
        if name.is_empty() && email.is_empty() && dates.is_empty() {
            debug!(row, "skipping blank row");
            continue;
        }

        let available_dates = parse_date_list(dates)
            .map_err(|source| SignupError::Row { row, source })?;

        people.push(Person::new(name, email, available_dates));
    }

    info!(people = people.len(), "roster loaded");
    Ok(Roster {
        people,
        capacity_cell,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::schedule::date_utils::parse_date;

    const FORM_EXPORT: &str = "\
Capacity,Name,Email Address,Dates Available
2,Ann Lee,ann@example.com,\"6/1/16, 6/2/16\"
,Ben Ray,ben@example.com,6/2/16
,,,
,Cat Poe,cat@example.com,\"6/3/16, 6/1/16, 6/3/16\"
";

    #[test]
    fn test_load_form_export() {
        let roster = load_roster_from_reader(FORM_EXPORT.as_bytes()).unwrap();
        assert_eq!(roster.capacity_cell.as_deref(), Some("2"));
        assert_eq!(roster.people.len(), 3);

        let ann = &roster.people[0];
        assert_eq!(ann.name, "Ann Lee");
        assert_eq!(ann.email, "ann@example.com");
        assert_eq!(
            ann.available_dates,
            vec![parse_date("6/1/16").unwrap(), parse_date("6/2/16").unwrap()]
        );
        // Repeated dates survive loading
        assert_eq!(roster.people[2].available_dates.len(), 3);
    }

    #[test]
    fn test_fallback_columns() {
        let csv = "A,B,C,D\n3,Dee,dee@x,7/4/16\n";
        let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(roster.capacity_cell.as_deref(), Some("3"));
        assert_eq!(roster.people[0].name, "Dee");
        assert_eq!(roster.people[0].email, "dee@x");
        assert_eq!(roster.people[0].available_dates, vec![parse_date("7/4/16").unwrap()]);
    }

    #[test]
    fn test_header_words_do_not_leak_into_other_columns() {
        let csv = "Capacity,Candidate Name,Email,Dates\n2,Ann,ann@x,6/1/16\n";
        let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(roster.people[0].name, "Ann");
        assert_eq!(roster.people[0].email, "ann@x");
        assert_eq!(roster.people[0].available_dates, vec![parse_date("6/1/16").unwrap()]);

        // Columns in another order, with lookalike headers around them
        let csv = "Last updated,Username,Available dates,Update email,Full name\n\
                   yesterday,ann1,6/2/16,ann@x,Ann\n";
        let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(roster.people[0].name, "Ann");
        assert_eq!(roster.people[0].email, "ann@x");
        assert_eq!(roster.people[0].available_dates, vec![parse_date("6/2/16").unwrap()]);
    }

    #[test]
    fn test_missing_capacity_cell() {
        let csv = "Capacity,Name,Email,Dates\n,Dee,dee@x,7/4/16\n";
        let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
        assert!(roster.capacity_cell.is_none());
    }

    #[test]
    fn test_bad_date_reports_row() {
        let csv = "Capacity,Name,Email,Dates\n2,Ann,ann@x,6/1/16\n,Ben,ben@x,\"6/2/16, 6/31/16\"\n";
        let err = load_roster_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            SignupError::Row { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(source, ParseError::Impossible { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
