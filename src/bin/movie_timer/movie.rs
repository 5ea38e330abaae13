use std::cmp::Ordering;
use std::fmt;

use csv::StringRecord;
use multikey_rbtree::StartPoint;

use crate::error::RecordError;

const FIELD_COUNT: usize = 8;
const TITLE: usize = 1;
const YEAR: usize = 2;
const GENRE: usize = 3;
const DURATION: usize = 4;
const COUNTRY: usize = 5;

/// One row of the movie dataset.
///
/// Movies are ordered, and compare equal, by duration alone, so a tree of movies groups every
/// film of the same length under one key.
#[derive(Clone, Debug)]
pub(crate) struct Movie {
    title: String,
    genre: String,
    country: String,
    year: i32,
    duration: i32,
}

impl Movie {
    pub(crate) fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        country: impl Into<String>,
        year: i32,
        duration: i32,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            country: country.into(),
            year,
            duration,
        }
    }

    /// Builds a movie from a data row: `[1]` title, `[2]` year, `[3]` genre, `[4]` duration,
    /// `[5]` country. Any other column is ignored but the row must have exactly eight.
    pub(crate) fn from_record(record: &StringRecord) -> Result<Self, RecordError> {
        if record.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount {
                found: record.len(),
            });
        }
        let field = |index: usize| record.get(index).unwrap_or_default();

        Ok(Self::new(
            field(TITLE),
            field(GENRE),
            field(COUNTRY),
            parse(field(YEAR), "year")?,
            parse(field(DURATION), "duration")?,
        ))
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn genre(&self) -> &str {
        &self.genre
    }

    pub(crate) fn country(&self) -> &str {
        &self.country
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn duration(&self) -> i32 {
        self.duration
    }
}

fn parse(value: &str, field: &'static str) -> Result<i32, RecordError> {
    value.parse().map_err(|source| RecordError::InvalidNumber {
        field,
        value: value.to_owned(),
        source,
    })
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.duration == other.duration
    }
}

impl Eq for Movie {}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration.cmp(&other.duration)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.duration)
    }
}

/// Positions iteration at the first movie at least this many minutes long.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MinDuration(pub(crate) i32);

impl StartPoint<Movie> for MinDuration {
    fn compare(&self, movie: &Movie) -> Ordering {
        self.0.cmp(&movie.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_data_row() {
        let movie = Movie::from_record(&record(&[
            "0",
            "The Matrix",
            "1999",
            "Action, Sci-Fi",
            "136",
            "United States",
            "8.7",
            "Lana Wachowski",
        ]))
        .unwrap();

        assert_eq!(movie.title(), "The Matrix");
        assert_eq!(movie.genre(), "Action, Sci-Fi");
        assert_eq!(movie.country(), "United States");
        assert_eq!(movie.year(), 1999);
        assert_eq!(movie.duration(), 136);
        assert_eq!(movie.to_string(), "The Matrix 136");
    }

    #[test]
    fn keeps_negative_duration() {
        let movie =
            Movie::from_record(&record(&["7", "Rewind", "2020", "Drama", "-15", "Spain", "5.5", "E"])).unwrap();
        assert_eq!(movie.duration(), -15);
        assert_eq!(movie.to_string(), "Rewind -15");
        assert_eq!(MinDuration(0).compare(&movie), Ordering::Greater);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let error = Movie::from_record(&record(&["0", "Short", "2001", "Drama", "90"])).unwrap_err();
        assert!(matches!(error, RecordError::FieldCount { found: 5 }));
    }

    #[test]
    fn rejects_bad_numbers() {
        let error =
            Movie::from_record(&record(&["0", "Odd", "2001", "Drama", "long", "France", "", ""])).unwrap_err();
        assert!(matches!(error, RecordError::InvalidNumber { field: "duration", .. }));
        assert_eq!(error.to_string(), "invalid duration `long`");

        let error =
            Movie::from_record(&record(&["0", "Odd", "MMI", "Drama", "90", "France", "", ""])).unwrap_err();
        assert!(matches!(error, RecordError::InvalidNumber { field: "year", .. }));
    }

    #[test]
    fn ordered_by_duration_only() {
        let short = Movie::new("B", "Drama", "Italy", 1960, 80);
        let long = Movie::new("A", "Drama", "Italy", 1960, 200);
        let same = Movie::new("Z", "Comedy", "Japan", 2020, 80);

        assert!(short < long);
        assert_eq!(short, same);
        assert_eq!(MinDuration(80).compare(&short), Ordering::Equal);
        assert_eq!(MinDuration(81).compare(&short), Ordering::Greater);
        assert_eq!(MinDuration(81).compare(&long), Ordering::Less);
    }
}
