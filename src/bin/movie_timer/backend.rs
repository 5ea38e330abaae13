use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use multikey_rbtree::MultiKeyRBTree;
use tracing::{debug, info, warn};

use crate::error::BackendError;
use crate::movie::{MinDuration, Movie};

/// Loads movie files into a tree keyed by duration and answers duration queries.
#[derive(Default)]
pub(crate) struct Backend {
    movies: MultiKeyRBTree<Movie>,
}

impl Backend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of movies loaded so far.
    pub(crate) fn len(&self) -> usize {
        self.movies.num_keys()
    }

    /// Reads the CSV file at `path`, adding every well-formed row.
    ///
    /// Returns the number of movies added.
    pub(crate) fn read_file(&mut self, path: impl AsRef<Path>) -> Result<usize, BackendError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => BackendError::FileNotFound(path.to_owned()),
            _ => BackendError::Io(error),
        })?;
        let added = self.read_from(file)?;
        info!(path = %path.display(), added, total = self.len(), "loaded movie file");
        Ok(added)
    }

    /// Reads CSV text from `reader`. The first line is a header. Malformed rows are logged and
    /// skipped; I/O failures abort the load.
    pub(crate) fn read_from<R: Read>(&mut self, reader: R) -> Result<usize, BackendError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut added = 0;
        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(error) if error.is_io_error() => return Err(error.into()),
                Err(error) => {
                    warn!(row = row + 1, %error, "skipping unreadable row");
                    continue;
                }
            };
            match Movie::from_record(&record) {
                Ok(movie) => {
                    debug!(
                        title = movie.title(),
                        year = movie.year(),
                        genre = movie.genre(),
                        country = movie.country(),
                        duration = movie.duration(),
                        "adding movie"
                    );
                    self.movies.insert_single_key(movie);
                    added += 1;
                }
                Err(error) => warn!(row = row + 1, %error, "skipping malformed row"),
            }
        }
        Ok(added)
    }

    /// All movies at least `min` minutes long, shortest first.
    pub(crate) fn movies_with_min_duration(&mut self, min: i64) -> Vec<Movie> {
        if min < 0 {
            return Vec::new();
        }
        let Ok(min) = i32::try_from(min) else {
            return Vec::new();
        };
        self.collect_from(min, i32::MAX)
    }

    /// All movies between `min` and `max` minutes long, inclusive, shortest first.
    pub(crate) fn movies_within_range(&mut self, min: i64, max: i64) -> Vec<Movie> {
        if max < 0 || min > max {
            return Vec::new();
        }
        if min < 0 {
            return Vec::new();
        }
        let Ok(min) = i32::try_from(min) else {
            return Vec::new();
        };
        self.collect_from(min, i32::try_from(max).unwrap_or(i32::MAX))
    }

    /// Durations are not validated on load, so negative ones stay in the tree but every query
    /// starts at zero or above.
    fn collect_from(&mut self, min: i32, max: i32) -> Vec<Movie> {
        self.movies.set_iteration_start_probe(MinDuration(min));
        let found = self
            .movies
            .iter()
            .take_while(|movie| movie.duration() <= max)
            .cloned()
            .collect();
        self.movies.clear_iteration_start_point();
        found
    }
}
