use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::BackendError;
use crate::movie::Movie;

const MENU: &str = "Command Options
#1. List movies with a minimum duration.
#2. List movies between two time thresholds.
#3. Exit app.
Select a command: ";

/// Console dialogue over any line-oriented input and output.
pub(crate) struct Frontend<R, W> {
    backend: Backend,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Frontend<R, W> {
    pub(crate) fn new(backend: Backend, input: R, output: W) -> Self {
        Self {
            backend,
            input,
            output,
        }
    }

    /// Greets the user, asks for a movie file, then serves commands until exit.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        self.greet()?;
        if self.file_loop()? {
            self.prompt_loop()?;
        }
        Ok(())
    }

    pub(crate) fn greet(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Movie Database App!")
    }

    /// Prompts for a path until a file loads. Returns `false` if input ends first.
    pub(crate) fn file_loop(&mut self) -> io::Result<bool> {
        loop {
            let Some(path) = self.prompt("Please enter a file path: ")? else {
                return Ok(false);
            };
            match self.backend.read_file(&path) {
                Ok(_) => return Ok(true),
                Err(BackendError::FileNotFound(_)) => {
                    writeln!(self.output, "Error: File not found. Please enter a valid file path.")?;
                }
                Err(error) => {
                    warn!(%path, %error, "failed to load movie file");
                    writeln!(self.output, "Error: Could not read {path}: {error}")?;
                }
            }
        }
    }

    /// Shows the command menu until the user exits or input ends.
    pub(crate) fn prompt_loop(&mut self) -> io::Result<()> {
        loop {
            let Some(command) = self.prompt(MENU)? else {
                return Ok(());
            };
            debug!(%command, "menu command");
            match command.as_str() {
                "1" => {
                    writeln!(self.output, "You selected: List movies with a minimum duration.\n")?;
                    let Some(min) = self.prompt_minutes("Please enter a minimum movie duration (minutes): ")? else {
                        return Ok(());
                    };
                    let movies = self.backend.movies_with_min_duration(min);
                    writeln!(self.output, "Movies with a minimum duration of {min} minutes:")?;
                    self.print_movies(&movies)?;
                }
                "2" => {
                    writeln!(self.output, "You selected: List movies between two time thresholds.\n")?;
                    let Some(lower) = self.prompt_minutes("Please enter a lower threshold (minutes): ")? else {
                        return Ok(());
                    };
                    let Some(upper) = self.prompt_minutes("Please enter an upper threshold (minutes): ")? else {
                        return Ok(());
                    };
                    if lower == upper {
                        writeln!(
                            self.output,
                            "Error: Thresholds cannot be the same value. Please enter a valid range."
                        )?;
                        continue;
                    }
                    let movies = self.backend.movies_within_range(lower, upper);
                    writeln!(self.output, "Movies between {lower} minutes and {upper} minutes:")?;
                    self.print_movies(&movies)?;
                }
                "3" => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Error: Invalid command. Please enter a valid numeric command.")?,
            }
        }
    }

    /// Prompts until a whole number is entered. `None` means input ended.
    fn prompt_minutes(&mut self, message: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(minutes) => return Ok(Some(minutes)),
                Err(_) => writeln!(self.output, "Error: Please enter a whole number of minutes.")?,
            }
        }
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn print_movies(&mut self, movies: &[Movie]) -> io::Result<()> {
        for movie in movies {
            writeln!(self.output, "{movie}")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MOVIES: &str = "\
,Title,Year,Genre,Duration,Country,Rating,Director
0,Brief,2001,Drama,80,Italy,6.1,A
1,Epic,1975,History,185,France,7.9,B
2,Standard,1999,Action,120,United States,8.7,C
";

    fn movie_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MOVIES.as_bytes()).unwrap();
        file
    }

    fn session(input: &str) -> String {
        let mut frontend = Frontend::new(Backend::new(), Cursor::new(input.to_owned()), Vec::new());
        frontend.run().unwrap();
        String::from_utf8(frontend.into_output()).unwrap()
    }

    #[test]
    fn retries_missing_file_then_lists() {
        let file = movie_file();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let input = format!("{}\n{}\n1\n100\n3\n", missing.display(), file.path().display());

        let output = session(&input);
        assert!(output.starts_with("Welcome to the Movie Database App!\nPlease enter a file path: "));
        assert_eq!(output.matches("Error: File not found. Please enter a valid file path.").count(), 1);
        assert!(output.contains("Movies with a minimum duration of 100 minutes:\nStandard 120\nEpic 185\n"));
        assert!(output.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn range_command() {
        let file = movie_file();
        let input = format!("{}\n2\n70\n130\n3\n", file.path().display());

        let output = session(&input);
        assert!(output.contains("Movies between 70 minutes and 130 minutes:\nBrief 80\nStandard 120\n"));
        assert!(!output.contains("Epic 185"));
    }

    #[test]
    fn equal_thresholds_rejected() {
        let file = movie_file();
        let input = format!("{}\n2\n80\n80\n3\n", file.path().display());

        let output = session(&input);
        assert!(output.contains("Error: Thresholds cannot be the same value. Please enter a valid range."));
        assert!(!output.contains("Movies between"));
        assert_eq!(output.matches("Select a command: ").count(), 2);
    }

    #[test]
    fn invalid_input_reprompts() {
        let file = movie_file();
        let input = format!("{}\n7\n1\nlong\n150\n", file.path().display());

        let output = session(&input);
        assert!(output.contains("Error: Invalid command. Please enter a valid numeric command."));
        assert!(output.contains("Error: Please enter a whole number of minutes."));
        assert!(output.contains("Movies with a minimum duration of 150 minutes:\nEpic 185\n"));
        // Input ended without `3`.
        assert!(!output.contains("Goodbye"));
    }

    #[test]
    fn end_of_input_at_file_prompt() {
        assert_eq!(session(""), "Welcome to the Movie Database App!\nPlease enter a file path: ");
    }
}
