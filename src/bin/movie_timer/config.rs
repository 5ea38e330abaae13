use std::path::PathBuf;

use clap::Parser;

/// Look up movies by running time.
#[derive(Debug, Parser)]
#[command(name = "movie_timer", version, about)]
pub(crate) struct Config {
    /// Movie CSV file to load instead of prompting for one.
    #[arg(long, env = "MOVIE_TIMER_FILE")]
    pub(crate) file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "MOVIE_TIMER_LOG", default_value = "warn")]
    pub(crate) log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Config::command().debug_assert();
    }

    #[test]
    fn parses_arguments() {
        let config = Config::try_parse_from(["movie_timer", "--file", "movies.csv", "--log-filter", "debug"]).unwrap();
        assert_eq!(config.file, Some(PathBuf::from("movies.csv")));
        assert_eq!(config.log_filter, "debug");
    }
}
