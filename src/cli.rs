use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Current weather and favorite cities in your terminal.
#[derive(Debug, Parser)]
#[command(name = "weatherdeck", version)]
pub struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for saved favorites and unit preference
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// OpenWeatherMap API key (overrides config and OPENWEATHER_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one city, print it and exit
    Lookup {
        /// City name, e.g. "London" or "Paris,FR"
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_interactive() {
        let args = Args::try_parse_from(["weatherdeck"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_lookup_joins_words() {
        let args =
            Args::try_parse_from(["weatherdeck", "--api-key", "k", "lookup", "New", "York"]).unwrap();
        assert_eq!(args.api_key.as_deref(), Some("k"));
        let Some(Command::Lookup { city }) = args.command else {
            unreachable!("lookup subcommand should parse");
        };
        assert_eq!(city.join(" "), "New York");
    }

    #[test]
    fn test_lookup_requires_city() {
        assert!(Args::try_parse_from(["weatherdeck", "lookup"]).is_err());
    }
}
