//! CLI argument definitions using clap.

use clap::Parser;
use nbexport::{ClassSelector, ReaderConfig};
use std::path::PathBuf;

/// nbexport: export a fitted Naive Bayes model to portable JSON
#[derive(Parser)]
#[command(name = "nbexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the fitted model blob
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Path to the training dataset description (ARFF, CSV/TSV or JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Output path for the JSON document
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Class attribute name (default: the declared class, else the last attribute)
    #[arg(long, conflicts_with = "class_index")]
    pub class_attribute: Option<String>,

    /// One-based position of the class attribute
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub class_index: Option<u32>,

    /// Delimiter for CSV/TSV descriptions (default: auto-detect)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The class selector requested on the command line.
    pub fn class_selector(&self) -> ClassSelector {
        match (&self.class_attribute, self.class_index) {
            (Some(name), _) => ClassSelector::Name(name.clone()),
            (None, Some(position)) => ClassSelector::Index(position as usize - 1),
            (None, None) => ClassSelector::Declared,
        }
    }

    /// Reader options for delimited descriptions.
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            delimiter: self.delimiter,
            ..ReaderConfig::default()
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "Invalid delimiter: {}. Use a single ASCII character or 'tab'.",
                    s
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["nbexport", "m.json", "d.arff", "out.json"]).unwrap();
        assert_eq!(cli.model, PathBuf::from("m.json"));
        assert_eq!(cli.schema, PathBuf::from("d.arff"));
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert_eq!(cli.class_selector(), ClassSelector::Declared);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(Cli::try_parse_from(["nbexport", "m.json", "d.arff"]).is_err());
        assert!(Cli::try_parse_from(["nbexport", "a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn test_class_options() {
        let cli = Cli::try_parse_from(["nbexport", "m", "d", "o", "--class-index", "1"]).unwrap();
        assert_eq!(cli.class_selector(), ClassSelector::Index(0));

        let cli =
            Cli::try_parse_from(["nbexport", "m", "d", "o", "--class-attribute", "play"]).unwrap();
        assert_eq!(cli.class_selector(), ClassSelector::Name("play".into()));

        assert!(Cli::try_parse_from(["nbexport", "m", "d", "o", "--class-index", "0"]).is_err());
        assert!(Cli::try_parse_from([
            "nbexport",
            "m",
            "d",
            "o",
            "--class-index",
            "1",
            "--class-attribute",
            "play"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
