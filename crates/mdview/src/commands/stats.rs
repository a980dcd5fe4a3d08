//! `mdview stats` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdview_renderer::Stats;

use super::{input_label, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stats command.
#[derive(Args)]
pub(crate) struct StatsArgs {
    /// Markdown file to analyze (default: stdin).
    input: Option<PathBuf>,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,
}

impl StatsArgs {
    /// Execute the stats command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = read_input(self.input.as_deref())?;
        let stats = mdview_renderer::stats(&markdown);

        let text = if self.json {
            serde_json::to_string_pretty(&stats)?
        } else {
            Output::new().highlight(&format!(
                "Statistics for {}",
                input_label(self.input.as_deref())
            ));
            format_table(&stats)
        };
        write_output(None, &text)
    }
}

/// Format statistics as aligned label/value lines.
fn format_table(stats: &Stats) -> String {
    [
        ("Characters", stats.characters),
        ("Words", stats.words),
        ("Lines", stats.lines),
        ("Paragraphs", stats.paragraphs),
    ]
    .into_iter()
    .map(|(label, value)| {
        let label = format!("{label}:");
        format!("{label:<11} {value}\n")
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_table() {
        let stats = mdview_renderer::stats("a b\nc");
        assert_eq!(
            format_table(&stats),
            "Characters: 5\nWords:      3\nLines:      2\nParagraphs: 1\n"
        );
    }

    #[test]
    fn test_json_output() {
        let stats = mdview_renderer::stats("one two");
        let json: serde_json::Value = serde_json::to_value(stats).unwrap();
        assert_eq!(json["words"], 2);
        assert_eq!(json["paragraphs"], 1);
        assert_eq!(json["characters"], 7);
        assert_eq!(json["lines"], 1);
    }
}
