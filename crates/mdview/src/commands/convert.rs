//! `mdview convert` command implementation.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use mdview_config::{CliSettings, Config};
use mdview_renderer::{Converter, DocumentMeta};

use super::{input_label, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (default: stdin).
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Produce a standalone HTML document.
    #[arg(long)]
    full: bool,

    /// Document title for --full (overrides config).
    #[arg(long, requires = "full")]
    title: Option<String>,

    /// Skip the table of contents.
    #[arg(long)]
    no_toc: bool,

    /// Skip code highlighting.
    #[arg(long)]
    no_highlight: bool,

    /// Path to configuration file (default: auto-discover mdview.toml).
    #[arg(short, long, env = "MDVIEW_CONFIG")]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Build CLI settings from args.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            table_of_contents: self.no_toc.then_some(false),
            highlight: self.no_highlight.then_some(false),
            title: self.title.clone(),
            lang: None,
        }
    }

    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// conversion fails or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(self.input.as_deref())?;
        let converter = build_converter(&config);

        let start = Instant::now();
        let html = if self.full {
            let meta = document_meta(&config, chrono::Local::now().naive_local());
            converter.try_convert_full(&markdown, &meta)?
        } else {
            converter.try_convert(&markdown)?
        };
        tracing::info!(
            input = %input_label(self.input.as_deref()),
            bytes = html.len(),
            elapsed = ?start.elapsed(),
            "Converted markdown"
        );

        write_output(self.output.as_deref(), &html)?;
        if let Some(path) = &self.output {
            output.info(&format!("Source: {}", input_label(self.input.as_deref())));
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Create a converter from the render configuration.
fn build_converter(config: &Config) -> Converter {
    Converter::new()
        .with_table_of_contents(config.render.table_of_contents)
        .with_highlighting(config.render.highlight)
        .with_max_input_bytes(config.render.max_input_bytes)
}

/// Create document metadata from the document configuration.
fn document_meta(config: &Config, generated_at: chrono::NaiveDateTime) -> DocumentMeta {
    DocumentMeta::new(generated_at)
        .with_title(config.document.title.as_str())
        .with_lang(config.document.lang.as_str())
        .with_timestamp_format(config.document.timestamp_format.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    fn parse(args: &[&str]) -> ConvertArgs {
        let argv = std::iter::once("convert").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = parse(&["doc.md", "--no-toc", "--full", "--title", "Guide"]);
        let settings = args.cli_settings();
        assert_eq!(settings.table_of_contents, Some(false));
        assert_eq!(settings.highlight, None);
        assert_eq!(settings.title.as_deref(), Some("Guide"));
    }

    #[test]
    fn test_title_requires_full() {
        let argv = ["convert", "--title", "Guide"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_converter_follows_config() {
        let mut config = Config::default();
        config.render.table_of_contents = false;
        config.render.max_input_bytes = 8;

        let converter = build_converter(&config);
        assert_eq!(converter.convert("# A"), "<h1 id=\"a\">A</h1>");
        assert!(converter.try_convert("# A long line").is_err());
    }

    #[test]
    fn test_document_meta_from_config() {
        let mut config = Config::default();
        config.document.title = "Guide".to_owned();
        config.document.lang = "fr".to_owned();
        let generated_at = NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|date| date.and_hms_opt(7, 8, 9))
            .unwrap();

        let meta = document_meta(&config, generated_at);
        assert_eq!(meta.title, "Guide");
        assert_eq!(meta.lang, "fr");
        assert_eq!(meta.generated_at, generated_at);
        assert_eq!(meta.timestamp_format, "%Y-%m-%d %H:%M:%S");
    }
}
