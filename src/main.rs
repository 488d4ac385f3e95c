//! minipager - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use minipager::source::NormalizeOptions;

/// minipager - page through text one screen at a time
#[derive(Parser, Debug)]
#[command(name = "minipager")]
#[command(version)]
#[command(about = "A less-style pager with ANSI and wide-character aware layout")]
pub struct Args {
    /// File to page (reads piped stdin if not provided)
    pub file: Option<PathBuf>,

    /// Truncate long lines instead of wrapping them
    #[arg(short = 'S', long)]
    pub chop_long_lines: bool,

    /// Parse the input as JSON and pretty-print it
    #[arg(long)]
    pub json: bool,

    /// With --json, keep the JSON compact
    #[arg(long, requires = "json")]
    pub preserve_format: bool,

    /// Spaces per level when pretty-printing JSON
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        // 1. Load config file (or None if missing)
        let config_file = minipager::config::load_config_with_precedence(args.config.clone())?;

        // 2. Merge with defaults
        let merged = minipager::config::merge_config(config_file);

        // 3. Apply environment variable overrides
        let with_env = minipager::config::apply_env_overrides(merged);

        // 4. Apply CLI argument overrides, only for flags actually given
        let chop_override = args.chop_long_lines.then_some(true);
        minipager::config::apply_cli_overrides(with_env, chop_override, args.indent)
    };

    // The guard flushes buffered log lines on drop
    let _log_guard = minipager::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    // Detect input source (file or stdin) and read it
    let source = minipager::source::detect_input_source(args.file.clone())?;
    let options = NormalizeOptions {
        json: args.json,
        preserve_format: args.preserve_format,
        indentation: config.indentation,
        tab_width: config.tab_width,
    };
    let content = source.load(&options)?;
    info!(source = ?source, lines = content.len(), "content loaded");

    minipager::view::run_with_source(content, &config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let err = Args::try_parse_from(["minipager", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["minipager", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["minipager"]);
        assert_eq!(args.file, None);
        assert!(!args.chop_long_lines);
        assert!(!args.json);
        assert!(!args.preserve_format);
        assert_eq!(args.indent, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_chop_short_flag() {
        let args = Args::parse_from(["minipager", "-S", "notes.txt"]);
        assert!(args.chop_long_lines);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_chop_long_flag() {
        let args = Args::parse_from(["minipager", "--chop-long-lines"]);
        assert!(args.chop_long_lines);
    }

    #[test]
    fn test_json_with_indent() {
        let args = Args::parse_from(["minipager", "--json", "--indent", "4", "data.json"]);
        assert!(args.json);
        assert_eq!(args.indent, Some(4));
    }

    #[test]
    fn test_preserve_format_requires_json() {
        let err = Args::try_parse_from(["minipager", "--preserve-format"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = Args::parse_from(["minipager", "--json", "--preserve-format"]);
        assert!(args.preserve_format);
    }

    #[test]
    fn test_indent_rejects_text() {
        let err = Args::try_parse_from(["minipager", "--indent", "wide"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["minipager", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
