//! Raw text to pageable lines.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::model::error::InputError;
use crate::model::Content;
use crate::view_state::text::{segments, Segment};

/// How input text is turned into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Parse the input as JSON and reformat it.
    pub json: bool,
    /// With `json`, emit compact JSON instead of pretty-printing.
    pub preserve_format: bool,
    /// Spaces per JSON nesting level. `0` means compact.
    pub indentation: usize,
    /// Tab stop width.
    pub tab_width: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            json: false,
            preserve_format: false,
            indentation: 2,
            tab_width: 8,
        }
    }
}

/// Split `text` into lines, reformatting JSON and expanding tabs.
///
/// # Errors
///
/// Returns `InputError::Json` when `options.json` is set and `text` does not
/// parse.
pub fn normalize(text: &str, options: &NormalizeOptions) -> Result<Content, InputError> {
    let formatted;
    let text = if options.json {
        formatted = format_json(text, options)?;
        formatted.as_str()
    } else {
        text
    };

    let lines = Content::from_text(text)
        .lines_from(0)
        .map(|line| expand_tabs(line, options.tab_width))
        .collect();
    Ok(Content::new(lines))
}

fn format_json(text: &str, options: &NormalizeOptions) -> Result<String, InputError> {
    let value: Value = serde_json::from_str(text)?;
    if options.preserve_format || options.indentation == 0 {
        return Ok(serde_json::to_string(&value)?);
    }

    let indent = " ".repeat(options.indentation);
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Replace tabs with spaces up to the next tab stop.
///
/// Columns are counted in display width, so style codes and wide glyphs
/// before a tab are measured correctly.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len() + tab_width);
    let mut col = 0;
    for segment in segments(line) {
        match segment {
            Segment::Glyph { text: "\t", .. } => {
                let pad = tab_width - col % tab_width;
                out.extend(std::iter::repeat_n(' ', pad));
                col += pad;
            }
            Segment::Glyph { text, width } => {
                out.push_str(text);
                col += width;
            }
            Segment::Style(code) => out.push_str(code),
        }
    }
    out
}
