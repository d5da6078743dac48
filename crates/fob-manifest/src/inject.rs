//! Manifest injection at the `/* inject */ {}` marker.
//!
//! The first marker occurrence is overwritten with `/* inject */ <json>`.
//! Everything outside the marker span is copied byte for byte.
//!
//! The optional source map uses boundary resolution: in untouched text a
//! mapping starts at every non-word character and at the first character of
//! every word, so lines around the marker keep exact column attribution. The
//! replacement itself is one opaque segment mapped to the marker's start.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use oxc_sourcemap::{SourceMap, SourceMapBuilder};
use regex::Regex;

use crate::error::InjectError;

/// Leading comment kept in front of the injected JSON.
pub const MARKER_PREFIX: &str = "/* inject */";

static MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/\*\s*inject\s*\*/\s*\{\s*\}").ok());

/// Byte range of the first injection marker in `source`.
pub fn find_marker(source: &str) -> Option<Range<usize>> {
    MARKER.as_ref()?.find(source).map(|m| m.range())
}

pub fn has_marker(source: &str) -> bool {
    find_marker(source).is_some()
}

#[derive(Debug, Clone, Default)]
pub struct InjectOptions {
    /// Source name recorded in the map's `sources`.
    pub filename: Option<String>,
    /// Produce a source map for the rewrite.
    pub sourcemap: bool,
}

/// Rewritten text plus optional map.
///
/// `code` borrows the input when nothing was replaced.
#[derive(Debug)]
pub struct Injection<'a> {
    pub code: Cow<'a, str>,
    pub map: Option<SourceMap>,
}

impl Injection<'_> {
    pub fn is_modified(&self) -> bool {
        matches!(self.code, Cow::Owned(_))
    }
}

/// Splice `json` into `source` at the marker.
///
/// Without a marker the input is returned unchanged (borrowed) and no map is
/// produced.
pub fn inject<'a>(source: &'a str, json: &str, options: &InjectOptions) -> Injection<'a> {
    let Some(span) = find_marker(source) else {
        return Injection {
            code: Cow::Borrowed(source),
            map: None,
        };
    };

    let replacement = format!("{MARKER_PREFIX} {json}");
    let mut code = String::with_capacity(source.len() - span.len() + replacement.len());
    code.push_str(&source[..span.start]);
    code.push_str(&replacement);
    code.push_str(&source[span.end..]);

    let map = options.sourcemap.then(|| {
        boundary_map(
            source,
            span,
            &replacement,
            options.filename.as_deref().unwrap_or(""),
        )
    });

    Injection {
        code: Cow::Owned(code),
        map,
    }
}

/// Like [`inject`], but a missing marker is an error.
pub fn inject_required<'a>(
    source: &'a str,
    json: &str,
    options: &InjectOptions,
) -> Result<Injection<'a>, InjectError> {
    let injection = inject(source, json, options);
    if injection.is_modified() {
        Ok(injection)
    } else {
        Err(InjectError::MarkerNotFound)
    }
}

/// Generated/original cursor pair in UTF-16 columns.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    dst_line: u32,
    dst_col: u32,
    src_line: u32,
    src_col: u32,
}

fn boundary_map(source: &str, span: Range<usize>, replacement: &str, filename: &str) -> SourceMap {
    let mut builder = SourceMapBuilder::default();
    let src_id = builder.set_source_and_content(filename, source);

    let mut cursor = Cursor::default();
    map_unedited(&mut builder, src_id, &source[..span.start], &mut cursor);

    // one segment per generated line of the replacement, all at the marker start
    let mut lines = replacement.split('\n').peekable();
    while let Some(line) = lines.next() {
        builder.add_token(
            cursor.dst_line,
            cursor.dst_col,
            cursor.src_line,
            cursor.src_col,
            Some(src_id),
            None,
        );
        if lines.peek().is_some() {
            cursor.dst_line += 1;
            cursor.dst_col = 0;
        } else {
            cursor.dst_col += utf16_len(line);
        }
    }

    let (src_line, src_col) = position(&source[..span.end]);
    cursor.src_line = src_line;
    cursor.src_col = src_col;
    map_unedited(&mut builder, src_id, &source[span.end..], &mut cursor);

    builder.into_sourcemap()
}

fn map_unedited(builder: &mut SourceMapBuilder, src_id: u32, text: &str, cursor: &mut Cursor) {
    let mut in_word = false;
    for c in text.chars() {
        if c == '\n' {
            cursor.dst_line += 1;
            cursor.dst_col = 0;
            cursor.src_line += 1;
            cursor.src_col = 0;
            in_word = false;
            continue;
        }

        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if !is_word || !in_word {
            builder.add_token(
                cursor.dst_line,
                cursor.dst_col,
                cursor.src_line,
                cursor.src_col,
                Some(src_id),
                None,
            );
        }
        in_word = is_word;

        let width = c.len_utf16() as u32;
        cursor.dst_col += width;
        cursor.src_col += width;
    }
}

/// Line and UTF-16 column at the end of `text`.
fn position(text: &str) -> (u32, u32) {
    let line = text.matches('\n').count() as u32;
    let last_line = text.rfind('\n').map_or(text, |idx| &text[idx + 1..]);
    (line, utf16_len(last_line))
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}
