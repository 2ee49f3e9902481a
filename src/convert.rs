//! Text normalization: newlines, trimming, fullwidth/halfwidth
//! characters, and replacement tables.
//!
//! [`convert`] applies the transforms selected in [`ConvertOptions`] in a
//! fixed order: newline conversion, trimming, blank-line removal,
//! alphanumeric width conversion, space normalization, case conversion,
//! then the caller's replacement table. Pairs of mutually exclusive flags
//! (`trim`/`trim_multi_line`, `to_hankaku_eisu`/`to_zenkaku_eisu`,
//! `to_lower_case`/`to_upper_case`) resolve in favor of the first.
//!
//! ```
//! use komono::convert::{convert, ConvertOptions, Newline};
//!
//! let options = ConvertOptions {
//!     newline: Some(Newline::Lf),
//!     trim_multi_line: true,
//!     ..ConvertOptions::default()
//! };
//! assert_eq!(convert("  foo \r\n bar ", &options).unwrap(), "foo\nbar");
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("multiple newline codes are mixed ({0}, {1})")]
    MixedNewlines(&'static str, &'static str),
}

/// A newline sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Cr,
    Lf,
    CrLf,
}

impl Newline {
    pub fn sequence(self) -> &'static str {
        match self {
            Newline::Cr => "\r",
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Newline::Cr => "CR",
            Newline::Lf => "LF",
            Newline::CrLf => "CR+LF",
        }
    }
}

/// Which transforms [`convert`] applies. Everything defaults to off.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Convert every newline to this sequence.
    pub newline: Option<Newline>,
    /// Remove whitespace at both ends of the text.
    pub trim: bool,
    /// Remove whitespace at both ends of every line (ignored when `trim`
    /// is set).
    pub trim_multi_line: bool,
    /// Collapse runs of newlines, deleting blank lines.
    pub no_blank_line: bool,
    /// Fullwidth alphanumerics → ASCII (ａ１ → a1).
    pub to_hankaku_eisu: bool,
    /// ASCII alphanumerics → fullwidth (ignored when `to_hankaku_eisu` is
    /// set).
    pub to_zenkaku_eisu: bool,
    /// IDEOGRAPHIC SPACE (U+3000) → SPACE (U+0020).
    pub to_hankaku_space: bool,
    /// Collapse runs of U+0020 into one.
    pub combine_space: bool,
    /// Lowercase the text.
    pub to_lower_case: bool,
    /// Uppercase the text (ignored when `to_lower_case` is set).
    pub to_upper_case: bool,
    /// `(search, replace)` pairs applied last, in order.
    pub table: Vec<(String, String)>,
}

/// Detect which newline sequence `text` uses.
///
/// `None` when the text has no newlines at all; an error when different
/// kinds are mixed, since line-based transforms would then be guesswork.
pub fn detect_newline(text: &str) -> Result<Option<Newline>, ConvertError> {
    let bytes = text.as_bytes();
    let (mut cr, mut lf, mut crlf) = (false, false, false);

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                crlf = true;
                i += 2;
            }
            b'\r' => {
                cr = true;
                i += 1;
            }
            b'\n' => {
                lf = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    match (cr, lf, crlf) {
        (true, true, _) => Err(ConvertError::MixedNewlines("CR", "LF")),
        (true, _, true) => Err(ConvertError::MixedNewlines("CR", "CR+LF")),
        (_, true, true) => Err(ConvertError::MixedNewlines("LF", "CR+LF")),
        (true, _, _) => Ok(Some(Newline::Cr)),
        (_, true, _) => Ok(Some(Newline::Lf)),
        (_, _, true) => Ok(Some(Newline::CrLf)),
        _ => Ok(None),
    }
}

/// Apply the transforms selected in `options` to `text`.
pub fn convert(text: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let detected = detect_newline(text)?;
    let mut converted = text.to_string();

    // The sequence later line-based transforms split on: the target of a
    // requested conversion, otherwise whatever the text already uses.
    let mut newline = detected;
    if let (Some(target), Some(current)) = (options.newline, detected) {
        if target != current {
            converted = converted.replace(current.sequence(), target.sequence());
        }
        newline = Some(target);
    }

    if options.trim {
        converted = converted.trim().to_string();
    } else if options.trim_multi_line {
        converted = converted.trim().to_string();
        if let Some(newline) = newline {
            converted = converted
                .split(newline.sequence())
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(newline.sequence());
        }
    }

    if options.no_blank_line {
        if let Some(newline) = newline {
            converted = collapse_newline_runs(&converted, newline);
        }
    }

    if options.to_hankaku_eisu {
        converted = shift_alnum_width(&converted, WidthShift::ToHankaku);
    } else if options.to_zenkaku_eisu {
        converted = shift_alnum_width(&converted, WidthShift::ToZenkaku);
    }

    if options.to_hankaku_space {
        converted = converted.replace('\u{3000}', " ");
    }

    if options.combine_space {
        converted = collapse_runs_of(&converted, ' ');
    }

    if options.to_lower_case {
        converted = converted.to_lowercase();
    } else if options.to_upper_case {
        converted = converted.to_uppercase();
    }

    for (search, replace) in &options.table {
        converted = converted.replace(search.as_str(), replace);
    }

    Ok(converted)
}

enum WidthShift {
    ToHankaku,
    ToZenkaku,
}

/// Fullwidth and ASCII alphanumerics differ by a fixed offset (U+FEE0).
fn shift_alnum_width(text: &str, shift: WidthShift) -> String {
    const OFFSET: u32 = 0xfee0;

    text.chars()
        .map(|c| match shift {
            WidthShift::ToHankaku if matches!(c, 'ａ'..='ｚ' | 'Ａ'..='Ｚ' | '０'..='９') => {
                char::from_u32(c as u32 - OFFSET).unwrap_or(c)
            }
            WidthShift::ToZenkaku if c.is_ascii_alphanumeric() => {
                char::from_u32(c as u32 + OFFSET).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Collapse any run of newline characters into a single `newline`
/// sequence. Runs are measured over the characters, not the sequence, so
/// a CRLF text's `\r\n\r\n` collapses to one `\r\n`.
fn collapse_newline_runs(text: &str, newline: Newline) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c == '\r' || c == '\n' {
            if !in_run {
                output.push_str(newline.sequence());
                in_run = true;
            }
        } else {
            in_run = false;
            output.push(c);
        }
    }

    output
}

fn collapse_runs_of(text: &str, target: char) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c == target {
            if !in_run {
                output.push(c);
                in_run = true;
            }
        } else {
            in_run = false;
            output.push(c);
        }
    }

    output
}
