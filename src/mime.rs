//! MIME type parsing and serialization.
//!
//! Follows the WHATWG mimesniff grammar: `type "/" subtype` with optional
//! `;`-separated parameters. Type, subtype, and parameter names are
//! lowercased; parameter values may be quoted strings, collected per the
//! HTTP quoted-string algorithm. The first occurrence of a parameter name
//! wins; pairs that fail validation are dropped silently, as the spec's
//! parse algorithm does, rather than failing the whole parse.
//!
//! ```
//! use komono::mime::MimeType;
//!
//! let mime: MimeType = "Text/HTML; Charset=UTF-8".parse().unwrap();
//! assert_eq!(mime.essence(), "text/html");
//! assert_eq!(mime.parameter("charset"), Some("UTF-8"));
//! assert_eq!(mime.to_string(), "text/html;charset=UTF-8");
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MimeError {
    #[error("the specified string does not contain a slash")]
    MissingSlash,
    #[error("the `type` is the empty string")]
    EmptyType,
    #[error("the `type` contains an invalid string")]
    InvalidType,
    #[error("the `subtype` is the empty string")]
    EmptySubtype,
    #[error("the `subtype` contains an invalid string")]
    InvalidSubtype,
}

/// A parsed MIME type: `type/subtype` plus ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MimeType {
    #[serde(rename = "type")]
    type_: String,
    subtype: String,
    /// Insertion-ordered; names are unique (first occurrence wins).
    parameters: Vec<(String, String)>,
}

impl MimeType {
    /// The `type` part, lowercased (e.g. `text`).
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The `subtype` part, lowercased (e.g. `html`).
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// `type/subtype` (e.g. `text/html`).
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// All parameters in source order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// The value of the parameter named `key` (lowercase), if present.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl FromStr for MimeType {
    type Err = MimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();

        let slash = input.find('/').ok_or(MimeError::MissingSlash)?;
        let type_ = &input[..slash];
        if type_.is_empty() {
            return Err(MimeError::EmptyType);
        }
        if !is_http_token(type_) {
            return Err(MimeError::InvalidType);
        }

        let rest = &input[slash + 1..];
        let (subtype, parameters_input) = match rest.find(';') {
            Some(semicolon) => (rest[..semicolon].trim_end(), Some(&rest[semicolon + 1..])),
            None => (rest, None),
        };
        if subtype.is_empty() {
            return Err(MimeError::EmptySubtype);
        }
        if !is_http_token(subtype) {
            return Err(MimeError::InvalidSubtype);
        }

        let mut parameters: Vec<(String, String)> = Vec::new();
        if let Some(parameters_input) = parameters_input {
            for parameter in parameters_input.split(';').map(str::trim) {
                let Some(equals) = parameter.find('=') else {
                    continue;
                };

                let name = parameter[..equals].to_lowercase();
                let raw_value = &parameter[equals + 1..];
                let value = if raw_value.starts_with('"') {
                    collect_http_quoted_string(raw_value)
                } else if raw_value.is_empty() {
                    continue;
                } else {
                    raw_value.to_string()
                };

                if !name.is_empty()
                    && is_http_token(&name)
                    && is_http_quoted_string_text(&value)
                    && !parameters.iter().any(|(existing, _)| *existing == name)
                {
                    parameters.push((name, value));
                }
            }
        }

        Ok(Self {
            type_: type_.to_lowercase(),
            subtype: subtype.to_lowercase(),
            parameters,
        })
    }
}

impl fmt::Display for MimeType {
    /// Serialize per <https://mimesniff.spec.whatwg.org/#serializing-a-mime-type>:
    /// values that are not pure token text are quoted, with `"` and `\`
    /// escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;

        for (name, value) in &self.parameters {
            write!(f, ";{name}=")?;
            if value.is_empty() || !is_http_token(value) {
                write!(f, "\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))?;
            } else {
                f.write_str(value)?;
            }
        }

        Ok(())
    }
}

/// <https://mimesniff.spec.whatwg.org/#http-token-code-point>
fn is_http_token(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}

/// <https://mimesniff.spec.whatwg.org/#http-quoted-string-token-code-point>
fn is_http_quoted_string_text(value: &str) -> bool {
    value
        .chars()
        .all(|c| c == '\t' || ('\u{20}'..='\u{7e}').contains(&c) || ('\u{80}'..='\u{ff}').contains(&c))
}

/// <https://fetch.spec.whatwg.org/#collect-an-http-quoted-string>, with
/// the extract-value flavor: the surrounding quotes are dropped and
/// backslash escapes resolved.
fn collect_http_quoted_string(input: &str) -> String {
    let mut output = String::new();
    let mut chars = input.chars().skip(1).peekable();

    loop {
        while let Some(&c) = chars.peek() {
            if c == '"' || c == '\\' {
                break;
            }
            output.push(c);
            chars.next();
        }

        match chars.next() {
            Some('\\') => match chars.next() {
                Some(escaped) => output.push(escaped),
                None => {
                    output.push('\\');
                    break;
                }
            },
            // Closing quote or end of input.
            _ => break,
        }
    }

    output
}
