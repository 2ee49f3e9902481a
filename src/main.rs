use clap::{Parser, Subcommand, ValueEnum};
use komono::convert::{self, ConvertOptions, Newline};
use komono::filesize::{self, FormatOptions, MAX_NATIVE_SIZE};
use komono::isbn::Isbn;
use komono::mime::MimeType;
use komono::wareki::{EraStyle, Wareki};
use std::io::Read;

/// Release-tag builds report the crate version; anything else reports
/// the short git hash it was built from, so bug reports from dev builds
/// identify the exact commit.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, when clap renders --version.
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "komono")]
#[command(version = version_string())]
#[command(about = "Small text and number utilities")]
#[command(long_about = "\
Small text and number utilities

Each subcommand wraps one library module: Japanese era dates, byte-count
formatting, ISBN verification, MIME type parsing, and text normalization.
All of them are pure transformations — input in, string out, no state.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Gregorian date to a Japanese era year
    ///
    /// DATE is `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`. A partial date that
    /// straddles an era boundary has no unambiguous era and fails.
    Wareki {
        date: String,
        /// Era label style
        #[arg(long, value_enum, default_value_t = StyleArg::Long)]
        style: StyleArg,
    },
    /// Format a byte count with IEC (default) or SI units
    Filesize {
        /// Byte count; sizes beyond 2^53 - 1 take the exact-integer path
        bytes: u128,
        /// Use the decimal (SI) ladder instead of the binary (IEC) one
        #[arg(long)]
        si: bool,
        /// Fraction digits to round to (native path only)
        #[arg(long, default_value_t = 0)]
        digits: u32,
        /// Insert a space between the value and the unit
        #[arg(long)]
        space: bool,
        /// Label for sizes below the first unit
        #[arg(long, default_value = "byte")]
        byte_label: String,
    },
    /// Verify an ISBN-10/ISBN-13 string and its check digit
    Isbn {
        value: String,
        /// Require the hyphenated registered form
        #[arg(long)]
        strict: bool,
        /// Print the classification as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a MIME type and print its normalized serialization
    Mime {
        value: String,
        /// Print the parsed parts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize text from stdin to stdout
    Convert {
        /// Convert newlines to this sequence
        #[arg(long, value_enum)]
        newline: Option<NewlineArg>,
        /// Remove whitespace at both ends of the text
        #[arg(long)]
        trim: bool,
        /// Remove whitespace at both ends of every line
        #[arg(long)]
        trim_multi_line: bool,
        /// Delete blank lines
        #[arg(long)]
        no_blank_line: bool,
        /// Fullwidth alphanumerics to ASCII
        #[arg(long)]
        hankaku_eisu: bool,
        /// ASCII alphanumerics to fullwidth
        #[arg(long)]
        zenkaku_eisu: bool,
        /// Ideographic space (U+3000) to ASCII space
        #[arg(long)]
        hankaku_space: bool,
        /// Collapse runs of spaces
        #[arg(long)]
        combine_space: bool,
        /// Lowercase the text
        #[arg(long)]
        lower: bool,
        /// Uppercase the text
        #[arg(long)]
        upper: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Long,
    Short,
    Narrow,
}

impl From<StyleArg> for EraStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Long => EraStyle::Long,
            StyleArg::Short => EraStyle::Short,
            StyleArg::Narrow => EraStyle::Narrow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum NewlineArg {
    Cr,
    Lf,
    Crlf,
}

impl From<NewlineArg> for Newline {
    fn from(newline: NewlineArg) -> Self {
        match newline {
            NewlineArg::Cr => Newline::Cr,
            NewlineArg::Lf => Newline::Lf,
            NewlineArg::Crlf => Newline::CrLf,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Wareki { date, style } => {
            let wareki: Wareki = date.parse()?;
            match wareki.year(style.into()) {
                Some(year) => println!("{year}"),
                None => return Err("no era can be unambiguously assigned to this date".into()),
            }
        }
        Command::Filesize {
            bytes,
            si,
            digits,
            space,
            byte_label,
        } => {
            let options = FormatOptions {
                space,
                byte: byte_label,
                digits,
            };
            let formatted = if bytes <= u128::from(MAX_NATIVE_SIZE) {
                let bytes = bytes as u64;
                if si {
                    filesize::si(bytes, &options)?
                } else {
                    filesize::iec(bytes, &options)?
                }
            } else if si {
                filesize::si_exact(bytes, &options)
            } else {
                filesize::iec_exact(bytes, &options)
            };
            println!("{formatted}");
        }
        Command::Isbn {
            value,
            strict,
            json,
        } => {
            let isbn = if strict {
                Isbn::new_strict(&value)
            } else {
                Isbn::new(&value)
            };
            if json {
                let report = serde_json::json!({
                    "input": value,
                    "isbn13": isbn.is_isbn13(false),
                    "isbn10": isbn.is_isbn10(false),
                    "valid": isbn.is_valid(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if isbn.is_valid() {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
        Command::Mime { value, json } => {
            let mime: MimeType = value.parse()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&mime)?);
            } else {
                println!("{mime}");
            }
        }
        Command::Convert {
            newline,
            trim,
            trim_multi_line,
            no_blank_line,
            hankaku_eisu,
            zenkaku_eisu,
            hankaku_space,
            combine_space,
            lower,
            upper,
        } => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;

            let options = ConvertOptions {
                newline: newline.map(Newline::from),
                trim,
                trim_multi_line,
                no_blank_line,
                to_hankaku_eisu: hankaku_eisu,
                to_zenkaku_eisu: zenkaku_eisu,
                to_hankaku_space: hankaku_space,
                combine_space,
                to_lower_case: lower,
                to_upper_case: upper,
                table: Vec::new(),
            };
            print!("{}", convert::convert(&text, &options)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_is_release_version_or_dev_hash() {
        let version = version_string();
        assert!(
            version == env!("CARGO_PKG_VERSION") || version.starts_with("dev@"),
            "unexpected version string: {version}"
        );
    }
}
