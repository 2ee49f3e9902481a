//! Byte-count formatting with IEC or SI unit ladders.
//!
//! Renders a non-negative byte count as `<value><unit>`, picking the
//! largest unit that keeps the value at least 1: [`iec`]/[`iec_exact`]
//! use the binary ladder (KiB, MiB, ... base 1024), [`si`]/[`si_exact`]
//! the decimal ladder (kB, MB, ... base 1000). Each ladder has nine rungs,
//! from the raw byte label up to YiB/YB.
//!
//! ## Two Precision Paths
//!
//! The native path ([`iec`], [`si`]) takes a `u64` and rounds through
//! `f64` so it can honor [`FormatOptions::digits`]. `f64` only represents
//! integers exactly up to 2^53 − 1, so larger sizes fail with
//! [`FileSizeError::PrecisionExceeded`] instead of silently rounding
//! through a lossy value.
//!
//! The exact path ([`iec_exact`], [`si_exact`]) takes a `u128` and does
//! the whole computation in integer arithmetic: round-half-up via
//! `(size + d/2) / d`, never any floating point. Fraction digits are not
//! representable here, so `digits` is ignored. Sizes at or beyond the top
//! rung (1024^9 / 1000^9) are clamped to the largest unit.
//!
//! ```
//! use komono::filesize::{self, FormatOptions};
//!
//! let opts = FormatOptions::default();
//! assert_eq!(filesize::iec(1023, &opts).unwrap(), "1023byte");
//! assert_eq!(filesize::iec(1024, &opts).unwrap(), "1KiB");
//! assert_eq!(filesize::si(1000, &opts).unwrap(), "1kB");
//! ```

use thiserror::Error;

/// Largest integer `f64` represents exactly (2^53 − 1). The native path
/// refuses anything bigger.
pub const MAX_NATIVE_SIZE: u64 = (1 << 53) - 1;

/// Rungs per ladder; the ninth is YiB/YB.
const LADDER_LEN: u32 = 9;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FileSizeError {
    #[error(
        "{0} exceeds the exactly representable range (max {MAX_NATIVE_SIZE}); \
         use `iec_exact`/`si_exact` for huge sizes"
    )]
    PrecisionExceeded(u64),
}

/// Formatting options shared by both ladders and both precision paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Insert a space between the value and the unit. Default `false`.
    pub space: bool,
    /// Label for sizes below the first rung (< 1 KiB / 1 kB).
    /// Default `"byte"`.
    pub byte: String,
    /// Fraction digits to round to on the native path; values above 17
    /// (the end of `f64` fraction precision) behave as 17. The exact
    /// path has no representable fractions and ignores this.
    /// Default `0`.
    pub digits: u32,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            space: false,
            byte: "byte".to_string(),
            digits: 0,
        }
    }
}

/// Format with the binary (IEC) ladder: KiB, MiB, GiB, ... base 1024.
pub fn iec(size: u64, options: &FormatOptions) -> Result<String, FileSizeError> {
    format_native(size, 1024, &iec_ladder(options), options)
}

/// Format with the decimal (SI) ladder: kB, MB, GB, ... base 1000.
pub fn si(size: u64, options: &FormatOptions) -> Result<String, FileSizeError> {
    format_native(size, 1000, &si_ladder(options), options)
}

/// Exact-integer variant of [`iec`] for sizes beyond 2^53 − 1.
pub fn iec_exact(size: u128, options: &FormatOptions) -> String {
    format_exact(size, 1024, &iec_ladder(options), options)
}

/// Exact-integer variant of [`si`] for sizes beyond 2^53 − 1.
pub fn si_exact(size: u128, options: &FormatOptions) -> String {
    format_exact(size, 1000, &si_ladder(options), options)
}

fn iec_ladder<'a>(options: &'a FormatOptions) -> [&'a str; 9] {
    [
        &options.byte,
        "KiB",
        "MiB",
        "GiB",
        "TiB",
        "PiB",
        "EiB",
        "ZiB",
        "YiB",
    ]
}

fn si_ladder<'a>(options: &'a FormatOptions) -> [&'a str; 9] {
    [
        &options.byte, "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB",
    ]
}

/// Smallest exponent `e` in `1..=LADDER_LEN` with `size < base^e`, or
/// `LADDER_LEN` when the size is at or beyond the top rung.
fn unit_exponent(size: u128, base: u128) -> u32 {
    (1..=LADDER_LEN)
        .find(|&e| size < base.pow(e))
        .unwrap_or(LADDER_LEN)
}

fn format_native(
    size: u64,
    base: u32,
    ladder: &[&str; 9],
    options: &FormatOptions,
) -> Result<String, FileSizeError> {
    if size > MAX_NATIVE_SIZE {
        return Err(FileSizeError::PrecisionExceeded(size));
    }

    let exponent = unit_exponent(u128::from(size), u128::from(base));
    let unit = ladder[(exponent - 1) as usize];
    let space = if options.space { " " } else { "" };

    // Round half away from zero to `digits` fraction digits, then let
    // Display drop trailing zeros (1.0 prints as "1"). `f64` carries no
    // fraction precision past 17 digits, and larger exponents would push
    // `scale` to infinity, so clamp there.
    let scale = 10f64.powi(options.digits.min(17) as i32);
    let scaled = size as f64 / f64::from(base).powi(exponent as i32 - 1);
    let value = (scaled * scale).round() / scale;

    Ok(format!("{value}{space}{unit}"))
}

fn format_exact(size: u128, base: u32, ladder: &[&str; 9], options: &FormatOptions) -> String {
    let base = u128::from(base);
    let space = if options.space { " " } else { "" };

    let exponent = unit_exponent(size, base);
    let unit = ladder[(exponent - 1) as usize];
    let denominator = base.pow(exponent - 1);

    if size < base.pow(LADDER_LEN) {
        // Round half up without leaving integer arithmetic.
        let value = (size + denominator / 2) / denominator;
        format!("{value}{space}{unit}")
    } else {
        // Beyond the top rung: clamp to the largest unit, truncating.
        format!("{}{space}{unit}", size / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn zero() {
        assert_eq!(iec(0, &opts()).unwrap(), "0byte");
        assert_eq!(si(0, &opts()).unwrap(), "0byte");
    }

    #[test]
    fn iec_byte_range() {
        assert_eq!(iec(1, &opts()).unwrap(), "1byte");
        assert_eq!(iec(1023, &opts()).unwrap(), "1023byte");
    }

    #[test]
    fn iec_rung_boundaries() {
        assert_eq!(iec(1024, &opts()).unwrap(), "1KiB");
        // 1024^2 - 1 rounds up to the full base value of the same rung.
        assert_eq!(iec(1024u64.pow(2) - 1, &opts()).unwrap(), "1024KiB");
        assert_eq!(iec(1024u64.pow(2), &opts()).unwrap(), "1MiB");
        assert_eq!(iec(1024u64.pow(3), &opts()).unwrap(), "1GiB");
        assert_eq!(iec(1024u64.pow(4), &opts()).unwrap(), "1TiB");
        assert_eq!(iec(1024u64.pow(5), &opts()).unwrap(), "1PiB");
    }

    #[test]
    fn si_rung_boundaries() {
        assert_eq!(si(999, &opts()).unwrap(), "999byte");
        assert_eq!(si(1000, &opts()).unwrap(), "1kB");
        assert_eq!(si(1_000_000, &opts()).unwrap(), "1MB");
        assert_eq!(si(999_999, &opts()).unwrap(), "1000kB");
    }

    #[test]
    fn fraction_digits() {
        let options = FormatOptions {
            digits: 1,
            ..FormatOptions::default()
        };
        assert_eq!(iec(1280, &options).unwrap(), "1.3KiB");
        // Exactly representable halves round away from zero.
        assert_eq!(iec(1536, &options).unwrap(), "1.5KiB");

        let options = FormatOptions {
            digits: 2,
            ..FormatOptions::default()
        };
        assert_eq!(si(1530, &options).unwrap(), "1.53kB");
    }

    #[test]
    fn oversized_digits_stay_finite() {
        // 1280/1024 = 1.25 is exactly representable, so any digit count
        // past two leaves it untouched; it must never degrade to NaN.
        for digits in [3, 17, 400, u32::MAX] {
            let options = FormatOptions {
                digits,
                ..FormatOptions::default()
            };
            assert_eq!(iec(1280, &options).unwrap(), "1.25KiB", "digits {digits}");
        }
    }

    #[test]
    fn digits_do_not_pad_whole_values() {
        let options = FormatOptions {
            digits: 2,
            ..FormatOptions::default()
        };
        assert_eq!(iec(1024, &options).unwrap(), "1KiB");
    }

    #[test]
    fn space_option() {
        let options = FormatOptions {
            space: true,
            ..FormatOptions::default()
        };
        assert_eq!(iec(1024, &options).unwrap(), "1 KiB");
        assert_eq!(iec(512, &options).unwrap(), "512 byte");
    }

    #[test]
    fn byte_label_option() {
        let options = FormatOptions {
            byte: "B".to_string(),
            ..FormatOptions::default()
        };
        assert_eq!(iec(512, &options).unwrap(), "512B");
        assert_eq!(si(999, &options).unwrap(), "999B");
        // The override only applies to the first rung.
        assert_eq!(iec(1024, &options).unwrap(), "1KiB");
    }

    #[test]
    fn native_path_rejects_sizes_beyond_exact_range() {
        assert_eq!(iec(MAX_NATIVE_SIZE, &opts()).unwrap(), "8PiB");
        assert_eq!(
            iec(MAX_NATIVE_SIZE + 1, &opts()),
            Err(FileSizeError::PrecisionExceeded(MAX_NATIVE_SIZE + 1))
        );
    }

    #[test]
    fn exact_iec_rungs() {
        assert_eq!(iec_exact(0, &opts()), "0byte");
        assert_eq!(iec_exact(1024, &opts()), "1KiB");
        assert_eq!(iec_exact(1024u128.pow(6), &opts()), "1EiB");
        assert_eq!(iec_exact(1024u128.pow(6) - 1, &opts()), "1024PiB");
        assert_eq!(iec_exact(1024u128.pow(7), &opts()), "1ZiB");
        assert_eq!(iec_exact(1024u128.pow(8), &opts()), "1YiB");
        assert_eq!(iec_exact(1024u128.pow(9) - 1, &opts()), "1024YiB");
    }

    #[test]
    fn exact_si_rungs() {
        assert_eq!(si_exact(10u128.pow(18), &opts()), "1EB");
        assert_eq!(si_exact(10u128.pow(21), &opts()), "1ZB");
        assert_eq!(si_exact(10u128.pow(24), &opts()), "1YB");
    }

    #[test]
    fn exact_path_rounds_half_up() {
        // 1536 = 1.5 KiB exactly; half rounds up.
        assert_eq!(iec_exact(1536, &opts()), "2KiB");
        assert_eq!(iec_exact(1535, &opts()), "1KiB");
    }

    #[test]
    fn exact_path_ignores_digits() {
        let options = FormatOptions {
            digits: 3,
            ..FormatOptions::default()
        };
        assert_eq!(iec_exact(1280, &options), "1KiB");
    }

    #[test]
    fn above_ladder_clamps_to_largest_unit() {
        assert_eq!(iec_exact(1024u128.pow(9), &opts()), "1024YiB");
        assert_eq!(iec_exact(1024u128.pow(9) * 3, &opts()), "3072YiB");
        assert_eq!(si_exact(10u128.pow(27), &opts()), "1000YB");
    }
}
