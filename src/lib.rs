//! # Komono
//!
//! A toolkit of small, independent utilities. Each module is a pure,
//! stateless transformation over a small input: no I/O, no shared mutable
//! state, no async. Everything is safe to call concurrently without
//! coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`wareki`] | Japanese era (和暦) resolution — maps Gregorian dates to era-relative year strings |
//! | [`filesize`] | Byte-count formatting with IEC (base 1024) or SI (base 1000) unit ladders |
//! | [`isbn`] | ISBN-10/ISBN-13 shape and check-digit verification |
//! | [`mime`] | MIME type parsing and serialization per the WHATWG mimesniff rules |
//! | [`convert`] | Text normalization — newlines, trimming, fullwidth/halfwidth, replacement tables |
//!
//! # Design Decisions
//!
//! ## Embedded Era Table
//!
//! The era table in [`wareki`] is literal static data: five records with
//! name, narrow abbreviation, and Gregorian start date. Resolution never
//! consults host locale or calendar APIs, so the answer for a given date
//! is identical on every platform. The boundaries match what ICU's
//! Japanese calendar reports (Meiji starts 1868-09-08).
//!
//! ## Ambiguity Is a Value, Not an Error
//!
//! A year or year-month that straddles an era boundary ("1989", "1868-09")
//! has no single correct era. [`wareki::Wareki::year`] returns `None` for
//! these rather than guessing a side; malformed input, by contrast, is a
//! [`wareki::WarekiError`]. Callers can tell the two apart.
//!
//! ## Two Precision Paths for File Sizes
//!
//! [`filesize`] rounds through `f64` when fraction digits are requested,
//! which is only exact for sizes up to 2^53 − 1. Larger sizes must go
//! through the `u128` exact-integer path ([`filesize::iec_exact`]), which
//! rounds half-up in pure integer arithmetic and never emits fraction
//! digits. The native path refuses sizes it cannot represent exactly
//! instead of silently losing precision.
//!
//! ## Compiled Shape Checks
//!
//! Input-shape validation (date strings, ISBN hyphenation patterns) uses
//! `regex` compiled once behind `LazyLock` statics. The patterns are the
//! contract: exactly three date shapes, exactly the registered ISBN
//! groupings — anything else is rejected up front.

pub mod convert;
pub mod filesize;
pub mod isbn;
pub mod mime;
pub mod wareki;
