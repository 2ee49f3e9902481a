//! End-to-end exercises of the public API, written the way a consumer
//! would use the crate: strings in, strings out.

use komono::convert::{convert, ConvertOptions, Newline};
use komono::filesize::{self, FileSizeError, FormatOptions};
use komono::isbn::Isbn;
use komono::mime::MimeType;
use komono::wareki::{resolve_era, EraStyle, Wareki, WarekiError};

#[test]
fn wareki_round_trip_from_strings() {
    let year = |s: &str| s.parse::<Wareki>().unwrap().year(EraStyle::Long);

    assert_eq!(year("1989-01-07"), Some("昭和64".to_string()));
    assert_eq!(year("1989-01-08"), Some("平成元".to_string()));
    assert_eq!(year("2019-04-30"), Some("平成31".to_string()));
    assert_eq!(year("2019-05-01"), Some("令和元".to_string()));

    // Partial dates that straddle a boundary are ambiguous, not errors.
    assert_eq!(year("1989-01"), None);
    assert_eq!(year("2019"), None);
    assert_eq!(year("1868-09"), None);

    assert_eq!(
        "01-01-2000".parse::<Wareki>().unwrap_err(),
        WarekiError::InvalidFormat
    );
}

#[test]
fn wareki_narrow_style() {
    let w: Wareki = "2019-05-01".parse().unwrap();
    assert_eq!(w.year(EraStyle::Narrow), Some("R元".to_string()));
    assert_eq!(w.era().unwrap().abbreviation, 'R');
}

#[test]
fn era_resolution_is_out_of_range_before_meiji() {
    let date = chrono::NaiveDate::from_ymd_opt(1868, 9, 7).unwrap();
    assert!(matches!(
        resolve_era(date),
        Err(WarekiError::DateOutOfRange(_))
    ));
}

#[test]
fn filesize_native_and_exact_paths_agree_on_whole_values() {
    let opts = FormatOptions::default();

    assert_eq!(filesize::iec(1024, &opts).unwrap(), "1KiB");
    assert_eq!(filesize::iec_exact(1024, &opts), "1KiB");
    assert_eq!(filesize::si(1_000_000, &opts).unwrap(), "1MB");
    assert_eq!(filesize::si_exact(1_000_000, &opts), "1MB");
}

#[test]
fn filesize_huge_sizes_must_use_the_exact_path() {
    let opts = FormatOptions::default();
    let huge = 1u64 << 60;

    assert_eq!(
        filesize::iec(huge, &opts),
        Err(FileSizeError::PrecisionExceeded(huge))
    );
    assert_eq!(filesize::iec_exact(u128::from(huge), &opts), "1EiB");
}

#[test]
fn filesize_options_combine() {
    let opts = FormatOptions {
        space: true,
        byte: "B".to_string(),
        digits: 1,
    };

    assert_eq!(filesize::iec(1280, &opts).unwrap(), "1.3 KiB");
    assert_eq!(filesize::si(999, &opts).unwrap(), "999 B");
}

#[test]
fn isbn_lenient_and_strict() {
    assert!(Isbn::new("978-4-06-519981-7").is_valid());
    assert!(Isbn::new("9784065199817").is_valid());
    assert!(Isbn::new_strict("978-4-06-519981-7").is_valid());
    assert!(!Isbn::new_strict("9784065199817").verify(false));
}

#[test]
fn mime_parse_and_serialize() {
    let mime: MimeType = " Text/HTML; Charset=UTF-8 ".parse().unwrap();
    assert_eq!(mime.essence(), "text/html");
    assert_eq!(mime.parameter("charset"), Some("UTF-8"));
    assert_eq!(mime.to_string(), "text/html;charset=UTF-8");
}

#[test]
fn convert_pipeline() {
    let options = ConvertOptions {
        newline: Some(Newline::Lf),
        trim_multi_line: true,
        no_blank_line: true,
        to_hankaku_eisu: true,
        ..ConvertOptions::default()
    };

    let input = "  Ｒｕｓｔ \r\n\r\n  ２０２４ \r\n";
    assert_eq!(convert(input, &options).unwrap(), "Rust\n2024");
}
