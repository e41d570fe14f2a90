//! [`Scan`] implementations for the primitive targets.

use alloc::string::String;
use core::num::IntErrorKind;

use crate::{
    arg::Scan,
    context::ScanCx,
    error::{ErrorKind, Result, ScanError},
    spec::ScanSpec,
};

/// Reads from a [`ScanCx`] with a character budget taken from the width.
struct Limited<'a, 'c, 'l> {
    cx: &'a mut ScanCx<'c, 'l>,
    left: usize,
}

impl<'a, 'c, 'l> Limited<'a, 'c, 'l> {
    fn new(cx: &'a mut ScanCx<'c, 'l>, width: Option<usize>) -> Self {
        Self {
            cx,
            left: width.unwrap_or(usize::MAX),
        }
    }

    /// Consumes the next character if `pred` accepts it.
    fn eat_if(&mut self, pred: impl FnOnce(char) -> bool) -> Result<Option<char>> {
        if self.left == 0 {
            return Ok(None);
        }
        let Some(ch) = self.cx.next_char()? else {
            return Ok(None);
        };
        if pred(ch) {
            self.left -= 1;
            Ok(Some(ch))
        } else {
            self.cx.putback(ch)?;
            Ok(None)
        }
    }

    fn eat_while(&mut self, out: &mut String, mut pred: impl FnMut(char) -> bool) -> Result<usize> {
        let mut n = 0;
        while let Some(ch) = self.eat_if(&mut pred)? {
            out.push(ch);
            n += 1;
        }
        Ok(n)
    }
}

/// The error for a value that could not be read at all: end of stream if
/// the input is exhausted, a mismatch otherwise.
fn nothing_read(cx: &mut ScanCx<'_, '_>, what: &'static str) -> Result<ScanError> {
    match cx.next_char()? {
        None => Ok(ScanError::new(ErrorKind::EndOfStream, what)),
        Some(ch) => {
            cx.putback(ch)?;
            Ok(ScanError::new(ErrorKind::InvalidScannedValue, what))
        }
    }
}

/// Radix for an integer conversion type; `None` means detect from prefix.
fn int_radix(kind: Option<char>) -> Result<Option<u32>> {
    Ok(match kind {
        None | Some('d' | 'u') => Some(10),
        Some('x' | 'X') => Some(16),
        Some('o') => Some(8),
        Some('b' | 'B') => Some(2),
        Some('i') => None,
        Some(_) => {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "invalid conversion type for an integer",
            ));
        }
    })
}

/// Reads sign, optional base prefix and digits; returns the text for
/// `from_str_radix` along with the radix to use.
fn read_int_text(spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<(String, u32)> {
    let radix = int_radix(spec.kind)?;
    cx.skip_ws()?;

    let mut text = String::new();
    let mut r = Limited::new(cx, spec.width);
    if let Some(sign) = r.eat_if(|c| c == '+' || c == '-')? {
        text.push(sign);
    }

    let mut radix = radix;
    let mut digits = 0;
    if matches!(radix, None | Some(16 | 2)) && r.eat_if(|c| c == '0')?.is_some() {
        let marker = r.eat_if(|c| match radix {
            None => matches!(c, 'x' | 'X' | 'b' | 'B'),
            Some(16) => matches!(c, 'x' | 'X'),
            _ => matches!(c, 'b' | 'B'),
        })?;
        match marker {
            Some('x' | 'X') => radix = Some(16),
            Some(_) => radix = Some(2),
            None => {
                text.push('0');
                digits += 1;
                radix.get_or_insert(8);
            }
        }
    }
    let radix = radix.unwrap_or(10);
    digits += r.eat_while(&mut text, |c| c.is_digit(radix))?;

    if digits == 0 {
        return Err(nothing_read(cx, "expected an integer")?);
    }
    Ok((text, radix))
}

fn int_error(kind: &IntErrorKind) -> ScanError {
    match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ScanError::new(
            ErrorKind::ValueOutOfRange,
            "integer does not fit the target type",
        ),
        _ => ScanError::new(ErrorKind::InvalidScannedValue, "invalid integer"),
    }
}

macro_rules! scan_int {
    ($($ty:ty),*) => {
        $(
            impl Scan for $ty {
                fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
                    let (text, radix) = read_int_text(spec, cx)?;
                    *self = <$ty>::from_str_radix(&text, radix).map_err(|e| int_error(e.kind()))?;
                    Ok(())
                }
            }
        )*
    };
}

scan_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Reads a float in `[sign] digits [point digits] [e [sign] digits]` form,
/// or an alphabetic word such as `inf` or `nan`. The locale's decimal point
/// is normalised to `.`.
fn read_float_text(spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<String> {
    if !matches!(spec.kind, None | Some('f' | 'F' | 'e' | 'E' | 'g' | 'G')) {
        return Err(ScanError::new(
            ErrorKind::InvalidFormatString,
            "invalid conversion type for a float",
        ));
    }
    cx.skip_ws()?;
    let point = cx.locale.decimal_point();

    let mut text = String::new();
    let mut r = Limited::new(cx, spec.width);
    if let Some(sign) = r.eat_if(|c| c == '+' || c == '-')? {
        text.push(sign);
    }

    let mut mantissa = r.eat_while(&mut text, |c| c.is_ascii_alphabetic())?;
    if mantissa == 0 {
        mantissa = r.eat_while(&mut text, |c| c.is_ascii_digit())?;
        if r.eat_if(|c| c == point)?.is_some() {
            text.push('.');
            mantissa += r.eat_while(&mut text, |c| c.is_ascii_digit())?;
        }
        if mantissa > 0 && r.eat_if(|c| c == 'e' || c == 'E')?.is_some() {
            text.push('e');
            if let Some(sign) = r.eat_if(|c| c == '+' || c == '-')? {
                text.push(sign);
            }
            r.eat_while(&mut text, |c| c.is_ascii_digit())?;
        }
    }

    if mantissa == 0 {
        return Err(nothing_read(cx, "expected a floating-point number")?);
    }
    Ok(text)
}

macro_rules! scan_float {
    ($($ty:ty),*) => {
        $(
            impl Scan for $ty {
                fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
                    let text = read_float_text(spec, cx)?;
                    *self = text.parse::<$ty>().map_err(|_| {
                        ScanError::new(ErrorKind::InvalidScannedValue, "invalid floating-point number")
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

scan_float!(f32, f64);

/// `true`/`false` or `1`/`0`.
impl Scan for bool {
    fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
        cx.skip_ws()?;
        let word = cx.read_while(spec.width, |c| c.is_ascii_alphanumeric())?;
        *self = match word.as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            "" => return Err(nothing_read(cx, "expected a boolean")?),
            _ => {
                return Err(ScanError::new(
                    ErrorKind::InvalidScannedValue,
                    "expected `true`, `false`, `1` or `0`",
                ));
            }
        };
        Ok(())
    }
}

/// One character, whitespace included.
impl Scan for char {
    fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
        if !matches!(spec.kind, None | Some('c')) {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "invalid conversion type for a character",
            ));
        }
        *self = cx.read_char()?;
        Ok(())
    }
}

/// A whitespace-delimited word.
impl Scan for String {
    fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
        if !matches!(spec.kind, None | Some('s')) {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "invalid conversion type for a string",
            ));
        }
        cx.skip_ws()?;
        *self = cx.read_word(spec.width)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        locale::{Locale, LocaleRef},
        options::ScanOptions,
        stream::SliceStream,
    };

    fn scan_one<T: Scan + Default>(input: &str, spec: ScanSpec) -> (Result<T>, usize) {
        scan_with(input, spec, ScanOptions::default())
    }

    fn scan_with<T: Scan + Default>(
        input: &str,
        spec: ScanSpec,
        options: ScanOptions<'_>,
    ) -> (Result<T>, usize) {
        let mut stream = SliceStream::new(input);
        let mut cx = ScanCx {
            stream: &mut stream,
            locale: options.locale,
            options: &options,
        };
        let mut value = T::default();
        let res = value.scan(&spec, &mut cx).map(|()| value);
        (res, stream.chars_read())
    }

    fn kind(k: char) -> ScanSpec {
        ScanSpec {
            width: None,
            kind: Some(k),
        }
    }

    #[rstest]
    #[case("42", ScanSpec::default(), 42, 2)]
    #[case("  -17 rest", ScanSpec::default(), -17, 5)]
    #[case("+8", ScanSpec::default(), 8, 2)]
    #[case("ff", kind('x'), 255, 2)]
    #[case("0x1F", kind('x'), 31, 4)]
    #[case("0x1F", kind('i'), 31, 4)]
    #[case("017", kind('i'), 15, 3)]
    #[case("0b101", kind('i'), 5, 5)]
    #[case("0", kind('i'), 0, 1)]
    #[case("777", kind('o'), 511, 3)]
    #[case("1101", kind('b'), 13, 4)]
    #[case("12345", ScanSpec { width: Some(3), kind: None }, 123, 3)]
    #[case("19z", ScanSpec::default(), 19, 2)]
    fn scans_i64(
        #[case] input: &str,
        #[case] spec: ScanSpec,
        #[case] expected: i64,
        #[case] consumed: usize,
    ) {
        let (got, read) = scan_one::<i64>(input, spec);
        assert_eq!(got.unwrap(), expected);
        assert_eq!(read, consumed);
    }

    #[rstest]
    #[case("300", ErrorKind::ValueOutOfRange)]
    #[case("-1", ErrorKind::InvalidScannedValue)]
    #[case("abc", ErrorKind::InvalidScannedValue)]
    #[case("   ", ErrorKind::EndOfStream)]
    #[case("", ErrorKind::EndOfStream)]
    fn u8_errors(#[case] input: &str, #[case] expected: ErrorKind) {
        let (got, _) = scan_one::<u8>(input, ScanSpec::default());
        assert_eq!(got.unwrap_err().kind(), expected);
    }

    #[test]
    fn signed_underflow_is_out_of_range() {
        let (got, _) = scan_one::<i8>("-129", ScanSpec::default());
        assert_eq!(got.unwrap_err().kind(), ErrorKind::ValueOutOfRange);
    }

    #[test]
    fn integer_rejects_float_conversion() {
        let (got, read) = scan_one::<i32>("1", kind('f'));
        assert_eq!(got.unwrap_err().kind(), ErrorKind::InvalidFormatString);
        assert_eq!(read, 0);
    }

    #[rstest]
    #[case("3.25", 3.25)]
    #[case("-0.5e2", -50.0)]
    #[case("1e3x", 1000.0)]
    #[case(".5", 0.5)]
    #[case("7", 7.0)]
    fn scans_f64(#[case] input: &str, #[case] expected: f64) {
        let (got, _) = scan_one::<f64>(input, ScanSpec::default());
        assert!((got.unwrap() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn float_words() {
        let (got, _) = scan_one::<f64>("inf", ScanSpec::default());
        assert!(got.unwrap().is_infinite());
        let (got, _) = scan_one::<f32>("NaN", ScanSpec::default());
        assert!(got.unwrap().is_nan());
        let (got, _) = scan_one::<f64>("bogus", ScanSpec::default());
        assert_eq!(got.unwrap_err().kind(), ErrorKind::InvalidScannedValue);
    }

    struct CommaLocale;

    impl Locale for CommaLocale {
        fn is_space(&self, ch: char) -> bool {
            ch == ' '
        }

        fn decimal_point(&self) -> char {
            ','
        }
    }

    #[test]
    fn float_uses_locale_decimal_point() {
        let options = ScanOptions {
            locale: LocaleRef::new(&CommaLocale),
            ..Default::default()
        };
        let (got, read) = scan_with::<f64>("2,5.", ScanSpec::default(), options);
        assert!((got.unwrap() - 2.5).abs() < f64::EPSILON);
        assert_eq!(read, 3);
    }

    #[rstest]
    #[case("true", true)]
    #[case("0", false)]
    #[case("  1", true)]
    fn scans_bool(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(scan_one::<bool>(input, ScanSpec::default()).0.unwrap(), expected);
    }

    #[test]
    fn bool_rejects_other_words() {
        let (got, _) = scan_one::<bool>("yes", ScanSpec::default());
        assert_eq!(got.unwrap_err().kind(), ErrorKind::InvalidScannedValue);
    }

    #[test]
    fn char_does_not_skip_whitespace() {
        let (got, read) = scan_one::<char>(" x", ScanSpec::default());
        assert_eq!(got.unwrap(), ' ');
        assert_eq!(read, 1);
    }

    #[test]
    fn string_reads_one_word_within_width() {
        let (got, _) = scan_one::<String>("  hello world", ScanSpec::default());
        assert_eq!(got.unwrap(), "hello");
        let (got, read) = scan_one::<String>("abcdef", ScanSpec { width: Some(4), kind: Some('s') });
        assert_eq!(got.unwrap(), "abcd");
        assert_eq!(read, 4);
    }
}
