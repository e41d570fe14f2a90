use crate::{
    cursor::FormatCursor,
    error::{ErrorKind, Result, ScanError},
    locale::LocaleRef,
};

/// The type-specific part of a directive: `{:5x}` or `%5lx`.
///
/// Grammar: an optional decimal width, any number of C length modifiers
/// (`h l L q j z t`, accepted and ignored) and an optional alphabetic
/// conversion type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSpec {
    /// Maximum number of characters the scanner may consume.
    pub width: Option<usize>,
    /// Conversion type character, if any.
    pub kind: Option<char>,
}

const LENGTH_MODIFIERS: &[char] = &['h', 'l', 'L', 'q', 'j', 'z', 't'];

impl ScanSpec {
    /// Reads a sub-spec from `cursor`, stopping where the cursor reports the
    /// end of the directive. The cursor is left at that boundary.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidFormatString`] for a zero or oversized width, an
    /// unexpected character, or a format that ends inside the directive.
    pub fn parse<'f, C: FormatCursor<'f> + ?Sized>(
        cursor: &mut C,
        locale: LocaleRef<'_>,
    ) -> Result<Self> {
        let mut spec = ScanSpec::default();

        let mut width: Option<usize> = None;
        while cursor.good() && !cursor.check_arg_end(locale) {
            let Some(d) = cursor.next().to_digit(10) else { break };
            let w = width
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|w| w.checked_add(d as usize))
                .ok_or(ScanError::new(ErrorKind::InvalidFormatString, "width too large"))?;
            width = Some(w);
            cursor.advance(1);
        }
        if width == Some(0) {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "width must be positive",
            ));
        }
        spec.width = width;

        while cursor.good()
            && !cursor.check_arg_end(locale)
            && LENGTH_MODIFIERS.contains(&cursor.next())
        {
            cursor.advance(1);
        }

        if cursor.good() && !cursor.check_arg_end(locale) && cursor.next().is_alphabetic() {
            spec.kind = Some(cursor.next());
            cursor.advance(1);
        }

        if cursor.check_arg_end(locale) {
            return Ok(spec);
        }
        if !cursor.good() {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "Unexpected end of format string",
            ));
        }
        Err(ScanError::new(
            ErrorKind::InvalidFormatString,
            "unexpected character in format specifier",
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::cursor::{BraceCursor, PercentCursor};

    const LOC: LocaleRef<'static> = LocaleRef::classic();

    fn brace_spec(format: &str) -> Result<ScanSpec> {
        let mut c = BraceCursor::new(format);
        let id = c.parse_arg_id(LOC)?;
        assert!(id.has_spec);
        ScanSpec::parse(&mut c, LOC)
    }

    #[rstest]
    #[case("{:}", None, None)]
    #[case("{:d}", None, Some('d'))]
    #[case("{:12x}", Some(12), Some('x'))]
    #[case("{:3}", Some(3), None)]
    #[case("{:lld}", None, Some('d'))]
    fn brace_specs(#[case] format: &str, #[case] width: Option<usize>, #[case] kind: Option<char>) {
        assert_eq!(brace_spec(format).unwrap(), ScanSpec { width, kind });
    }

    #[rstest]
    #[case("{:0d}", "width must be positive")]
    #[case("{:d", "Unexpected end of format string")]
    #[case("{:dd}", "unexpected character in format specifier")]
    #[case("{:99999999999999999999999}", "width too large")]
    fn brace_spec_errors(#[case] format: &str, #[case] msg: &str) {
        let err = brace_spec(format).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormatString);
        assert_eq!(err.msg(), msg);
    }

    #[test]
    fn percent_spec_stops_at_whitespace() {
        let mut c = PercentCursor::new("%5hhu rest");
        c.arg_begin();
        let spec = ScanSpec::parse(&mut c, LOC).unwrap();
        assert_eq!(spec, ScanSpec { width: Some(5), kind: Some('u') });
        assert_eq!(c.view(), " rest");
    }

    #[test]
    fn percent_spec_at_end_of_format() {
        let mut c = PercentCursor::new("%s");
        c.arg_begin();
        let spec = ScanSpec::parse(&mut c, LOC).unwrap();
        assert_eq!(spec.kind, Some('s'));
        assert!(!c.good());
    }
}
