use super::{ArgId, FormatCursor, skip_chars};
use crate::{error::Result, locale::LocaleRef};

/// Cursor over a `scanf`-style template.
///
/// `%%` stands for a literal `%`. A directive starts at `%` and its body runs
/// up to the next whitespace, the next `%`, or the end of the format.
/// Directives carry no ids; arguments are always taken in order.
#[derive(Debug, Clone)]
pub struct PercentCursor<'f> {
    format: &'f str,
    pos: usize,
}

impl<'f> PercentCursor<'f> {
    #[must_use]
    pub fn new(format: &'f str) -> Self {
        Self { format, pos: 0 }
    }

    /// Byte offset of the cursor in the format string.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn rest(&self) -> &'f str {
        &self.format[self.pos..]
    }

    /// Steps back one character. Only `arg_end` does this.
    fn retreat(&mut self) {
        let Some(prev) = self.format[..self.pos].chars().next_back() else {
            panic!("retreat at the start of the format string");
        };
        self.pos -= prev.len_utf8();
    }
}

impl<'f> FormatCursor<'f> for PercentCursor<'f> {
    #[inline]
    fn good(&self) -> bool {
        self.pos < self.format.len()
    }

    fn advance(&mut self, n: usize) {
        assert!(self.good(), "advance on an exhausted format cursor");
        let rest = self.rest();
        self.pos += rest.len() - skip_chars(rest, n).len();
    }

    fn next(&self) -> char {
        let Some(ch) = self.rest().chars().next() else {
            panic!("next() on an exhausted format cursor");
        };
        ch
    }

    fn should_skip_whitespace(&mut self, locale: LocaleRef<'_>) -> bool {
        let mut skipped = false;
        while self.good() && locale.is_space(self.next()) {
            skipped = true;
            self.advance(1);
        }
        skipped
    }

    fn should_read_literal(&mut self, _locale: LocaleRef<'_>) -> bool {
        let mut chars = self.rest().chars();
        match (chars.next(), chars.next()) {
            (Some('%'), Some('%')) => {
                self.advance(1);
                true
            }
            (Some('%'), _) => false,
            _ => true,
        }
    }

    #[inline]
    fn check_literal(&self, ch: char) -> bool {
        self.good() && self.next() == ch
    }

    #[inline]
    fn check_arg_begin(&self, _locale: LocaleRef<'_>) -> bool {
        self.good() && self.next() == '%'
    }

    fn check_arg_end(&self, locale: LocaleRef<'_>) -> bool {
        !self.good() || self.check_arg_begin(locale) || locale.is_space(self.next())
    }

    fn arg_begin(&mut self) {
        self.advance(1);
    }

    /// The end of a directive is only visible one character late; step back
    /// so the body's last character is current again.
    fn arg_end(&mut self) {
        self.retreat();
    }

    fn arg_handled(&mut self) {}

    fn parse_arg_id(&mut self, _locale: LocaleRef<'_>) -> Result<ArgId<'f>> {
        Ok(ArgId {
            id: "",
            has_spec: true,
        })
    }

    #[inline]
    fn view(&self) -> &'f str {
        self.rest()
    }
}
