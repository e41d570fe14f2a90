use super::{ArgId, FormatCursor, skip_chars};
use crate::{
    error::{ErrorKind, Result, ScanError},
    locale::LocaleRef,
};

/// Cursor over a `{}`-style template.
///
/// `{{` and `}}` stand for literal braces. A directive is `{`, an optional id
/// or name, an optional `:spec`, and a closing `}`.
#[derive(Debug, Clone)]
pub struct BraceCursor<'f> {
    rest: &'f str,
}

impl<'f> BraceCursor<'f> {
    #[must_use]
    pub fn new(format: &'f str) -> Self {
        Self { rest: format }
    }

    #[inline]
    fn peek2(&self) -> (Option<char>, Option<char>) {
        let mut chars = self.rest.chars();
        (chars.next(), chars.next())
    }
}

const UNTERMINATED: ScanError = ScanError::new(
    ErrorKind::InvalidFormatString,
    "Unexpected end of format argument",
);

impl<'f> FormatCursor<'f> for BraceCursor<'f> {
    #[inline]
    fn good(&self) -> bool {
        !self.rest.is_empty()
    }

    fn advance(&mut self, n: usize) {
        assert!(self.good(), "advance on an exhausted format cursor");
        self.rest = skip_chars(self.rest, n);
    }

    fn next(&self) -> char {
        let Some(ch) = self.rest.chars().next() else {
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
        match self.peek2() {
            (Some('{'), Some('{')) | (Some('}'), Some('}')) => {
                self.advance(1);
                true
            }
            (Some('{'), _) => false,
            // A lone `}` is matched as itself.
            _ => true,
        }
    }

    #[inline]
    fn check_literal(&self, ch: char) -> bool {
        self.good() && self.next() == ch
    }

    #[inline]
    fn check_arg_begin(&self, _locale: LocaleRef<'_>) -> bool {
        self.good() && self.next() == '{'
    }

    #[inline]
    fn check_arg_end(&self, _locale: LocaleRef<'_>) -> bool {
        self.good() && self.next() == '}'
    }

    fn arg_begin(&mut self) {}

    fn arg_end(&mut self) {}

    fn arg_handled(&mut self) {}

    fn parse_arg_id(&mut self, _locale: LocaleRef<'_>) -> Result<ArgId<'f>> {
        debug_assert!(self.check_arg_begin(LocaleRef::classic()));
        self.advance(1);
        if !self.good() {
            return Err(UNTERMINATED);
        }

        let token = self.rest;
        for (i, ch) in token.char_indices() {
            let has_spec = match ch {
                '}' => false,
                ':' => true,
                _ => continue,
            };
            self.rest = &token[i + 1..];
            return Ok(ArgId {
                id: &token[..i],
                has_spec,
            });
        }

        self.rest = &token[token.len()..];
        Err(UNTERMINATED)
    }

    #[inline]
    fn view(&self) -> &'f str {
        self.rest
    }
}
