//! Format cursors: position tracking over a format source.
//!
//! Overview
//! - A cursor answers one question at a time for the driving loop: is the
//!   format positioned over whitespace, literal text, or a directive?
//! - Three cursors share the [`FormatCursor`] contract:
//!   [`BraceCursor`] for `{}` templates, [`PercentCursor`] for `%` templates
//!   and [`PositionalCursor`] for scanning a fixed number of arguments
//!   without any format at all.
//! - [`Cursor`] is the sum of the three for callers that pick the style at
//!   runtime.
//!
//! Invariants
//! - Consumption is monotonic. The only backwards step is
//!   [`PercentCursor::arg_end`], which retreats exactly one character to
//!   undo its directive-boundary lookahead.
//! - `advance` and `next` require `good()`; violating that is a bug in the
//!   driving loop and panics.
//!
//! Directive protocol (as run by [`vscan`](crate::vscan))
//! ```text
//! check_arg_begin -> arg_begin -> parse_arg_id
//!     -> [has_spec: spec parse -> check_arg_end -> arg_end -> advance(1)]
//!     -> scan -> arg_handled
//! ```

mod brace;
mod percent;
mod positional;


pub use brace::BraceCursor;
pub use percent::PercentCursor;
pub use positional::PositionalCursor;

use crate::{error::Result, locale::LocaleRef};

/// The id token of a directive, borrowed from the format source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgId<'f> {
    /// Text between the directive opener and its terminator; empty for
    /// implicit addressing.
    pub id: &'f str,
    /// Whether a type-specific sub-spec follows before the directive ends.
    pub has_spec: bool,
}

impl ArgId<'static> {
    pub(crate) const IMPLICIT: Self = ArgId {
        id: "",
        has_spec: false,
    };
}

impl ArgId<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// The token as an explicit numeric index, if it is all ASCII digits.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if self.id.is_empty() || !self.id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.id.parse().ok()
    }
}

/// The state machine every cursor implements.
///
/// `'f` is the lifetime of the format source; id tokens and views borrow from
/// it, not from the cursor, so they stay usable while the cursor moves on.
pub trait FormatCursor<'f> {
    /// True iff more format input remains to interpret.
    fn good(&self) -> bool;

    /// Consumes `n` characters. Panics if not [`good`](Self::good).
    fn advance(&mut self, n: usize);

    /// Peeks the current character. Panics if not [`good`](Self::good).
    fn next(&self) -> char;

    /// Consumes format whitespace and reports whether any was skipped.
    fn should_skip_whitespace(&mut self, locale: LocaleRef<'_>) -> bool;

    /// Whether the cursor sits on literal text. Escape pairs are collapsed
    /// here: the first half is consumed and `true` is returned, leaving the
    /// escaped character current.
    fn should_read_literal(&mut self, locale: LocaleRef<'_>) -> bool;

    /// Whether the current format character equals the input character `ch`.
    fn check_literal(&self, ch: char) -> bool;

    fn check_arg_begin(&self, locale: LocaleRef<'_>) -> bool;

    fn check_arg_end(&self, locale: LocaleRef<'_>) -> bool;

    fn arg_begin(&mut self);

    fn arg_end(&mut self);

    /// Called once an argument has been resolved and scanned.
    fn arg_handled(&mut self);

    /// Reads the explicit id or name token of the directive being entered.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidFormatString`](crate::ErrorKind) when the format
    /// ends before the token is terminated.
    fn parse_arg_id(&mut self, locale: LocaleRef<'_>) -> Result<ArgId<'f>>;

    /// The unconsumed remainder of the format source.
    fn view(&self) -> &'f str;
}

/// Any of the three cursors, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Cursor<'f> {
    Brace(BraceCursor<'f>),
    Percent(PercentCursor<'f>),
    Positional(PositionalCursor),
}

impl<'f> Cursor<'f> {
    #[must_use]
    pub fn brace(format: &'f str) -> Self {
        Cursor::Brace(BraceCursor::new(format))
    }

    #[must_use]
    pub fn percent(format: &'f str) -> Self {
        Cursor::Percent(PercentCursor::new(format))
    }

    #[must_use]
    pub fn positional(arg_count: usize) -> Self {
        Cursor::Positional(PositionalCursor::new(arg_count))
    }
}

impl<'f> From<BraceCursor<'f>> for Cursor<'f> {
    fn from(c: BraceCursor<'f>) -> Self {
        Cursor::Brace(c)
    }
}

impl<'f> From<PercentCursor<'f>> for Cursor<'f> {
    fn from(c: PercentCursor<'f>) -> Self {
        Cursor::Percent(c)
    }
}

impl From<PositionalCursor> for Cursor<'_> {
    fn from(c: PositionalCursor) -> Self {
        Cursor::Positional(c)
    }
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Cursor::Brace($c) => $body,
            Cursor::Percent($c) => $body,
            Cursor::Positional($c) => $body,
        }
    };
}

impl<'f> FormatCursor<'f> for Cursor<'f> {
    fn good(&self) -> bool {
        dispatch!(self, c => c.good())
    }

    fn advance(&mut self, n: usize) {
        dispatch!(self, c => c.advance(n));
    }

    fn next(&self) -> char {
        dispatch!(self, c => c.next())
    }

    fn should_skip_whitespace(&mut self, locale: LocaleRef<'_>) -> bool {
        dispatch!(self, c => c.should_skip_whitespace(locale))
    }

    fn should_read_literal(&mut self, locale: LocaleRef<'_>) -> bool {
        dispatch!(self, c => c.should_read_literal(locale))
    }

    fn check_literal(&self, ch: char) -> bool {
        dispatch!(self, c => c.check_literal(ch))
    }

    fn check_arg_begin(&self, locale: LocaleRef<'_>) -> bool {
        dispatch!(self, c => c.check_arg_begin(locale))
    }

    fn check_arg_end(&self, locale: LocaleRef<'_>) -> bool {
        dispatch!(self, c => c.check_arg_end(locale))
    }

    fn arg_begin(&mut self) {
        dispatch!(self, c => c.arg_begin());
    }

    fn arg_end(&mut self) {
        dispatch!(self, c => c.arg_end());
    }

    fn arg_handled(&mut self) {
        dispatch!(self, c => c.arg_handled());
    }

    fn parse_arg_id(&mut self, locale: LocaleRef<'_>) -> Result<ArgId<'f>> {
        dispatch!(self, c => c.parse_arg_id(locale))
    }

    fn view(&self) -> &'f str {
        dispatch!(self, c => c.view())
    }
}

/// Steps over `n` characters of `s`, panicking if `s` runs out first.
#[inline]
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    let mut chars = s.chars();
    for _ in 0..n {
        assert!(
            chars.next().is_some(),
            "advance past the end of the format string"
        );
    }
    chars.as_str()
}
