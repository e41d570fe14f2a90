use super::{ArgId, FormatCursor};
use crate::{error::Result, locale::LocaleRef};

/// Cursor for format-less scanning of a fixed number of arguments.
///
/// There is no literal text: every position is a directive boundary, and
/// whitespace is skipped before every argument except the first.
#[derive(Debug, Clone)]
pub struct PositionalCursor {
    args_left: usize,
    skip_ws: bool,
}

impl PositionalCursor {
    #[must_use]
    pub fn new(arg_count: usize) -> Self {
        Self {
            args_left: arg_count,
            skip_ws: false,
        }
    }

    #[must_use]
    pub fn args_left(&self) -> usize {
        self.args_left
    }
}

impl<'f> FormatCursor<'f> for PositionalCursor {
    #[inline]
    fn good(&self) -> bool {
        self.args_left > 0
    }

    fn advance(&mut self, _n: usize) {
        debug_assert!(self.good(), "advance on an exhausted format cursor");
    }

    fn next(&self) -> char {
        panic!("a positional cursor has no format characters");
    }

    fn should_skip_whitespace(&mut self, _locale: LocaleRef<'_>) -> bool {
        core::mem::take(&mut self.skip_ws)
    }

    fn should_read_literal(&mut self, _locale: LocaleRef<'_>) -> bool {
        false
    }

    fn check_literal(&self, _ch: char) -> bool {
        false
    }

    fn check_arg_begin(&self, _locale: LocaleRef<'_>) -> bool {
        true
    }

    fn check_arg_end(&self, _locale: LocaleRef<'_>) -> bool {
        true
    }

    fn arg_begin(&mut self) {}

    fn arg_end(&mut self) {}

    fn arg_handled(&mut self) {
        debug_assert!(self.good(), "arg_handled past the last argument");
        self.skip_ws = true;
        self.args_left = self.args_left.saturating_sub(1);
    }

    fn parse_arg_id(&mut self, _locale: LocaleRef<'_>) -> Result<ArgId<'f>> {
        Ok(ArgId::IMPLICIT)
    }

    fn view(&self) -> &'f str {
        ""
    }
}
