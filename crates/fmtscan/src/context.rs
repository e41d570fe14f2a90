//! Binding context: one scan call's stream, cursor, locale, options and
//! arguments.

use alloc::string::String;

use crate::{
    arg::{Arg, Args},
    cursor::FormatCursor,
    error::{ErrorKind, Result, ScanError},
    locale::LocaleRef,
    options::{Method, ScanOptions},
    stream::Stream,
};

/// Which addressing mode a format has committed to.
///
/// The first request, implicit (`{}`) or explicit (`{0}`), locks the mode
/// for the rest of the parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgIndexing {
    #[default]
    Unset,
    Implicit {
        next: usize,
    },
    Explicit,
}

impl ArgIndexing {
    /// Hands out the next implicit index.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] once an explicit index was requested.
    pub fn next_id(&mut self) -> Result<usize> {
        match *self {
            ArgIndexing::Unset => {
                *self = ArgIndexing::Implicit { next: 1 };
                Ok(0)
            }
            ArgIndexing::Implicit { next } => {
                *self = ArgIndexing::Implicit { next: next + 1 };
                Ok(next)
            }
            ArgIndexing::Explicit => Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "cannot switch from explicit to implicit argument indexing",
            )),
        }
    }

    /// Locks explicit mode.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] once an implicit index was handed out.
    pub fn check_explicit(&mut self) -> Result<()> {
        match *self {
            ArgIndexing::Unset | ArgIndexing::Explicit => {
                *self = ArgIndexing::Explicit;
                Ok(())
            }
            ArgIndexing::Implicit { .. } => Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "cannot switch from implicit to explicit argument indexing",
            )),
        }
    }
}

/// What a [`Scan`](crate::Scan) implementation gets to work with.
pub struct ScanCx<'c, 'l> {
    pub stream: &'c mut dyn Stream,
    pub locale: LocaleRef<'l>,
    pub options: &'c ScanOptions<'l>,
}

impl ScanCx<'_, '_> {
    /// # Errors
    ///
    /// [`ErrorKind::EndOfStream`] when the input is exhausted.
    #[inline]
    pub fn read_char(&mut self) -> Result<char> {
        self.stream.read_char()
    }

    /// Like [`read_char`](Self::read_char), with exhaustion as `None`.
    ///
    /// # Errors
    ///
    /// Stream errors other than [`ErrorKind::EndOfStream`].
    pub fn next_char(&mut self) -> Result<Option<char>> {
        match self.stream.read_char() {
            Ok(ch) => Ok(Some(ch)),
            Err(e) if e.kind() == ErrorKind::EndOfStream => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// Whatever the stream reports for an invalid put-back.
    #[inline]
    pub fn putback(&mut self, ch: char) -> Result<()> {
        self.stream.putback(ch)
    }

    /// Skips input whitespace. Running out of input is not an error here.
    ///
    /// # Errors
    ///
    /// Stream errors other than [`ErrorKind::EndOfStream`].
    pub fn skip_ws(&mut self) -> Result<()> {
        while let Some(ch) = self.next_char()? {
            if !self.locale.is_space(ch) {
                return self.putback(ch);
            }
        }
        Ok(())
    }

    /// Reads up to `width` characters while `pred` holds, leaving the first
    /// rejected character in the stream.
    ///
    /// # Errors
    ///
    /// Stream errors other than [`ErrorKind::EndOfStream`].
    pub fn read_while(
        &mut self,
        width: Option<usize>,
        mut pred: impl FnMut(char) -> bool,
    ) -> Result<String> {
        let mut out = String::new();
        let mut left = width.unwrap_or(usize::MAX);
        while left > 0 {
            let Some(ch) = self.next_char()? else { break };
            if !pred(ch) {
                self.putback(ch)?;
                break;
            }
            out.push(ch);
            left -= 1;
        }
        Ok(out)
    }

    /// Reads a run of non-whitespace characters.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfStream`] if the input is exhausted before any
    /// character is read.
    pub fn read_word(&mut self, width: Option<usize>) -> Result<String> {
        let locale = self.locale;
        let word = self.read_while(width, |ch| !locale.is_space(ch))?;
        if word.is_empty() {
            return Err(ScanError::new(ErrorKind::EndOfStream, "expected a word"));
        }
        Ok(word)
    }
}

/// Coordinates the stream, a format cursor, locale, options and the
/// argument list for one scan call.
///
/// The stream is exclusively borrowed for the context's lifetime; the cursor
/// and options are owned; the locale and argument list are `Copy` views.
///
/// ```rust
/// use fmtscan::{BindingContext, BraceCursor, SliceStream, args, vscan};
///
/// let mut x = 0i32;
/// let mut y = 0i32;
/// let store = args![&mut x, &mut y];
/// let mut input = SliceStream::new("3,4");
/// let mut ctx = BindingContext::new(&mut input, BraceCursor::new("{},{}"), store.args());
/// assert_eq!(vscan(&mut ctx).unwrap(), 2);
/// drop(ctx);
/// drop(store);
/// assert_eq!((x, y), (3, 4));
/// ```
#[derive(Debug)]
pub struct BindingContext<'s, 'l, 'r, 'a, S, C> {
    stream: &'s mut S,
    cursor: C,
    locale: LocaleRef<'l>,
    options: ScanOptions<'l>,
    args: Args<'r, 'a>,
    indexing: ArgIndexing,
}

impl<'s, 'l, 'r, 'a, S: Stream, C> BindingContext<'s, 'l, 'r, 'a, S, C> {
    /// A context with default options and the classic locale.
    pub fn new(stream: &'s mut S, cursor: C, args: Args<'r, 'a>) -> Self {
        Self::with_options(stream, cursor, args, ScanOptions::default())
    }

    /// A context whose locale is taken from `options`.
    pub fn with_options(
        stream: &'s mut S,
        cursor: C,
        args: Args<'r, 'a>,
        options: ScanOptions<'l>,
    ) -> Self {
        Self {
            stream,
            cursor,
            locale: options.locale,
            options,
            args,
            indexing: ArgIndexing::Unset,
        }
    }

    pub fn stream(&mut self) -> &mut S {
        self.stream
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    pub fn locale(&self) -> LocaleRef<'l> {
        self.locale
    }

    pub fn options(&self) -> &ScanOptions<'l> {
        &self.options
    }

    pub fn int_method(&self) -> Method {
        self.options.int_method
    }

    pub fn float_method(&self) -> Method {
        self.options.float_method
    }

    pub fn args(&self) -> Args<'r, 'a> {
        self.args
    }

    pub fn indexing(&self) -> ArgIndexing {
        self.indexing
    }

    /// The view handed to per-type scanners.
    pub fn scan_cx(&mut self) -> ScanCx<'_, 'l> {
        ScanCx {
            stream: &mut *self.stream,
            locale: self.locale,
            options: &self.options,
        }
    }

    /// The argument for the next implicit (`{}`) directive.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if explicit indexing is locked in or
    /// the index is out of range.
    pub fn next_arg(&mut self) -> Result<Arg<'r, 'a>> {
        let id = self.indexing.next_id()?;
        self.lookup(id)
    }

    /// The argument for an explicit (`{id}`) directive.
    ///
    /// An id one past the end resolves to the empty handle; anything
    /// further out is an error.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if implicit indexing is locked in or
    /// `id` is out of range.
    pub fn arg(&mut self, id: usize) -> Result<Arg<'r, 'a>> {
        self.indexing.check_explicit()?;
        self.lookup(id)
    }

    /// The argument for a named (`{name}`) directive.
    ///
    /// Always the empty handle: names are resolved a layer up, through an
    /// [`ArgMap`](crate::ArgMap).
    ///
    /// # Errors
    ///
    /// None at this layer.
    pub fn arg_by_name(&mut self, _name: &str) -> Result<Arg<'r, 'a>> {
        Ok(Arg::empty())
    }

    fn lookup(&self, id: usize) -> Result<Arg<'r, 'a>> {
        let arg = self.args.get(id);
        if arg.is_empty() && !id.checked_sub(1).is_some_and(|prev| self.args.check_id(prev)) {
            return Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "Argument id out of range",
            ));
        }
        Ok(arg)
    }

    /// The same stream, cursor, locale and options over a different argument
    /// list. Argument indexing starts afresh.
    pub fn rebind<'r2, 'a2>(self, args: Args<'r2, 'a2>) -> BindingContext<'s, 'l, 'r2, 'a2, S, C> {
        BindingContext {
            stream: self.stream,
            cursor: self.cursor,
            locale: self.locale,
            options: self.options,
            args,
            indexing: ArgIndexing::Unset,
        }
    }

    /// A short-lived context over `args` that reborrows this context's stream
    /// and starts from a copy of its cursor.
    pub fn nested<'n, 'r2, 'a2>(
        &'n mut self,
        args: Args<'r2, 'a2>,
    ) -> BindingContext<'n, 'l, 'r2, 'a2, S, C>
    where
        C: Clone,
    {
        BindingContext {
            stream: &mut *self.stream,
            cursor: self.cursor.clone(),
            locale: self.locale,
            options: self.options,
            args,
            indexing: ArgIndexing::Unset,
        }
    }

    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<'f, S: Stream, C: FormatCursor<'f>> BindingContext<'_, '_, '_, '_, S, C> {
    /// The unconsumed part of the format, for diagnostics.
    pub fn remaining_format(&self) -> &'f str {
        self.cursor.view()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        args,
        cursor::{BraceCursor, PositionalCursor},
        stream::SliceStream,
    };

    #[test]
    fn implicit_then_explicit_fails() {
        let (mut a, mut b) = (0i32, 0i32);
        let store = args![&mut a, &mut b];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new(""), store.args());
        assert!(!ctx.next_arg().unwrap().is_empty());
        let err = ctx.arg(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn explicit_then_implicit_fails() {
        let (mut a, mut b) = (0i32, 0i32);
        let store = args![&mut a, &mut b];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new(""), store.args());
        assert_eq!(ctx.arg(1).unwrap().arg_type(), Some(crate::ArgType::I32));
        assert_eq!(ctx.indexing(), ArgIndexing::Explicit);
        let err = ctx.next_arg().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[rstest]
    #[case(0, Some(false))]
    #[case(1, Some(false))]
    #[case(2, Some(true))]
    #[case(3, None)]
    #[case(5, None)]
    fn explicit_lookup_bounds(#[case] id: usize, #[case] empty: Option<bool>) {
        let (mut a, mut b) = (0u8, String::new());
        let store = args![&mut a, &mut b];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new(""), store.args());
        match (ctx.arg(id), empty) {
            (Ok(arg), Some(expected)) => assert_eq!(arg.is_empty(), expected),
            (Err(err), None) => assert_eq!(err.kind(), ErrorKind::InvalidArgument),
            (got, expected) => panic!("id {id}: got {got:?}, expected {expected:?}"),
        }
    }

    #[test]
    fn implicit_runs_off_the_end_into_empty_handle() {
        let mut a = 0u8;
        let store = args![&mut a];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, PositionalCursor::new(1), store.args());
        assert!(!ctx.next_arg().unwrap().is_empty());
        assert!(ctx.next_arg().unwrap().is_empty());
        assert_eq!(ctx.next_arg().unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn no_args_explicit_zero_is_out_of_range() {
        let store = args![];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new(""), store.args());
        assert_eq!(ctx.arg(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn name_lookup_is_empty_at_this_layer() {
        let mut a = 0u8;
        let store = args![crate::arg("a", &mut a)];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new(""), store.args());
        assert!(ctx.arg_by_name("a").unwrap().is_empty());
        assert_eq!(ctx.indexing(), ArgIndexing::Unset);
    }

    #[test]
    fn rebind_keeps_cursor_and_resets_indexing() {
        let mut a = 0u8;
        let mut b = 0u8;
        let first = args![&mut a];
        let second = args![&mut b];
        let mut input = SliceStream::new("");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new("{} tail"), first.args());
        ctx.next_arg().unwrap();
        ctx.cursor_mut().advance(2);
        let mut ctx = ctx.rebind(second.args());
        assert_eq!(ctx.remaining_format(), " tail");
        assert_eq!(ctx.indexing(), ArgIndexing::Unset);
        assert_eq!(ctx.arg(0).unwrap().arg_type(), Some(crate::ArgType::U8));
    }

    #[test]
    fn nested_context_shares_stream() {
        let mut a = 0u8;
        let store = args![&mut a];
        let mut input = SliceStream::new("xy");
        let mut ctx = BindingContext::new(&mut input, BraceCursor::new("{}"), store.args());
        {
            let mut inner = ctx.nested(Args::empty());
            assert_eq!(inner.stream().read_char().unwrap(), 'x');
            assert!(inner.args().is_empty());
        }
        assert_eq!(ctx.stream().read_char().unwrap(), 'y');
        assert_eq!(ctx.remaining_format(), "{}");
    }
}
