//! The driving loop and the convenience entry points built on it.

use crate::{
    arg::{ArgMap, ArgStore},
    context::BindingContext,
    cursor::{BraceCursor, FormatCursor, PercentCursor, PositionalCursor},
    error::{ErrorKind, Result, ScanError},
    options::ScanOptions,
    spec::ScanSpec,
    stream::Stream,
};

/// Runs the format held by `ctx` against its stream.
///
/// Format whitespace skips any amount of input whitespace, literal text must
/// match the input exactly, and each directive resolves one argument and
/// scans into it. Directive ids are read as: empty for the next implicit
/// argument, all digits for an explicit index, anything else for a name.
///
/// Returns the number of arguments scanned. The first error stops the scan;
/// arguments scanned before it keep their new values.
///
/// # Errors
///
/// Format errors, argument resolution errors and anything a scanner reports.
pub fn vscan<'f, S: Stream, C: FormatCursor<'f>>(
    ctx: &mut BindingContext<'_, '_, '_, '_, S, C>,
) -> Result<usize> {
    let result = drive(ctx);
    if let Err(err) = &result {
        log::debug!(
            "scan stopped: {err}; unparsed format {:?}",
            ctx.cursor().view()
        );
        #[cfg(any(test, feature = "fuzzing"))]
        if ctx.options().panic_on_error {
            panic!("scan error: {err}");
        }
    }
    result
}

fn drive<'f, S: Stream, C: FormatCursor<'f>>(
    ctx: &mut BindingContext<'_, '_, '_, '_, S, C>,
) -> Result<usize> {
    let locale = ctx.locale();
    let mut names: Option<ArgMap<'_, '_>> = None;
    let mut scanned = 0;

    while ctx.cursor().good() {
        if ctx.cursor_mut().should_skip_whitespace(locale) {
            ctx.scan_cx().skip_ws()?;
            continue;
        }

        if ctx.cursor_mut().should_read_literal(locale) {
            let ch = ctx.scan_cx().read_char()?;
            if !ctx.cursor().check_literal(ch) {
                log::trace!("literal {:?} does not match input {ch:?}", ctx.cursor().next());
                ctx.scan_cx().putback(ch)?;
                return Err(ScanError::new(
                    ErrorKind::InvalidScannedValue,
                    "Unexpected literal character",
                ));
            }
            ctx.cursor_mut().advance(1);
            continue;
        }

        if !ctx.cursor().check_arg_begin(locale) {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "expected a directive",
            ));
        }
        ctx.cursor_mut().arg_begin();
        if !ctx.cursor().good() {
            return Err(ScanError::new(
                ErrorKind::InvalidFormatString,
                "Unexpected end of format string",
            ));
        }

        let id = ctx.cursor_mut().parse_arg_id(locale)?;
        let arg = if id.is_empty() {
            ctx.next_arg()?
        } else if let Some(index) = id.as_index() {
            ctx.arg(index)?
        } else {
            let found = ctx.arg_by_name(id.id)?;
            if found.is_empty() {
                let map = match names {
                    Some(ref map) => map,
                    None => &*names.insert(ArgMap::new(ctx.args())?),
                };
                map.find(id.id)?
            } else {
                found
            }
        };
        if arg.is_empty() {
            return Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "no argument left for directive",
            ));
        }

        let spec = if id.has_spec {
            let spec = ScanSpec::parse(ctx.cursor_mut(), locale)?;
            ctx.cursor_mut().arg_end();
            ctx.cursor_mut().advance(1);
            spec
        } else {
            ScanSpec::default()
        };

        log::trace!("directive {:?} {spec:?} -> {:?}", id.id, arg.arg_type());
        arg.scan(&spec, &mut ctx.scan_cx())?;
        ctx.cursor_mut().arg_handled();
        scanned += 1;
    }

    Ok(scanned)
}

/// Scans `stream` against a `{}`-style format.
///
/// ```rust
/// use fmtscan::{SliceStream, arg, args, scan};
///
/// let mut host = String::new();
/// let mut port = 0u16;
/// let mut input = SliceStream::new("example.org:8080");
/// let n = scan(&mut input, "{host}:{port}", &args![arg("host", &mut host), arg("port", &mut port)]);
/// assert!(n.is_err()); // `{host}` reads a whole word, colon included
///
/// let mut input = SliceStream::new("example.org 8080");
/// let n = scan(&mut input, "{host} {port}", &args![arg("host", &mut host), arg("port", &mut port)]);
/// assert_eq!(n.unwrap(), 2);
/// assert_eq!((host.as_str(), port), ("example.org", 8080));
/// ```
///
/// # Errors
///
/// See [`vscan`].
pub fn scan<S: Stream>(stream: &mut S, format: &str, args: &ArgStore<'_>) -> Result<usize> {
    let mut ctx = BindingContext::new(stream, BraceCursor::new(format), args.args());
    vscan(&mut ctx)
}

/// Scans `stream` against a `scanf`-style format.
///
/// ```rust
/// use fmtscan::{SliceStream, args, scanf};
///
/// let (mut a, mut b) = (0u32, 0u32);
/// let mut input = SliceStream::new("ff 17");
/// assert_eq!(scanf(&mut input, "%x %o", &args![&mut a, &mut b]).unwrap(), 2);
/// assert_eq!((a, b), (255, 15));
/// ```
///
/// # Errors
///
/// See [`vscan`].
pub fn scanf<S: Stream>(stream: &mut S, format: &str, args: &ArgStore<'_>) -> Result<usize> {
    let mut ctx = BindingContext::new(stream, PercentCursor::new(format), args.args());
    vscan(&mut ctx)
}

/// Scans one whitespace-separated value per argument, without a format.
///
/// # Errors
///
/// See [`vscan`].
pub fn scan_default<S: Stream>(stream: &mut S, args: &ArgStore<'_>) -> Result<usize> {
    let mut ctx = BindingContext::new(stream, PositionalCursor::new(args.len()), args.args());
    vscan(&mut ctx)
}

/// Scans with an explicit cursor and options.
///
/// # Errors
///
/// See [`vscan`].
pub fn scan_with<'f, S: Stream, C: FormatCursor<'f>>(
    stream: &mut S,
    cursor: C,
    args: &ArgStore<'_>,
    options: ScanOptions<'_>,
) -> Result<usize> {
    let mut ctx = BindingContext::with_options(stream, cursor, args.args(), options);
    vscan(&mut ctx)
}
