use crate::locale::LocaleRef;

/// Number-parsing algorithm requested by the caller.
///
/// The engine never interprets this; it is handed to scanners through
/// [`ScanCx::options`](crate::ScanCx).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Use `core`'s parsing (`from_str_radix`, `str::parse`).
    #[default]
    Standard,
    /// Leave the choice to a custom scanner.
    Custom,
}

/// Configuration for one scan call.
///
/// # Examples
///
/// ```rust
/// use fmtscan::{LocaleRef, Method, ScanOptions, UnicodeLocale};
///
/// let options = ScanOptions {
///     locale: LocaleRef::new(&UnicodeLocale),
///     float_method: Method::Custom,
///     ..Default::default()
/// };
/// assert_eq!(options.int_method, Method::Standard);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'l> {
    /// Method for integer scanners.
    ///
    /// # Default
    ///
    /// [`Method::Standard`]
    pub int_method: Method,

    /// Method for floating-point scanners.
    ///
    /// # Default
    ///
    /// [`Method::Standard`]
    pub float_method: Method,

    /// Character classification for format whitespace and input.
    ///
    /// # Default
    ///
    /// The classic ASCII locale.
    pub locale: LocaleRef<'l>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on scan errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}
