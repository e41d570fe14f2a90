use core::fmt;

/// Character classification used while interpreting formats and input.
pub trait Locale {
    fn is_space(&self, ch: char) -> bool;

    fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    /// Separator between the integral and fractional part of a float.
    fn decimal_point(&self) -> char {
        '.'
    }
}

/// The "C" locale: only the six ASCII whitespace characters count as space.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicLocale;

impl Locale for ClassicLocale {
    #[inline]
    fn is_space(&self, ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
    }
}

/// Treats any Unicode `White_Space` character as space.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeLocale;

impl Locale for UnicodeLocale {
    #[inline]
    fn is_space(&self, ch: char) -> bool {
        ch.is_whitespace()
    }
}

/// Cheap-to-copy view of a [`Locale`].
///
/// The default view classifies like [`ClassicLocale`] without borrowing
/// anything.
#[derive(Clone, Copy, Default)]
pub struct LocaleRef<'l> {
    inner: Option<&'l dyn Locale>,
}

impl<'l> LocaleRef<'l> {
    #[must_use]
    pub const fn classic() -> Self {
        Self { inner: None }
    }

    #[must_use]
    pub fn new(locale: &'l dyn Locale) -> Self {
        Self {
            inner: Some(locale),
        }
    }

    #[must_use]
    pub const fn is_classic(&self) -> bool {
        self.inner.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_space(&self, ch: char) -> bool {
        match self.inner {
            Some(loc) => loc.is_space(ch),
            None => ClassicLocale.is_space(ch),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_digit(&self, ch: char) -> bool {
        match self.inner {
            Some(loc) => loc.is_digit(ch),
            None => ClassicLocale.is_digit(ch),
        }
    }

    #[inline]
    #[must_use]
    pub fn decimal_point(&self) -> char {
        match self.inner {
            Some(loc) => loc.decimal_point(),
            None => ClassicLocale.decimal_point(),
        }
    }
}

impl fmt::Debug for LocaleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleRef")
            .field("classic", &self.is_classic())
            .finish()
    }
}
