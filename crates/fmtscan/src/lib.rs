//! Format-driven input scanning: the inverse of `format!`.
//!
//! A format is walked by a [`FormatCursor`] ([`BraceCursor`] for `{}`
//! templates, [`PercentCursor`] for `scanf` templates, [`PositionalCursor`]
//! for no template at all). [`vscan`] drives the cursor against a
//! [`Stream`], matching literal text and scanning each directive into the
//! argument a [`BindingContext`] resolves for it.
//!
//! ```rust
//! use fmtscan::{SliceStream, args, scan};
//!
//! let mut name = String::new();
//! let mut age = 0u8;
//! let mut input = SliceStream::new("ada is 36");
//! scan(&mut input, "{} is {}", &args![&mut name, &mut age]).unwrap();
//! assert_eq!((name.as_str(), age), ("ada", 36));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod arg;
mod builtin;
mod context;
mod cursor;
mod error;
mod locale;
mod options;
mod spec;
mod stream;
mod vscan;


pub use arg::{
    Arg, ArgMap, ArgSlot, ArgStore, ArgType, ArgValue, Args, CustomArg, IntoArgSlot, NamedArg,
    Scan, Scannable, arg,
};
pub use context::{ArgIndexing, BindingContext, ScanCx};
pub use cursor::{ArgId, BraceCursor, Cursor, FormatCursor, PercentCursor, PositionalCursor};
pub use error::{ErrorKind, Result, ScanError};
pub use locale::{ClassicLocale, Locale, LocaleRef, UnicodeLocale};
pub use options::{Method, ScanOptions};
pub use spec::ScanSpec;
pub use stream::{SliceStream, Stream};
pub use vscan::{scan, scan_default, scan_with, scanf, vscan};
