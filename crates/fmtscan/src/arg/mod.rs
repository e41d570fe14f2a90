//! Type-erased scan targets.
//!
//! Callers hand the engine a heterogeneous list of `&mut T` output
//! locations. Each one is captured as an [`ArgValue`], a tagged union of
//! typed references, inside an [`ArgSlot`]. The engine only ever sees
//! [`Arg`] handles: `Copy` views of a slot that know how to dispatch to the
//! right [`Scan`] implementation.
//!
//! Slots keep their value in a `RefCell` so that handles can be copied out of
//! a [`BindingContext`](crate::BindingContext) and scanned while the context
//! itself is mutably borrowed for its stream.

mod named;

#[cfg(test)]
mod tests;

use alloc::{string::String, vec::Vec};
use core::{any::Any, cell::RefCell, fmt};

pub use named::{ArgMap, NamedArg, arg};

use crate::{
    context::ScanCx,
    error::{ErrorKind, Result, ScanError},
    spec::ScanSpec,
};

/// The per-type scanner contract.
///
/// `spec` is the already parsed directive sub-spec; `cx` gives access to the
/// input stream, locale and options.
pub trait Scan {
    /// Reads a value from `cx` into `self`.
    ///
    /// # Errors
    ///
    /// Any [`ScanError`]; scanners report malformed input as
    /// [`ErrorKind::InvalidScannedValue`] and overflow as
    /// [`ErrorKind::ValueOutOfRange`].
    fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()>;
}

/// A user-defined scan target, erased behind a trait object.
///
/// Implemented for every `'static` type that implements [`Scan`]; opt a type
/// into argument lists with [`scannable!`](crate::scannable).
pub trait CustomArg: Scan {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn type_name(&self) -> &'static str;
}

impl<T: Scan + Any> CustomArg for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// Types that can be passed as scan targets.
pub trait Scannable {
    /// Captures a typed reference to `self`.
    fn as_arg(&mut self) -> ArgValue<'_>;
}

macro_rules! builtin_args {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Runtime tag of an [`ArgValue`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ArgType {
            $($variant,)*
            Custom,
        }

        /// A typed mutable reference to one caller-owned scan target.
        pub enum ArgValue<'a> {
            $($variant(&'a mut $ty),)*
            Custom(&'a mut dyn CustomArg),
        }

        impl<'a> ArgValue<'a> {
            #[must_use]
            pub fn arg_type(&self) -> ArgType {
                match self {
                    $(ArgValue::$variant(_) => ArgType::$variant,)*
                    ArgValue::Custom(_) => ArgType::Custom,
                }
            }

            fn scan(&mut self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
                match self {
                    $(ArgValue::$variant(v) => v.scan(spec, cx),)*
                    ArgValue::Custom(c) => c.scan(spec, cx),
                }
            }

            pub(crate) fn into_any(self) -> &'a mut dyn Any {
                match self {
                    $(ArgValue::$variant(v) => v,)*
                    ArgValue::Custom(c) => c.as_any_mut(),
                }
            }
        }

        $(
            impl Scannable for $ty {
                #[inline]
                fn as_arg(&mut self) -> ArgValue<'_> {
                    ArgValue::$variant(self)
                }
            }
        )*
    };
}

builtin_args! {
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
    Bool => bool,
    Char => char,
    String => String,
}

impl fmt::Debug for ArgValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Custom(c) => f.debug_tuple("Custom").field(&c.type_name()).finish(),
            other => f.debug_tuple("ArgValue").field(&other.arg_type()).finish(),
        }
    }
}

/// Implements [`Scannable`] for a type that implements [`Scan`], making it
/// usable as a scan target.
///
/// ```rust
/// use fmtscan::{Result, Scan, ScanCx, ScanSpec, scannable};
///
/// struct Flag(bool);
///
/// impl Scan for Flag {
///     fn scan(&mut self, _spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
///         self.0 = cx.read_char()? == 'y';
///         Ok(())
///     }
/// }
///
/// scannable!(Flag);
/// ```
#[macro_export]
macro_rules! scannable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Scannable for $ty {
                fn as_arg(&mut self) -> $crate::ArgValue<'_> {
                    $crate::ArgValue::Custom(self)
                }
            }
        )+
    };
}

/// One entry of an argument list: an optional name and the erased target.
#[derive(Debug)]
pub struct ArgSlot<'a> {
    name: Option<&'a str>,
    ty: ArgType,
    value: RefCell<ArgValue<'a>>,
}

impl<'a> ArgSlot<'a> {
    fn new(name: Option<&'a str>, value: ArgValue<'a>) -> Self {
        Self {
            name,
            ty: value.arg_type(),
            value: RefCell::new(value),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    #[must_use]
    pub fn arg_type(&self) -> ArgType {
        self.ty
    }
}

/// Conversion into an [`ArgSlot`]: `&mut T` for positional targets and
/// [`NamedArg`] for named ones.
pub trait IntoArgSlot<'a> {
    fn into_slot(self) -> ArgSlot<'a>;
}

impl<'a, T: Scannable + ?Sized> IntoArgSlot<'a> for &'a mut T {
    fn into_slot(self) -> ArgSlot<'a> {
        ArgSlot::new(None, self.as_arg())
    }
}

impl<'a> IntoArgSlot<'a> for NamedArg<'a> {
    fn into_slot(self) -> ArgSlot<'a> {
        let (name, value) = self.into_parts();
        ArgSlot::new(Some(name), value)
    }
}

/// Owning list of argument slots.
#[derive(Debug, Default)]
pub struct ArgStore<'a> {
    slots: Vec<ArgSlot<'a>>,
}

impl<'a> ArgStore<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, target: impl IntoArgSlot<'a>) -> &mut Self {
        self.slots.push(target.into_slot());
        self
    }

    /// Shorthand for `push(arg(name, target))`.
    pub fn push_named<T: Scannable + ?Sized>(&mut self, name: &'a str, target: &'a mut T) -> &mut Self {
        self.push(arg(name, target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// A `Copy` view of the slots for one scan call.
    #[must_use]
    pub fn args(&self) -> Args<'_, 'a> {
        Args { slots: &self.slots }
    }
}

/// Builds an [`ArgStore`] from scan targets and named arguments.
///
/// ```rust
/// use fmtscan::{arg, args};
///
/// let mut n = 0u32;
/// let mut word = String::new();
/// let store = args![&mut n, arg("word", &mut word)];
/// assert_eq!(store.len(), 2);
/// ```
///
/// A [`NamedArg`] is not itself a scan target, so it cannot be named again:
///
/// ```compile_fail
/// use fmtscan::arg;
///
/// let mut n = 0u32;
/// let mut inner = arg("n", &mut n);
/// let _ = arg("outer", &mut inner);
/// ```
#[macro_export]
macro_rules! args {
    ( $( $target:expr ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut store = $crate::ArgStore::new();
        $( store.push($target); )*
        store
    }};
}

/// A borrowed view of an argument list, valid for one scan call.
#[derive(Debug, Clone, Copy)]
pub struct Args<'r, 'a> {
    slots: &'r [ArgSlot<'a>],
}

impl<'r, 'a> Args<'r, 'a> {
    /// A view over no arguments.
    #[must_use]
    pub fn empty() -> Self {
        Self { slots: &[] }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The handle for `id`, or the empty handle when out of range.
    #[must_use]
    pub fn get(&self, id: usize) -> Arg<'r, 'a> {
        Arg {
            slot: self.slots.get(id),
        }
    }

    /// Whether `id` addresses an existing argument.
    #[must_use]
    pub fn check_id(&self, id: usize) -> bool {
        id < self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Arg<'r, 'a>> + use<'r, 'a> {
        self.slots.iter().map(|slot| Arg { slot: Some(slot) })
    }
}

/// A non-owning, possibly empty handle to one argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arg<'r, 'a> {
    slot: Option<&'r ArgSlot<'a>>,
}

impl<'r, 'a> Arg<'r, 'a> {
    /// The handle meaning "no such argument".
    #[must_use]
    pub const fn empty() -> Self {
        Self { slot: None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    #[must_use]
    pub fn arg_type(&self) -> Option<ArgType> {
        self.slot.map(ArgSlot::arg_type)
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.slot.and_then(ArgSlot::name)
    }

    /// Scans input into the referenced target.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] for the empty handle,
    /// [`ErrorKind::InvalidOperation`] if the target is already being scanned
    /// further up the stack, and whatever the target's [`Scan`] reports.
    pub fn scan(self, spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
        let Some(slot) = self.slot else {
            return Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "scan through an empty argument handle",
            ));
        };
        let mut value = slot.value.try_borrow_mut().map_err(|_| {
            ScanError::new(
                ErrorKind::InvalidOperation,
                "argument is already being scanned",
            )
        })?;
        value.scan(spec, cx)
    }
}
