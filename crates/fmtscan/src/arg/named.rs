use alloc::collections::BTreeMap;

use super::{Arg, ArgType, ArgValue, Args, Scannable};
use crate::error::{ErrorKind, Result, ScanError};

/// A scan target addressed by name.
///
/// The target is captured once, at construction, as a tagged [`ArgValue`].
/// Reading it back as a concrete type goes through [`NamedArg::downcast`],
/// which checks the runtime type instead of trusting the caller.
#[derive(Debug)]
pub struct NamedArg<'a> {
    name: &'a str,
    value: ArgValue<'a>,
}

/// Binds `name` to `target` for name-addressed directives such as `{word}`.
///
/// ```rust
/// use fmtscan::{ArgType, arg};
///
/// let mut port = 0u16;
/// let named = arg("port", &mut port);
/// assert_eq!(named.name(), "port");
/// assert_eq!(named.arg_type(), ArgType::U16);
/// ```
pub fn arg<'a, T: Scannable + ?Sized>(name: &'a str, target: &'a mut T) -> NamedArg<'a> {
    NamedArg {
        name,
        value: target.as_arg(),
    }
}

impl<'a> NamedArg<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn arg_type(&self) -> ArgType {
        self.value.arg_type()
    }

    /// Recovers the typed reference the argument was built from.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if `T` is not the captured type.
    pub fn downcast<T: 'static>(self) -> Result<&'a mut T> {
        let any = self.value.into_any();
        any.downcast_mut::<T>().ok_or(ScanError::new(
            ErrorKind::InvalidArgument,
            "named argument reconstructed as the wrong type",
        ))
    }

    pub(crate) fn into_parts(self) -> (&'a str, ArgValue<'a>) {
        (self.name, self.value)
    }
}

/// Name index over an argument list.
///
/// Only slots built from [`NamedArg`]s are indexed; positional slots stay
/// reachable by index alone.
#[derive(Debug, Clone)]
pub struct ArgMap<'r, 'a> {
    args: Args<'r, 'a>,
    index: BTreeMap<&'a str, usize>,
}

impl<'r, 'a> ArgMap<'r, 'a> {
    /// Indexes the named slots of `args`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if two arguments share a name.
    pub fn new(args: Args<'r, 'a>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (id, slot) in args.slots.iter().enumerate() {
            let Some(name) = slot.name else { continue };
            if index.insert(name, id).is_some() {
                return Err(ScanError::new(
                    ErrorKind::InvalidArgument,
                    "duplicate argument name",
                ));
            }
        }
        Ok(Self { args, index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The handle for `name`, or the empty handle.
    #[must_use]
    pub fn get(&self, name: &str) -> Arg<'r, 'a> {
        match self.index.get(name) {
            Some(&id) => self.args.get(id),
            None => Arg::empty(),
        }
    }

    /// Like [`get`](Self::get) but treats a missing name as an error.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidArgument`] if no argument has that name.
    pub fn find(&self, name: &str) -> Result<Arg<'r, 'a>> {
        let arg = self.get(name);
        if arg.is_empty() {
            return Err(ScanError::new(
                ErrorKind::InvalidArgument,
                "no argument with that name",
            ));
        }
        Ok(arg)
    }
}
