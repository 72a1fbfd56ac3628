// vim: tw=80
//! Errors reported by [`Given`](crate::Given), and the errors it raises on
//! behalf of its cases.

use std::{
    any,
    error::Error,
    fmt::{self, Debug, Display},
};

/// Misuse of the `given` / `returns` / `throws` grammar.
///
/// Every case must be terminated by exactly one outcome before the next case
/// is declared.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SequencingError {
    /// A case was declared while the previous one had no outcome yet.
    Unterminated,
    /// The current case already returns a value.
    ReturnTwice,
    /// A return was set on a case that already raises an error.
    ReturnAfterThrow,
    /// The current case already raises an error.
    ThrowTwice,
    /// An error was set on a case that already returns a value.
    ThrowAfterReturn,
    /// An outcome was set before any case was declared.
    NoCase,
}

impl Display for SequencingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            SequencingError::Unterminated =>
                "given should be terminated with one of: return, throw",
            SequencingError::ReturnTwice => "cannot have return twice",
            SequencingError::ReturnAfterThrow => "cannot use return after throw",
            SequencingError::ThrowTwice => "cannot have throw twice",
            SequencingError::ThrowAfterReturn => "cannot have throw after return",
            SequencingError::NoCase => "return and throw must follow a given",
        };
        f.write_str(msg)
    }
}

impl Error for SequencingError {}

/// Why a single case did not match an invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mismatch {
    /// 1-based index of the case, in declaration order.
    pub case: usize,
    /// The arity mismatch, or one explanation per failing argument.
    pub reason: String,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "case {}: {}", self.case, self.reason)
    }
}

/// An invocation that matched none of the declared cases.
///
/// The plain `Display` rendering names the call and every declared case.  The
/// alternate rendering (`{:#}`) also explains, case by case, why each one
/// didn't match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnmatchedInvocation {
    invocation: String,
    cases: String,
    mismatches: Vec<Mismatch>,
}

impl UnmatchedInvocation {
    pub(crate) fn new(invocation: String, cases: String,
                      mismatches: Vec<Mismatch>) -> Self
    {
        UnmatchedInvocation { invocation, cases, mismatches }
    }

    /// The rendered call that didn't match.
    pub fn invocation(&self) -> &str {
        &self.invocation
    }

    /// The rendered list of declared cases.
    pub fn cases(&self) -> &str {
        &self.cases
    }

    /// One explanation per declared case.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}

impl Display for UnmatchedInvocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
            "Unexpected invocation: {}, didn't match any of the constraints: {}",
            self.invocation, self.cases)?;
        if f.alternate() {
            for mismatch in &self.mismatches {
                write!(f, "\n{}", mismatch)?;
            }
        }
        Ok(())
    }
}

impl Error for UnmatchedInvocation {}

/// Why [`Given::dispatch`](crate::Given::dispatch) produced no value.
#[derive(Debug)]
pub enum DispatchError<E> {
    /// The matching case was terminated with a `throws`.
    Thrown(E),
    /// No case matched the invocation.
    Unmatched(UnmatchedInvocation),
    /// A case was still missing its outcome.
    Sequencing(SequencingError),
}

impl<E> DispatchError<E> {
    /// The raised error, if the matching case threw one.
    pub fn thrown(self) -> Option<E> {
        match self {
            DispatchError::Thrown(e) => Some(e),
            _ => None
        }
    }
}

impl<E: Display> Display for DispatchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DispatchError::Thrown(e) => Display::fmt(e, f),
            DispatchError::Unmatched(u) => Display::fmt(u, f),
            DispatchError::Sequencing(s) => Display::fmt(s, f),
        }
    }
}

impl<E: Error + 'static> Error for DispatchError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DispatchError::Thrown(e) => Some(e),
            DispatchError::Unmatched(u) => Some(u),
            DispatchError::Sequencing(s) => Some(s),
        }
    }
}

impl<E> From<UnmatchedInvocation> for DispatchError<E> {
    fn from(u: UnmatchedInvocation) -> Self {
        DispatchError::Unmatched(u)
    }
}

impl<E> From<SequencingError> for DispatchError<E> {
    fn from(s: SequencingError) -> Self {
        DispatchError::Sequencing(s)
    }
}

/// An error type, standing in for the error a case will raise.
///
/// Each time the case fires, a fresh representative error is built from the
/// kind's `Default` value.
pub struct ErrorKind<E> {
    name: &'static str,
    make: fn() -> E,
}

impl<E> ErrorKind<E> {
    /// The kind `K`, converted into `E` when raised.
    pub fn of<K>() -> Self
        where K: Default + Into<E>
    {
        ErrorKind {
            name: any::type_name::<K>(),
            make: || K::default().into(),
        }
    }

    /// Build a representative error of this kind.
    pub fn make(&self) -> E {
        (self.make)()
    }

    /// The type name of the kind.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<E> Clone for ErrorKind<E> {
    fn clone(&self) -> Self {
        ErrorKind { name: self.name, make: self.make }
    }
}

impl<E> Debug for ErrorKind<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ErrorKind").field(&self.name).finish()
    }
}

/// What a case raises: either an error value, or an error kind.
///
/// Error values convert into `Throw` directly, so most code never names this
/// type.
///
/// ```
/// # use given::{Given, Throw};
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct NotFound;
///
/// let mut given = Given::<u32, NotFound>::new();
/// given.given((1,)).throws(NotFound)
///     .given((2,)).throws(Throw::kind::<NotFound>());
/// assert_eq!(Err(NotFound), given.try_call((1,)));
/// assert_eq!(Err(NotFound), given.try_call((2,)));
/// ```
#[derive(Debug)]
pub enum Throw<E> {
    /// An error value, cloned each time it is raised.
    Error(E),
    /// An error kind, built afresh each time it is raised.
    Kind(ErrorKind<E>),
}

impl<E> Throw<E> {
    /// Raise errors of kind `K`, converted into `E`.
    pub fn kind<K>() -> Self
        where K: Default + Into<E>
    {
        Throw::Kind(ErrorKind::of::<K>())
    }
}

impl<E> From<E> for Throw<E> {
    fn from(e: E) -> Self {
        Throw::Error(e)
    }
}

impl<E> From<ErrorKind<E>> for Throw<E> {
    fn from(kind: ErrorKind<E>) -> Self {
        Throw::Kind(kind)
    }
}
