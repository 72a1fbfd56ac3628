// vim: tw=80
//! Ordered argument-matching return values for mock objects.
//!
//! A [`Given`] holds a list of *cases*.  Each case is a tuple of per-argument
//! matchers, terminated by exactly one outcome: a value to return, or an error
//! to raise.  When the mocked method is called, the cases are tried in the
//! order they were declared and the first one whose matchers all accept the
//! call's arguments provides the outcome.  A call that matches no case fails
//! the test, with a message listing every declared case.
//!
//! # Usage
//!
//! Declare the cases, then move the `Given` into the mock's return closure.
//! With [Mockall](https://docs.rs/mockall):
//!
//! ```
//! use given::{Given, matcher::*};
//! use mockall::automock;
//!
//! #[derive(Debug, PartialEq, PartialOrd)]
//! struct Integer(i32);
//!
//! #[automock]
//! trait IntegerName {
//!     fn name(&self, i: Integer) -> String;
//! }
//!
//! # fn main() {
//! let mut given = Given::<String>::named("IntegerName::name");
//! given.given((lt(Integer(6)),)).returns("too small".to_owned())
//!     .given((gt(Integer(9)),)).returns("too big".to_owned())
//!     .otherwise().returns("just right".to_owned());
//!
//! let mut mock = MockIntegerName::new();
//! mock.expect_name()
//!     .returning(move |i| given.call((i,)));
//!
//! assert_eq!("too small", mock.name(Integer(5)));
//! assert_eq!("too big", mock.name(Integer(10)));
//! assert_eq!("just right", mock.name(Integer(6)));
//! # }
//! ```
//!
//! ## Matching arguments
//!
//! Every element of the tuple given to [`Given::given`] is either an
//! [`ArgMatcher`], or a plain value.  Plain values are compared by equality
//! with the call's argument, so two distinct but equal values match.  The
//! [`matcher`] module has the stock matchers, and can adapt any
//! [`predicates`](https://docs.rs/predicates) predicate.
//!
//! A case only matches calls with exactly as many arguments as it has
//! matchers.  An argument of a different type than a matcher expects never
//! matches it; literals in particular must have the argument's exact type
//! (`1u32` for a `u32` argument), except for strings, which compare by content.
//!
//! ## First match wins
//!
//! Cases are not ranked: a later case is never considered once an earlier one
//! matched, even if the later one is more specific.
//!
//! ```
//! # use given::{Given, matcher::*};
//! let mut given = Given::<&str>::new();
//! given.given((gt(10),)).returns("big")
//!     .otherwise().returns("small");
//! assert_eq!("big", given.call((20,)));
//! assert_eq!("small", given.call((5,)));
//! ```
//!
//! ## Raising errors
//!
//! A case can raise an error instead of returning a value.  For methods that
//! return a `Result`, use [`try_call`](Given::try_call), which hands the error
//! back as `Err`.  The error can be a value, or an error *kind*: a type that is
//! constructed with `Default` each time the case fires.
//!
//! ```
//! # use given::Given;
//! # use std::{error::Error, fmt};
//! #[derive(Debug, Default)]
//! struct NotFound;
//! impl fmt::Display for NotFound {
//!     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
//!         f.write_str("not found")
//!     }
//! }
//! impl Error for NotFound {}
//!
//! let mut given = Given::<u32, Box<dyn Error + Send + Sync>>::new();
//! given.given(("one",)).returns(1)
//!     .given(("two",)).throws_kind::<NotFound>();
//! assert_eq!(1, given.try_call(("one",)).unwrap());
//! let e = given.try_call(("two",)).unwrap_err();
//! assert!(e.is::<NotFound>());
//! ```
//!
//! ## Sequencing
//!
//! Every case must be terminated with exactly one of `returns`, `returning`,
//! `throws` or `throwing` before the next one is declared.  Misuse panics
//! immediately; the `try_` methods report it as a [`SequencingError`] instead.

use fragile::Fragile;
use std::{
    convert::Infallible,
    fmt::{self, Debug, Display},
};
use tracing::{debug, trace};

pub mod argument;
pub mod error;
pub mod matcher;

pub use argument::{Argument, Call, IntoArguments, Invocation};
pub use error::{
    DispatchError,
    ErrorKind,
    Mismatch,
    SequencingError,
    Throw,
    UnmatchedInvocation
};
pub use matcher::{ArgMatcher, IntoMatcher, IntoMatchers};

/// Produces the outcome of a case, each time it matches
enum Outcome<O, E> {
    Return(Box<dyn FnMut() -> O + Send>),
    Throw(Box<dyn FnMut() -> E + Send>),
}

struct Case<O, E> {
    matchers: Vec<Box<dyn ArgMatcher>>,
    outcome: Option<Outcome<O, E>>,
    /// How many invocations has this case answered?
    calls: usize,
}

impl<O, E> Case<O, E> {
    fn new(matchers: Vec<Box<dyn ArgMatcher>>) -> Self {
        Case { matchers, outcome: None, calls: 0 }
    }

    fn matches(matchers: &[Box<dyn ArgMatcher>], args: &[&dyn Argument])
        -> bool
    {
        matchers.len() == args.len() &&
            matchers.iter().zip(args).all(|(m, arg)| m.matches(*arg))
    }

    fn mismatch(&self, args: &[&dyn Argument]) -> String {
        if self.matchers.len() != args.len() {
            return format!("expected {} arguments, got {}",
                self.matchers.len(), args.len());
        }
        self.matchers.iter()
            .zip(args)
            .enumerate()
            .filter_map(|(i, (m, arg))| {
                m.explain(*arg).map(|why| format!("argument {}: {}", i, why))
            }).collect::<Vec<_>>()
            .join("\n")
    }
}

impl<O, E> Display for Case<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let matchers = self.matchers.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "[ {} ]", matchers.join(", "))
    }
}

#[track_caller]
fn or_panic<T>(r: Result<T, SequencingError>) -> T {
    match r {
        Ok(t) => t,
        Err(e) => panic!("{}", e)
    }
}

/// Ordered argument-matching cases for a single mocked method.
///
/// `O` is the type of the returned values and `E` the type of the raised
/// errors.  See the [crate documentation](crate) for an overview.
pub struct Given<O, E = Infallible> {
    name: Option<String>,
    cases: Vec<Case<O, E>>,
}

impl<O, E> Given<O, E> {
    /// Create an empty `Given`.
    pub fn new() -> Self {
        Given { name: None, cases: Vec::new() }
    }

    /// Create an empty `Given` for the method `name`.
    ///
    /// The name is only used to render calls in failure messages.
    pub fn named(name: impl Into<String>) -> Self {
        Given { name: Some(name.into()), cases: Vec::new() }
    }

    /// Declare a new case.
    ///
    /// `matchers` is a tuple with one element per argument of the mocked
    /// method.  Each element is either an [`ArgMatcher`] or a plain value,
    /// compared by equality.
    ///
    /// A plain value only matches arguments of its exact type, so write
    /// integer literals with the argument's suffix: a case declared with `1`
    /// (an `i32`) never matches a `u32` argument, but `1u32` does.
    ///
    /// ```
    /// # use given::Given;
    /// let mut given = Given::<&str>::new();
    /// given.given((1u32,)).returns("one");
    /// assert_eq!("one", given.call((1u32,)));
    /// ```
    ///
    /// # Panics
    ///
    /// If the previous case was not terminated.  See
    /// [`try_given`](#method.try_given).
    #[track_caller]
    pub fn given<M: IntoMatchers>(&mut self, matchers: M) -> &mut Self {
        or_panic(self.try_given(matchers))
    }

    /// Declare a new case, or fail with [`SequencingError::Unterminated`] if
    /// the previous case has no outcome yet.
    pub fn try_given<M: IntoMatchers>(&mut self, matchers: M)
        -> Result<&mut Self, SequencingError>
    {
        if let Some(case) = self.cases.last() {
            if case.outcome.is_none() {
                return Err(SequencingError::Unterminated);
            }
        }
        self.cases.push(Case::new(matchers.into_matchers()));
        Ok(self)
    }

    /// Declare a case matching any single argument.
    ///
    /// Shortcut for `given((anything(),))`.  Usually the last case.
    #[track_caller]
    pub fn otherwise(&mut self) -> &mut Self {
        or_panic(self.try_otherwise())
    }

    /// Like [`otherwise`](#method.otherwise), but reports misuse as a
    /// [`SequencingError`].
    pub fn try_otherwise(&mut self) -> Result<&mut Self, SequencingError> {
        self.try_given((matcher::anything(),))
    }

    fn set_outcome(&mut self, outcome: Outcome<O, E>)
        -> Result<&mut Self, SequencingError>
    {
        let case = self.cases.last_mut().ok_or(SequencingError::NoCase)?;
        match (&case.outcome, &outcome) {
            (None, _) => (),
            (Some(Outcome::Return(_)), Outcome::Return(_)) =>
                return Err(SequencingError::ReturnTwice),
            (Some(Outcome::Throw(_)), Outcome::Return(_)) =>
                return Err(SequencingError::ReturnAfterThrow),
            (Some(Outcome::Throw(_)), Outcome::Throw(_)) =>
                return Err(SequencingError::ThrowTwice),
            (Some(Outcome::Return(_)), Outcome::Throw(_)) =>
                return Err(SequencingError::ThrowAfterReturn),
        }
        case.outcome = Some(outcome);
        Ok(self)
    }

    /// Terminate the current case with a value, cloned for every matching
    /// call.
    ///
    /// # Panics
    ///
    /// If the current case already has an outcome, or if no case was declared.
    #[track_caller]
    pub fn returns(&mut self, value: O) -> &mut Self
        where O: Clone + Send + 'static
    {
        or_panic(self.try_returns(value))
    }

    /// Like [`returns`](#method.returns), but reports misuse as a
    /// [`SequencingError`].
    pub fn try_returns(&mut self, value: O)
        -> Result<&mut Self, SequencingError>
        where O: Clone + Send + 'static
    {
        self.set_outcome(Outcome::Return(Box::new(move || value.clone())))
    }

    /// Terminate the current case with a closure that computes the returned
    /// value.  Useful for return types that aren't `Clone`.
    #[track_caller]
    pub fn returning<F>(&mut self, f: F) -> &mut Self
        where F: FnMut() -> O + Send + 'static
    {
        or_panic(self.try_returning(f))
    }

    /// Like [`returning`](#method.returning), but reports misuse as a
    /// [`SequencingError`].
    pub fn try_returning<F>(&mut self, f: F)
        -> Result<&mut Self, SequencingError>
        where F: FnMut() -> O + Send + 'static
    {
        self.set_outcome(Outcome::Return(Box::new(f)))
    }

    /// Single-threaded version of [`returns`](#method.returns), for values
    /// that aren't `Send`.
    ///
    /// It is a runtime error to call the mocked method from a different thread
    /// than the one that called `returns_st`.
    #[track_caller]
    pub fn returns_st(&mut self, value: O) -> &mut Self
        where O: Clone + 'static
    {
        let fragile = Fragile::new(value);
        let f = move || fragile.get().clone();
        or_panic(self.set_outcome(Outcome::Return(Box::new(f))))
    }

    /// Single-threaded version of [`returning`](#method.returning).
    ///
    /// It is a runtime error to call the mocked method from a different thread
    /// than the one that called `returning_st`.
    #[track_caller]
    pub fn returning_st<F>(&mut self, f: F) -> &mut Self
        where F: FnMut() -> O + 'static, O: 'static
    {
        let mut fragile = Fragile::new(f);
        let fmut = move || (fragile.get_mut())();
        or_panic(self.set_outcome(Outcome::Return(Box::new(fmut))))
    }

    /// Terminate the current case with an error.
    ///
    /// `error` is either an error value, cloned for every matching call, or an
    /// error kind (see [`Throw::kind`]).
    ///
    /// # Panics
    ///
    /// If the current case already has an outcome, or if no case was declared.
    #[track_caller]
    pub fn throws<T>(&mut self, error: T) -> &mut Self
        where T: Into<Throw<E>>,
              E: Clone + Send + 'static
    {
        or_panic(self.try_throws(error))
    }

    /// Like [`throws`](#method.throws), but reports misuse as a
    /// [`SequencingError`].
    pub fn try_throws<T>(&mut self, error: T)
        -> Result<&mut Self, SequencingError>
        where T: Into<Throw<E>>,
              E: Clone + Send + 'static
    {
        let make: Box<dyn FnMut() -> E + Send> = match error.into() {
            Throw::Error(e) => Box::new(move || e.clone()),
            Throw::Kind(kind) => Box::new(move || kind.make()),
        };
        self.set_outcome(Outcome::Throw(make))
    }

    /// Terminate the current case with a closure that builds the raised
    /// error.  Useful for error types that are neither `Clone` nor built with
    /// `Default`, like [`std::io::Error`].
    ///
    /// ```
    /// # use given::Given;
    /// use std::io;
    ///
    /// let mut given = Given::<u32, io::Error>::new();
    /// given.given(("gone",)).throwing(|| {
    ///     io::Error::new(io::ErrorKind::NotFound, "gone")
    /// });
    /// let e = given.try_call(("gone",)).unwrap_err();
    /// assert_eq!(io::ErrorKind::NotFound, e.kind());
    /// ```
    ///
    /// # Panics
    ///
    /// If the current case already has an outcome, or if no case was declared.
    #[track_caller]
    pub fn throwing<F>(&mut self, f: F) -> &mut Self
        where F: FnMut() -> E + Send + 'static
    {
        or_panic(self.try_throwing(f))
    }

    /// Like [`throwing`](#method.throwing), but reports misuse as a
    /// [`SequencingError`].
    pub fn try_throwing<F>(&mut self, f: F)
        -> Result<&mut Self, SequencingError>
        where F: FnMut() -> E + Send + 'static
    {
        self.set_outcome(Outcome::Throw(Box::new(f)))
    }

    /// Terminate the current case with an error of kind `K`, built with
    /// `K::default()` each time the case matches.
    ///
    /// Unlike [`throws`](#method.throws), `E` need not be `Clone`.
    #[track_caller]
    pub fn throws_kind<K>(&mut self) -> &mut Self
        where K: Default + Into<E>,
              E: 'static
    {
        let kind = ErrorKind::of::<K>();
        or_panic(self.set_outcome(Outcome::Throw(Box::new(move || kind.make()))))
    }

    /// Simulate a call to the mocked method.
    ///
    /// Cases are tried in declaration order.  The first one whose matchers
    /// accept `invocation`'s arguments produces the outcome: `Ok` for a
    /// returned value, [`DispatchError::Thrown`] for a raised error.
    pub fn dispatch<I>(&mut self, invocation: &I) -> Result<O, DispatchError<E>>
        where I: Invocation + ?Sized
    {
        let args = invocation.arguments();

        for (i, case) in self.cases.iter_mut().enumerate() {
            let Case { matchers, outcome, calls } = case;
            let outcome = outcome.as_mut()
                .ok_or(SequencingError::Unterminated)?;
            if !Case::<O, E>::matches(matchers, &args) {
                continue;
            }
            *calls += 1;
            trace!(case = i + 1, calls = *calls, %invocation, "case matched");
            return match outcome {
                Outcome::Return(f) => Ok(f()),
                Outcome::Throw(f) => Err(DispatchError::Thrown(f())),
            };
        }

        let mismatches = self.cases.iter()
            .enumerate()
            .map(|(i, case)| Mismatch {
                case: i + 1,
                reason: case.mismatch(&args)
            }).collect();
        let unmatched = UnmatchedInvocation::new(invocation.to_string(),
            self.describe(), mismatches);
        debug!(%invocation, cases = self.cases.len(), "no case matched");
        Err(unmatched.into())
    }

    fn invocation<A: IntoArguments>(&self, args: A) -> Call {
        match &self.name {
            Some(name) => Call::new(name.clone(), args),
            None => Call::anonymous(args)
        }
    }

    /// Simulate a call to a mocked method returning a `Result`.
    ///
    /// A raised error is returned as `Err`.
    ///
    /// # Panics
    ///
    /// If no case matches `args`, or if the last case has no outcome.
    #[track_caller]
    pub fn try_call<A: IntoArguments>(&mut self, args: A) -> Result<O, E> {
        let call = self.invocation(args);
        match self.dispatch(&call) {
            Ok(o) => Ok(o),
            Err(DispatchError::Thrown(e)) => Err(e),
            Err(DispatchError::Unmatched(u)) => panic!("{:#}", u),
            Err(DispatchError::Sequencing(s)) => panic!("{}", s),
        }
    }

    /// Simulate a call to the mocked method.
    ///
    /// # Panics
    ///
    /// If no case matches `args`, if the matching case raises an error, or if
    /// the last case has no outcome.
    #[track_caller]
    pub fn call<A: IntoArguments>(&mut self, args: A) -> O
        where E: Debug
    {
        let call = self.invocation(args);
        match self.dispatch(&call) {
            Ok(o) => o,
            Err(DispatchError::Thrown(e)) => panic!("{} raised {:?}", call, e),
            Err(DispatchError::Unmatched(u)) => panic!("{:#}", u),
            Err(DispatchError::Sequencing(s)) => panic!("{}", s),
        }
    }

    /// Render every declared case's matchers.
    ///
    /// ```
    /// # use given::{Given, matcher::*};
    /// let mut given = Given::<i32>::new();
    /// given.given((gt(13), anything())).returns(1)
    ///     .otherwise().returns(2);
    /// assert_eq!("[ [ is greater than 13, is anything ], [ is anything ] ]",
    ///     given.describe());
    /// ```
    pub fn describe(&self) -> String {
        let cases = self.cases.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        format!("[ {} ]", cases.join(", "))
    }

    /// How many calls has the 1-based case `case` answered?
    ///
    /// Returns `None` if there is no such case.
    pub fn times_called(&self, case: usize) -> Option<usize> {
        let i = case.checked_sub(1)?;
        self.cases.get(i).map(|case| case.calls)
    }

    /// The number of declared cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Have no cases been declared yet?
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<O, E> Default for Given<O, E> {
    fn default() -> Self {
        Given::new()
    }
}

impl<O, E> Display for Given<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<O, E> Debug for Given<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Given")
            .field("name", &self.name)
            .field("cases", &self.describe())
            .finish()
    }
}
