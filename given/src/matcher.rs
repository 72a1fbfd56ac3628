// vim: tw=80
//! Per-argument matchers.
//!
//! Every position of a case is checked by an [`ArgMatcher`].  Plain values are
//! turned into [`eq`] matchers when a case is declared, everything else comes
//! from the constructors in this module, most of which wrap a
//! [`predicates`](https://docs.rs/predicates) predicate.
//!
//! ```
//! # use given::{Given, matcher::*};
//! let mut given = Given::<&str>::new();
//! given.given((gt(12), is_true(), str_starts_with("y"))).returns("match");
//! assert_eq!("match", given.call((13, true, String::from("yes"))));
//! ```

use predicates::{
    function::FnPredicate,
    ord::{EqPredicate, OrdPredicate},
    prelude::{Predicate, predicate},
    str::{ContainsPredicate, EndsWithPredicate, StartsWithPredicate},
};
use predicates_tree::CaseTreeExt;
use std::{
    any,
    fmt::{self, Display},
};

use crate::argument::Argument;

/// Check a single argument of a call.
pub trait ArgMatcher: Display + Send {
    /// Does `arg` satisfy this matcher?
    fn matches(&self, arg: &dyn Argument) -> bool;

    /// Explain why `arg` does not satisfy this matcher.
    ///
    /// Returns `None` if it does.
    fn explain(&self, arg: &dyn Argument) -> Option<String> {
        if self.matches(arg) {
            None
        } else {
            Some(format!("{:?} is not {}", arg, self))
        }
    }
}

fn type_mismatch<T: ?Sized>(arg: &dyn Argument) -> String {
    format!("expected an argument of type {}, found {:?}",
        any::type_name::<T>(), arg)
}

fn view<T: Argument>(arg: &dyn Argument) -> Option<&T> {
    arg.downcast_ref::<T>().ok()
}

fn view_str(arg: &dyn Argument) -> Option<&str> {
    arg.as_str()
}

/// Equality with an expected value.
///
/// Created by [`eq`], or implicitly from any value given to
/// [`Given::given`](crate::Given::given).  Strings compare by content, so an
/// expected `&'static str` matches a `String` argument and vice versa.
pub struct Eq<T>(T);

impl<T> ArgMatcher for Eq<T>
    where T: Argument + PartialEq + Send
{
    fn matches(&self, arg: &dyn Argument) -> bool {
        match arg.downcast_ref::<T>() {
            Ok(actual) => *actual == self.0,
            Err(_) => match (<dyn Argument>::as_str(&self.0), arg.as_str()) {
                (Some(expected), Some(actual)) => expected == actual,
                _ => false
            }
        }
    }

    fn explain(&self, arg: &dyn Argument) -> Option<String> {
        if self.matches(arg) {
            return None;
        }
        let tree = if let Ok(actual) = arg.downcast_ref::<T>() {
            predicate::eq(&self.0)
                .find_case(false, actual)
                .map(|case| case.tree().to_string())
        } else if let (Some(expected), Some(actual)) =
            (<dyn Argument>::as_str(&self.0), arg.as_str())
        {
            predicate::eq(expected)
                .find_case(false, actual)
                .map(|case| case.tree().to_string())
        } else {
            Some(type_mismatch::<T>(arg))
        };
        tree
    }
}

impl<T: fmt::Debug> Display for Eq<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "is equal to {:?}", self.0)
    }
}

/// Match an argument equal to `expected`.
pub fn eq<T>(expected: T) -> Eq<T>
    where T: Argument + PartialEq + Send
{
    Eq(expected)
}

/// Matches every argument, whatever its type.
pub struct Anything;

impl ArgMatcher for Anything {
    fn matches(&self, _arg: &dyn Argument) -> bool {
        true
    }
}

impl Display for Anything {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("is anything")
    }
}

/// Match any argument.  Used by [`Given::otherwise`](crate::Given::otherwise).
pub fn anything() -> Anything {
    Anything
}

/// Adapts a [`Predicate`] over `T` into an [`ArgMatcher`].
///
/// The argument is first viewed as a `T`; an argument of another type never
/// matches.
pub struct Constraint<T: ?Sized, P> {
    predicate: P,
    description: Option<String>,
    view: fn(&dyn Argument) -> Option<&T>,
}

impl<T: ?Sized, P> Constraint<T, P> {
    /// Replace the description used in failure messages.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<T, P> ArgMatcher for Constraint<T, P>
    where T: ?Sized + 'static,
          P: Predicate<T> + Send
{
    fn matches(&self, arg: &dyn Argument) -> bool {
        (self.view)(arg).map_or(false, |v| self.predicate.eval(v))
    }

    fn explain(&self, arg: &dyn Argument) -> Option<String> {
        let explanation = match (self.view)(arg) {
            Some(v) => self.predicate
                .find_case(false, v)
                .map(|case| case.tree().to_string()),
            None => Some(type_mismatch::<T>(arg))
        };
        explanation
    }
}

impl<T: ?Sized, P: Display> Display for Constraint<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.description {
            Some(description) => f.write_str(description),
            None => Display::fmt(&self.predicate, f)
        }
    }
}

fn typed<T, P>(predicate: P, description: Option<String>) -> Constraint<T, P>
    where T: Argument
{
    Constraint { predicate, description, view: view::<T> }
}

fn untyped_str<P>(predicate: P, description: String) -> Constraint<str, P> {
    Constraint { predicate, description: Some(description), view: view_str }
}

/// Use any [`Predicate`] as a matcher.
///
/// The predicate's own `Display` is used in failure messages, unless replaced
/// with [`Constraint::described_as`].
///
/// ```
/// # use given::{Given, matcher};
/// use predicates::prelude::*;
///
/// let mut given = Given::<u32>::new();
/// given.given((matcher::predicate(predicate::in_iter(vec![1, 2, 3])),))
///     .returns(1);
/// assert_eq!(1, given.call((2,)));
/// ```
pub fn predicate<T, P>(predicate: P) -> Constraint<T, P>
    where T: Argument,
          P: Predicate<T> + Send
{
    typed(predicate, None)
}

/// Use any [`Predicate`] over `str` as a matcher for string arguments.
pub fn str_predicate<P>(predicate: P) -> Constraint<str, P>
    where P: Predicate<str> + Send
{
    Constraint { predicate, description: None, view: view_str }
}

/// Match arguments for which `f` returns `true`.
pub fn function<T, F>(f: F) -> Constraint<T, FnPredicate<F, T>>
    where T: Argument + Send,
          F: Fn(&T) -> bool + Send + 'static
{
    typed(predicate::function(f),
        Some(format!("satisfies a function of {}", any::type_name::<T>())))
}

/// Match an argument not equal to `value`.
pub fn ne<T>(value: T) -> Constraint<T, EqPredicate<T>>
    where T: Argument + PartialEq + Send
{
    let description = format!("is not equal to {:?}", value);
    typed(predicate::ne(value), Some(description))
}

/// Match an argument greater than `value`.
pub fn gt<T>(value: T) -> Constraint<T, OrdPredicate<T>>
    where T: Argument + PartialOrd + Send
{
    let description = format!("is greater than {:?}", value);
    typed(predicate::gt(value), Some(description))
}

/// Match an argument greater than or equal to `value`.
pub fn ge<T>(value: T) -> Constraint<T, OrdPredicate<T>>
    where T: Argument + PartialOrd + Send
{
    let description = format!("is equal to {:?} or is greater than {:?}",
        value, value);
    typed(predicate::ge(value), Some(description))
}

/// Match an argument less than `value`.
pub fn lt<T>(value: T) -> Constraint<T, OrdPredicate<T>>
    where T: Argument + PartialOrd + Send
{
    let description = format!("is less than {:?}", value);
    typed(predicate::lt(value), Some(description))
}

/// Match an argument less than or equal to `value`.
pub fn le<T>(value: T) -> Constraint<T, OrdPredicate<T>>
    where T: Argument + PartialOrd + Send
{
    let description = format!("is equal to {:?} or is less than {:?}",
        value, value);
    typed(predicate::le(value), Some(description))
}

/// Match a `bool` argument that is `true`.
pub fn is_true() -> Constraint<bool, EqPredicate<bool>> {
    typed(predicate::eq(true), Some("is true".to_owned()))
}

/// Match a `bool` argument that is `false`.
pub fn is_false() -> Constraint<bool, EqPredicate<bool>> {
    typed(predicate::eq(false), Some("is false".to_owned()))
}

/// Match string arguments starting with `pattern`.
pub fn str_starts_with(pattern: impl Into<String>)
    -> Constraint<str, StartsWithPredicate>
{
    let pattern = pattern.into();
    let description = format!("starts with {:?}", pattern);
    untyped_str(predicate::str::starts_with(pattern), description)
}

/// Match string arguments ending with `pattern`.
pub fn str_ends_with(pattern: impl Into<String>)
    -> Constraint<str, EndsWithPredicate>
{
    let pattern = pattern.into();
    let description = format!("ends with {:?}", pattern);
    untyped_str(predicate::str::ends_with(pattern), description)
}

/// Match string arguments containing `pattern`.
pub fn str_contains(pattern: impl Into<String>)
    -> Constraint<str, ContainsPredicate>
{
    let pattern = pattern.into();
    let description = format!("contains {:?}", pattern);
    untyped_str(predicate::str::contains(pattern), description)
}

/// Conversion into a boxed [`ArgMatcher`].
///
/// Matchers convert to themselves; any other value becomes an [`eq`] matcher.
pub trait IntoMatcher {
    /// Box this matcher, or wrap this value in an [`eq`] matcher.
    fn into_matcher(self) -> Box<dyn ArgMatcher>;
}

impl<T> IntoMatcher for T
    where T: Argument + PartialEq + Send
{
    fn into_matcher(self) -> Box<dyn ArgMatcher> {
        Box::new(Eq(self))
    }
}

impl<T> IntoMatcher for Eq<T>
    where T: Argument + PartialEq + Send
{
    fn into_matcher(self) -> Box<dyn ArgMatcher> {
        Box::new(self)
    }
}

impl IntoMatcher for Anything {
    fn into_matcher(self) -> Box<dyn ArgMatcher> {
        Box::new(self)
    }
}

impl<T, P> IntoMatcher for Constraint<T, P>
    where T: ?Sized + 'static,
          P: Predicate<T> + Send + 'static
{
    fn into_matcher(self) -> Box<dyn ArgMatcher> {
        Box::new(self)
    }
}

/// Conversion of a tuple of matchers or values into the matchers of a case.
///
/// Implemented for `()`, for tuples of up to ten [`IntoMatcher`]s, and for a
/// `Vec` of already boxed matchers.
pub trait IntoMatchers {
    /// One matcher per argument position, in order.
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>>;
}

impl IntoMatchers for () {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
        Vec::new()
    }
}

impl IntoMatchers for Vec<Box<dyn ArgMatcher>> {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
        self
    }
}

macro_rules! into_matchers {
    ($( ( $( $ty:ident $idx:tt ),+ ) )+) => {
        $(
            impl<$( $ty: IntoMatcher ),+> IntoMatchers for ( $( $ty, )+ ) {
                fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
                    vec![ $( self.$idx.into_matcher() ),+ ]
                }
            }
        )+
    }
}

into_matchers! {
    (M0 0)
    (M0 0, M1 1)
    (M0 0, M1 1, M2 2)
    (M0 0, M1 1, M2 2, M3 3)
    (M0 0, M1 1, M2 2, M3 3, M4 4)
    (M0 0, M1 1, M2 2, M3 3, M4 4, M5 5)
    (M0 0, M1 1, M2 2, M3 3, M4 4, M5 5, M6 6)
    (M0 0, M1 1, M2 2, M3 3, M4 4, M5 5, M6 6, M7 7)
    (M0 0, M1 1, M2 2, M3 3, M4 4, M5 5, M6 6, M7 7, M8 8)
    (M0 0, M1 1, M2 2, M3 3, M4 4, M5 5, M6 6, M7 7, M8 8, M9 9)
}
