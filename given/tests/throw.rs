// vim: tw=80
//! Cases that raise an error instead of returning a value
#![deny(warnings)]

use given::{*, matcher::*};
use pretty_assertions::assert_eq;
use std::{error::Error, fmt, io};

#[derive(Clone, Debug, Default, PartialEq)]
struct NotFound;

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("not found")
    }
}

impl Error for NotFound {}

#[derive(Debug, PartialEq)]
enum StoreError {
    NotFound,
}

impl From<NotFound> for StoreError {
    fn from(_: NotFound) -> Self {
        StoreError::NotFound
    }
}

#[test]
fn throws_value() {
    let mut given = Given::<u32, NotFound>::new();
    given.given(("one",)).returns(1)
        .given(("two",)).throws(NotFound);
    assert_eq!(Ok(1), given.try_call(("one",)));
    assert_eq!(Err(NotFound), given.try_call(("two",)));
    assert_eq!(Err(NotFound), given.try_call(("two",)));
}

#[test]
fn throws_kind() {
    let mut given = Given::<u32, Box<dyn Error + Send + Sync>>::new();
    given.given((1,)).returns(2)
        .given((3,)).throws_kind::<NotFound>();
    assert_eq!(2, given.try_call((1,)).unwrap());
    let e = given.try_call((3,)).unwrap_err();
    assert!(e.is::<NotFound>());
    assert_eq!("not found", e.to_string());
}

/// An error type that isn't `Clone` can still be raised by kind
#[test]
fn throws_kind_into_other_type() {
    let mut given = Given::<(), StoreError>::new();
    given.given((gt(10u32),)).throws_kind::<NotFound>();
    assert_eq!(Err(StoreError::NotFound), given.try_call((11u32,)));
    assert_eq!(Err(StoreError::NotFound), given.try_call((12u32,)));
    assert_eq!(Some(2), given.times_called(1));
}

#[test]
fn throw_kind_via_throws() {
    let mut given = Given::<u32, NotFound>::new();
    given.given((1,)).throws(Throw::kind::<NotFound>());
    assert_eq!(Err(NotFound), given.try_call((1,)));
}

#[test]
fn throws_error_kind() {
    let mut given = Given::<u32, NotFound>::new();
    given.given((1,)).throws(ErrorKind::of::<NotFound>());
    assert_eq!(Err(NotFound), given.try_call((1,)));
}

#[test]
fn dispatch_reports_thrown() {
    let mut given = Given::<u32, NotFound>::named("Store::get");
    given.given(("key",)).throws(NotFound);
    let r = given.dispatch(&Call::new("Store::get", ("key",)));
    assert_eq!(Some(NotFound), r.unwrap_err().thrown());
}

#[test]
fn thrown_is_error_source() {
    let e = DispatchError::Thrown(NotFound);
    assert_eq!("not found", e.to_string());
    assert_eq!("not found", e.source().unwrap().to_string());
}

#[test]
#[should_panic(expected = "Store::get(\"key\") raised NotFound")]
fn call_panics_on_thrown() {
    let mut given = Given::<u32, NotFound>::named("Store::get");
    given.given(("key",)).throws(NotFound);
    given.call(("key",));
}

#[test]
#[should_panic(expected = "Unexpected invocation: Store::get(\"other\")")]
fn try_call_panics_when_unmatched() {
    let mut given = Given::<u32, NotFound>::named("Store::get");
    given.given(("key",)).throws(NotFound);
    let _ = given.try_call(("other",));
}

/// Each case raises its own error
#[test]
fn errors_per_case() {
    let mut given = Given::<u32, StoreError>::new();
    given.given((1,)).returning(|| 10)
        .given((2,)).throws_kind::<NotFound>()
        .otherwise().returns(0);
    assert_eq!(Ok(10), given.try_call((1,)));
    assert_eq!(Err(StoreError::NotFound), given.try_call((2,)));
    assert_eq!(Ok(0), given.try_call((3,)));
}

/// Error types that are neither `Clone` nor `Default` are built by a closure
#[test]
fn throwing_io_error() {
    let mut given = Given::<u32, io::Error>::named("File::read");
    given.given(("present",)).returns(5)
        .given(("gone",)).throwing(|| {
            io::Error::new(io::ErrorKind::NotFound, "gone")
        });
    assert_eq!(5, given.try_call(("present",)).unwrap());
    let e = given.try_call(("gone",)).unwrap_err();
    assert_eq!(io::ErrorKind::NotFound, e.kind());
    assert_eq!("gone", e.to_string());
    // A fresh error for every call
    let e = given.try_call(("gone",)).unwrap_err();
    assert_eq!(io::ErrorKind::NotFound, e.kind());
    assert_eq!(Some(2), given.times_called(2));
}

#[test]
fn throwing_boxed_error() {
    let mut given = Given::<(), Box<dyn Error + Send + Sync>>::new();
    given.otherwise()
        .throwing(|| -> Box<dyn Error + Send + Sync> { Box::new(NotFound) });
    assert!(given.try_call((1,)).unwrap_err().is::<NotFound>());
}
