// vim: tw=80
//! Using a Given as the return closure of a Mockall expectation
#![deny(warnings)]

use given::{Given, matcher::*};
use mockall::automock;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Integer(i32);

#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    NotFound,
    Locked,
}

#[automock]
pub trait IntegerName {
    fn name(&self, i: Integer) -> String;
}

#[automock]
pub trait Store {
    fn get(&self, key: &str) -> Result<u32, StoreError>;
    fn contains(&self, key: String, strict: bool) -> bool;
}

#[test]
fn objects_supported() {
    let mut given = Given::<String>::named("IntegerName::name");
    given.given((Integer(6),)).returns("six".to_owned())
        .given((Integer(12),)).returns("twelve".to_owned());

    let mut mock = MockIntegerName::new();
    mock.expect_name()
        .returning(move |i| given.call((i,)));

    assert_eq!("six", mock.name(Integer(6)));
    assert_eq!("twelve", mock.name(Integer(12)));
}

#[test]
fn multiple_constraints() {
    let mut given = Given::<String>::named("IntegerName::name");
    given.given((lt(Integer(6)),)).returns("too small".to_owned())
        .given((gt(Integer(9)),)).returns("too big".to_owned())
        .otherwise().returns("just right".to_owned());

    let mut mock = MockIntegerName::new();
    mock.expect_name()
        .times(4)
        .returning(move |i| given.call((i,)));

    assert_eq!("too small", mock.name(Integer(5)));
    assert_eq!("too big", mock.name(Integer(10)));
    assert_eq!("just right", mock.name(Integer(6)));
    assert_eq!("just right", mock.name(Integer(9)));
}

#[test]
#[should_panic(expected = "Unexpected invocation: IntegerName::name(Integer(3)), \
                           didn't match any of the constraints: \
                           [ [ is equal to Integer(6) ] ]")]
fn unmatched_call_panics() {
    let mut given = Given::<String>::named("IntegerName::name");
    given.given((Integer(6),)).returns("six".to_owned());

    let mut mock = MockIntegerName::new();
    mock.expect_name()
        .returning(move |i| given.call((i,)));

    mock.name(Integer(3));
}

#[test]
fn result_method() {
    let mut given = Given::<u32, StoreError>::named("Store::get");
    given.given(("one",)).returns(1)
        .given(("locked",)).throws(StoreError::Locked)
        .given((str_starts_with("tmp/"),)).throws(StoreError::NotFound);

    let mut mock = MockStore::new();
    mock.expect_get()
        .returning(move |key| given.try_call((key.to_owned(),)));

    assert_eq!(Ok(1), mock.get("one"));
    assert_eq!(Err(StoreError::Locked), mock.get("locked"));
    assert_eq!(Err(StoreError::NotFound), mock.get("tmp/x"));
}

#[test]
fn boolean_method() {
    let mut given = Given::<bool>::named("Store::contains");
    given.given(("yes", is_true())).returns(true)
        .given((str_ends_with("/"), anything())).returns(true)
        .given((anything(), anything())).returns(false);

    let mut mock = MockStore::new();
    mock.expect_contains()
        .returning(move |key, strict| given.call((key, strict)));

    assert!(mock.contains("yes".to_owned(), true));
    assert!(mock.contains("dir/".to_owned(), false));
    assert!(!mock.contains("yes".to_owned(), false));
    assert!(!mock.contains("key".to_owned(), false));
}
