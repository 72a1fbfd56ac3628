// vim: tw=80
//! A Given is Send, so it can be moved into a mock's return closure, even when
//! its values are not.
#![deny(warnings)]

use given::*;
use static_assertions::assert_impl_all;
use std::{cell::Cell, rc::Rc, thread};

assert_impl_all!(Given<u32>: Send);
assert_impl_all!(Given<String, std::io::Error>: Send);
assert_impl_all!(Given<Rc<u32>>: Send);
assert_impl_all!(UnmatchedInvocation: Send, Sync, std::error::Error);
assert_impl_all!(SequencingError: Send, Sync, Copy, std::error::Error);

#[test]
fn returns_st() {
    let mut given = Given::<Rc<u32>>::new();
    given.given((1,)).returns_st(Rc::new(42));
    assert_eq!(42, *given.call((1,)));
    assert_eq!(42, *given.call((1,)));
}

#[test]
fn returning_st() {
    let mut given = Given::<u32>::new();
    let counter = Rc::new(Cell::new(0));
    let c = counter.clone();
    given.otherwise().returning_st(move || {
        c.set(c.get() + 1);
        c.get()
    });
    assert_eq!(1, given.call(("a",)));
    assert_eq!(2, given.call(("b",)));
    assert_eq!(2, counter.get());
}

#[test]
fn moved_to_another_thread() {
    let mut given = Given::<String>::named("Store::get");
    given.given(("key",)).returns("value".to_owned());
    let r = thread::spawn(move || given.call(("key",))).join().unwrap();
    assert_eq!("value", r);
}
