// vim: tw=80
//! Name integers through a mocked trait, with ordered constraints deciding the
//! returned name
#![deny(warnings)]

use given::{Given, matcher::*};

#[cfg(test)]
use mockall::automock;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Integer(i32);

#[cfg_attr(test, automock)]
pub trait IntegerName {
    fn name(&self, i: Integer) -> String;
}

fn describe(namer: &dyn IntegerName, values: &[i32]) -> Vec<String> {
    values.iter()
        .map(|v| format!("{} is {}", v, namer.name(Integer(*v))))
        .collect()
}

/// Answers through a `Given`, which needs exclusive access to count calls.
struct Guesser(std::sync::Mutex<Given<String>>);

impl IntegerName for Guesser {
    fn name(&self, i: Integer) -> String {
        match self.0.lock() {
            Ok(mut given) => given.call((i,)),
            Err(poisoned) => poisoned.into_inner().call((i,)),
        }
    }
}

fn main() {
    let mut given = Given::<String>::named("IntegerName::name");
    given.given((lt(Integer(6)),)).returns("too small".to_owned())
        .given((gt(Integer(9)),)).returns("too big".to_owned())
        .otherwise().returns("just right".to_owned());
    println!("{}", given);

    let guesser = Guesser(std::sync::Mutex::new(given));
    for line in describe(&guesser, &[5, 7, 10]) {
        println!("{}", line);
    }
}

#[test]
fn mocked() {
    let mut given = Given::<String>::named("IntegerName::name");
    given.given((Integer(6),)).returns("six".to_owned())
        .otherwise().returns("other".to_owned());

    let mut mock = MockIntegerName::new();
    mock.expect_name()
        .returning(move |i| given.call((i,)));

    assert_eq!(vec!["6 is six", "12 is other"], describe(&mock, &[6, 12]));
}
