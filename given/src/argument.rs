// vim: tw=80
//! Call arguments, as seen by the matchers.
//!
//! A mocked method's arguments have a different type at every position, so
//! matchers see them type-erased as [`Argument`] trait objects and downcast
//! them back to the type they know how to compare.

use downcast::{downcast, Any};
use std::fmt::{self, Debug, Display};

/// A single argument of a mocked call.
///
/// Implemented for every `'static` type that implements [`Debug`].  The
/// `Debug` rendering is what appears in failure messages.
pub trait Argument: Any + Debug + 'static {}

impl<T: Any + Debug + 'static> Argument for T {}

downcast!(dyn Argument);

impl dyn Argument {
    /// View this argument as a string slice, if it is one.
    ///
    /// `String`, `&'static str` and `Box<str>` arguments are all viewed as
    /// `str`, so that string matchers don't care which one the mocked method
    /// takes.
    pub fn as_str(&self) -> Option<&str> {
        if let Ok(s) = self.downcast_ref::<String>() {
            Some(s.as_str())
        } else if let Ok(s) = self.downcast_ref::<&'static str>() {
            Some(s)
        } else if let Ok(s) = self.downcast_ref::<Box<str>>() {
            Some(s)
        } else {
            None
        }
    }
}

/// Conversion of a tuple of values into an ordered list of call arguments.
///
/// Implemented for `()` and for tuples of up to ten [`Argument`]s.  Note that
/// a single argument must still be wrapped in a tuple: `(x,)`.
pub trait IntoArguments {
    /// Box every argument, keeping their order.
    fn into_arguments(self) -> Vec<Box<dyn Argument>>;
}

impl IntoArguments for () {
    fn into_arguments(self) -> Vec<Box<dyn Argument>> {
        Vec::new()
    }
}

impl IntoArguments for Vec<Box<dyn Argument>> {
    fn into_arguments(self) -> Vec<Box<dyn Argument>> {
        self
    }
}

macro_rules! into_arguments {
    ($( ( $( $ty:ident $idx:tt ),+ ) )+) => {
        $(
            impl<$( $ty: Argument ),+> IntoArguments for ( $( $ty, )+ ) {
                fn into_arguments(self) -> Vec<Box<dyn Argument>> {
                    vec![ $( Box::new(self.$idx) as Box<dyn Argument> ),+ ]
                }
            }
        )+
    }
}

into_arguments! {
    (A0 0)
    (A0 0, A1 1)
    (A0 0, A1 1, A2 2)
    (A0 0, A1 1, A2 2, A3 3)
    (A0 0, A1 1, A2 2, A3 3, A4 4)
    (A0 0, A1 1, A2 2, A3 3, A4 4, A5 5)
    (A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6)
    (A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7)
    (A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8)
    (A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9)
}

/// Anything that can be dispatched against a [`Given`](crate::Given).
///
/// An invocation knows its ordered arguments and how to describe itself in a
/// failure message.
pub trait Invocation: Display {
    /// The call's arguments, in declaration order.
    fn arguments(&self) -> Vec<&dyn Argument>;
}

/// A recorded call to a mocked method.
///
/// # Examples
/// ```
/// # use given::Call;
/// let call = Call::new("SampleClass::SampleMethod", (1, true, "no"))
///     .with_return_type("SampleReturnType");
/// assert_eq!(
///     r#"SampleClass::SampleMethod(1, true, "no"): SampleReturnType"#,
///     call.to_string());
/// ```
pub struct Call {
    method: Option<String>,
    args: Vec<Box<dyn Argument>>,
    return_type: Option<String>,
}

impl Call {
    /// A call to the method `method`.
    pub fn new<A>(method: impl Into<String>, args: A) -> Self
        where A: IntoArguments
    {
        Call {
            method: Some(method.into()),
            args: args.into_arguments(),
            return_type: None,
        }
    }

    /// A call to a method whose name is unknown.
    pub fn anonymous<A: IntoArguments>(args: A) -> Self {
        Call {
            method: None,
            args: args.into_arguments(),
            return_type: None,
        }
    }

    /// Render the method's return type after the argument list.
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// The number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Was the method called without arguments?
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl Invocation for Call {
    fn arguments(&self) -> Vec<&dyn Argument> {
        self.args.iter().map(|a| &**a).collect()
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(method) = &self.method {
            f.write_str(method)?;
        }
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", arg)?;
        }
        f.write_str(")")?;
        if let Some(return_type) = &self.return_type {
            write!(f, ": {}", return_type)?;
        }
        Ok(())
    }
}

impl Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.method)
            .field("args", &self.args)
            .field("return_type", &self.return_type)
            .finish()
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn as_str() {
        let owned: Box<dyn Argument> = Box::new(String::from("yes"));
        let borrowed: Box<dyn Argument> = Box::new("yes");
        let boxed: Box<dyn Argument> = Box::new(Box::<str>::from("yes"));
        let number: Box<dyn Argument> = Box::new(42u32);
        assert_eq!(Some("yes"), owned.as_str());
        assert_eq!(Some("yes"), borrowed.as_str());
        assert_eq!(Some("yes"), boxed.as_str());
        assert_eq!(None, number.as_str());
    }

    #[test]
    fn anonymous_display() {
        let call = Call::anonymous((1u8, 'x'));
        assert_eq!("(1, 'x')", call.to_string());
        assert_eq!(2, call.len());
    }

    #[test]
    fn no_arguments() {
        let call = Call::new("Foo::bar", ());
        assert_eq!("Foo::bar()", call.to_string());
        assert!(call.is_empty());
        assert!(call.arguments().is_empty());
    }

    #[test]
    fn arguments_keep_their_order() {
        let call = Call::new("Foo::bar", (1i32, "two", 3.0f64));
        let args = call.arguments();
        assert_eq!(Some(&1i32), args[0].downcast_ref::<i32>().ok());
        assert_eq!(Some("two"), args[1].as_str());
        assert!(args[2].is::<f64>());
    }
}
