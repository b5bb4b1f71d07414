// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Values that can be written as a log message.
//!
//! Anything implementing [`ToValue`] can be passed to [`Logger::log`](crate::Logger::log) and the
//! level shorthands. The conversion yields a [`Value`], whose [`Display`](fmt::Display) output is
//! the message text:
//!
//! | argument                         | message                       |
//! |----------------------------------|-------------------------------|
//! | `42`, `true`, `'x'`, `"text"`    | `42`, `true`, `x`, `text`     |
//! | `&[1, 2, 3]`                     | `i32[] {1, 2, 3}`             |
//! | `Vec::<bool>::new()`             | `bool[] {}`                   |
//! | `None::<i32>`                    | `null`                        |
//! | `&[Some(1), None]`               | `i32[] {1, null}`             |
//! | `vec![Value::display(&x), Value::Null]` | `Object[] {x, null}`   |
//! | `Value::error(&err)`             | `err` and one `\tat` per cause |
//! | `Value::display(&x)`             | `x.to_string()`               |

use std::backtrace::Backtrace;
use std::backtrace::BacktraceStatus;
use std::borrow::Cow;
use std::fmt;

/// A value rendered as a log message.
#[derive(Clone)]
pub enum Value<'a> {
    /// An absent value, rendered as `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    I64(i64),
    /// An unsigned integer.
    U64(u64),
    /// A single precision float.
    F32(f32),
    /// A double precision float.
    F64(f64),
    /// A character.
    Char(char),
    /// A string.
    Str(Cow<'a, str>),
    /// A sequence, rendered as `tag[] {item, item}`.
    Seq {
        /// The element type name.
        tag: &'static str,
        /// The elements.
        items: Vec<Value<'a>>,
    },
    /// An error, rendered with its chain of causes and, if captured, the frames of its backtrace.
    Error {
        /// The error.
        error: &'a (dyn std::error::Error + 'static),
        /// The backtrace captured where the error was created.
        backtrace: Option<&'a Backtrace>,
    },
    /// Any other displayable value.
    Display(&'a dyn fmt::Display),
}

impl<'a> Value<'a> {
    /// Capture an error and its chain of sources.
    pub fn error(err: &'a (dyn std::error::Error + 'static)) -> Self {
        Value::Error {
            error: err,
            backtrace: None,
        }
    }

    /// Capture an error together with a backtrace.
    ///
    /// Each frame is rendered as one more `\tat` line after the causes. A backtrace that was not
    /// captured renders nothing.
    pub fn backtraced(
        err: &'a (dyn std::error::Error + 'static),
        backtrace: &'a Backtrace,
    ) -> Self {
        Value::Error {
            error: err,
            backtrace: Some(backtrace),
        }
    }

    /// Capture any displayable value.
    pub fn display(value: &'a dyn fmt::Display) -> Self {
        Value::Display(value)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => fmt::Display::fmt(v, f),
            Value::I64(v) => fmt::Display::fmt(v, f),
            Value::U64(v) => fmt::Display::fmt(v, f),
            Value::F32(v) => fmt::Display::fmt(v, f),
            Value::F64(v) => fmt::Display::fmt(v, f),
            Value::Char(v) => fmt::Display::fmt(v, f),
            Value::Str(v) => f.write_str(v),
            Value::Seq { tag, items } => {
                write!(f, "{tag}[] {{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Value::Error { error, backtrace } => {
                write!(f, "{error}")?;
                let mut source = error.source();
                while let Some(cause) = source {
                    write!(f, "\n\tat {cause}")?;
                    source = cause.source();
                }
                match backtrace {
                    Some(backtrace) if backtrace.status() == BacktraceStatus::Captured => {
                        let frames = backtrace.to_string();
                        for frame in frames.lines().map(str::trim).filter(|l| !l.is_empty()) {
                            write!(f, "\n\tat {frame}")?;
                        }
                        Ok(())
                    }
                    _ => Ok(()),
                }
            }
            Value::Display(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.to_string()).finish()
    }
}

/// Conversion into a [`Value`].
pub trait ToValue {
    /// Capture `self` as a [`Value`].
    fn to_value(&self) -> Value<'_>;
}

/// A [`ToValue`] type that can be an element of a rendered sequence.
pub trait Element: ToValue {
    /// The type name shown before `[]`.
    const TAG: &'static str;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl ToValue for anyhow::Error {
    fn to_value(&self) -> Value<'_> {
        Value::backtraced(&**self, self.backtrace())
    }
}

impl<T: Element> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Seq {
            tag: T::TAG,
            items: self.iter().map(ToValue::to_value).collect(),
        }
    }
}

impl<T: Element, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: Element> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $cast)
                }
            }

            impl Element for $ty {
                const TAG: &'static str = stringify!($ty);
            }
        )*
    };
}

impl_primitive! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F32 as f32,
    f64 => F64 as f64,
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Element for bool {
    const TAG: &'static str = "bool";
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Element for char {
    const TAG: &'static str = "char";
}

impl Element for &str {
    const TAG: &'static str = "&str";
}

impl Element for String {
    const TAG: &'static str = "String";
}

impl<T: Element> Element for Option<T> {
    const TAG: &'static str = T::TAG;
}

impl Element for Value<'_> {
    const TAG: &'static str = "Object";
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn render(value: impl ToValue) -> String {
        value.to_value().to_string()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(render(true), "true");
        assert_eq!(render(-7i8), "-7");
        assert_eq!(render(u64::MAX), "18446744073709551615");
        assert_eq!(render(1.5f32), "1.5");
        assert_eq!(render(0.25f64), "0.25");
        assert_eq!(render('x'), "x");
        assert_eq!(render("text"), "text");
        assert_eq!(render(String::from("owned")), "owned");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(render(&[1, 2, 3]), "i32[] {1, 2, 3}");
        assert_eq!(render([true, false]), "bool[] {true, false}");
        assert_eq!(render(vec!['a', 'b']), "char[] {a, b}");
        assert_eq!(render(&["x", "y"][..]), "&str[] {x, y}");
        assert_eq!(render(vec![String::from("s")]), "String[] {s}");
        assert_eq!(render(vec![1.5f64]), "f64[] {1.5}");
        assert_eq!(render(b"\x01\x02"), "u8[] {1, 2}");
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [i32; 0] = [];
        assert_eq!(render(empty), "i32[] {}");
        assert_eq!(render(Vec::<bool>::new()), "bool[] {}");
    }

    #[test]
    fn test_sequence_with_null_elements() {
        assert_eq!(render(&[Some(1), None, Some(3)]), "i32[] {1, null, 3}");
        assert_eq!(render(vec![None::<&str>]), "&str[] {null}");
    }

    #[test]
    fn test_object_sequence() {
        let addr = std::net::Ipv4Addr::LOCALHOST;
        let objects = [
            Value::display(&addr),
            Value::Null,
            "text".to_value(),
            Value::U64(7),
        ];
        assert_eq!(render(&objects), "Object[] {127.0.0.1, null, text, 7}");
    }

    #[test]
    fn test_null() {
        assert_eq!(render(None::<i32>), "null");
        assert_eq!(render(Some("present")), "present");
        assert_eq!(render(Value::Null), "null");
    }

    #[derive(Debug)]
    struct Outer(io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failed to load config")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain() {
        let err = Outer(io::Error::other("disk on fire"));
        assert_eq!(
            render(Value::error(&err)),
            "failed to load config\n\tat disk on fire"
        );

        let plain = io::Error::other("lonely");
        assert_eq!(render(Value::error(&plain)), "lonely");
    }

    #[test]
    fn test_anyhow_chain() {
        let err = anyhow::Error::new(io::Error::other("root cause")).context("outer");
        let rendered = render(&err);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("outer"));
        assert_eq!(lines.next(), Some("\tat root cause"));
        // backtrace frames follow only if RUST_BACKTRACE enabled capturing
        for line in lines {
            assert!(line.starts_with("\tat "), "{line:?}");
        }
    }

    #[test]
    fn test_backtrace_frames() {
        let err = io::Error::other("traced");
        let backtrace = Backtrace::force_capture();
        let rendered = render(Value::backtraced(&err, &backtrace));

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("traced"));
        let frames = lines.collect::<Vec<_>>();
        assert!(frames.iter().all(|frame| frame.starts_with("\tat ")), "{frames:?}");
        if backtrace.status() == BacktraceStatus::Captured {
            assert!(!frames.is_empty());
        } else {
            assert!(frames.is_empty());
        }
    }

    #[test]
    fn test_disabled_backtrace_renders_nothing() {
        let err = io::Error::other("untraced");
        let backtrace = Backtrace::disabled();
        assert_eq!(render(Value::backtraced(&err, &backtrace)), "untraced");
    }

    #[test]
    fn test_display() {
        let addr = std::net::Ipv4Addr::LOCALHOST;
        assert_eq!(render(Value::display(&addr)), "127.0.0.1");
    }
}
