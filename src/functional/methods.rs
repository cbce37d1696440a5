//! Named methods for `invoke_named`
//!
//! Elements that want to be invoked by name implement [`Methods`], returning `None`
//! for names they do not know. Built-in tables are provided for strings and
//! integers.

/// A table of operations an element exposes by name.
///
/// `args` is passed whole to the method, never spread.
pub trait Methods<A> {
    type Output;

    /// Calls the method `name` with the element as receiver, or returns `None` when
    /// no such method exists.
    fn call_method(&self, name: &str, args: &A) -> Option<Self::Output>;
}

impl Methods<()> for String {
    type Output = String;

    fn call_method(&self, name: &str, _args: &()) -> Option<String> {
        match name {
            "to_uppercase" => Some(self.to_uppercase()),
            "to_lowercase" => Some(self.to_lowercase()),
            "trim" => Some(self.trim().to_string()),
            "reverse" => Some(self.chars().rev().collect()),
            _ => None,
        }
    }
}

impl Methods<String> for String {
    type Output = String;

    fn call_method(&self, name: &str, args: &String) -> Option<String> {
        match name {
            "concat" => Some(format!("{self}{args}")),
            "prefix" => Some(format!("{args}{self}")),
            "replace_with" => Some(args.clone()),
            _ => None,
        }
    }
}

impl Methods<i64> for i64 {
    type Output = i64;

    fn call_method(&self, name: &str, args: &i64) -> Option<i64> {
        match name {
            "add" => Some(self.saturating_add(*args)),
            "subtract" => Some(self.saturating_sub(*args)),
            "multiply" => Some(self.saturating_mul(*args)),
            "max" => Some((*self).max(*args)),
            "min" => Some((*self).min(*args)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_methods_without_arguments() {
        let word = " Hello ".to_string();
        assert_eq!(word.call_method("trim", &()), Some("Hello".to_string()));
        assert_eq!(word.call_method("to_uppercase", &()), Some(" HELLO ".to_string()));
        assert_eq!(word.call_method("shout", &()), None);
    }

    #[test]
    fn test_string_methods_with_argument() {
        let word = "bar".to_string();
        assert_eq!(
            word.call_method("prefix", &"foo".to_string()),
            Some("foobar".to_string())
        );
    }

    #[test]
    fn test_integer_methods_saturate() {
        assert_eq!(5i64.call_method("add", &3), Some(8));
        assert_eq!(i64::MAX.call_method("multiply", &2), Some(i64::MAX));
        assert_eq!(4i64.call_method("divide", &2), None);
    }
}
