/// Builds an [`IniValue`](crate::IniValue) from a JSON-like literal.
///
/// Objects become sections, arrays become arrays. `empty` is the empty value and
/// `data [..]` builds a data section from its lines. Any other expression goes
/// through `IniValue::from`.
///
/// ```rust
/// use inikit::{ini, IniValue};
///
/// let value = ini!({
///     "v1": 2,
///     "smbd": { "v2": true, "v3": null, "v4": empty },
///     "certs": data ["-----BEGIN-----", "-----END-----"]
/// });
///
/// let section = value.as_section().unwrap();
/// assert_eq!(section.get("v1"), Some(&IniValue::from(2)));
/// assert!(section.get("certs").unwrap().is_data());
/// ```
#[macro_export]
macro_rules! ini {
    (null) => {
        $crate::IniValue::Null
    };

    (empty) => {
        $crate::IniValue::Empty
    };

    (true) => {
        $crate::IniValue::Bool(true)
    };

    (false) => {
        $crate::IniValue::Bool(false)
    };

    ([]) => {
        $crate::IniValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::IniValue::Array(vec![$($crate::ini!($elem)),*])
    };

    (data [ $($line:expr),* $(,)? ]) => {
        $crate::IniValue::Data(vec![$(::std::string::String::from($line)),*])
    };

    ({}) => {
        $crate::IniValue::Section($crate::IniMap::new())
    };

    ({ $($body:tt)+ }) => {{
        let mut section = $crate::IniMap::new();
        $crate::ini!(@section section ($($body)+));
        $crate::IniValue::Section(section)
    }};

    (@section $section:ident ()) => {};

    (@section $section:ident ($key:literal : data [ $($line:expr),* $(,)? ] $(, $($rest:tt)*)?)) => {
        $section.insert($key.to_string(), $crate::ini!(data [ $($line),* ]));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    (@section $section:ident ($key:literal : - $value:tt $(, $($rest:tt)*)?)) => {
        $section.insert($key.to_string(), $crate::ini!(-$value));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    (@section $section:ident ($key:literal : $value:tt $(, $($rest:tt)*)?)) => {
        $section.insert($key.to_string(), $crate::ini!($value));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    ($value:expr) => {
        $crate::IniValue::from($value)
    };
}

#[cfg(test)]
mod tests {
    use crate::{IniMap, IniValue, Number};

    #[test]
    fn test_ini_macro_primitives() {
        assert_eq!(ini!(null), IniValue::Null);
        assert_eq!(ini!(empty), IniValue::Empty);
        assert_eq!(ini!(true), IniValue::Bool(true));
        assert_eq!(ini!(42), IniValue::Number(Number::Integer(42)));
        assert_eq!(ini!(3.5), IniValue::Number(Number::Float(3.5)));
        assert_eq!(ini!("hello"), IniValue::String("hello".to_string()));
    }

    #[test]
    fn test_ini_macro_sections() {
        assert_eq!(ini!({}), IniValue::Section(IniMap::new()));

        let value = ini!({
            "name": "Alice",
            "port": 8080,
            "offset": -3,
            "hosts": ["a", "b"],
        });

        let section = value.as_section().unwrap();
        assert_eq!(section.len(), 4);
        assert_eq!(section.get("offset"), Some(&IniValue::from(-3)));
        assert_eq!(
            section.get("hosts"),
            Some(&IniValue::Array(vec![IniValue::from("a"), IniValue::from("b")]))
        );
    }

    #[test]
    fn test_ini_macro_data_section() {
        let line = String::from("owned");
        assert_eq!(
            ini!(data ["raw = 1", line]),
            IniValue::Data(vec!["raw = 1".to_string(), "owned".to_string()])
        );
    }
}
