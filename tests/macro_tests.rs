use inikit::{ini, stringify, IniDocument, IniMap, IniValue, Number};

#[test]
fn test_ini_macro_null_and_empty() {
    assert_eq!(ini!(null), IniValue::Null);
    assert_eq!(ini!(empty), IniValue::Empty);
    assert_ne!(ini!(null), ini!(empty));
}

#[test]
fn test_ini_macro_booleans() {
    assert_eq!(ini!(true), IniValue::Bool(true));
    assert_eq!(ini!(false), IniValue::Bool(false));
}

#[test]
fn test_ini_macro_numbers() {
    let int_val = ini!(42);
    assert_eq!(int_val, IniValue::Number(Number::Integer(42)));

    let float_val = ini!(3.5);
    assert_eq!(float_val, IniValue::Number(Number::Float(3.5)));

    let negative_val = ini!(-123);
    assert_eq!(negative_val, IniValue::Number(Number::Integer(-123)));
}

#[test]
fn test_ini_macro_strings() {
    let string_val = ini!("hello world");
    assert_eq!(string_val, IniValue::String("hello world".to_string()));

    let owned = String::from("owned");
    assert_eq!(ini!(owned), IniValue::String("owned".to_string()));
}

#[test]
fn test_ini_macro_arrays() {
    assert_eq!(ini!([]), IniValue::Array(vec![]));

    let mixed_array = ini!([1, "hello", true, null, empty]);
    assert_eq!(
        mixed_array,
        IniValue::Array(vec![
            IniValue::Number(Number::Integer(1)),
            IniValue::String("hello".to_string()),
            IniValue::Bool(true),
            IniValue::Null,
            IniValue::Empty,
        ])
    );
}

#[test]
fn test_ini_macro_sections() {
    assert_eq!(ini!({}), IniValue::Section(IniMap::new()));

    let nested = ini!({
        "count": 42,
        "delta": -1,
        "tags": ["admin", "developer"],
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "motd": data ["  Welcome!", "", "= rules ="],
    });

    let section = nested.as_section().unwrap();
    assert_eq!(section.len(), 5);
    assert_eq!(section.get("delta"), Some(&IniValue::from(-1)));

    let user = section.get("user").and_then(IniValue::as_section).unwrap();
    assert_eq!(user.get("name").and_then(IniValue::as_str), Some("Bob"));

    assert_eq!(
        section.get("motd").and_then(IniValue::as_data),
        Some(&["  Welcome!".to_string(), "".to_string(), "= rules =".to_string()][..])
    );

    let keys: Vec<&str> = section.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["count", "delta", "tags", "user", "motd"]);
}

#[test]
fn test_ini_macro_builds_stringifiable_documents() {
    let doc = IniDocument::try_from(ini!({
        "user": { "name": "Bob", "nickname": empty },
        "version": 3
    }))
    .unwrap();

    assert_eq!(
        stringify(&doc).unwrap(),
        "version=3\n\n[user]\nname=Bob\nnickname="
    );
}

#[test]
fn test_ini_value_methods() {
    let null_val = ini!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_section());
    assert!(!null_val.is_data());
    assert!(null_val.is_scalar());

    let bool_val = ini!(true);
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = ini!("hello");
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = ini!([1, 2, 3]);
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));
    assert!(!array_val.is_scalar());

    let section_val = ini!({"key": "value"});
    assert_eq!(section_val.as_section().map(IniMap::len), Some(1));
    assert!(!section_val.is_scalar());
}
