//! Building and editing documents at runtime with `ini!` and `IniValue`.
//!
//! Run with: cargo run --example dynamic_values

use inikit::{
    from_document, ini, parse_with_options, stringify, IniDocument, IniValue, KeyMergeStrategy,
    ParseOptions,
};
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    port: u16,
    features: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document with the ini! macro
    let mut doc = IniDocument::try_from(ini!({
        "version": 2,
        "server": {
            "host": "localhost",
            "port": 8080,
            "features": ["auth", "logging", "metrics"],
            "banner": empty
        },
        "motd": data ["  Welcome!", "  Maintenance on Sunday."]
    }))?;

    println!("Built document:\n{}\n", stringify(&doc)?);

    // Edit values in place
    if let Some(server) = doc.get_mut("server").and_then(IniValue::as_section_mut) {
        server.insert("port".to_string(), IniValue::from(9090));
        server.remove("banner");
    }
    doc.insert("debug", IniValue::Bool(true));

    let text = stringify(&doc)?;
    println!("Edited document:\n{}\n", text);

    // Inspect values dynamically
    for (key, value) in &doc {
        println!("{:>8}: {}", key, value.kind());
    }

    // Map the parsed document onto a struct
    #[derive(Debug, Deserialize)]
    struct Root {
        server: Server,
    }

    let options = ParseOptions::new()
        .with_data_section("motd")
        .with_key_merge_strategy(KeyMergeStrategy::JoinToArray);
    let root: Root = from_document(parse_with_options(&text, &options)?)?;
    println!("\nServer: {:?}", root.server);
    assert_eq!(root.server.port, 9090);
    assert_eq!(root.server.host, "localhost");
    assert_eq!(root.server.features, ["auth", "logging", "metrics"]);

    Ok(())
}
