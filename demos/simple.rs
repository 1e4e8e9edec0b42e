//! Basic INI parsing, typed deserialization and writing.
//!
//! Run with: cargo run --example simple

use inikit::{from_str, parse, stringify, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;

const SMB_CONF: &str = "\
; shared settings
workgroup = HOME
log level = 2

[global]
server string = Samba %v
security = user

[printers]
path = /var/spool/samba
printable = yes
browseable = false
";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Share {
    path: String,
    comment: Option<String>,
    read_only: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Exports {
    workgroup: String,
    public: Share,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Parse into a document and inspect typed values
    let doc = parse(SMB_CONF)?;
    println!("Top-level log level: {:?}", doc.get("log level"));

    if let Some(printers) = doc.section("printers") {
        for (key, value) in printers {
            println!("  printers.{} = {} ({})", key, value, value.kind());
        }
    }

    // Write it back out
    println!("\nNormalized:\n{}\n", stringify(&doc)?);

    // Round-trip a typed struct
    let exports = Exports {
        workgroup: "HOME".to_string(),
        public: Share {
            path: "/srv/public".to_string(),
            comment: None,
            read_only: true,
        },
    };

    let ini = to_string(&exports)?;
    println!("Struct as INI:\n{}\n", ini);

    let exports_back: Exports = from_str(&ini)?;
    assert_eq!(exports, exports_back);
    println!("✓ Round-trip successful");

    Ok(())
}
