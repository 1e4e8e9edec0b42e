//! Customizing parsing and output with ParseOptions and StringifyOptions.
//!
//! Run with: cargo run --example custom_options

use inikit::{
    parse_with_options, stringify_with_options, AutoTyping, IniValue, KeyMergeStrategy,
    ParseOptions, StringifyOptions,
};
use std::error::Error;

const PACMAN_CONF: &str = "\
# /etc/pacman.conf
[options]
HoldPkg     : pacman glibc
Architecture: auto
ParallelDownloads : 5
Color :
this line has no delimiter

[core]
Server : https://mirror.one/$repo/os/$arch
Server : https://mirror.two/$repo/os/$arch

[motd]
  Welcome to the build host.
  # this line is a comment and is skipped
  Mirrors rotate every Monday.
";

fn main() -> Result<(), Box<dyn Error>> {
    // Colon delimiter, '#' comments, raw [motd] body, repeated keys collected
    let options = ParseOptions::tolerant()
        .with_delimiter(":")
        .with_comments(["#", ";"])
        .with_data_section("motd")
        .with_key_merge_strategy("join-to-array".parse::<KeyMergeStrategy>()?);

    let doc = parse_with_options(PACMAN_CONF, &options)?;
    println!("Servers: {:?}", doc.section("core").and_then(|s| s.get("Server")));
    println!("Motd lines: {:?}", doc.data_section("motd"));
    for error in doc.errors().unwrap_or_default() {
        println!("Skipped: {}", error);
    }

    // Keep every value as text except keys that look like counters
    let options = options.with_auto_typing(AutoTyping::custom(|raw, section, key| {
        if section == Some("options") && key.starts_with("Parallel") {
            inikit::auto_type(raw)
        } else {
            IniValue::from(raw)
        }
    }));
    let untyped = parse_with_options(PACMAN_CONF, &options)?;
    println!(
        "Typed counter: {:?}",
        untyped.section("options").and_then(|s| s.get("ParallelDownloads"))
    );

    // Default output
    let default_options = StringifyOptions::default();
    println!("\nDefault:\n{}", stringify_with_options(&doc, &default_options)?);

    // Compact output with padded delimiter and empty values left out
    let compact = StringifyOptions::new()
        .with_delimiter(":")
        .with_space_before(true)
        .with_space_after(true)
        .with_blank_line(false)
        .with_skip_undefined(true);
    println!("\nCompact:\n{}", stringify_with_options(&doc, &compact)?);

    Ok(())
}
