//! Fuzz target for roster file parsing
//!
//! Arbitrary bytes fed to the JSON loader.
//!
//! # Invariants
//!
//! - Parsing NEVER panics
//! - Any config that loads has a non-empty roster with unique, non-blank
//!   names and a non-blank sender
//! - Header values (sender, subject, emails) never contain line breaks

#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use santa_core::RunConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = RunConfig::from_json_str(json) else {
        return;
    };

    assert!(!config.sender().email.trim().is_empty());
    assert!(!config.roster().is_empty());
    assert!(!config.sender().mailbox().contains(['\r', '\n']));
    assert!(!config.subject().contains(['\r', '\n']));

    let mut names = HashSet::new();
    for participant in config.roster() {
        assert!(!participant.name.trim().is_empty());
        assert!(!participant.email.trim().is_empty());
        assert!(!participant.email.contains(['\r', '\n']));
        assert!(names.insert(participant.name.as_str()), "duplicate name loaded");
    }
});
