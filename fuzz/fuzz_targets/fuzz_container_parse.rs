//! Fuzz target for container parsing.
//!
//! Container files come straight out of build directories that may be stale
//! or corrupt; parsing must return an error, never panic.

#![no_main]

use ba_format::Container;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = Container::parse(data);
});
