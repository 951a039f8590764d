#![no_main]

use libfuzzer_sys::fuzz_target;
use pytrack::{summary::render_summary, Snapshot};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; anything that parses must re-serialize
        // and summarize cleanly
        if let Ok(snapshot) = Snapshot::from_json_str(input) {
            let _ = render_summary(&snapshot);
            let _ = snapshot.to_json();
        }
    }
});
