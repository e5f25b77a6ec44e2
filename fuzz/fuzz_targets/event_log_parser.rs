#![no_main]

use libfuzzer_sys::fuzz_target;
use taskprof::config::ProfilerConfig;
use taskprof::event_log::{parse_event_log, replay};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and replaying must never panic, whatever the log contains
        if let Ok(events) = parse_event_log(input) {
            let _ = replay(&events, ProfilerConfig::default(), Vec::<String>::new());
        }
    }
});
