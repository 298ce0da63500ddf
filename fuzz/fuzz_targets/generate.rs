#![no_main]

use infragen::backend::{GenerateOptions, generate_program};
use infragen::model::Program;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the program reader
        if let Ok(program) = Program::from_json(s) {
            // If it loads, fuzz generation: errors are fine, panics are not
            let _ = generate_program(&program, &GenerateOptions::default());
        }
    }
});
