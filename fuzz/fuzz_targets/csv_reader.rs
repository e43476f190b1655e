#![no_main]

use libfuzzer_sys::fuzz_target;
use rasgo::DataFrame;

fuzz_target!(|data: &[u8]| {
    let strings = vec!["a".to_string(), "b".to_string()];
    let doubles = vec!["score".to_string()];
    // Malformed input must surface as an error, never a panic
    let _ = DataFrame::from_csv_reader(data, &strings, &doubles);
});
