#![no_main]

use libfuzzer_sys::fuzz_target;
use rasgo::ScorePredicate;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsed predicates must print back to an equivalent expression
        if let Ok(predicate) = ScorePredicate::from_expr(input) {
            let reparsed = ScorePredicate::from_expr(&predicate.to_string());
            assert_eq!(reparsed.ok(), Some(predicate));
        }
    }
});
