#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use herald::{matches, Pattern, Topic};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: &'a str,
    topic: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    // Свободная функция не должна паниковать ни на каком вводе.
    let free = matches(input.pattern, input.topic);

    let (Ok(pattern), Ok(topic)) = (Pattern::parse(input.pattern), Topic::parse(input.topic)) else {
        return;
    };

    assert_eq!(
        pattern.matches(&topic),
        free,
        "pattern {:?} vs topic {:?}",
        input.pattern,
        input.topic
    );
    if pattern.is_exact() {
        assert_eq!(free, input.pattern == input.topic);
    }
});
