#![no_main]

use libfuzzer_sys::fuzz_target;

use dnswire::Message;

// Anything that parses must re-pack and re-parse into a structurally
// identical message (spec.md §8, invariant 2: pack idempotence modulo
// compression).
fuzz_target!(|data: &[u8]| {
    let msg = match Message::parse(data.to_vec()) {
        Ok(msg) => msg,
        Err(_) => return,
    };
    let packed = match msg.pack() {
        Ok(bytes) => bytes,
        Err(_) => return,
    };
    let reparsed = Message::parse(packed).expect("a packet we just packed must parse");
    assert_eq!(reparsed.questions, msg.questions);
    assert_eq!(reparsed.answers, msg.answers);
    assert_eq!(reparsed.authority, msg.authority);
    assert_eq!(reparsed.additional, msg.additional);
});
