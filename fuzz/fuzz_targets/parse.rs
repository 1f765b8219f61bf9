#![no_main]

use libfuzzer_sys::fuzz_target;

use dnswire::Message;

fuzz_target!(|data: &[u8]| {
    let _ = Message::parse(data.to_vec());
});
