#![no_main]

//! Protocol reader fuzzer.
//!
//! Feeds arbitrary bytes to both message sources and checks that reading
//! always terminates with end of input (undecodable bytes are replaced,
//! never fatal), that live messages are never blank or padded, and that
//! waiting for a token never panics.

use libfuzzer_sys::fuzz_target;
use pursuit::{IoHandler, MessageSource, ProtocolError};
use std::io::{self, Cursor};

fuzz_target!(|data: &[u8]| {
    let bytes = data.to_vec();

    let mut live = IoHandler::with_source(MessageSource::live_from(Cursor::new(bytes.clone())), io::sink());
    live.set_poll_delay(std::time::Duration::ZERO);
    loop {
        match live.next_message() {
            Ok(message) => {
                assert!(!message.is_empty());
                assert_eq!(message, message.trim());
                assert!(!message.contains('\n'));
            }
            Err(ProtocolError::EndOfInput) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let mut replay = IoHandler::with_source(MessageSource::replay_from("fuzz", Cursor::new(bytes)), io::sink());
    let _ = replay.wait_for("end");
});
