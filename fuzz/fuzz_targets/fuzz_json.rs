#![no_main]

use libfuzzer_sys::fuzz_target;
use tank_mass_calculator::io;

fuzz_target!(|data: &[u8]| {
    let _ = io::read_input_json_from_bytes(data);
});
