#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 8]| {
    let value = f64::from_le_bytes(data);
    let rounded = covsum::rounding::round_half_even(value, 1);
    if value.is_finite() {
        assert!((rounded - value).abs() <= 0.050_001 + value.abs() * f64::EPSILON * 4.0);
    }
});
