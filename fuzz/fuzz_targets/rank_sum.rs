#![no_main]

use libfuzzer_sys::fuzz_target;
use perfhunt::hunt::mann_whitney_u;

fuzz_target!(|data: &[u8]| {
    // First byte splits the remaining bytes into two groups of coarse timings
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let values: Vec<f64> = rest.iter().map(|&b| b as f64 * 0.001).collect();
    let split = (split as usize).min(values.len());
    let (x, y) = values.split_at(split);

    let test = mann_whitney_u(x, y);
    assert!((0.0..=1.0).contains(&test.p_value));
});
