#![no_main]

use libfuzzer_sys::fuzz_target;

use disksched_core::{c_look, c_scan, fcfs, look, scan, sstf, Workload};

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let capacity = u32::from(u16::from_le_bytes([data[0], data[1]])) + 1;
    let head = u32::from(data[2]) % capacity;
    let previous = u32::from(data[3]) % capacity;
    let pending: Vec<u32> = data[4..]
        .chunks_exact(2)
        .map(|c| u32::from(u16::from_le_bytes([c[0], c[1]])) % capacity)
        .take(256)
        .collect();
    let w = Workload::new(capacity, head, previous, pending);

    assert!(look(&w) <= scan(&w), "LOOK > SCAN for {w}");
    assert!(c_look(&w) <= c_scan(&w), "C-LOOK > C-SCAN for {w}");

    // Only FCFS depends on queue order.
    let mut reversed = w.clone();
    reversed.pending.reverse();
    for f in [sstf, scan, c_scan, look, c_look] {
        assert_eq!(f(&w), f(&reversed), "order changed cost for {w}");
    }

    let edge = u64::from(w.edge());
    let bound = (w.pending.len() as u64 + 1) * edge;
    assert!(fcfs(&w) <= bound);
});
