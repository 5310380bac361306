#![no_main]

use libfuzzer_sys::fuzz_target;
use reorder_core::RowLayout;
use reorder_harness::VecListHost;
use reorder_list::IndexResolver;

fuzz_target!(|data: &[u8]| {
    // First byte: dragged index. Next four: center. Rest: row heights.
    if data.len() < 6 {
        return;
    }
    let dragged = usize::from(data[0]);
    let center = f32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let rows: Vec<(usize, f32)> = data[5..]
        .iter()
        .enumerate()
        .map(|(i, h)| (i, f32::from(*h) + 1.0))
        .collect();
    let host = VecListHost::with_heights(rows, 480.0);

    let target = IndexResolver::target_index(center, dragged, &host);
    assert!(target < host.row_count());
    if center.is_nan() {
        assert_eq!(target, dragged.min(host.row_count() - 1));
    }
});
