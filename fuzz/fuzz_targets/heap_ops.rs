#![no_main]

use std::collections::BinaryHeap;

use libfuzzer_sys::fuzz_target;

use power_heap::PowerHeap;
use power_heap::PowerHeapError;

// First byte picks the arity (1 through 32), every other byte is an operation:
// values with the high bit set pop, the rest are inserted.
fuzz_target!(|data: &[u8]| {
    let Some((k, ops)) = data.split_first() else {
        return;
    };
    let mut heap = PowerHeap::new(i32::from(k % 6)).unwrap();
    let mut model = BinaryHeap::new();

    for op in ops {
        if op & 0x80 != 0 {
            match model.pop() {
                Some(expected) => assert_eq!(heap.pop_max(), Ok(expected)),
                None => assert_eq!(heap.pop_max(), Err(PowerHeapError::EmptyStructure)),
            }
        } else {
            heap.insert(*op);
            model.push(*op);
        }
        assert_eq!(heap.len(), model.len());
        assert_eq!(heap.peek_max(), model.peek());
    }
});
