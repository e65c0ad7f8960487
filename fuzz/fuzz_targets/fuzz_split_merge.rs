#![no_main]

use libfuzzer_sys::fuzz_target;

use picalc_core::executor::SplitExecutor;
use picalc_core::observers::NoOpObserver;
use picalc_core::partition::partition;
use picalc_core::reducer::reduce;
use picalc_core::split::split;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Term count capped at 2000 for speed, worker layout from the next bytes
    let n = u64::from(u16::from_le_bytes([data[0], data[1]])) % 2_000 + 1;
    let workers = usize::from(data[2] % 16) + 1;
    let oversubscription = usize::from(data[3] % 4) + 1;

    let chunks = partition(1, n + 1, workers, oversubscription, None);
    let executor = SplitExecutor::new(workers).unwrap();
    let observer = NoOpObserver::new();
    let results = executor.split_chunks(&chunks, &observer, 1).unwrap();
    let merged = executor.install(|| reduce(results, &observer, 1)).unwrap();

    assert_eq!(merged, split(1, n + 1));
});
