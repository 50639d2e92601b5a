//! Basic usage example for randeque
//!
//! Replays a scripted deque session and an interleaved enqueue/dequeue loop on the
//! randomized queue. Run with `RUST_LOG=trace` to see resize events.

use randeque::{Deque, Error, MetricsCollector, RandomizedQueue};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("randeque Usage Example");
    println!("======================");

    // Scripted deque session
    println!("\n1. Deque Operations:");
    let mut deque: Deque<&str> = Deque::new();
    deque.add_first("ZJVNWPBVLP")?;
    deque.add_last("ZJATEYRDDL")?;
    println!("   removeLast  ==> {}", deque.remove_last()?);
    deque.add_first("DNNWTJNHSK")?;
    println!("   removeLast  ==> {}", deque.remove_last()?);
    deque.add_first("XGVKLMHLKO")?;
    deque.add_first("GPRGSBTZCO")?;
    println!("   removeLast  ==> {}", deque.remove_last()?);
    println!("   removeLast  ==> {}", deque.remove_last()?);
    println!("   removeFirst ==> {}", deque.remove_first()?);
    deque.add_last("OCCOBGOYTC")?;
    deque.add_last("CQQRXDLDCG")?;
    println!("   Remaining front to back: {:?}", deque);

    // Interleaved randomized queue session
    println!("\n2. Randomized Queue Operations:");
    let mut queue: RandomizedQueue<u32> = RandomizedQueue::new();
    let mut dequeued = Vec::with_capacity(500);
    for i in 0..500u32 {
        queue.enqueue(i)?;
        queue.enqueue(i + 100)?;
        dequeued.push(queue.dequeue()?);
    }
    println!("   First ten dequeued: {:?}", &dequeued[..10]);
    println!("   Still queued: {}", queue.len());
    println!("   One sample: {}", queue.sample()?);

    let preview: Vec<_> = queue.iter().take(5).collect();
    println!("   Random-order preview: {:?}", preview);

    // Error handling
    println!("\n3. Error Handling Examples:");
    let mut empty: Deque<u32> = Deque::new();
    match empty.remove_first() {
        Err(Error::EmptyContainer) => println!("   ✓ Empty deque removal rejected"),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }
    match queue.enqueue(None) {
        Err(Error::InvalidArgument) => println!("   ✓ Absent element rejected"),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }
    match queue.iter().remove() {
        Err(Error::UnsupportedOperation) => println!("   ✓ Iterator removal rejected"),
        other => println!("   ✗ Unexpected result: {:?}", other),
    }

    println!("\n4. Metrics:");
    let metrics = deque.metrics();
    println!(
        "   Deque: {} operations, {} resizes, peak {} elements",
        metrics.total_operations,
        metrics.resize_events(),
        metrics.peak_len
    );
    let metrics = queue.metrics();
    println!(
        "   Randomized queue: {} operations, {:.1}% failed",
        metrics.total_operations,
        metrics.failure_rate()
    );

    println!("\n✅ Usage example completed successfully!");
    Ok(())
}
