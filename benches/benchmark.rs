use std::sync::Arc;
use std::thread;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use orderbook_core::book::OrderBook;
use orderbook_core::order::{Order, Side};
use orderbook_core::queue::BoundedQueue;

fn setup_order_book(depth: u64, orders_per_level: u64) -> OrderBook {
    let mut book = OrderBook::new();
    let mut id = 0u64;
    for price in 1..=depth {
        for _ in 0..orders_per_level {
            id += 1;
            book.add_order(Order::new(id, Side::Sell, price, 1));
            id += 1;
            book.add_order(Order::new(id, Side::Buy, price, 1));
        }
    }
    book
}

fn bench_match_order(c: &mut Criterion) {
    let depth = 100;
    let orders_per_level = 10;

    c.bench_function("match 1 fully-crossing limit order", |b| {
        b.iter_batched(
            || setup_order_book(depth, orders_per_level),
            |mut book| book.add_order(Order::new(u64::MAX, Side::Sell, depth / 2, depth * orders_per_level)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("rest 1 non-crossing limit order", |b| {
        b.iter_batched(
            || setup_order_book(depth, orders_per_level),
            |mut book| book.add_order(Order::new(u64::MAX, Side::Buy, depth * 10, 1)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_spsc_queue(c: &mut Criterion) {
    let total = 100_000usize;
    let capacity = total.next_power_of_two();

    c.bench_function("spsc queue: push/pop 100k", |b| {
        b.iter(|| {
            let queue = Arc::new(BoundedQueue::<Order>::new(capacity).unwrap());
            let producer_queue = Arc::clone(&queue);
            let producer = thread::spawn(move || {
                for i in 0..total {
                    let mut order = Order::new(i as u64, Side::Buy, 100, 1);
                    while let Err(rejected) = producer_queue.try_push(order) {
                        order = rejected;
                    }
                }
            });

            let mut count = 0;
            while count < total {
                if queue.try_pop().is_some() {
                    count += 1;
                } else {
                    thread::yield_now();
                }
            }
            producer.join().unwrap();
        })
    });
}

fn bench_mpsc_queue(c: &mut Criterion) {
    let producers = 4usize;
    let per_producer = 12_500usize;
    let total = producers * per_producer;
    let capacity = total.next_power_of_two();

    c.bench_function("mpsc queue: 4 producers, 50k total", |b| {
        b.iter(|| {
            let queue = Arc::new(BoundedQueue::<Order>::new(capacity).unwrap());
            let handles: Vec<_> = (0..producers)
                .map(|p| {
                    let queue = Arc::clone(&queue);
                    thread::spawn(move || {
                        for i in 0..per_producer {
                            let mut order = Order::new((p * per_producer + i) as u64, Side::Buy, 100, 1);
                            while let Err(rejected) = queue.try_push(order) {
                                order = rejected;
                            }
                        }
                    })
                })
                .collect();

            let mut count = 0;
            while count < total {
                if queue.try_pop().is_some() {
                    count += 1;
                } else {
                    thread::yield_now();
                }
            }
            for handle in handles {
                handle.join().unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_match_order, bench_spsc_queue, bench_mpsc_queue);
criterion_main!(benches);
