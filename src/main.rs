mod cli;

use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand};
use orderbook_core::driver::{DrainOutcome, drain_one};
use orderbook_core::order::{Order, Side};
use orderbook_core::queue::BoundedQueue;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "orderbook-cli")]
#[command(version = "0.1", about = "A demo of a limit-order-book engine")]
struct TopLevel {
    #[command(subcommand)]
    command: Option<TopCommand>,
}

#[derive(Subcommand)]
enum TopCommand {
    /// Multi-producer/single-consumer throughput run against the ring queue.
    BenchConcurrent {
        #[arg(default_value_t = 4)]
        producers: usize,
        #[arg(default_value_t = 10_000)]
        orders_per_producer: usize,
    },
}

fn run_bench_concurrent(producers: usize, orders_per_producer: usize) {
    let total = producers * orders_per_producer;
    let capacity = total.next_power_of_two();
    let queue = Arc::new(BoundedQueue::<Order>::new(capacity).expect("power-of-two capacity"));

    let handles: Vec<_> = (0..producers)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..orders_per_producer {
                    let order_id = (p * orders_per_producer + i) as u64;
                    let side = if order_id % 2 == 0 { Side::Buy } else { Side::Sell };
                    let mut order = Order::new(order_id, side, 100, 1);
                    while let Err(rejected) = queue.try_push(order) {
                        order = rejected;
                        thread::yield_now();
                    }
                }
            })
        })
        .collect();

    let mut book = orderbook_core::book::OrderBook::new();
    let mut processed = 0usize;
    while processed < total {
        match drain_one(&queue, &mut book) {
            DrainOutcome::Processed { .. } => processed += 1,
            DrainOutcome::Empty => thread::yield_now(),
        }
    }

    for handle in handles {
        handle.join().expect("producer thread panicked");
    }

    tracing::info!(
        producers,
        orders_per_producer,
        total,
        best_bid = ?book.best_bid(),
        best_ask = ?book.best_ask(),
        "bench-concurrent finished"
    );
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match TopLevel::parse().command {
        Some(TopCommand::BenchConcurrent {
            producers,
            orders_per_producer,
        }) => run_bench_concurrent(producers, orders_per_producer),
        None => cli::run_cli(),
    }
}
