use clap::{Parser, Subcommand, builder::PossibleValuesParser};

use orderbook_core::book::OrderBook;
use orderbook_core::order::{Order, Side};

/// Simple CLI to interact with the order book.
#[derive(Parser)]
#[command(name = "Order Book CLI")]
#[command(version = "0.1", about = "A demo of a limit order book")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a resting or crossing limit order.
    Add {
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,
        price: u64,
        quantity: u64,
    },
    /// Cancel a resting order by id.
    Cancel {
        order_id: u64,
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,
        price: u64,
    },
    /// Change the resting quantity of an order in place.
    Modify {
        order_id: u64,
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,
        price: u64,
        new_quantity: u64,
    },
    /// Print the current book.
    Book,
}

fn parse_side(side: &str) -> Side {
    match side {
        "buy" => Side::Buy,
        "sell" => Side::Sell,
        _ => unreachable!("clap restricts this to buy/sell"),
    }
}

fn handle_add(book: &mut OrderBook, next_id: &mut u64, side: String, price: u64, quantity: u64) {
    let order_id = *next_id;
    *next_id += 1;

    let order = Order::new(order_id, parse_side(&side), price, quantity);
    match order.validate() {
        Ok(()) => {
            let trades = book.add_order(order);
            println!("order {order_id} admitted");
            if trades.is_empty() {
                println!("no trades");
            } else {
                for trade in trades {
                    println!("{trade:?}");
                }
            }
        }
        Err(err) => println!("order rejected: {err}"),
    }
}

fn handle_cancel(book: &mut OrderBook, order_id: u64, side: String, price: u64) {
    if book.cancel_order(order_id, parse_side(&side), price) {
        println!("order {order_id} cancelled");
    } else {
        println!("order {order_id} not found at that price");
    }
}

fn handle_modify(book: &mut OrderBook, order_id: u64, side: String, price: u64, new_quantity: u64) {
    if book.modify_order(order_id, parse_side(&side), price, new_quantity) {
        println!("order {order_id} modified to quantity {new_quantity}");
    } else {
        println!("order {order_id} not found at that price");
    }
}

fn print_book(book: &OrderBook) {
    println!("best bid: {:?}", book.best_bid());
    println!("best ask: {:?}", book.best_ask());
}

/// Runs one CLI command against a fresh, empty book.
///
/// Each invocation of the binary starts from an empty book: this is a demo
/// of the book's API, not a persistent order-entry client.
pub fn run_cli() {
    let cli = Cli::parse();
    let mut book = OrderBook::new();
    let mut next_id = 1u64;

    match cli.command {
        Commands::Add { side, price, quantity } => handle_add(&mut book, &mut next_id, side, price, quantity),
        Commands::Cancel { order_id, side, price } => handle_cancel(&mut book, order_id, side, price),
        Commands::Modify {
            order_id,
            side,
            price,
            new_quantity,
        } => handle_modify(&mut book, order_id, side, price, new_quantity),
        Commands::Book => print_book(&book),
    }
}
