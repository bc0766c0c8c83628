use anyhow::{Context, Result};
use flux_config::AppConfig;
use flux_store::{LoggingMiddleware, Middleware, Store, Subscription};
use std::rc::Rc;
use std::str::FromStr;

mod actions;
mod logger;
mod middleware;
mod reducer;
mod state;
mod subscribers;

use actions::CounterAction;
use middleware::{FloorMiddleware, History, HistoryMiddleware};
use state::CounterState;
use subscribers::{CountPrinter, ParityPrinter};

const USAGE: &str = "usage: flux-counter <increment|decrement|reset>...";

fn main() -> Result<()> {
    let config = AppConfig::load();
    logger::init(config.log_level_filter());

    log::info!("Starting flux-counter");

    let actions = parse_actions(std::env::args().skip(1))?;
    if actions.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    let history = History::default();

    // Add middleware in order (they execute in this order)
    let middleware: Vec<Box<dyn Middleware<CounterState>>> = vec![
        Box::new(LoggingMiddleware::new()),
        Box::new(HistoryMiddleware::new(Rc::clone(&history))),
        Box::new(FloorMiddleware::new(0)),
    ];
    let store = Store::with_options(
        reducer::reduce,
        Some(CounterState::starting_at(config.initial_count)),
        middleware,
        config.store,
    );

    let count_printer = Rc::new(CountPrinter::default());
    store.subscribe_with_equatable(&count_printer, |subscription: Subscription<CounterState>| {
        subscription.select(|state| state.count)
    });

    let parity_printer = Rc::new(ParityPrinter);
    let parity = store
        .subscription()
        .map(CounterState::is_even)
        .skip_repeats()
        .subscribe(&parity_printer);

    for action in actions {
        store.dispatch(action);
    }

    parity.dispose();
    store.unsubscribe(&count_printer);

    let state = store.state().unwrap_or_default();
    log::info!(
        "Applied {} of {} action(s), printed {} count(s)",
        state.applied,
        history.borrow().len(),
        count_printer.printed()
    );
    println!("final: {}", state.count);

    log::info!("Exiting flux-counter");
    Ok(())
}

fn parse_actions(words: impl Iterator<Item = String>) -> Result<Vec<CounterAction>> {
    words
        .map(|word| {
            CounterAction::from_str(&word).with_context(|| format!("Unknown action '{}'\n{}", word, USAGE))
        })
        .collect()
}
