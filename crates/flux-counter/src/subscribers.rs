use flux_store::StoreSubscriber;
use std::cell::Cell;

/// Prints the count every time it changes
#[derive(Default)]
pub struct CountPrinter {
    printed: Cell<usize>,
}

impl CountPrinter {
    pub fn printed(&self) -> usize {
        self.printed.get()
    }
}

impl StoreSubscriber<i64> for CountPrinter {
    fn new_state(&self, count: &i64) {
        println!("count: {}", count);
        self.printed.set(self.printed.get() + 1);
    }
}

/// Prints whether the count is even or odd
pub struct ParityPrinter;

impl StoreSubscriber<bool> for ParityPrinter {
    fn new_state(&self, even: &bool) {
        println!("parity: {}", if *even { "even" } else { "odd" });
    }
}
