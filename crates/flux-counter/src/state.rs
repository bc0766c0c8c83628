/// Counter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    pub count: i64,
    /// Number of actions the reducer has applied
    pub applied: u64,
}

impl CounterState {
    pub fn starting_at(count: i64) -> Self {
        Self { count, applied: 0 }
    }

    pub fn is_even(&self) -> bool {
        self.count % 2 == 0
    }
}
