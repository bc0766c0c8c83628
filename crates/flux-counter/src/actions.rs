use strum::{Display, EnumString};

/// Actions understood by the counter
///
/// Parsed from command line words, e.g. `increment` or `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CounterAction {
    Increment,
    Decrement,
    Reset,
}
