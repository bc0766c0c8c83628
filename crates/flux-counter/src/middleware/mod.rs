pub mod floor;
pub mod history;

pub use floor::FloorMiddleware;
pub use history::{History, HistoryMiddleware};
