use crate::state::CounterState;
use flux_store::{BoxedAction, DispatchFunction, Middleware, MiddlewareApi};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared record of every action that entered the store
pub type History = Rc<RefCell<Vec<String>>>;

/// HistoryMiddleware - appends each action's debug form to a shared history
pub struct HistoryMiddleware {
    history: History,
}

impl HistoryMiddleware {
    pub fn new(history: History) -> Self {
        Self { history }
    }
}

impl Middleware<CounterState> for HistoryMiddleware {
    fn handle(&self, action: BoxedAction, _api: &MiddlewareApi<CounterState>, next: &DispatchFunction) {
        self.history.borrow_mut().push(format!("{:?}", action));
        next(action);
    }
}
