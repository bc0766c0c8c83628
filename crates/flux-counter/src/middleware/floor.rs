use crate::actions::CounterAction;
use crate::state::CounterState;
use flux_store::{BoxedAction, DispatchFunction, Middleware, MiddlewareApi};

/// FloorMiddleware - consumes decrements that would go below a floor
pub struct FloorMiddleware {
    floor: i64,
}

impl FloorMiddleware {
    pub fn new(floor: i64) -> Self {
        Self { floor }
    }
}

impl Middleware<CounterState> for FloorMiddleware {
    fn handle(&self, action: BoxedAction, api: &MiddlewareApi<CounterState>, next: &DispatchFunction) {
        if let Some(CounterAction::Decrement) = action.downcast_ref::<CounterAction>() {
            let count = api.state().map(|state| state.count).unwrap_or_default();
            if count <= self.floor {
                log::info!("Ignoring decrement, count {} is at the floor", count);
                return; // Consume action
            }
        }

        next(action);
    }
}
