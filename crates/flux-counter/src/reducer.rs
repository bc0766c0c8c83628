use crate::actions::CounterAction;
use crate::state::CounterState;
use flux_store::Action;

/// Reducer - pure function that produces new state from current state + action
///
/// Actions of other types (including the store's init action) leave the
/// state as it is.
pub fn reduce(state: Option<CounterState>, action: &dyn Action) -> CounterState {
    let mut state = state.unwrap_or_default();
    let Some(action) = action.downcast_ref::<CounterAction>() else {
        return state;
    };

    match action {
        CounterAction::Increment => state.count += 1,
        CounterAction::Decrement => state.count -= 1,
        CounterAction::Reset => state.count = 0,
    }
    state.applied += 1;

    state
}
