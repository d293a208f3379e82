use crate::cart::intent::{CartIntent, ZeroQuantity};
use crate::cart::mvi::Reducer;
use crate::cart::state::CartState;

pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Intent = CartIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CartIntent::Load { items } => CartState { items },
            CartIntent::Add { item } => {
                if state.contains(&item.id) {
                    // Only the id matters for an existing line.
                    Self::reduce(state, CartIntent::Increment { id: item.id })
                } else {
                    let mut items = state.items;
                    items.push(item.with_quantity(1));
                    CartState { items }
                }
            }
            CartIntent::Increment { id } => {
                let mut items = state.items;
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.quantity = item.quantity.saturating_add(1);
                }
                CartState { items }
            }
            CartIntent::Decrement { id, on_zero } => {
                let mut items = state.items;
                let Some(pos) = items.iter().position(|item| item.id == id) else {
                    return CartState { items };
                };
                let quantity = items[pos].quantity.saturating_sub(1);
                if quantity == 0 && on_zero == ZeroQuantity::Remove {
                    items.remove(pos);
                } else {
                    items[pos].quantity = quantity;
                }
                CartState { items }
            }
            CartIntent::Remove { id } => {
                let mut items = state.items;
                items.retain(|item| item.id != id);
                CartState { items }
            }
            CartIntent::Clear => CartState::default(),
        }
    }
}
