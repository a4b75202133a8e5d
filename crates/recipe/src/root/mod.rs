use std::ops::Deref;

mod create;
mod delete;
mod import;
mod ingredient;

pub use create::{ComponentInput, CreateInput};
pub use import::{ImportFormat, IngredientInput};

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self { state }
    }
}
