use std::ops::Deref;

mod cart;

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
