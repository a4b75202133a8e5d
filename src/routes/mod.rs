use std::ops::Deref;

use foodgram_shopping::ExportService;

mod health;
mod shopping_cart;

pub use health::{health, ready};
pub use shopping_cart::{add_to_cart, download_shopping_cart, remove_from_cart};

#[derive(Clone)]
pub struct AppState {
    pub state: foodgram_shared::State,
    pub export: ExportService,
    pub jwt_secret: String,
}

impl Deref for AppState {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}
