use std::borrow::Cow;

use foodgram_shopping::{ShoppingError, render::FontSource};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

pub const DEFAULT_FONT: &str = "fonts/DejaVuSansMono.ttf";

/// A font compiled into the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedFont(pub String);

impl Default for EmbeddedFont {
    fn default() -> Self {
        Self(DEFAULT_FONT.to_owned())
    }
}

impl FontSource for EmbeddedFont {
    fn load(&self) -> foodgram_shopping::Result<Cow<'static, [u8]>> {
        Assets::get(&self.0)
            .map(|file| file.data)
            .ok_or_else(|| ShoppingError::MissingFont(self.0.to_owned()))
    }
}
