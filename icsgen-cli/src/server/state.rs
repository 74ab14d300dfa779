use icsgen_core::Encoder;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    encoder: Encoder,
}

impl AppState {
    pub fn new(encoder: Encoder) -> Self {
        AppState { encoder }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}
