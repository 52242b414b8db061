//! Photo Predict Common Library
//!
//! CLIとWeb(WASM)で共有される予測クライアントの中核

pub mod config;
pub mod controller;
pub mod error;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
pub use controller::{PredictOutcome, PredictionClient};
pub use error::{Error, Result};
pub use protocol::{interpret_reply, FormPart, HttpReply, PredictionRequest};
pub use render::{format_percent, render_fields};
pub use transport::{FakeTransport, PredictionTransport, TransportError};
pub use types::{
    ClientVariant, Comparison, ImageFile, LabelResult, PredictionResponse, Selection, Slot, UiState,
};
pub use view::{PredictionView, RecordingView, ResultField, ViewSnapshot};
