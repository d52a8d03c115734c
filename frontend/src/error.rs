use wasm_bindgen::JsValue;

use crate::session::EditState;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no element matches `{0}`")]
    MissingElement(String),
    #[error("element is missing the `{0}` attribute")]
    MissingAttribute(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("cannot {action} a post while {state}")]
    InvalidTransition {
        state: EditState,
        action: &'static str,
    },
    #[error("discarding stale response for edit #{ticket} (current #{current})")]
    StaleResponse { ticket: u64, current: u64 },
}

impl Error {
    pub fn is_stale(&self) -> bool {
        matches!(self, Error::StaleResponse { .. })
    }
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));

        Error::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
