/// Chart error type. Geometry never fails; only the drawing backend and
/// configuration parsing can.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    RenderingError(String),
    ValidationError(String),
    ConfigError(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            ChartError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ChartError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::ConfigError(err.to_string())
    }
}

impl From<ChartError> for wasm_bindgen::JsValue {
    fn from(err: ChartError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

pub type RenderingResult<T> = Result<T, ChartError>;
