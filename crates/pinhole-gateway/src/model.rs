mod url;

pub use url::{CreateUrlRequest, CreateUrlResponse, ErrorResponse, FieldError, HealthResponse};
