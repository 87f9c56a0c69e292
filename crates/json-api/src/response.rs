//! Uniform API error responses
//!
//! Every failure is rendered as `{"success": false, "error": "..."}` with an
//! appropriate status code; internals never leak to the caller.

use salvo::{
    Depot, Request, Response, Writer,
    http::StatusCode,
    oapi::{Components, EndpointOutRegister, Operation, Response as OapiResponse, ToSchema},
    writing::Json,
};
use serde::{Deserialize, Serialize};

/// Uniform error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// An error ready to be written as a uniform API response.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into() }
    }

    pub(crate) fn unprocessable(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, message: message.into() }
    }

    /// Generic 500 with a non-leaking message.
    pub(crate) fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "something went wrong, please try again".to_string(),
        }
    }
}

#[salvo::async_trait]
impl Writer for ApiError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorBody { success: false, error: self.message }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        operation
            .responses
            .insert("400", OapiResponse::new("Invalid submission"));
        operation.responses.insert("404", OapiResponse::new("Not Found"));
        operation
            .responses
            .insert("409", OapiResponse::new("Duplicate booking"));
        operation
            .responses
            .insert("422", OapiResponse::new("Not applicable"));
        operation
            .responses
            .insert("500", OapiResponse::new("Internal Server Error"));
    }
}
