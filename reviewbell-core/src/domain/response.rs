//! API response validation

use serde_json::Value;

use crate::domain::homework::Homework;
use crate::error::{ResponseError, Result};

/// A validated homework-status response
///
/// `homeworks` is ordered most recent first and may be empty when nothing
/// has been reviewed since the requested timestamp. Records stay raw until
/// one is needed, so a malformed older record never hides the latest one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
}

impl ApiResponse {
    /// The most recent homework, decoded; `None` if the list is empty
    pub fn latest(&self) -> Option<Result<Homework>> {
        self.homeworks.first().map(Homework::from_json)
    }
}

/// Checks the shape of a decoded response body
///
/// # Errors
/// - [`ResponseError::TypeMismatch`] if the body is not an object, `homeworks`
///   is not an array or `current_date` is not an integer
/// - [`ResponseError::MissingField`] if `homeworks` is absent
pub fn check_response(body: &Value) -> Result<ApiResponse> {
    let map = body
        .as_object()
        .ok_or_else(|| ResponseError::type_mismatch("response", "object", body))?;

    let homeworks = map
        .get("homeworks")
        .ok_or(ResponseError::MissingField("homeworks"))?;
    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| ResponseError::type_mismatch("homeworks", "array", homeworks))?
        .clone();

    let current_date = match map.get("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| ResponseError::type_mismatch("current_date", "integer", value))?,
        ),
    };

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}
