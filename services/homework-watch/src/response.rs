//! Shape checks for status API payloads

use serde_json::Value;

use crate::error::ResponseError;

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// A payload that passed [`check_response`]
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPage<'a> {
    /// Homework records, newest first. Contents are not inspected here.
    pub homeworks: &'a [Value],
    /// Server time of the response; becomes the next watermark
    pub current_date: i64,
}

/// Check that `response` has the documented top-level shape.
///
/// Checks run in a fixed order and stop at the first violation. An empty
/// `homeworks` list is valid and means nothing changed since the watermark.
pub fn check_response(response: &Value) -> Result<StatusPage<'_>, ResponseError> {
    let object = response.as_object().ok_or(ResponseError::NotAnObject)?;

    let homeworks = object
        .get(HOMEWORKS_KEY)
        .ok_or(ResponseError::MissingHomeworks)?
        .as_array()
        .ok_or(ResponseError::HomeworksNotAList)?;

    let current_date = object
        .get(CURRENT_DATE_KEY)
        .ok_or(ResponseError::MissingCurrentDate)?;
    let current_date = current_date
        .as_i64()
        .ok_or_else(|| ResponseError::CurrentDateNotInteger(current_date.to_string()))?;

    Ok(StatusPage {
        homeworks: homeworks.as_slice(),
        current_date,
    })
}
