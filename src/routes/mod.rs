use axum::extract::FromRequest;

use crate::error::AppError;

pub mod reports;
pub mod startups;

/// `Json` whose rejections (bad syntax, missing fields, unknown enum values)
/// come back as the usual `{"error"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
