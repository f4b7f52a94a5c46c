//! REST API module.
//!
//! Contains all API routes and handlers following the admin frontend contract.

mod annonces;
mod archive;
mod folders;
mod news;
mod schedules;
mod upload;

pub use annonces::*;
pub use archive::*;
pub use folders::*;
pub use news::*;
pub use schedules::*;
pub use upload::*;

use axum::Json;

use crate::errors::AppError;

/// Handler result: a shaped JSON body or the error envelope.
pub type ApiResult<T> = Result<Json<T>, AppError>;
