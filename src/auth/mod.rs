use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractor;
pub mod google;
pub mod handlers;
pub mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
