pub mod answer_client;
pub mod auth_client;
pub mod authenticator;
pub mod canned;
pub mod controller;

mod http;

pub use answer_client::HttpAnswerSource;
pub use auth_client::{AuthClient, LoginError, LoginRequest, LoginSuccess};
pub use authenticator::Authenticator;
pub use canned::CannedResponder;
pub use controller::{ChatController, SubmitOutcome};
