//! Command Handlers module
//!
//! Handlers that orchestrate state-changing operations.
//! Each handler coordinates domain rules and repositories.

mod commands;
mod login_handler;
mod top_up_handler;
mod transfer_handler;
mod user_handler;


pub use commands::*;
pub use login_handler::LoginHandler;
pub use top_up_handler::TopUpHandler;
pub use transfer_handler::TransferHandler;
pub use user_handler::RegisterUserHandler;
