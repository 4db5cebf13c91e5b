pub mod models;

pub use models::{PlayerInput, ResultInput, TournamentInput};
