//! Record types shared by the registrar library and its frontends.

pub mod models;

pub use models::{Game, Series, Team, User};
