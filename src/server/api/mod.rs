//! This module contains the API endpoints for the server.
pub mod guestbook;
pub mod health;
pub mod projects;
pub mod routes;
pub mod state;
