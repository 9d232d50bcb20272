//! Client core for the Vault wellbeing assistant: the chat session
//! controller, the guided exercises, and the REST client they sit on.

pub mod api;
pub mod config;
pub mod engagement;
pub mod errors;
pub mod exercise;
pub mod models;
pub mod service;
pub mod ui;
pub mod wellbeing;
