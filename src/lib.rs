//! Client library for the help-desk ticketing backend.
//!
//! [`client::HelpdeskClient`] maps each REST endpoint to one call of the
//! [`api::HelpdeskApi`] trait; the controllers in [`pages`] drive those calls
//! with the fetch, render, mutate and re-fetch cycle each screen needs.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod pages;
pub mod responses;
pub mod types;
