//! HTTP surface for InsightX: dataset profiles, fragment upload and query routing.

pub mod rest;

pub use rest::RestApi;
