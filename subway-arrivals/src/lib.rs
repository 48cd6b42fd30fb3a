//! Subway arrivals server.
//!
//! A web application that answers: "when are the next trains at this
//! station, in each direction?"

pub mod arrivals;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod domain;
pub mod web;

#[cfg(test)]
mod test_support;
