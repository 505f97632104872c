//! hookwire: webhook and interaction-response REST client
//!
//! A library that shapes calls against a chat platform's webhook and
//! interaction-response endpoints into dispatch requests (URL, auth,
//! JSON or multipart body, rate-limit bucket) and sends them through a
//! pluggable dispatcher.

pub mod config;
pub mod dispatch;
pub mod id;
pub mod webhook;
