//! reqwest implementation of [`ChatApi`](crate::ChatApi).
//!
//! Talks to the service's `/api` routes. Every call except the health
//! probe carries the user's token in the `Authorization` header.

mod api;
mod client;

pub use client::HttpChatApi;
