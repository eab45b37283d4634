//! Data types shared between the client and any backend implementation of
//! the reviews API.

pub mod app;
pub mod review;
