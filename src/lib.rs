//! complaint-desk: submit and browse complaints on a shared REST endpoint
//!
//! Library layout:
//! - [`client`]: request client for the complaint service
//! - [`view_model`]: form/list state machine driving the client
//! - [`tui`]: terminal front-end
//! - [`config`], [`models`]: configuration and wire types

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod tui;
pub mod view_model;

pub use client::{ClientError, ComplaintApi, ComplaintClient, ErrorKind};
pub use config::Config;
pub use models::{ApiResult, Complaint, ComplaintDraft};
pub use view_model::ViewModel;
