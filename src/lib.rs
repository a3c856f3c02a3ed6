//! Invoice management backend.
//!
//! MongoDB-backed CRUD for invoices and users, invoice QR codes, one-shot data
//! migrations and the display helpers the frontend shares.

pub mod app;
pub mod config;
pub mod dto;
pub mod handler;
pub mod migration;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;
pub mod util;
pub mod view;
