//! Top-up Store API - backend for a game top-up and voucher storefront
//!
//! This crate provides the JSON API for:
//! - Browsing games, their top-up packages and platform vouchers
//! - Direct checkout into a per-user transaction ledger
//! - Resolving pending transactions through a payment gateway

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
