//! Herald Access - publisher identity and paywall entitlement
//!
//! This crate implements the per-page-load access flow for the Catholic
//! Herald site: session resolution (provider session or cached token with
//! refresh), entitlement evaluation against the plan allow-list, and the
//! page surface wiring (auth controls, billing portal, sign-in form,
//! paywall removal).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
