//! # shop-core
//!
//! Core types and validation for the SmartShop console.
//!
//! This crate provides the foundational types shared across all SmartShop crates:
//! - Entity structs mirroring the backend gateway payloads (inventory,
//!   transactions, forecast, classification, weekly summary)
//! - Enums with lenient wire parsing (`TransactionKind`, `RowLimit`)
//! - Filter state and query construction, including the date re-serialization
//!   the backend expects
//! - Cross-cutting validation errors

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
