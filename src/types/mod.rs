// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for the swapscan data model.
//!
//! - Token decimals and raw amounts, with exact decimal rendering
//! - Block references
//! - Asset and pool descriptors
//! - Raw swap logs and normalized trade events

pub mod asset;
pub mod block;
pub mod event;
pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here
