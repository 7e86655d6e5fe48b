// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap normalization pipeline
//!
//! ```text
//! RangeGuard ──> ChainReader::swap_logs (per pool, concurrently)
//!                    │
//!                    ▼
//!            BatchContextResolver   blocks + senders, deduplicated
//!                    │
//!                    ▼
//!               SwapDecoder         sides, amounts, price
//!                    │
//!                    ▼
//!         ReserveSnapshotAttacher   last swap per block
//!                    │
//!                    ▼
//!             EventAggregator       merge + sort
//! ```

mod aggregator;
mod context;
mod decoder;
mod reserves;

pub use aggregator::EventAggregator;
pub use context::{BatchContext, BatchContextResolver};
pub use decoder::SwapDecoder;
pub use reserves::{orient_reserves, ReserveSnapshotAttacher};
