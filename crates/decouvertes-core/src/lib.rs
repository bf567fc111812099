// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! decouvertes-core: Core library for the decouvertes Leitner box engine.
//!
//! This library has no filesystem access. It provides:
//! - The card catalog and per-player progress model
//! - Weighted box selection of the next card
//! - Answer normalization and box transitions
//! - Player statistics, including the daily streak

pub mod checker;
pub mod error;
pub mod rng;
pub mod schedule;
pub mod selector;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use checker::{CheckResult, check_answer, check_player_answer, normalize_answer};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use rng::TinyRng;
pub use schedule::BoxSchedule;
pub use selector::{Done, select_card};
pub use stats::PlayerStats;
pub use types::card::{Card, Catalog};
pub use types::player_id::PlayerId;
pub use types::progress::{
    CardProgress, HistoryEvent, PlayerRecord, ProgressCollection, ProgressEntry,
};
pub use types::timestamp::Timestamp;
