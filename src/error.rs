// Copyright 2025 Chris Custine
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

//! Top-level error type for the analyzer binary.

use propagation::PropagationError;
use thiserror::Error;

/// Errors surfaced from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] confy::ConfyError),

    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("window error: {0}")]
    Gui(#[from] eframe::Error),
}
