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

//! UI components for the coverage analyzer.
//!
//! This module contains the sidebar controls and the panels of the main view.

pub mod controls;
pub mod coverage_heatmap;
pub mod metrics_pane;
pub mod throughput_plot;

pub use controls::SignalControls;
pub use coverage_heatmap::CoverageHeatmap;
pub use metrics_pane::MetricsPane;
