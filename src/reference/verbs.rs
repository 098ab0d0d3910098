//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Opal Guard.
//! The Opal Guard project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

/// Filtering and row selection.
pub const FILTER_VERBS: &[&str] = &[
    "filter",
    "filter_last",
    "dedup",
    "distinct",
    "limit",
    "topk",
    "bottomk",
    "sort",
    "ever",
    "never",
    "always",
    "exists",
    "not_exists",
    "surrounding",
    "sample",
];

/// Column projection and derivation.
pub const PROJECTION_VERBS: &[&str] = &[
    "make_col",
    "pick_col",
    "drop_col",
    "rename_col",
    "extract_regex",
    "fill",
    "flatten",
    "flatten_all",
    "flatten_leaves",
    "flatten_single",
    "pivot",
    "unpivot",
    "unnest",
    "coalesce_col",
    "split_col",
];

/// Aggregation and time bucketing.
pub const AGGREGATION_VERBS: &[&str] = &[
    "statsby",
    "timechart",
    "timestats",
    "aggregate",
    "align",
    "rollup",
    "timeshift",
    "window_stats",
    "histogram",
    "make_metric",
];

/// Joins and dataset combination.
pub const JOIN_VERBS: &[&str] = &[
    "join",
    "leftjoin",
    "fulljoin",
    "lookup",
    "union",
    "follow",
    "follow_not",
    "merge_events",
];

/// Shaping datasets into events, intervals and resources.
pub const SHAPING_VERBS: &[&str] = &[
    "make_event",
    "make_interval",
    "make_resource",
    "make_session",
    "make_table",
    "make_reference",
    "make_object_col",
    "update_resource",
    "interface",
    "drop_interface",
    "add_key",
    "unset_keys",
    "set_primary_key",
    "unset_primary_key",
    "set_valid_from",
    "set_valid_to",
    "unset_valid_to",
    "set_timestamp",
];

/// Column and dataset metadata.
pub const METADATA_VERBS: &[&str] = &[
    "set_col_enum",
    "unset_col_enum",
    "set_col_immutable",
    "unset_col_immutable",
    "set_col_searchable",
    "unset_col_searchable",
    "set_col_visible",
    "unset_col_visible",
    "set_col_description",
    "set_col_type",
    "set_label",
    "unset_label",
    "set_link",
    "unset_link",
    "unset_all_links",
    "set_metric",
    "set_metric_metadata",
    "unset_metric",
    "set_dataset_description",
    "set_icon",
    "set_kind",
    "set_source_url",
    "add_metadata",
    "set_tags",
    "set_unit",
];

/// Tracing, metric and pattern verbs.
pub const SPECIALIZED_VERBS: &[&str] = &[
    "make_span",
    "make_trace",
    "span_tree",
    "log_patterns",
    "cluster_logs",
    "detect_anomalies",
    "make_tdigest",
    "top_values",
    "parse_kv",
    "parse_json_col",
];
