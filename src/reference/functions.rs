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

/// Aggregate functions usable in `statsby`, `timechart`, `aggregate` and `align`.
pub const AGGREGATE_FUNCTIONS: &[&str] = &[
    "any",
    "any_not_null",
    "array_agg",
    "array_agg_distinct",
    "array_union_agg",
    "avg",
    "count",
    "count_distinct",
    "count_distinct_exact",
    "first",
    "first_not_null",
    "last",
    "last_not_null",
    "max",
    "min",
    "median",
    "median_exact",
    "mode",
    "object_agg",
    "percentile",
    "percentile_cont",
    "percentile_disc",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "sum",
    "variance",
    "variance_pop",
    "variance_samp",
    "all",
    "bool_and",
    "bool_or",
    "hll_agg",
    "hll_estimate",
    "hll_combine",
    "make_set_agg",
    "histogram_agg",
    "top_k",
    "top_k_agg",
];

/// Window and ranking functions.
pub const WINDOW_FUNCTIONS: &[&str] = &[
    "window",
    "lag",
    "lag_not_null",
    "lead",
    "lead_not_null",
    "row_number",
    "rank",
    "dense_rank",
    "ntile",
    "cume_dist",
    "percent_rank",
    "first_value",
    "last_value",
    "nth_value",
    "cumsum",
    "moving_avg",
    "moving_sum",
    "ewma",
];

/// Metric selection and metric math.
pub const METRIC_FUNCTIONS: &[&str] = &[
    "m",
    "m_tdigest",
    "m_object",
    "m_histogram",
    "rate",
    "deriv",
    "delta",
    "delta_monotonic",
    "increase",
    "irate",
    "idelta",
    "resets",
    "changes",
    "predict_linear",
    "histogram_quantile",
    "histogram_combine",
    "histogram_fraction",
    "tdigest",
    "tdigest_agg",
    "tdigest_combine",
    "tdigest_quantile",
    "tdigest_merge",
    "prom_quantile",
    "metric",
];

/// String functions.
pub const STRING_FUNCTIONS: &[&str] = &[
    "concat_strings",
    "contains",
    "ends_with",
    "starts_with",
    "format",
    "format_number",
    "left",
    "right",
    "lower",
    "upper",
    "lpad",
    "rpad",
    "ltrim",
    "rtrim",
    "trim",
    "position",
    "strpos",
    "replace",
    "replace_all",
    "repeat",
    "reverse",
    "split",
    "split_part",
    "strlen",
    "substr",
    "editdistance",
    "jaro_winkler",
    "soundex",
    "initcap",
    "translate",
    "normalize_whitespace",
    "string_null",
    "tokenize",
    "tokenize_part",
    "char",
    "ascii",
    "unicode",
    "hex",
    "unhex",
    "strcmp",
    "search",
    "ilike",
    "like",
    "not_like",
    "not_ilike",
    "startswith",
    "endswith",
    "strip_ansi",
    "truncate",
    "ellipsize",
];

/// Regular expression functions.
pub const REGEX_FUNCTIONS: &[&str] = &[
    "match_regex",
    "match_regex_all",
    "match_re2",
    "get_regex",
    "get_regex_all",
    "replace_regex",
    "replace_regex_all",
    "count_regex_matches",
    "split_regex",
    "regex",
    "regex_escape",
];

/// Encoding, hashing and parsing.
pub const ENCODING_FUNCTIONS: &[&str] = &[
    "decode_base64",
    "encode_base64",
    "decode_uri",
    "encode_uri",
    "decode_uri_component",
    "encode_uri_component",
    "decode_html",
    "encode_html",
    "hash",
    "hash_agg",
    "md5",
    "sha1",
    "sha2",
    "sha256",
    "sha512",
    "crc32",
    "farm_fingerprint",
    "murmur3",
    "xxhash64",
    "parse_csv",
    "parse_duration",
    "parse_hex",
    "parse_int",
    "parse_float",
    "parse_ip",
    "parse_isotime",
    "parse_json",
    "parse_kvs",
    "parse_key_value",
    "parse_query_string",
    "parse_timestamp",
    "parse_url",
    "parse_user_agent",
    "parse_xml",
    "parse_yaml",
    "parse_logfmt",
    "parse_syslog",
    "parse_cef",
    "parse_leef",
    "format_json",
    "to_json",
    "uuid",
    "uuid_v4",
    "uuid_from_string",
];

/// Math functions.
pub const MATH_FUNCTIONS: &[&str] = &[
    "abs",
    "acos",
    "acosh",
    "asin",
    "asinh",
    "atan",
    "atan2",
    "atanh",
    "cbrt",
    "ceil",
    "ceiling",
    "cos",
    "cosh",
    "cot",
    "degrees",
    "div",
    "exp",
    "factorial",
    "floor",
    "gcd",
    "greatest",
    "lcm",
    "least",
    "ln",
    "log",
    "log10",
    "log2",
    "mod",
    "pi",
    "pow",
    "power",
    "radians",
    "random",
    "round",
    "sign",
    "sin",
    "sinh",
    "sqrt",
    "square",
    "tan",
    "tanh",
    "trunc",
    "width_bucket",
    "bucket",
    "clamp",
    "safe_divide",
    "is_nan",
    "is_inf",
    "nan",
    "inf",
    "bitand",
    "bitor",
    "bitxor",
    "bitnot",
    "bitshiftleft",
    "bitshiftright",
];

/// Type constructors, conversions and null-typed literals.
pub const TYPE_FUNCTIONS: &[&str] = &[
    "array",
    "array_null",
    "bool",
    "bool_null",
    "duration",
    "duration_null",
    "duration_ns",
    "duration_us",
    "duration_ms",
    "duration_sec",
    "duration_min",
    "duration_hr",
    "duration_day",
    "float64",
    "float64_null",
    "int64",
    "int64_null",
    "ipv4",
    "ipv4_null",
    "object",
    "object_null",
    "string",
    "timestamp",
    "timestamp_null",
    "timestamp_ns",
    "timestamp_us",
    "timestamp_ms",
    "timestamp_s",
    "variant",
    "variant_null",
    "typeof",
    "is_array",
    "is_bool",
    "is_float64",
    "is_int64",
    "is_object",
    "is_string",
    "is_timestamp",
    "is_duration",
    "tags",
    "tags_null",
];

/// Time and duration functions.
pub const TIME_FUNCTIONS: &[&str] = &[
    "bin_end_time",
    "bin_size",
    "bin_start_time",
    "day_of_month",
    "day_of_week",
    "day_of_year",
    "format_duration",
    "format_time",
    "from_milliseconds",
    "from_nanoseconds",
    "from_microseconds",
    "from_seconds",
    "hour",
    "minute",
    "month",
    "quarter",
    "second",
    "week",
    "year",
    "query_end_time",
    "query_start_time",
    "to_days",
    "to_hours",
    "to_microseconds",
    "to_milliseconds",
    "to_minutes",
    "to_nanoseconds",
    "to_seconds",
    "to_weeks",
    "time_bucket_start",
    "time_bucket_end",
    "round_time",
    "truncate_time",
    "timezone_offset",
    "convert_timezone",
    "valid_from",
    "valid_to",
    "interval_start",
    "interval_end",
    "interval_duration",
];

/// Object, array and path functions.
pub const COLLECTION_FUNCTIONS: &[&str] = &[
    "append_item",
    "array_contains",
    "array_concat",
    "array_distinct",
    "array_except",
    "array_flatten",
    "array_intersect",
    "array_length",
    "array_max",
    "array_min",
    "array_pivot",
    "array_position",
    "array_prepend",
    "array_remove",
    "array_slice",
    "array_sort",
    "array_sum",
    "array_to_string",
    "array_union",
    "arrays_overlap",
    "drop_fields",
    "get_field",
    "get_item",
    "get_jmespath",
    "make_array",
    "make_array_range",
    "make_fields",
    "make_object",
    "merge_objects",
    "object_delete",
    "object_insert",
    "object_keys",
    "object_values",
    "object_size",
    "path_exists",
    "pick_fields",
    "prepend_item",
    "slice_array",
    "zip_arrays",
    "map_keys",
    "map_values",
    "unpack_object",
    "flatten_object",
    "first_item",
    "last_item",
];

/// Conditional, null-handling and comparison functions.
pub const CONDITIONAL_FUNCTIONS: &[&str] = &[
    "if",
    "case",
    "if_null",
    "if_not_null",
    "null_if",
    "is_null",
    "is_not_null",
    "is_empty",
    "is_blank",
    "between",
    "in_range",
    "eq",
    "ne",
    "gt",
    "gte",
    "lt",
    "lte",
    "is_true",
    "is_false",
    "not_null",
    "default",
    "choose",
    "decode",
];

/// Network and host functions.
pub const NETWORK_FUNCTIONS: &[&str] = &[
    "ipv4_address_in_network",
    "ipv4_network_int_to_string",
    "ipv4_to_int",
    "int_to_ipv4",
    "ipv4_is_private",
    "ipv4_is_loopback",
    "ipv4_subnet",
    "ipv6_to_string",
    "cidr_contains",
    "geoip_country",
    "geoip_city",
    "url_host",
    "url_path",
    "url_query",
    "url_scheme",
    "url_port",
    "hostname",
    "domain",
    "top_level_domain",
];

/// Stage arguments and verb options written in call syntax.
pub const ARGUMENT_FUNCTIONS: &[&str] = &[
    "asc",
    "desc",
    "group_by",
    "order_by",
    "frame",
    "frame_exact",
    "frame_following",
    "frame_preceding",
    "options",
    "primary_key",
    "valid_for",
    "on",
    "label",
    "exclude",
    "include",
    "with",
    "nulls_first",
    "nulls_last",
    "partition_by",
    "every",
    "bin",
    "interval",
    "ago",
    "sample_rate",
    "seed",
    "tolerance",
    "fill_value",
    "limit_per_group",
    "metric_type",
    "unit",
    "description",
    "interpolate",
    "resolution",
    "step",
    "offset",
];

/// Search, tracing and miscellaneous functions.
pub const MISC_FUNCTIONS: &[&str] = &[
    "coalesce_objects",
    "contains_any",
    "contains_all",
    "search_any",
    "search_all",
    "extract_json",
    "json_path",
    "span_duration",
    "span_error",
    "trace_id",
    "span_id",
    "parent_span_id",
    "service_name",
    "status_code",
    "http_status_class",
    "severity_level",
    "log_level",
    "normalize_log",
    "pattern",
    "fingerprint",
    "redact",
    "mask",
    "anomaly_score",
    "zscore",
    "mad",
    "iqr",
    "outlier",
    "forecast",
    "changepoint",
    "cardinality",
    "entropy",
    "sizeof",
    "bytes",
    "human_bytes",
    "human_duration",
    "link",
    "make_link",
    "resource_id",
    "dataset_id",
    "ingest_time",
    "ingest_id",
    "workspace_id",
    "customer_id",
    "env",
    "emit",
    "sessionize",
    "session_id",
    "session_start",
    "session_end",
    "event_count",
    "dedup_key",
    "group_id",
    "row_id",
    "row_count",
    "column_count",
    "table_name",
    "stage_id",
    "input",
    "inputs",
    "ref",
];
