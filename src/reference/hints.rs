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

const COUNT_IF_HINT: &str = "OPAL has no conditional aggregates. Derive a flag first with \
     make_col flag:if(condition, 1, 0), then aggregate it with sum(flag).";
const STRLEN_HINT: &str = "Use strlen(x) for string length or array_length(x) for arrays.";
const IF_NULL_HINT: &str = "Use if_null(value, fallback) to replace nulls.";
const IF_HINT: &str = "Use if(condition, then_value, else_value).";
const STRING_HINT: &str = "Use string(x) to convert a value to a string.";
const INT_HINT: &str = "Use int64(x) to convert a value to an integer.";
const FLOAT_HINT: &str = "Use float64(x) to convert a value to a float.";
const NOW_HINT: &str = "Use query_end_time() for the end of the query window.";
const MATCH_REGEX_HINT: &str = "Use match_regex(x, /pattern/) or the ~ operator with a regex literal.";
const COUNT_DISTINCT_HINT: &str = "Use count_distinct(x) (approximate) or count_distinct_exact(x).";
const ARRAY_AGG_HINT: &str = "Use array_agg(x) to collect values into an array.";
const PERCENTILE_HINT: &str = "Use percentile(x, 0.95) with a fraction between 0 and 1.";
const TIMESTAMP_HINT: &str =
    "Use from_seconds(x), from_milliseconds(x) or parse_isotime(s) to build a timestamp.";
const JSON_HINT: &str =
    "Use parse_json(x) and then dot access or get_field(object, \"key\") on the result.";
const TIME_BUCKET_HINT: &str =
    "Bucket time with timechart <interval> or read the bucket with bin_start_time().";
const DATE_DIFF_HINT: &str = "Subtract timestamps directly; the result is a duration.";
const DATE_ADD_HINT: &str = "Add a duration literal directly, e.g. timestamp + 1h.";
const FORMAT_TIME_HINT: &str = "Use format_time(timestamp, \"YYYY-MM-DD\").";

/// SQL-style function names that do not exist in OPAL, with the hint shown
/// to the author of the query.
pub const DISALLOWED_FUNCTIONS: &[(&str, &str)] = &[
    ("count_if", COUNT_IF_HINT),
    ("countif", COUNT_IF_HINT),
    ("sum_if", COUNT_IF_HINT),
    ("sumif", COUNT_IF_HINT),
    ("avg_if", COUNT_IF_HINT),
    ("length", STRLEN_HINT),
    ("len", STRLEN_HINT),
    ("char_length", STRLEN_HINT),
    ("character_length", STRLEN_HINT),
    ("substring", "Use substr(string, start, length)."),
    ("concat", "Use concat_strings(a, b, ...)."),
    ("coalesce", IF_NULL_HINT),
    ("ifnull", IF_NULL_HINT),
    ("nvl", IF_NULL_HINT),
    ("isnull", "Use is_null(x)."),
    ("nullif", "Use null_if(a, b)."),
    ("iif", IF_HINT),
    ("iff", IF_HINT),
    ("cast", "Use a conversion function such as int64(x), float64(x) or string(x)."),
    ("tostring", STRING_HINT),
    ("to_string", STRING_HINT),
    ("str", STRING_HINT),
    ("toint", INT_HINT),
    ("to_int", INT_HINT),
    ("int", INT_HINT),
    ("integer", INT_HINT),
    ("tofloat", FLOAT_HINT),
    ("to_float", FLOAT_HINT),
    ("float", FLOAT_HINT),
    ("double", FLOAT_HINT),
    ("now", NOW_HINT),
    ("current_timestamp", NOW_HINT),
    ("getdate", NOW_HINT),
    ("regexp_like", MATCH_REGEX_HINT),
    ("regex_match", MATCH_REGEX_HINT),
    ("rlike", MATCH_REGEX_HINT),
    ("regexp_replace", "Use replace_regex(x, /pattern/, replacement)."),
    ("regexp_extract", "Use get_regex(x, /pattern/, group)."),
    ("approx_count_distinct", COUNT_DISTINCT_HINT),
    ("distinct_count", COUNT_DISTINCT_HINT),
    ("dcount", COUNT_DISTINCT_HINT),
    ("string_agg", ARRAY_AGG_HINT),
    ("group_concat", ARRAY_AGG_HINT),
    ("listagg", ARRAY_AGG_HINT),
    ("collect_list", ARRAY_AGG_HINT),
    ("percentile_approx", PERCENTILE_HINT),
    ("approx_percentile", PERCENTILE_HINT),
    ("quantile", PERCENTILE_HINT),
    ("to_timestamp", TIMESTAMP_HINT),
    ("from_unixtime", TIMESTAMP_HINT),
    ("unix_timestamp", "Use to_seconds(timestamp) for epoch seconds."),
    ("json_extract", JSON_HINT),
    ("json_value", JSON_HINT),
    ("get_json_object", JSON_HINT),
    ("date_trunc", TIME_BUCKET_HINT),
    ("time_bucket", TIME_BUCKET_HINT),
    ("datediff", DATE_DIFF_HINT),
    ("date_diff", DATE_DIFF_HINT),
    ("dateadd", DATE_ADD_HINT),
    ("date_add", DATE_ADD_HINT),
    ("date_format", FORMAT_TIME_HINT),
    ("strftime", FORMAT_TIME_HINT),
    ("ucase", "Use upper(x)."),
    ("lcase", "Use lower(x)."),
];
