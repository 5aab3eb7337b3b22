//! Engagement-weighted feedback ranking

use serde_json::Value;

/// How many ranked replies are kept for model consumption
pub const FEEDBACK_TOP_N: usize = 10;

fn counter(record: &Value, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Popularity score of one reply: views + 3*retweets + 5*quotes.
///
/// Missing or non-numeric counters count as zero.
pub fn engagement_score(record: &Value) -> u64 {
    counter(record, "view_count")
        + 3 * counter(record, "retweet_count")
        + 5 * counter(record, "quote_count")
}

/// Re-order candidate replies by descending score and keep the top ten.
///
/// Deterministic for identical input: equal scores keep their input order.
pub fn rank_feedback(mut feedback: Vec<Value>) -> Vec<Value> {
    feedback.sort_by_key(|record| std::cmp::Reverse(engagement_score(record)));
    feedback.truncate(FEEDBACK_TOP_N);
    feedback
}
