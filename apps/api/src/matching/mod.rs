// Candidate/job compatibility: distance lookup, scoring, ranking and the
// HTTP surface that serves it to the merchant and candidate screens.
// Scoring itself is pure; only `store` and `handlers` touch I/O.

pub mod compatibility;
pub mod distance;
pub mod handlers;
pub mod ranking;
pub mod skills;
pub mod store;
