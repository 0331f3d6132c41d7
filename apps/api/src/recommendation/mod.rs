// Career path recommendation engine.
// Implements: performance aggregation, interest affinity, path scoring,
// softmax ranking and catalog resolution.
// Stages are pure; only `source` and `handlers` touch I/O.

pub mod affinity;
pub mod category;
pub mod engine;
pub mod handlers;
pub mod normalize;
pub mod performance;
pub mod resolver;
pub mod scoring;
pub mod source;
pub mod tables;
