use crate::recommendation::scoring::CareerPathCandidate;

/// Divisor applied to raw scores before exponentiation.
pub const SOFTMAX_TEMPERATURE: f64 = 10.0;

/// Assigns softmax probabilities and ranks candidates by them, highest first.
///
/// Scores are shifted by their maximum before `exp`, which leaves the
/// distribution unchanged and keeps it finite for large raw scores. Ties keep
/// their input order.
pub fn normalize(mut candidates: Vec<CareerPathCandidate>) -> Vec<CareerPathCandidate> {
    if candidates.is_empty() {
        return candidates;
    }

    let max_scaled = candidates
        .iter()
        .map(|c| c.raw_score / SOFTMAX_TEMPERATURE)
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<f64> = candidates
        .iter()
        .map(|c| (c.raw_score / SOFTMAX_TEMPERATURE - max_scaled).exp())
        .collect();
    let total: f64 = exps.iter().sum();

    for (candidate, e) in candidates.iter_mut().zip(exps) {
        candidate.probability = e / total;
    }

    // `sort_by` is stable
    candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    candidates
}
