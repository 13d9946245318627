/// Tolerance for deciding whether raw scores already sum to 1.
pub(crate) const DISTRIBUTION_TOLERANCE: f32 = 1e-5;

pub(crate) fn softmax(raw: &[f32]) -> Vec<f32> {
    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = raw.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

pub(crate) fn is_distribution(raw: &[f32]) -> bool {
    let sum: f32 = raw.iter().sum();
    raw.iter().all(|&v| (0.0..=1.0).contains(&v))
        && (sum - 1.0).abs() <= DISTRIBUTION_TOLERANCE
}

/// Returns `raw` unchanged when it is already a probability distribution,
/// otherwise softmaxes it into one. Confidence percentages downstream are
/// meaningless without this.
pub(crate) fn ensure_distribution(raw: &[f32]) -> Vec<f32> {
    if is_distribution(raw) {
        raw.to_vec()
    } else {
        softmax(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_produces_a_distribution() {
        let scores = softmax(&[1.0, 2.0, 3.0, -4.0]);
        assert!(is_distribution(&scores));
        // Larger inputs keep larger outputs.
        assert!(scores[2] > scores[1] && scores[1] > scores[0] && scores[0] > scores[3]);
    }

    #[test]
    fn softmax_is_stable_for_large_logits() {
        let scores = softmax(&[1000.0, 999.0, 998.0]);
        assert!(scores.iter().all(|v| v.is_finite()));
        assert!(is_distribution(&scores));
    }

    #[test]
    fn existing_distribution_passes_through_unchanged() {
        let raw = [0.1, 0.7, 0.2];
        assert_eq!(ensure_distribution(&raw), raw.to_vec());
    }

    #[test]
    fn logits_get_normalized() {
        let raw = [2.0, -1.0, 0.5];
        assert!(!is_distribution(&raw));
        let scores = ensure_distribution(&raw);
        assert!(is_distribution(&scores));
    }
}
