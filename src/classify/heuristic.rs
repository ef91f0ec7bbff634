//! Fixed linear scoring rule over the summary features.
//!
//! Not a trained classifier: the weights are illustrative, chosen so that
//! bright/loud material leans rock, dark/smooth material leans classical,
//! bass-heavy loud material leans hiphop. The contract that matters is the
//! shape of the output: a deterministic, normalized distribution.

use super::{best_of, Genre, Prediction};
use crate::audio::SummaryFeatures;

const NORM_EPSILON: f32 = 1e-9;

/// Score the features against each genre and return the normalized
/// distribution with its argmax. Pure: identical input gives a bit-identical
/// result.
pub fn classify(f: &SummaryFeatures) -> Prediction {
    let probs = to_distribution(scores(f));
    Prediction {
        best: best_of(&probs),
        probs,
    }
}

/// Raw per-genre scores, in label order.
fn scores(f: &SummaryFeatures) -> [f32; Genre::COUNT] {
    [
        // rock: bright, loud, noisy
        f.centroid * 1.0 + f.rms * 1.5 + f.zcr * 0.8,
        // classical: dark, smooth, moderate level
        (1.0 - f.centroid) * 1.2 + (1.0 - f.zcr) * 1.0 + f.rms * 0.6,
        // hiphop: heavy low end, strong level
        f.centroid * 0.6 + f.rms * 2.0 + f.zcr * 1.2,
        // jazz: mellow middle ground
        (1.0 - f.centroid) * 0.3 + f.rms * 0.9 + f.zcr * 0.6,
    ]
}

/// Shift scores so the minimum is non-negative (ranking-preserving), then
/// normalize by the sum.
fn to_distribution(mut scores: [f32; Genre::COUNT]) -> [(Genre, f32); Genre::COUNT] {
    let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
    if min < 0.0 {
        for s in &mut scores {
            *s -= min;
        }
    }

    let sum: f32 = scores.iter().sum::<f32>() + NORM_EPSILON;
    let mut probs = [(Genre::Rock, 0.0f32); Genre::COUNT];
    for (i, &genre) in Genre::all().iter().enumerate() {
        probs[i] = (genre, scores[i] / sum);
    }
    probs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(centroid: f32, rms: f32, zcr: f32) -> SummaryFeatures {
        SummaryFeatures {
            centroid_hz: centroid * 22_050.0,
            centroid,
            rms,
            zcr,
        }
    }

    #[test]
    fn probabilities_are_normalized_and_non_negative() {
        let cases = [
            features(0.0, 0.0, 0.0),
            features(1.0, 1.0, 1.0),
            features(0.3, 0.05, 0.12),
            features(0.9, 0.6, 0.4),
        ];
        for f in cases {
            let p = classify(&f);
            let sum: f32 = p.probs.iter().map(|(_, v)| v).sum();
            assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
            assert!(p.probs.iter().all(|(_, v)| *v >= 0.0));
        }
    }

    #[test]
    fn best_is_argmax() {
        let p = classify(&features(0.8, 0.5, 0.3));
        let max = p
            .probs
            .iter()
            .fold(p.probs[0], |acc, &c| if c.1 > acc.1 { c } else { acc });
        assert_eq!(p.best, max.0);
        assert!((p.confidence() - max.1).abs() < 1e-9);
    }

    #[test]
    fn classification_is_bit_identical_across_calls() {
        let f = features(0.41, 0.23, 0.17);
        let a = classify(&f);
        let b = classify(&f);
        assert_eq!(a.best, b.best);
        for (x, y) in a.probs.iter().zip(b.probs.iter()) {
            assert_eq!(x.1.to_bits(), y.1.to_bits());
        }
    }

    #[test]
    fn silence_classifies_as_classical() {
        // With all features zero only the constant terms remain:
        // rock 0, classical 2.2, hiphop 0, jazz 0.3.
        let p = classify(&features(0.0, 0.0, 0.0));
        assert_eq!(p.best, Genre::Classical);
        assert!((p.prob(Genre::Classical) - 2.2 / 2.5).abs() < 1e-5);
        assert!((p.prob(Genre::Jazz) - 0.3 / 2.5).abs() < 1e-5);
        assert_eq!(p.prob(Genre::Rock), 0.0);
        assert_eq!(p.prob(Genre::HipHop), 0.0);
    }

    #[test]
    fn score_tie_resolves_to_first_label_in_order() {
        // centroid=1, rms=0, zcr=0 gives rock = classical = 1.0, the joint
        // maximum; the earlier label in declaration order must win.
        let p = classify(&features(1.0, 0.0, 0.0));
        assert!((p.prob(Genre::Rock) - p.prob(Genre::Classical)).abs() < 1e-7);
        assert_eq!(p.best, Genre::Rock);
    }

    #[test]
    fn negative_scores_are_shifted_not_clamped() {
        let probs = to_distribution([-0.5, 1.0, 0.25, -0.25]);
        // Shift by 0.5: [0.0, 1.5, 0.75, 0.25], sum 2.5.
        assert!(probs.iter().all(|(_, v)| *v >= 0.0));
        assert_eq!(probs[0].1, 0.0);
        assert!((probs[1].1 - 0.6).abs() < 1e-6);
        assert!((probs[2].1 - 0.3).abs() < 1e-6);
        assert!((probs[3].1 - 0.1).abs() < 1e-6);
        // Ranking survives the shift.
        assert!(probs[1].1 > probs[2].1 && probs[2].1 > probs[3].1 && probs[3].1 > probs[0].1);
    }

    #[test]
    fn in_range_features_never_produce_negative_scores() {
        // Every score term is non-negative for features in [0, 1], so the
        // shift path stays dormant on real pipeline output.
        for ci in 0..=10 {
            for ri in 0..=10 {
                for zi in 0..=10 {
                    let f = features(ci as f32 / 10.0, ri as f32 / 10.0, zi as f32 / 10.0);
                    let min = scores(&f).into_iter().fold(f32::INFINITY, f32::min);
                    assert!(min >= 0.0, "negative score at {f:?}");
                }
            }
        }
    }

    #[test]
    fn bright_loud_noisy_leans_rock_over_classical() {
        let p = classify(&features(0.85, 0.4, 0.45));
        assert!(p.prob(Genre::Rock) > p.prob(Genre::Classical));
    }
}
