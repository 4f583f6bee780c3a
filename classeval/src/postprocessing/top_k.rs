use std::{cmp::Ordering, collections::BinaryHeap};

use serde::{Deserialize, Serialize};

use super::PostprocessError;
use crate::dataset::ClassLabels;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClass {
    pub class_id: usize,
    pub probability: f32,
    pub label: String,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    probability: f32,
    class_id: usize,
}

impl PartialEq for Candidate {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then(self.class_id.cmp(&other.class_id))
    }
}

/// The `k` most probable classes, most probable first. Candidates are
/// ordered by `(probability, class_id)`, so equal probabilities come out
/// with the higher class id first. NaN and infinite probabilities are
/// rejected.
pub fn top_k(
    probabilities: &[f32],
    k: usize,
    labels: &ClassLabels,
) -> Result<Vec<RankedClass>, PostprocessError> {
    if probabilities.is_empty() {
        return Err(PostprocessError::EmptyScores);
    }
    if k == 0 || k > probabilities.len() {
        return Err(PostprocessError::InvalidK {
            k,
            size: probabilities.len(),
        });
    }
    if let Some(class_id) = probabilities
        .iter()
        .position(|probability| !probability.is_finite())
    {
        return Err(PostprocessError::NonFiniteProbability {
            class_id,
        });
    }

    let mut queue: BinaryHeap<Candidate> = probabilities
        .iter()
        .enumerate()
        .map(|(class_id, &probability)| Candidate {
            probability,
            class_id,
        })
        .collect();

    let mut ranked = Vec::with_capacity(k);
    while ranked.len() < k {
        let Some(candidate) = queue.pop() else {
            break;
        };
        ranked.push(RankedClass {
            class_id: candidate.class_id,
            probability: candidate.probability,
            label: labels.name(candidate.class_id),
        });
    }
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    const TEST_TOP_K_SEED: u64 = 7;

    fn labels(count: usize) -> ClassLabels {
        ClassLabels::new((0..count).map(|index| format!("label {index}")))
    }

    #[test]
    fn test_top_k_orders_by_probability() {
        let probabilities = [0.1, 0.4, 0.05, 0.3, 0.15];
        let ranked = top_k(&probabilities, 3, &labels(5)).unwrap();
        let ids: Vec<usize> = ranked.iter().map(|entry| entry.class_id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(ranked[0].label, "label 1");
        assert!(is_close!(ranked[0].probability, 0.4));
    }

    #[test]
    fn test_top_k_ties_prefer_higher_class_id() {
        let probabilities = [0.25, 0.25, 0.25, 0.25];
        let ranked = top_k(&probabilities, 4, &labels(4)).unwrap();
        let ids: Vec<usize> = ranked.iter().map(|entry| entry.class_id).collect();
        assert_eq!(ids, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_top_k_random_properties() {
        let mut rng = StdRng::seed_from_u64(TEST_TOP_K_SEED);
        let labels = labels(0);
        for _ in 0..50 {
            let size = rng.random_range(1..64);
            let k = rng.random_range(1..=size);
            let probabilities: Vec<f32> =
                (0..size).map(|_| rng.random_range(0.0..1.0)).collect();

            let ranked = top_k(&probabilities, k, &labels).unwrap();
            assert_eq!(ranked.len(), k);
            for pair in ranked.windows(2) {
                assert!(pair[0].probability >= pair[1].probability);
            }

            let ids: HashSet<usize> =
                ranked.iter().map(|entry| entry.class_id).collect();
            assert_eq!(ids.len(), k);
            assert!(ids.iter().all(|&id| id < size));

            let best = probabilities.iter().copied().fold(0.0, f32::max);
            assert_eq!(ranked[0].probability, best);
        }
    }

    #[test]
    fn test_top_k_falls_back_to_class_id_name() {
        let ranked = top_k(&[0.2, 0.8], 1, &labels(1)).unwrap();
        assert_eq!(ranked[0].label, "class_1");
    }

    #[test]
    fn test_top_k_rejects_invalid_k() {
        let probabilities = [0.5, 0.5];
        assert_eq!(
            top_k(&probabilities, 0, &labels(2)),
            Err(PostprocessError::InvalidK {
                k: 0,
                size: 2,
            })
        );
        assert_eq!(
            top_k(&probabilities, 3, &labels(2)),
            Err(PostprocessError::InvalidK {
                k: 3,
                size: 2,
            })
        );
    }

    #[test]
    fn test_top_k_rejects_empty_and_nan() {
        assert_eq!(
            top_k(&[], 1, &labels(0)),
            Err(PostprocessError::EmptyScores)
        );
        assert_eq!(
            top_k(&[0.1, f32::NAN], 1, &labels(2)),
            Err(PostprocessError::NonFiniteProbability {
                class_id: 1,
            })
        );
    }

    #[test]
    fn test_top_k_rejects_infinite_probabilities() {
        assert_eq!(
            top_k(&[f32::INFINITY, 0.5, 0.25], 1, &labels(3)),
            Err(PostprocessError::NonFiniteProbability {
                class_id: 0,
            })
        );
        assert_eq!(
            top_k(&[0.5, 0.25, f32::NEG_INFINITY], 2, &labels(3)),
            Err(PostprocessError::NonFiniteProbability {
                class_id: 2,
            })
        );
    }
}
