//! Cross-validated decoding of event groups from population activity
//!
//! Each event contributes one population vector: the spike count of every
//! cluster in `[t - pre_time, t + post_time)`. A classifier is trained to
//! recover the event's group from that vector under cross-validation, and the
//! held-out predictions are scored.

use crate::{
    classifier::Classifier,
    cross_validation::{CrossValidator, Fold},
    error::{DecodeError, Result},
    metrics,
};
use log::{debug, info};
use neurostat_core::{spike_counts_in_bins, ClusterIndex, NeuroError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Event window and repetition settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeConfig {
    /// Seconds before each event included in its window
    pub pre_time: f64,
    /// Seconds after each event included in its window
    pub post_time: f64,
    /// Number of cross-validation passes to average. Ignored when the
    /// splitter always yields the same folds.
    pub iterations: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            pre_time: 0.0,
            post_time: 0.5,
            iterations: 1,
        }
    }
}

/// Decoding performance averaged over cross-validation passes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeResult {
    /// Fraction of held-out events classified correctly
    pub accuracy: f64,
    /// F1 score (binary, or macro-averaged over groups)
    pub f1: f64,
    /// Area under the ROC curve; only defined for two groups
    pub auroc: Option<f64>,
    /// Row-normalised confusion matrix, rows are true groups
    pub confusion_matrix: Vec<Vec<f64>>,
    /// Number of distinct event groups
    pub n_groups: usize,
    /// Name of the classifier used
    pub classifier: String,
    /// Cross-validation scheme used
    pub cross_validation: String,
    /// Number of passes actually averaged
    pub iterations: usize,
}

/// Decode `event_groups` from spikes around `event_times`.
///
/// Group labels are arbitrary; they are mapped to dense labels in ascending
/// order before being handed to the classifier, so with two groups the larger
/// label is the positive class.
pub fn decode<C, V>(
    spike_times: &[f64],
    spike_clusters: &[u32],
    event_times: &[f64],
    event_groups: &[u32],
    config: &DecodeConfig,
    classifier: &mut C,
    splitter: &mut V,
) -> Result<DecodeResult>
where
    C: Classifier + ?Sized,
    V: CrossValidator + ?Sized,
{
    if event_times.len() != event_groups.len() {
        return Err(
            NeuroError::shape_mismatch("event_groups", event_times.len(), event_groups.len())
                .into(),
        );
    }
    if config.iterations == 0 {
        return Err(NeuroError::out_of_range("iterations", 0.0, "at least one pass").into());
    }

    let groups = ClusterIndex::from_labels(event_groups);
    let n_groups = groups.len();
    if n_groups < 2 {
        return Err(NeuroError::out_of_range(
            "n_groups",
            n_groups as f64,
            "decoding needs at least two event groups",
        )
        .into());
    }
    let labels = groups.remap(event_groups);

    let intervals: Vec<(f64, f64)> = event_times
        .iter()
        .map(|&t| (t - config.pre_time, t + config.post_time))
        .collect();
    let features =
        spike_counts_in_bins(spike_times, spike_clusters, &intervals)?.population_vectors();

    let iterations = if splitter.repeatable() {
        config.iterations
    } else {
        1
    };

    let n_events = labels.len();
    let mut accuracy = 0.0;
    let mut f1 = 0.0;
    let mut auroc = Some(0.0);
    let mut confusion = vec![vec![0.0; n_groups]; n_groups];

    for iteration in 0..iterations {
        let mut predicted = vec![0usize; n_events];
        let mut positive_proba = vec![0.0; n_events];

        let folds = splitter.split(n_events)?;
        check_folds(&folds, n_events)?;

        for fold in folds {
            let train_x: Vec<Vec<f64>> = fold.train.iter().map(|&i| features[i].clone()).collect();
            let train_y: Vec<usize> = fold.train.iter().map(|&i| labels[i]).collect();
            let test_x: Vec<Vec<f64>> = fold.test.iter().map(|&i| features[i].clone()).collect();

            classifier.fit(&train_x, &train_y)?;
            let fold_pred = classifier.predict(&test_x)?;
            let fold_proba = classifier.predict_proba(&test_x)?;
            if fold_pred.len() != test_x.len() || fold_proba.len() != test_x.len() {
                return Err(DecodeError::classifier(format!(
                    "{} returned {} predictions for {} samples",
                    classifier.name(),
                    fold_pred.len().min(fold_proba.len()),
                    test_x.len()
                )));
            }

            for ((&i, &pred), proba) in fold.test.iter().zip(&fold_pred).zip(&fold_proba) {
                predicted[i] = pred;
                positive_proba[i] = proba.get(1).copied().unwrap_or(0.0);
            }
        }

        let pass_accuracy = metrics::accuracy(&labels, &predicted);
        debug!("decode pass {}: accuracy {:.3}", iteration, pass_accuracy);

        accuracy += pass_accuracy;
        f1 += metrics::f1_score(&labels, &predicted, n_groups);
        auroc = match (auroc, n_groups) {
            (Some(sum), 2) => metrics::roc_auc(&labels, &positive_proba).map(|a| sum + a),
            _ => None,
        };

        let pass_confusion = metrics::confusion_matrix(&labels, &predicted, n_groups);
        for (dst_row, src_row) in confusion.iter_mut().zip(&pass_confusion) {
            for (dst, src) in dst_row.iter_mut().zip(src_row) {
                *dst += src;
            }
        }
    }

    let passes = iterations as f64;
    for cell in confusion.iter_mut().flatten() {
        *cell /= passes;
    }

    let result = DecodeResult {
        accuracy: accuracy / passes,
        f1: f1 / passes,
        auroc: auroc.map(|sum| sum / passes),
        confusion_matrix: confusion,
        n_groups,
        classifier: classifier.name().to_string(),
        cross_validation: splitter.describe(),
        iterations,
    };

    info!(
        "decoded {} events into {} groups with {} ({}): accuracy {:.3}",
        n_events, n_groups, result.classifier, result.cross_validation, result.accuracy
    );

    Ok(result)
}

/// Every index must name an event, and the test sets together must hold
/// each event exactly once.
fn check_folds(folds: &[Fold], n_events: usize) -> Result<()> {
    let mut covered = vec![0usize; n_events];

    for fold in folds {
        if let Some(&i) = fold.train.iter().chain(&fold.test).find(|&&i| i >= n_events) {
            debug!("fold index {} out of range for {} events", i, n_events);
            return Err(NeuroError::precond("fold index out of range").into());
        }
        for &i in &fold.test {
            covered[i] += 1;
        }
    }

    if let Some(i) = covered.iter().position(|&c| c != 1) {
        debug!("event {} held out {} times", i, covered[i]);
        return Err(NeuroError::precond("test folds must hold every event exactly once").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_validation::{KFold, LeaveOneOut};

    /// Always predicts the most frequent training label
    struct Majority {
        label: usize,
    }

    impl Classifier for Majority {
        fn name(&self) -> &str {
            "majority"
        }

        fn fit(&mut self, _features: &[Vec<f64>], labels: &[usize]) -> Result<()> {
            let mut counts = vec![0usize; labels.iter().max().map_or(0, |m| m + 1)];
            for &l in labels {
                counts[l] += 1;
            }
            // Ties go to the smaller label
            self.label = (0..counts.len())
                .max_by_key(|&l| (counts[l], usize::MAX - l))
                .unwrap_or(0);
            Ok(())
        }

        fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>> {
            Ok(vec![self.label; features.len()])
        }

        fn predict_proba(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
            Ok(vec![vec![0.5, 0.5]; features.len()])
        }
    }

    #[test]
    fn test_default_config() {
        let config = DecodeConfig::default();
        assert_eq!(config.pre_time, 0.0);
        assert_eq!(config.post_time, 0.5);
        assert_eq!(config.iterations, 1);
    }

    #[test]
    fn test_majority_baseline() {
        let event_times = [1.0, 2.0, 3.0, 4.0];
        let event_groups = [7, 7, 9, 9];
        let mut clf = Majority { label: 0 };

        let result = decode(
            &[1.1],
            &[0],
            &event_times,
            &event_groups,
            &DecodeConfig::default(),
            &mut clf,
            &mut LeaveOneOut,
        )
        .unwrap();

        // Holding out one event always leaves the other group in the majority
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.auroc, Some(0.5));
        assert_eq!(result.n_groups, 2);
        assert_eq!(result.cross_validation, "leave-one-out");
        assert_eq!(result.classifier, "majority");
    }

    #[test]
    fn test_leave_one_out_forces_single_pass() {
        let config = DecodeConfig {
            iterations: 5,
            ..DecodeConfig::default()
        };
        let mut clf = Majority { label: 0 };
        let result = decode(&[], &[], &[0.0, 1.0], &[0, 1], &config, &mut clf, &mut LeaveOneOut)
            .unwrap();
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut clf = Majority { label: 0 };
        let config = DecodeConfig::default();

        let err = decode(&[], &[], &[0.0, 1.0], &[0], &config, &mut clf, &mut KFold::new(2))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Input(NeuroError::ShapeMismatch { .. })));

        let err = decode(&[], &[], &[0.0, 1.0], &[3, 3], &config, &mut clf, &mut KFold::new(2))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Input(NeuroError::ParameterOutOfRange { name: "n_groups", .. })
        ));

        let zero = DecodeConfig {
            iterations: 0,
            ..DecodeConfig::default()
        };
        let err = decode(&[], &[], &[0.0, 1.0], &[0, 1], &zero, &mut clf, &mut KFold::new(2))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Input(NeuroError::ParameterOutOfRange { name: "iterations", .. })
        ));
    }

    #[test]
    fn test_check_folds() {
        let fold = |train: Vec<usize>, test: Vec<usize>| Fold { train, test };

        assert!(check_folds(&[fold(vec![1], vec![0]), fold(vec![0], vec![1])], 2).is_ok());

        let err = check_folds(&[fold(vec![0], vec![5])], 2).unwrap_err();
        assert!(matches!(err, DecodeError::Input(NeuroError::PrecondViolation { .. })));

        // Event 1 never held out
        assert!(check_folds(&[fold(vec![1], vec![0])], 2).is_err());
        // Event 0 held out twice
        assert!(check_folds(&[fold(vec![1], vec![0, 1]), fold(vec![1], vec![0])], 2).is_err());
    }
}
