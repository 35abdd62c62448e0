//! Classification performance metrics

/// Fraction of predictions equal to the true label
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

/// F1 score of a single label treated as the positive class
fn f1_for_label(y_true: &[usize], y_pred: &[usize], label: usize) -> f64 {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t == label, p == label) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let denominator = 2 * tp + fp + fn_;
    if denominator == 0 {
        0.0
    } else {
        (2 * tp) as f64 / denominator as f64
    }
}

/// F1 score.
///
/// With two groups the larger label is the positive class; with more groups
/// the per-label scores are macro-averaged.
pub fn f1_score(y_true: &[usize], y_pred: &[usize], n_groups: usize) -> f64 {
    match n_groups {
        0 => 0.0,
        2 => f1_for_label(y_true, y_pred, 1),
        _ => {
            (0..n_groups)
                .map(|label| f1_for_label(y_true, y_pred, label))
                .sum::<f64>()
                / n_groups as f64
        }
    }
}

/// Area under the ROC curve for a binary problem where label `1` is positive.
///
/// Computed from score ranks, with tied scores sharing their average rank.
/// `None` when either class is absent.
pub fn roc_auc(y_true: &[usize], scores: &[f64]) -> Option<f64> {
    let n_pos = y_true.iter().filter(|&&t| t == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut rank_sum_pos = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // Ranks are 1-based; a tie group spanning start..end shares the mean
        let mean_rank = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            if y_true[i] == 1 {
                rank_sum_pos += mean_rank;
            }
        }
        start = end;
    }

    let n_pos = n_pos as f64;
    Some((rank_sum_pos - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64))
}

/// Confusion matrix with rows normalised to sum to one.
///
/// Row `i` is the true label, column `j` the predicted one. Labels that never
/// occur keep an all-zero row.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_groups: usize) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; n_groups]; n_groups];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        if t < n_groups && p < n_groups {
            matrix[t][p] += 1.0;
        }
    }

    for row in &mut matrix {
        let total: f64 = row.iter().sum();
        if total > 0.0 {
            for cell in row.iter_mut() {
                *cell /= total;
            }
        }
    }
    matrix
}
