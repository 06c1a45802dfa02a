//! CART decision tree for the two-class winner problem.
//!
//! Splits minimise weighted Gini impurity. At every node, candidate
//! features are drawn at random until `max_features` non-constant ones
//! have been evaluated, so sparse one-hot columns do not starve a node of
//! usable splits.

use crate::features::matrix::FeatureMatrix;
use rand::rngs::StdRng;
use rand::Rng;

const N_CLASSES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        counts: [usize; N_CLASSES],
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f32,
    weighted_impurity: f64,
}

fn gini(counts: &[usize; N_CLASSES], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

fn class_counts(classes: &[usize], rows: &[usize]) -> [usize; N_CLASSES] {
    let mut counts = [0; N_CLASSES];
    for &r in rows {
        counts[classes[r]] += 1;
    }
    counts
}

impl DecisionTree {
    /// Grows a tree on `rows` (indices into `x`, repeats allowed).
    /// `classes` holds a 0/1 class index per row of `x`.
    pub fn fit(
        x: &FeatureMatrix,
        classes: &[usize],
        rows: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> DecisionTree {
        let n_features = x.n_cols();
        let mut nodes = vec![Node::Leaf { counts: [0; N_CLASSES] }];
        let mut importances = vec![0.0; n_features];
        let mut feature_order: Vec<usize> = (0..n_features).collect();
        let mut stack = vec![(0usize, rows, 0usize)];

        while let Some((node, rows, depth)) = stack.pop() {
            let counts = class_counts(classes, &rows);
            let n = rows.len();
            let impurity = gini(&counts, n);

            let depth_reached = params.max_depth.map_or(false, |d| depth >= d);
            if impurity == 0.0 || depth_reached || n < params.min_samples_split.max(2) {
                nodes[node] = Node::Leaf { counts };
                continue;
            }

            let best = match find_split(x, classes, &rows, params, &mut feature_order, rng) {
                Some(best) => best,
                None => {
                    nodes[node] = Node::Leaf { counts };
                    continue;
                }
            };

            // a split that leaves class ratios unchanged can round below zero
            importances[best.feature] += (n as f64 * impurity - best.weighted_impurity).max(0.0);

            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .partition(|&&r| x.get(r, best.feature) <= best.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf { counts: [0; N_CLASSES] });
            nodes.push(Node::Leaf { counts: [0; N_CLASSES] });
            nodes[node] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };
            stack.push((right, right_rows, depth + 1));
            stack.push((left, left_rows, depth + 1));
        }

        DecisionTree { nodes, importances }
    }

    fn leaf_for(&self, row: &[f32]) -> &[usize; N_CLASSES] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { counts } => return counts,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Majority class index at the leaf reached by `row`; ties go to class 0.
    pub fn predict_class(&self, row: &[f32]) -> usize {
        let counts = self.leaf_for(row);
        if counts[1] > counts[0] {
            1
        } else {
            0
        }
    }

    /// Total weighted impurity decrease per feature, unnormalised.
    pub fn raw_importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_splits(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Split { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Split { left, right, .. } = &self.nodes[node] {
                stack.push((*left, depth + 1));
                stack.push((*right, depth + 1));
            }
        }
        max_depth
    }
}

fn find_split(
    x: &FeatureMatrix,
    classes: &[usize],
    rows: &[usize],
    params: &TreeParams,
    feature_order: &mut [usize],
    rng: &mut StdRng,
) -> Option<BestSplit> {
    let n_features = feature_order.len();
    let wanted = params.max_features.clamp(1, n_features.max(1));
    let mut evaluated = 0;
    let mut best: Option<BestSplit> = None;
    let mut pairs: Vec<(f32, usize)> = Vec::with_capacity(rows.len());

    for i in 0..n_features {
        if evaluated >= wanted {
            break;
        }
        let j = rng.gen_range(i..n_features);
        feature_order.swap(i, j);
        let feature = feature_order[i];

        pairs.clear();
        pairs.extend(rows.iter().map(|&r| (x.get(r, feature), classes[r])));
        let first = pairs[0].0;
        if pairs.iter().all(|&(v, _)| v == first) {
            continue;
        }
        evaluated += 1;

        pairs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        let mut right = [0usize; N_CLASSES];
        for &(_, c) in &pairs {
            right[c] += 1;
        }
        let mut left = [0usize; N_CLASSES];
        let n = pairs.len();

        for k in 0..n - 1 {
            let c = pairs[k].1;
            left[c] += 1;
            right[c] -= 1;
            if pairs[k].0 == pairs[k + 1].0 {
                continue;
            }
            let n_left = k + 1;
            let n_right = n - n_left;
            let weighted =
                n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);
            if best
                .as_ref()
                .map_or(true, |b| weighted < b.weighted_impurity)
            {
                let mut threshold = pairs[k].0 + (pairs[k + 1].0 - pairs[k].0) / 2.0;
                // midpoint can round up to the right value for adjacent floats
                if threshold >= pairs[k + 1].0 {
                    threshold = pairs[k].0;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    weighted_impurity: weighted,
                });
            }
        }
    }

    best
}
