//! 2D projection for scatter plots
//!
//! Principal component analysis by power iteration with deflation. The
//! eigenproblem is solved in whichever space is smaller: the d×d covariance
//! when there are more codes than dimensions, otherwise the n×n Gram matrix
//! (384-d embeddings of a few dozen codes is the common case).
//!
//! Each component's sign is fixed so its largest-magnitude loading is
//! positive, which makes the output deterministic.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

const POWER_ITERATIONS: usize = 1000;
const POWER_TOLERANCE: f64 = 1e-12;
const ZERO_NORM: f64 = 1e-12;

/// Codes reduced to two dimensions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// (PC1, PC2) coordinates, one per input vector
    pub points: Vec<[f32; 2]>,
    /// Share of total variance captured by each component
    pub explained_variance_ratio: [f32; 2],
}

/// Project `embeddings` onto their first two principal components.
///
/// Fewer than two vectors, or vectors with no variance, project to the origin.
pub fn project_2d(embeddings: &[Vec<f32>]) -> Result<Projection> {
    let n = embeddings.len();
    if n == 0 {
        return Ok(Projection::default());
    }

    let d = embeddings[0].len();
    if let Some(bad) = embeddings.iter().find(|e| e.len() != d) {
        return Err(AnalysisError::InvalidInput(format!(
            "cannot project vectors of mixed dimensions ({} and {})",
            d,
            bad.len()
        )));
    }

    let origin = Projection {
        points: vec![[0.0, 0.0]; n],
        explained_variance_ratio: [0.0, 0.0],
    };
    if n < 2 || d == 0 {
        return Ok(origin);
    }

    // Centered data, row-major n×d
    let mut mean = vec![0.0_f64; d];
    for e in embeddings {
        for (m, &x) in mean.iter_mut().zip(e) {
            *m += x as f64;
        }
    }
    for m in &mut mean {
        *m /= n as f64;
    }
    let x: Vec<f64> = embeddings
        .iter()
        .flat_map(|e| e.iter().zip(&mean).map(|(&v, m)| v as f64 - m))
        .collect();

    let dof = (n - 1) as f64;
    let total_variance = x.iter().map(|v| v * v).sum::<f64>() / dof;
    if total_variance <= ZERO_NORM {
        return Ok(origin);
    }

    let mut scores = vec![[0.0_f64; 2]; n];
    let mut ratio = [0.0_f32; 2];

    if d <= n {
        let cov = covariance(&x, n, d, dof);
        for (k, (lambda, v)) in top_eigenpairs(&cov, d, 2).into_iter().enumerate() {
            let Some(mut loadings) = v else { continue };
            orient(&mut loadings);
            for i in 0..n {
                scores[i][k] = dot(&x[i * d..(i + 1) * d], &loadings);
            }
            ratio[k] = (lambda / total_variance) as f32;
        }
    } else {
        let gram = gram(&x, n, d, dof);
        for (k, (lambda, u)) in top_eigenpairs(&gram, n, 2).into_iter().enumerate() {
            let Some(u) = u else { continue };
            // Loadings v = Xᵀu / ‖Xᵀu‖, scores = X v = sqrt(dof·λ)·u
            let mut loadings = vec![0.0_f64; d];
            for (i, &ui) in u.iter().enumerate() {
                for (l, &xv) in loadings.iter_mut().zip(&x[i * d..(i + 1) * d]) {
                    *l += xv * ui;
                }
            }
            let norm = dot(&loadings, &loadings).sqrt();
            if norm <= ZERO_NORM {
                continue;
            }
            let flip = orient(&mut loadings);
            let scale = (dof * lambda.max(0.0)).sqrt() * flip;
            for (i, &ui) in u.iter().enumerate() {
                scores[i][k] = scale * ui;
            }
            ratio[k] = (lambda / total_variance) as f32;
        }
    }

    Ok(Projection {
        points: scores
            .into_iter()
            .map(|[a, b]| [a as f32, b as f32])
            .collect(),
        explained_variance_ratio: ratio,
    })
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Flip `v` so its largest-magnitude entry is positive; returns the applied sign
fn orient(v: &mut [f64]) -> f64 {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        for x in v.iter_mut() {
            *x = -*x;
        }
        -1.0
    } else {
        1.0
    }
}

/// XᵀX / dof, d×d row-major
fn covariance(x: &[f64], n: usize, d: usize, dof: f64) -> Vec<f64> {
    let mut cov = vec![0.0_f64; d * d];
    for i in 0..n {
        let row = &x[i * d..(i + 1) * d];
        for a in 0..d {
            let ra = row[a];
            if ra == 0.0 {
                continue;
            }
            for b in a..d {
                cov[a * d + b] += ra * row[b];
            }
        }
    }
    for a in 0..d {
        for b in a..d {
            let v = cov[a * d + b] / dof;
            cov[a * d + b] = v;
            cov[b * d + a] = v;
        }
    }
    cov
}

/// XXᵀ / dof, n×n row-major
fn gram(x: &[f64], n: usize, d: usize, dof: f64) -> Vec<f64> {
    let mut g = vec![0.0_f64; n * n];
    for i in 0..n {
        for j in i..n {
            let v = dot(&x[i * d..(i + 1) * d], &x[j * d..(j + 1) * d]) / dof;
            g[i * n + j] = v;
            g[j * n + i] = v;
        }
    }
    g
}

/// Leading eigenpairs of a symmetric PSD matrix.
///
/// A `None` vector means the remaining spectrum is zero.
fn top_eigenpairs(m: &[f64], size: usize, count: usize) -> Vec<(f64, Option<Vec<f64>>)> {
    let mut found: Vec<Vec<f64>> = Vec::with_capacity(count);
    let mut pairs = Vec::with_capacity(count);

    for _ in 0..count {
        // Irregular fixed start so it is not orthogonal to structured eigenvectors
        let mut v: Vec<f64> = (0..size)
            .map(|i| 1.0 + ((i * 31 + 7) % 17) as f64 / 17.0)
            .collect();
        deflate(&mut v, &found);
        if !normalize(&mut v) {
            pairs.push((0.0, None));
            continue;
        }

        let mut collapsed = false;
        for _ in 0..POWER_ITERATIONS {
            let mut w = mat_vec(m, size, &v);
            deflate(&mut w, &found);
            if !normalize(&mut w) {
                collapsed = true;
                break;
            }
            let delta: f64 = w.iter().zip(&v).map(|(a, b)| (a - b) * (a - b)).sum();
            v = w;
            if delta < POWER_TOLERANCE {
                break;
            }
        }

        if collapsed {
            pairs.push((0.0, None));
            continue;
        }

        let lambda = dot(&v, &mat_vec(m, size, &v));
        if lambda <= ZERO_NORM {
            pairs.push((0.0, None));
            continue;
        }
        found.push(v.clone());
        pairs.push((lambda, Some(v)));
    }

    pairs
}

fn mat_vec(m: &[f64], size: usize, v: &[f64]) -> Vec<f64> {
    (0..size).map(|r| dot(&m[r * size..(r + 1) * size], v)).collect()
}

/// Remove the components of `v` along already-found eigenvectors
fn deflate(v: &mut [f64], found: &[Vec<f64>]) {
    for e in found {
        let p = dot(v, e);
        for (x, y) in v.iter_mut().zip(e) {
            *x -= p * y;
        }
    }
}

fn normalize(v: &mut [f64]) -> bool {
    let norm = dot(v, v).sqrt();
    if norm <= ZERO_NORM {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

// ============================================================================
// TESTS
// ============================================================================
