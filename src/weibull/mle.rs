//! Maximum Likelihood Estimation (MLE) for two-parameter Weibull.
//!
//! Solves the profile likelihood equation for the shape parameter with a
//! bracketed Newton-Raphson iteration, then derives the scale parameter
//! analytically. Location is fixed at zero.

/// Result of Weibull MLE fitting.
#[derive(Debug, Clone)]
pub struct WeibullMleResult {
    /// Shape parameter (beta).
    pub shape: f64,
    /// Scale parameter (eta).
    pub scale: f64,
}

/// Maximum iterations.
const MAX_ITER: usize = 200;

/// Convergence tolerance on the shape parameter (relative).
const TOL: f64 = 1e-10;

/// Upper limit on the shape bracket. Strength data with a spread of a few
/// parts per million still has its root well below this.
const MAX_SHAPE: f64 = 1e9;

/// Fit a two-parameter Weibull distribution by maximum likelihood.
///
/// The MLE for eta given beta is: `eta_hat = (sum(t_i^beta) / n)^(1/beta)`.
/// Substituting gives the profile equation for beta:
///
/// ```text
/// f(beta) = n/beta + sum(ln(t_i)) - n * sum(t_i^beta * ln(t_i)) / sum(t_i^beta) = 0
/// ```
///
/// `f` is strictly decreasing in beta, so the root is bracketed first and
/// Newton steps that leave the bracket fall back to bisection. Data are
/// divided by their maximum before exponentiation; the equation is
/// scale-invariant, and this keeps `t^beta` bounded for strength data with
/// large shape values.
///
/// # Returns
/// `None` if fewer than 2 values, any value is non-positive or non-finite,
/// all values are identical (no finite root), or the iteration fails.
/// Very tight data yields a very large shape, not `None`.
///
/// # Reference
/// Lawless (2003), *Statistical Models and Methods for Lifetime Data*, 2nd ed.
///
/// # Examples
///
/// ```
/// use u_allowables::weibull::weibull_mle;
///
/// let data = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
/// let fit = weibull_mle(&data).unwrap();
/// assert!(fit.shape > 1.5 && fit.shape < 5.0);
/// ```
pub fn weibull_mle(data: &[f64]) -> Option<WeibullMleResult> {
    let n = data.len();
    if n < 2 {
        return None;
    }

    if !data.iter().all(|&t| t.is_finite() && t > 0.0) {
        return None;
    }

    let t_max = data.iter().copied().fold(f64::MIN, f64::max);
    let t_min = data.iter().copied().fold(f64::MAX, f64::min);
    if t_min == t_max {
        return None; // g > 0 everywhere
    }

    let ln_u: Vec<f64> = data.iter().map(|&t| (t / t_max).ln()).collect();
    let mean_ln_u = ln_u.iter().sum::<f64>() / n as f64;

    // With u = t / t_max the profile equation divided by n reads
    // g(beta) = 1/beta + mean(ln u) - S1/S0.
    let profile = |beta: f64| -> (f64, f64) {
        let mut s0 = 0.0_f64;
        let mut s1 = 0.0_f64;
        let mut s2 = 0.0_f64;
        for &lu in &ln_u {
            let w = (beta * lu).exp();
            s0 += w;
            s1 += w * lu;
            s2 += w * lu * lu;
        }
        let g = 1.0 / beta + mean_ln_u - s1 / s0;
        let g_prime = -1.0 / (beta * beta) - (s2 * s0 - s1 * s1) / (s0 * s0);
        (g, g_prime)
    };

    // Bracket: g(lo) > 0 > g(hi)
    let mut lo = 1e-3_f64;
    let mut hi = 1.0_f64;
    while profile(hi).0 > 0.0 {
        lo = hi;
        hi *= 2.0;
        if hi > MAX_SHAPE {
            return None;
        }
    }
    if profile(lo).0 <= 0.0 {
        return None;
    }

    // Initial guess slightly above exponential, kept inside the bracket
    let mut beta = 1.2_f64.clamp(lo, hi);
    let mut converged = false;

    for _ in 0..MAX_ITER {
        let (g, g_prime) = profile(beta);
        if !g.is_finite() {
            return None;
        }

        if g > 0.0 {
            lo = beta;
        } else {
            hi = beta;
        }

        let newton = beta - g / g_prime;
        let next = if g_prime < 0.0 && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        if (next - beta).abs() <= TOL * beta.max(1.0) {
            beta = next;
            converged = true;
            break;
        }
        beta = next;
    }

    if !converged {
        return None;
    }

    // eta = t_max * (mean(u^beta))^(1/beta)
    let mean_u_beta = ln_u.iter().map(|&lu| (beta * lu).exp()).sum::<f64>() / n as f64;
    let eta = t_max * mean_u_beta.powf(1.0 / beta);

    if !eta.is_finite() || eta <= 0.0 {
        return None;
    }

    Some(WeibullMleResult {
        shape: beta,
        scale: eta,
    })
}
