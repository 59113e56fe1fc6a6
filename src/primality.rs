//! Local primality testing
//!
//! Exact trial division. Every worker calls [`is_prime`] on its own candidates,
//! so the function is pure and shares nothing.

/// Integer square root (largest `r` with `r * r <= n`)
///
/// Computed without floating point so large candidates never round past a
/// divisor.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }

    // Float estimate, then correct in both directions
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |sq| sq <= n) {
        r += 1;
    }
    r
}

/// Decide primality by trial division over `2..=isqrt(i)`
///
/// # Examples
///
/// ```
/// use primepulse::primality::is_prime;
///
/// assert!(is_prime(3));
/// assert!(is_prime(97));
/// assert!(!is_prime(91)); // 7 * 13
/// ```
pub fn is_prime(i: u64) -> bool {
    if i < 2 {
        return false;
    }

    let limit = isqrt(i);
    let mut j = 2;
    while j <= limit {
        if i % j == 0 {
            return false;
        }
        j += 1;
    }
    true
}
