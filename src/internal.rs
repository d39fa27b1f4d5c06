/// Returns `a * b + c`, fused if `fma` feature is on.
#[inline]
pub(crate) fn fma(a: f64, b: f64, c: f64) -> f64 {
    if cfg!(feature = "fma") {
        f64::mul_add(a, b, c)
    } else {
        a * b + c
    }
}
