//! GEMM kernel behind `Matrix::dot`.
//!
//! - default: a safe triple loop over row-major buffers
//! - optional: `matrixmultiply::dgemm` via the `matrixmultiply` feature

/// Computes `c = a * b` for row-major `a: (m, k)`, `b: (k, n)`, `c: (m, n)`.
///
/// `c` is overwritten. Callers validate shapes; every dimension must be > 0.
#[inline]
pub(crate) fn gemm_f64(m: usize, n: usize, k: usize, a: &[f64], b: &[f64], c: &mut [f64]) {
    debug_assert!(m > 0 && n > 0 && k > 0);
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);

    #[cfg(feature = "matrixmultiply")]
    {
        // Row-major strides: (row stride, col stride) = (cols, 1).
        unsafe {
            matrixmultiply::dgemm(
                m,
                k,
                n,
                1.0,
                a.as_ptr(),
                k as isize,
                1,
                b.as_ptr(),
                n as isize,
                1,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        let c_row = &mut c[i * n..(i + 1) * n];
        c_row.fill(0.0);
        // i-p-j order walks `b` and `c` contiguously.
        for (p, &av) in a_row.iter().enumerate() {
            let b_row = &b[p * n..(p + 1) * n];
            for (cv, &bv) in c_row.iter_mut().zip(b_row) {
                *cv = av.mul_add(bv, *cv);
            }
        }
    }
}
