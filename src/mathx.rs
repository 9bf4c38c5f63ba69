//! std/no-std math shim, following the teacher crate's `common::math_utils`
//! convention of routing float ops through `libm` under `no-std`.

#[cfg(feature = "no-std")]
use libm;

#[inline]
pub fn abs(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.abs()
    }
    #[cfg(feature = "no-std")]
    {
        libm::fabs(val)
    }
}

#[inline]
pub fn ceil(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ceil()
    }
    #[cfg(feature = "no-std")]
    {
        libm::ceil(val)
    }
}

#[inline]
pub fn floor(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.floor()
    }
    #[cfg(feature = "no-std")]
    {
        libm::floor(val)
    }
}

#[inline]
pub fn powf(base: f64, exp: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        base.powf(exp)
    }
    #[cfg(feature = "no-std")]
    {
        libm::pow(base, exp)
    }
}

#[inline]
pub fn powi(base: f64, exp: i32) -> f64 {
    powf(base, exp as f64)
}
