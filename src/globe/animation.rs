use glam::DVec3;
use std::f64::consts::TAU;

use crate::hash::{hash2, rand_simple};

/// Vertical bob amplitude in world units
pub const BOB_AMPLITUDE: f64 = 0.05;
/// Vertical bob angular frequency in rad/s
pub const BOB_FREQUENCY: f64 = 2.0;
/// Earth spin rate in rad/s (markers ride the rotating surface)
pub const SPIN_RATE: f64 = 0.1;

/// Rotate a point in the x-z plane about the origin by `theta` radians.
#[inline(always)]
pub fn spin_xz(x: f64, z: f64, theta: f64) -> (f64, f64) {
    let (sin_t, cos_t) = theta.sin_cos();
    (x * cos_t - z * sin_t, x * sin_t + z * cos_t)
}

/// Per-frame marker transform: gentle vertical float plus rotation around
/// the vertical axis so the marker stays fixed on the spinning earth.
/// Pure in (base, elapsed, phase); the base position is never modified.
/// Runs once per rendered frame for every visible marker.
#[inline(always)]
pub fn animate(base: DVec3, elapsed_secs: f64, phase: f64) -> DVec3 {
    let y = base.y + (elapsed_secs * BOB_FREQUENCY + phase).sin() * BOB_AMPLITUDE;
    let (x, z) = spin_xz(base.x, base.z, elapsed_secs * SPIN_RATE);
    DVec3::new(x, y, z)
}

/// Deterministic per-marker bob phase in [0, 2π), derived from the station
/// id. Only decorrelates bobbing between markers; carries no meaning.
pub fn phase_seed(id: &str) -> f64 {
    let folded = id
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    rand_simple(hash2(folded, id.len() as u64)) * TAU
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identity_at_zero() {
        let base = DVec3::new(1.2, 0.7, -1.6);
        let p = animate(base, 0.0, 0.0);
        assert!((p - base).length() < EPS);
    }

    #[test]
    fn test_spin_preserves_xz_norm() {
        let base = DVec3::new(1.5, -0.3, 0.9);
        let r0 = (base.x * base.x + base.z * base.z).sqrt();
        for t in [0.0, 0.016, 1.0, 13.7, 1000.0] {
            let p = animate(base, t, 2.1);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - r0).abs() < 1e-9, "xz norm drifted at t={t}");
        }
    }

    #[test]
    fn test_spin_periodicity() {
        let base = DVec3::new(2.2, 0.0, 0.0);
        let period = std::f64::consts::TAU / SPIN_RATE;
        let a = animate(base, 3.0, 0.0);
        let b = animate(base, 3.0 + period, 0.0);
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.z - b.z).abs() < 1e-6);
    }

    #[test]
    fn test_bob_bounded() {
        let base = DVec3::new(0.0, 1.0, 0.0);
        for i in 0..500 {
            let p = animate(base, i as f64 * 0.033, 4.2);
            assert!((p.y - base.y).abs() <= BOB_AMPLITUDE + EPS);
        }
    }

    #[test]
    fn test_quarter_spin() {
        // After θ = π/2 the +x axis lands on +z
        let t = std::f64::consts::FRAC_PI_2 / SPIN_RATE;
        let (x, z) = spin_xz(1.0, 0.0, t * SPIN_RATE);
        assert!(x.abs() < EPS);
        assert!((z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_phase_seed_stable_and_decorrelated() {
        let a = phase_seed("tokyo-1");
        assert_eq!(a, phase_seed("tokyo-1"));
        assert!((0.0..std::f64::consts::TAU).contains(&a));
        assert_ne!(a, phase_seed("london-1"));
    }
}
