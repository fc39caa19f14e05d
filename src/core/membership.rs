//! # MembershipFunction — Formas de Pertinência
//!
//! Uma função de pertinência mapeia um valor crisp para um grau em `[0, 1]`:
//! "quanto 25 m pertence a *close*?".
//!
//! ## Formas Disponíveis
//!
//! | Forma | Pontos | Descrição |
//! |-------|--------|-----------|
//! | `Triangular` | `a ≤ b ≤ c` | 0 fora de `[a, c]`, sobe de `a` a `b`, desce de `b` a `c`, 1 em `b` |
//! | `Trapezoidal` | `a ≤ b ≤ c ≤ d` | Igual ao triângulo, com platô de 1 em `[b, c]` |
//!
//! Quando `a = b` (ou `b = c`) o lado correspondente vira um **degrau**:
//! é assim que os termos das pontas, como `very_close = (0, 0, 30)`,
//! valem 1 logo na borda do universo.
//!
//! ```text
//!  μ
//!  1 ┤     ╱╲           trimf(10, 30, 60)
//!    │    ╱  ╲
//!  0 ┼───╱────╲───────
//!       10 30   60
//! ```
//!
//! A avaliação nunca falha: fora do suporte o grau é simplesmente 0.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Função de pertinência, `ℝ → [0, 1]`.
///
/// Construa via [`triangular`](MembershipFunction::triangular) ou
/// [`trapezoidal`](MembershipFunction::trapezoidal), que validam os pontos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Triângulo `(a, b, c)`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapézio `(a, b, c, d)`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Triângulo com pico em `b`.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidControlPoints`] se `a > b`, `b > c` ou algum ponto for NaN.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        check_order(&[a, b, c])?;
        Ok(Self::Triangular { a, b, c })
    }

    /// Trapézio com platô em `[b, c]`.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidControlPoints`] se os pontos não forem não-decrescentes.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        check_order(&[a, b, c, d])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Avalia o grau de pertinência em `x`.
    ///
    /// Sempre em `[0, 1]`. `x` fora do suporte (ou NaN) devolve 0.
    pub fn sample(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let degree = match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        };
        degree.clamp(0.0, 1.0)
    }

    /// Intervalo onde o grau pode ser positivo (suporte fechado).
    pub fn support(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { a, c, .. } => (a, c),
            MembershipFunction::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// Intervalo onde o grau é exatamente 1 (núcleo).
    pub fn core(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { b, .. } => (b, b),
            MembershipFunction::Trapezoidal { b, c, .. } => (b, c),
        }
    }
}

fn check_order(points: &[f64]) -> Result<(), ConfigError> {
    let ordered = points.iter().all(|p| !p.is_nan()) && points.windows(2).all(|w| w[0] <= w[1]);
    if ordered {
        Ok(())
    } else {
        Err(ConfigError::InvalidControlPoints {
            points: points.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // ─── triangular ────────────────────────────────────────────

    #[test]
    fn triangle_peaks_and_ramps() {
        let mf = MembershipFunction::triangular(10.0, 30.0, 60.0).unwrap();
        assert_eq!(mf.sample(30.0), 1.0);
        assert!(close(mf.sample(20.0), 0.5));
        assert!(close(mf.sample(45.0), 0.5));
        assert_eq!(mf.sample(10.0), 0.0);
        assert_eq!(mf.sample(60.0), 0.0);
    }

    #[test]
    fn triangle_is_zero_outside_support() {
        let mf = MembershipFunction::triangular(10.0, 30.0, 60.0).unwrap();
        assert_eq!(mf.sample(-1000.0), 0.0);
        assert_eq!(mf.sample(1000.0), 0.0);
        assert_eq!(mf.sample(f64::NAN), 0.0);
    }

    #[test]
    fn degenerate_left_side_is_a_step() {
        let very_close = MembershipFunction::triangular(0.0, 0.0, 30.0).unwrap();
        assert_eq!(very_close.sample(0.0), 1.0);
        assert!(close(very_close.sample(15.0), 0.5));
        assert_eq!(very_close.sample(-0.1), 0.0);
    }

    #[test]
    fn degenerate_right_side_is_a_step() {
        let far = MembershipFunction::triangular(80.0, 120.0, 120.0).unwrap();
        assert_eq!(far.sample(120.0), 1.0);
        assert!(close(far.sample(100.0), 0.5));
        assert_eq!(far.sample(120.5), 0.0);
    }

    #[test]
    fn singleton_triangle() {
        let mf = MembershipFunction::triangular(2.0, 2.0, 2.0).unwrap();
        assert_eq!(mf.sample(2.0), 1.0);
        assert_eq!(mf.sample(2.0001), 0.0);
    }

    #[test]
    fn rejects_unordered_points() {
        assert!(matches!(
            MembershipFunction::triangular(5.0, 1.0, 10.0),
            Err(ConfigError::InvalidControlPoints { .. })
        ));
        assert!(MembershipFunction::triangular(0.0, 10.0, 5.0).is_err());
        assert!(MembershipFunction::triangular(0.0, f64::NAN, 5.0).is_err());
    }

    // ─── trapezoidal ───────────────────────────────────────────

    #[test]
    fn trapezoid_has_plateau() {
        let mf = MembershipFunction::trapezoidal(0.0, 2.0, 4.0, 8.0).unwrap();
        assert_eq!(mf.sample(3.0), 1.0);
        assert!(close(mf.sample(1.0), 0.5));
        assert!(close(mf.sample(6.0), 0.5));
        assert_eq!(mf.core(), (2.0, 4.0));
        assert_eq!(mf.support(), (0.0, 8.0));
        assert!(MembershipFunction::trapezoidal(0.0, 2.0, 9.0, 8.0).is_err());
    }

    #[test]
    fn degrees_stay_in_unit_interval() {
        let shapes = [
            MembershipFunction::triangular(-100.0, -100.0, -40.0).unwrap(),
            MembershipFunction::triangular(-80.0, -40.0, 0.0).unwrap(),
            MembershipFunction::trapezoidal(-1.0, 0.0, 0.5, 3.0).unwrap(),
        ];
        for mf in &shapes {
            let mut x = -150.0;
            while x <= 150.0 {
                let m = mf.sample(x);
                assert!((0.0..=1.0).contains(&m), "{:?} em {} deu {}", mf, x, m);
                x += 0.37;
            }
        }
    }
}
