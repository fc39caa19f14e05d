//! # Universe — Domínio Discretizado de uma Variável
//!
//! O [`Universe`] é a sequência ordenada de pontos `u₀ < u₁ < … < uₙ₋₁`
//! sobre a qual uma variável linguística é amostrada. Para a variável de
//! saída, ele define a granularidade da agregação e da defuzzificação:
//! cada ponto vira uma posição no array agregado.
//!
//! ```text
//! accel: linspace(-5, 5, 201)  →  -5.00, -4.95, …, 4.95, 5.00
//! ```
//!
//! Imutável depois de construído.

use crate::error::ConfigError;

/// Sequência finita e estritamente crescente de pontos amostrais.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    /// Cria `samples` pontos igualmente espaçados em `[min, max]`, inclusive.
    ///
    /// O ponto `i` é `min + (max − min)·i/(samples − 1)`, de modo que os
    /// extremos caem exatamente em `min` e `max`.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidUniverse`] se `samples < 2`, se algum limite não
    /// for finito, ou se `min >= max`.
    pub fn linspace(min: f64, max: f64, samples: usize) -> Result<Self, ConfigError> {
        if samples < 2 {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("pelo menos 2 amostras são necessárias, recebido {}", samples),
            });
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("intervalo [{}, {}] inválido", min, max),
            });
        }
        let span = max - min;
        let last = (samples - 1) as f64;
        let points = (0..samples)
            .map(|i| min + span * (i as f64) / last)
            .collect();
        Ok(Self { points })
    }

    /// Cria um universo a partir de pontos explícitos.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidUniverse`] se houver menos de dois pontos, algum
    /// não-finito, ou se a sequência não for estritamente crescente.
    pub fn from_points(points: Vec<f64>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("pelo menos 2 pontos são necessários, recebido {}", points.len()),
            });
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("ponto não-finito {}", bad),
            });
        }
        if let Some(w) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("sequência não estritamente crescente em {} → {}", w[0], w[1]),
            });
        }
        Ok(Self { points })
    }

    /// Pontos amostrais em ordem crescente.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Número de pontos (tamanho do array agregado da saída).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Sempre `false`: a construção exige ao menos dois pontos.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Ponto médio do intervalo declarado: fallback da defuzzificação.
    pub fn midpoint(&self) -> f64 {
        (self.min() + self.max()) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let u = Universe::linspace(-5.0, 5.0, 201).unwrap();
        assert_eq!(u.len(), 201);
        assert_eq!(u.min(), -5.0);
        assert_eq!(u.max(), 5.0);
        assert!((u.points()[1] - (-4.95)).abs() < 1e-12);
        assert_eq!(u.midpoint(), 0.0);
    }

    #[test]
    fn linspace_is_strictly_increasing() {
        let u = Universe::linspace(0.0, 120.0, 121).unwrap();
        assert!(u.points().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(u.points()[30], 30.0);
    }

    #[test]
    fn linspace_rejects_degenerate_ranges() {
        assert!(matches!(
            Universe::linspace(0.0, 10.0, 1),
            Err(ConfigError::InvalidUniverse { .. })
        ));
        assert!(Universe::linspace(10.0, 10.0, 5).is_err());
        assert!(Universe::linspace(10.0, 0.0, 5).is_err());
        assert!(Universe::linspace(f64::NAN, 1.0, 5).is_err());
    }

    #[test]
    fn from_points_requires_strict_order() {
        assert!(Universe::from_points(vec![0.0, 1.0, 2.5]).is_ok());
        assert!(Universe::from_points(vec![0.0, 1.0, 1.0]).is_err());
        assert!(Universe::from_points(vec![0.0]).is_err());
        assert!(Universe::from_points(vec![0.0, f64::INFINITY]).is_err());
    }
}
