//! # LinguisticVariable — Variável com Termos Nomeados
//!
//! Uma [`LinguisticVariable`] dá nome a uma grandeza (ex: `distance`) e a
//! descreve por **termos linguísticos** (`very_close`, `close`, `medium`,
//! `far`), cada um com sua [`MembershipFunction`].
//!
//! ## Dois Sabores ([`VariableKind`])
//!
//! - **Antecedent**: consome um valor crisp (sensor) e o fuzzifica
//! - **Consequent**: produz a distribuição fuzzy de saída (`accel`)
//!
//! ## Fuzzificação
//!
//! ```text
//! distance = 25 m
//!   very_close → 0.17
//!   close      → 0.75
//!   medium     → 0.00
//!   far        → 0.00
//! ```
//!
//! Nenhum clamping é feito aqui: um valor fora do universo apenas produz
//! graus baixos (ou zero) em todos os termos.
//!
//! Os nomes dos termos são indexados uma única vez (`HashMap<String, usize>`)
//! para que a avaliação trabalhe por índice, não por nome.

use std::collections::HashMap;

use super::membership::MembershipFunction;
use super::universe::Universe;
use crate::error::ConfigError;

/// Papel da variável no sistema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    /// Entrada: recebe um valor crisp.
    Antecedent,
    /// Saída: recebe a distribuição agregada.
    Consequent,
}

/// Par `(nome, função de pertinência)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyTerm {
    pub name: String,
    pub membership: MembershipFunction,
}

/// Variável linguística: nome, universo e termos.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    kind: VariableKind,
    universe: Universe,
    terms: Vec<FuzzyTerm>,
    index: HashMap<String, usize>,
}

impl LinguisticVariable {
    /// Variável de entrada sem termos.
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name.into(), VariableKind::Antecedent, universe)
    }

    /// Variável de saída sem termos.
    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name.into(), VariableKind::Consequent, universe)
    }

    fn new(name: String, kind: VariableKind, universe: Universe) -> Self {
        Self {
            name,
            kind,
            universe,
            terms: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adiciona um termo e devolve seu índice.
    ///
    /// # Erros
    ///
    /// [`ConfigError::DuplicateTermName`] se o nome já existir nesta variável.
    pub fn add_term(
        &mut self,
        name: impl Into<String>,
        membership: MembershipFunction,
    ) -> Result<usize, ConfigError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateTermName {
                variable: self.name.clone(),
                term: name,
            });
        }
        let idx = self.terms.len();
        self.index.insert(name.clone(), idx);
        self.terms.push(FuzzyTerm { name, membership });
        Ok(idx)
    }

    /// Versão encadeável de [`add_term`](Self::add_term) para montar a
    /// variável numa única expressão.
    pub fn with_term(
        mut self,
        name: impl Into<String>,
        membership: MembershipFunction,
    ) -> Result<Self, ConfigError> {
        self.add_term(name, membership)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[FuzzyTerm] {
        &self.terms
    }

    /// Índice do termo pelo nome, se existir.
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Grau de cada termo em `crisp`, na ordem de declaração.
    pub fn degrees(&self, crisp: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.membership.sample(crisp)).collect()
    }

    /// Fuzzifica `crisp`: `nome do termo → grau`, para todos os termos.
    pub fn fuzzify(&self, crisp: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name.as_str(), t.membership.sample(crisp)))
            .collect()
    }

    /// Termo de maior grau em `crisp`, ou `None` se todos forem zero.
    ///
    /// Em caso de empate vence o termo declarado primeiro.
    pub fn dominant_term(&self, crisp: f64) -> Option<(&str, f64)> {
        self.fuzzify(crisp)
            .into_iter()
            .filter(|(_, m)| *m > 0.0)
            .fold(None, |best, cur| match best {
                Some((_, m)) if m >= cur.1 => best,
                _ => Some(cur),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance() -> LinguisticVariable {
        LinguisticVariable::antecedent("distance", Universe::linspace(0.0, 120.0, 121).unwrap())
            .with_term("very_close", MembershipFunction::triangular(0.0, 0.0, 30.0).unwrap())
            .unwrap()
            .with_term("close", MembershipFunction::triangular(10.0, 30.0, 60.0).unwrap())
            .unwrap()
            .with_term("medium", MembershipFunction::triangular(40.0, 70.0, 100.0).unwrap())
            .unwrap()
            .with_term("far", MembershipFunction::triangular(80.0, 120.0, 120.0).unwrap())
            .unwrap()
    }

    #[test]
    fn duplicate_term_is_rejected() {
        let mut var = distance();
        let err = var
            .add_term("close", MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateTermName {
                variable: "distance".into(),
                term: "close".into()
            }
        );
        assert_eq!(var.terms().len(), 4);
    }

    #[test]
    fn term_indices_follow_declaration_order() {
        let var = distance();
        assert_eq!(var.term_index("very_close"), Some(0));
        assert_eq!(var.term_index("far"), Some(3));
        assert_eq!(var.term_index("nowhere"), None);
        assert_eq!(var.kind(), VariableKind::Antecedent);
    }

    #[test]
    fn fuzzify_covers_every_term() {
        let var = distance();
        let fz = var.fuzzify(25.0);
        assert_eq!(fz.len(), 4);
        assert_eq!(fz[0].0, "very_close");
        assert!((fz[0].1 - 5.0 / 30.0).abs() < 1e-12);
        assert!((fz[1].1 - 0.75).abs() < 1e-12);
        assert_eq!(fz[2].1, 0.0);
        assert_eq!(var.degrees(25.0), fz.iter().map(|(_, m)| *m).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_input_is_not_clamped() {
        let var = distance();
        assert!(var.degrees(500.0).iter().all(|m| *m == 0.0));
        assert!(var.degrees(-3.0).iter().all(|m| *m == 0.0));
        assert_eq!(var.dominant_term(500.0), None);
    }

    #[test]
    fn dominant_term_picks_highest_degree() {
        let var = distance();
        assert_eq!(var.dominant_term(25.0).map(|(t, _)| t), Some("close"));
        assert_eq!(var.dominant_term(110.0).map(|(t, _)| t), Some("far"));
    }
}
