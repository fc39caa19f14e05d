//! # Módulo Core — Blocos de Configuração do Sistema Fuzzy
//!
//! Tipos que descrevem **o que** o sistema sabe, antes de qualquer regra:
//!
//! - [`Universe`]: domínio discretizado de uma variável
//! - [`MembershipFunction`]: forma de pertinência (triângulo, trapézio)
//! - [`FuzzyTerm`]: termo nomeado (`close`, `brake`, …)
//! - [`LinguisticVariable`]: variável com universo e termos, entrada ou saída
//!
//! Todos são montados uma vez, na configuração, e depois só lidos.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use fuzzy_cruise::core::{LinguisticVariable, MembershipFunction, Universe};
//!
//! let mut traffic = LinguisticVariable::antecedent(
//!     "traffic",
//!     Universe::linspace(0.0, 10.0, 101).unwrap(),
//! );
//! traffic.add_term("low", MembershipFunction::triangular(0.0, 0.0, 3.0).unwrap()).unwrap();
//! traffic.add_term("high", MembershipFunction::triangular(7.0, 10.0, 10.0).unwrap()).unwrap();
//!
//! assert_eq!(traffic.dominant_term(1.0).map(|(t, _)| t), Some("low"));
//! ```

/// Universo discretizado.
pub mod universe;

/// Funções de pertinência.
pub mod membership;

/// Variáveis e termos linguísticos.
pub mod variable;

pub use membership::MembershipFunction;
pub use universe::Universe;
pub use variable::{FuzzyTerm, LinguisticVariable, VariableKind};
