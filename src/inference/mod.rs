//! # Módulo Inference — Motor de Inferência Mamdani
//!
//! Tudo que transforma entradas crisp em uma saída crisp:
//!
//! | Etapa | Onde |
//! |-------|------|
//! | Regras e antecedentes | [`rules`] |
//! | Montagem e congelamento da configuração | [`system`] |
//! | Fuzzificação, disparo, implicação, agregação | [`engine`] |
//! | Defuzzificação | [`defuzz`] |
//!
//! ## Exemplo
//!
//! ```text
//! distance=10, rel_speed=-50, traffic=8
//!   → very_close ∧ closing_fast  ⇒ strong_brake (0.17)
//!   → very_close ∧ closing       ⇒ strong_brake (0.67)
//!   → very_close                 ⇒ strong_brake (0.67)
//!   → centróide ≈ -4.1 m/s²
//! ```
//!
//! Veja [`InferenceEngine`] para detalhes.

/// Condições, expressões de antecedente e base de regras.
pub mod rules;

/// Builder e configuração congelada.
pub mod system;

/// Motor de inferência sem estado.
pub mod engine;

/// Métodos de defuzzificação.
pub mod defuzz;

pub use defuzz::{centroid, DefuzzMethod, Defuzzified};
pub use engine::{CrispInputs, Inference, InferenceEngine, OutputAggregate, RuleActivation};
pub use rules::{AntecedentExpr, Condition, FuzzifiedInputs, Rule, RuleBase, TermRef};
pub use system::{FuzzySystem, SystemBuilder};
