//! # fuzzy-cruise — Controle Fuzzy de Aceleração
//!
//! Sistema de inferência **Mamdani** que recomenda a aceleração longitudinal
//! de um veículo seguidor a partir de três leituras crisp:
//!
//! - `distance`: distância ao veículo da frente (m)
//! - `rel_speed`: velocidade relativa (km/h, negativa = fechando)
//! - `traffic`: densidade de trânsito (0–10)
//!
//! ## Arquitetura
//!
//! ```text
//! core        Universe, MembershipFunction, LinguisticVariable
//!   │
//! inference   Condition → Rule → RuleBase → FuzzySystem (congelado)
//!   │         InferenceEngine (fuzzifica, dispara, corta, agrega)
//!   │         DefuzzMethod (centróide + fallback no_rule_fired)
//!   │
//! controller  AccelerationAdvisor: fachada sem estado, Arc<FuzzySystem>
//!   │
//! config      variáveis, termos e as 19 regras de referência
//! verbal      faixa verbal da aceleração (apresentação)
//! ```
//!
//! Toda a configuração é montada uma vez e depois só lida; cada avaliação
//! cria e descarta seu próprio estado. Por isso o mesmo sistema pode ser
//! usado por muitas threads ao mesmo tempo sem sincronização.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod inference;
pub mod verbal;

pub use controller::{AccelerationAdvisor, Recommendation, Sensors};
pub use error::{ConfigError, FuzzyError, RuntimeError};
