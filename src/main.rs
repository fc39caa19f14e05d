//! # fuzzy-cruise — CLI
//!
//! **Ponto de entrada** da demonstração de linha de comando.
//!
//! ## Fluxo
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG)
//!   ├── Monta o sistema fuzzy de referência (falha → aborta)
//!   ├── Imprime os cenários de exemplo
//!   └── Lê distance, rel_speed, traffic (argumentos ou stdin)
//!       └── Imprime aceleração + descrição verbal
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Interativo
//! cargo run
//!
//! # Valores direto na linha de comando
//! cargo run -- 25 -20 5
//!
//! # Regras disparadas, saída JSON, logs detalhados
//! RUST_LOG=debug cargo run -- --explain --json 90 20 9
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use fuzzy_cruise::controller::{AccelerationAdvisor, Sensors};
use fuzzy_cruise::config::EXAMPLE_SCENARIOS;
use fuzzy_cruise::verbal::Maneuver;

/// Opções da linha de comando.
#[derive(Default)]
struct Options {
    explain: bool,
    json: bool,
    values: Vec<String>,
}

fn parse_args() -> Options {
    let mut opts = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--explain" => opts.explain = true,
            "--json" => opts.json = true,
            _ => opts.values.push(arg),
        }
    }
    opts
}

fn print_example_scenarios(advisor: &AccelerationAdvisor) -> Result<()> {
    println!("Example scenarios:");
    for (i, (d, v, t)) in EXAMPLE_SCENARIOS.iter().enumerate() {
        let rec = advisor.evaluate(*d, *v, *t)?;
        println!(
            "  Scenario {}: distance={} m, rel_speed={} km/h, traffic={} -> accel = {:.3} m/s^2 ({})",
            i + 1,
            d,
            v,
            t,
            rec.acceleration,
            Maneuver::classify(rec.acceleration)
        );
    }
    println!();
    Ok(())
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush().context("Falha ao escrever no stdout")?;
    let line = lines
        .next()
        .context("Entrada encerrada antes do valor")?
        .context("Falha ao ler stdin")?;
    Ok(line.trim().to_string())
}

const USAGE: &str = "Usage: fuzzy-cruise [--explain] [--json] [<distance> <rel_speed> <traffic>]";

/// De onde vêm os três valores.
#[derive(Debug, PartialEq)]
enum ValueSource {
    Args(Vec<String>),
    Stdin,
    /// Quantidade de valores posicionais diferente de 0 e de 3.
    Invalid(usize),
}

fn value_source(values: &[String]) -> ValueSource {
    match values.len() {
        0 => ValueSource::Stdin,
        3 => ValueSource::Args(values.to_vec()),
        n => ValueSource::Invalid(n),
    }
}

/// Pergunta os três valores no stdin.
fn read_stdin_values() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    Ok(vec![
        prompt(&mut lines, "Enter distance to vehicle/obstacle [m] (0–120): ")?,
        prompt(&mut lines, "Enter relative speed rel_speed [km/h] (-100 to 100): ")?,
        prompt(&mut lines, "Enter traffic density [0–10]: ")?,
    ])
}

fn main() -> Result<()> {
    // Aceita RUST_LOG para configurar o nível. Exemplo: RUST_LOG=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = parse_args();

    let advisor = AccelerationAdvisor::reference().context("Configuração fuzzy inválida")?;
    tracing::debug!(
        rules = advisor.system().rule_base().len(),
        inputs = advisor.system().antecedents().len(),
        "Sistema de referência pronto"
    );

    println!("Fuzzy control of autonomous vehicle acceleration (Mamdani)");
    println!("-----------------------------------------------------------");
    println!("Note: rel_speed = speed_of_vehicle_in_front - our_speed  [km/h]");
    println!("  -> negative: we are faster (closing the gap)");
    println!("  -> positive: the front vehicle is faster (gap is increasing)");
    println!();

    print_example_scenarios(&advisor)?;

    let raw = match value_source(&opts.values) {
        ValueSource::Args(values) => values,
        ValueSource::Stdin => read_stdin_values()?,
        ValueSource::Invalid(n) => {
            tracing::warn!(count = n, "Quantidade de valores inválida");
            println!("Error: expected 3 values (distance, rel_speed, traffic), got {}.", n);
            println!("{}", USAGE);
            return Ok(());
        }
    };
    let parsed: Result<Vec<f64>, _> = raw.iter().map(|s| s.parse::<f64>()).collect();
    let values = match parsed {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, input = ?raw, "Entrada não numérica");
            println!("Error: please enter numeric values.");
            return Ok(());
        }
    };
    let sensors = Sensors::new(values[0], values[1], values[2]);

    let explanation = advisor.explain(sensors)?;
    let rec = explanation.recommendation;
    if rec.no_rule_fired {
        tracing::warn!(?sensors, "Nenhuma regra disparou; usando o ponto médio do universo");
    }

    if opts.json {
        let json = if opts.explain {
            serde_json::to_string_pretty(&explanation)
        } else {
            serde_json::to_string_pretty(&rec)
        }
        .context("Falha ao serializar a recomendação")?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    println!("Recommended acceleration: {:.3} m/s^2", rec.acceleration);
    println!("Verbal description: {}", Maneuver::classify(rec.acceleration));

    if opts.explain {
        println!();
        println!("Fired rules:");
        for fired in &explanation.fired {
            println!("  {:.3}  {}", fired.strength, fired.rule);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_values_come_from_args() {
        let values = strings(&["25", "-20", "5"]);
        assert_eq!(value_source(&values), ValueSource::Args(values.clone()));
    }

    #[test]
    fn no_values_prompts_on_stdin() {
        assert_eq!(value_source(&[]), ValueSource::Stdin);
    }

    #[test]
    fn partial_or_extra_values_are_rejected() {
        assert_eq!(value_source(&strings(&["25", "-20"])), ValueSource::Invalid(2));
        assert_eq!(value_source(&strings(&["25"])), ValueSource::Invalid(1));
        assert_eq!(value_source(&strings(&["1", "2", "3", "4"])), ValueSource::Invalid(4));
    }
}
