use std::process::ExitCode;

use log::info;
use pipeflow::config::AppConfig;
use pipeflow::errors::AppError;
use pipeflow::pipes::process;

const DEFAULT_INPUT: &str = "  el compositor pasa el payload por cada pipe  ";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // El logger puede no estar inicializado todavía; stderr siempre.
            eprintln!("{}", failure_line(&e));
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    env_logger::Builder::new().parse_filters(&config.log_filter).init();
    info!("pipeflow iniciado (método \"{}\", máx. {} palabras)", config.pipeline.method, config.max_words);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() { DEFAULT_INPUT.to_string() } else { args.join(" ") };

    let out = process(input, &config).await?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn failure_line(err: &AppError) -> String {
    format!("pipeflow: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_line_is_a_single_prefixed_line() {
        let line = failure_line(&AppError::Config("PIPEFLOW_MAX_WORDS debe ser mayor que 0".into()));
        assert_eq!(line, "pipeflow: Error de configuración: PIPEFLOW_MAX_WORDS debe ser mayor que 0");
        assert!(!line.contains('\n'));
    }
}
