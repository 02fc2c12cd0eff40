use std::fs::OpenOptions;
use std::io::Write;

use crate::ARQUIVO_LOG_ERROS;

/// Centralized function to append a report section to the errors log file.
///
/// # Arguments
/// * `titulo` - A description of the report section (e.g., "Relatório de Validação de Parceiros")
/// * `conteudo` - The formatted report text
pub fn registrar_erro_log(titulo: &str, conteudo: &str) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let entrada = format!("\n[{}] {}:\n{}\n", timestamp, titulo, conteudo);

    if let Ok(mut arquivo) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ARQUIVO_LOG_ERROS)
    {
        let _ = writeln!(arquivo, "{}", entrada);
    }
}
