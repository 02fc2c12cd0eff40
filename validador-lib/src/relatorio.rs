//! Registro de erros, agregação e serialização do relatório.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::tabela::Tabela;

/// Um registro do relatório de validação.
///
/// `linha` é 1-based e deslocada pelo cabeçalho (a primeira linha de dados é
/// a 2); registros de nível de arquivo usam `linha` 0. Nunca é mutado após a
/// criação.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegistroErro {
    pub linha: usize,
    pub coluna: String,
    pub valor_encontrado: String,
    pub valor_corrigido: String,
    pub erro: String,
    pub corrigido: bool,
}

impl RegistroErro {
    /// Registro de nível de arquivo (falha fatal antes de qualquer linha).
    pub fn de_arquivo(coluna: &str, valor: &str, erro: impl Into<String>) -> RegistroErro {
        RegistroErro {
            linha: 0,
            coluna: coluna.to_string(),
            valor_encontrado: valor.to_string(),
            valor_corrigido: String::new(),
            erro: erro.into(),
            corrigido: false,
        }
    }
}

/// Resultado de uma rodada de validação de entidade.
///
/// `tabela` é `None` quando a falha impediu até o início do processamento;
/// quem consome o resultado deve ramificar pela presença da tabela, não só
/// pela lista de registros vazia.
#[derive(Debug)]
pub struct ResultadoValidacao {
    pub erros: Vec<RegistroErro>,
    pub tabela: Option<Tabela>,
}

impl ResultadoValidacao {
    pub fn falha_de_arquivo(registro: RegistroErro) -> ResultadoValidacao {
        ResultadoValidacao {
            erros: vec![registro],
            tabela: None,
        }
    }

    /// Registros que exigem atenção do operador (exclui correções automáticas).
    pub fn pendencias(&self) -> impl Iterator<Item = &RegistroErro> {
        self.erros.iter().filter(|registro| !registro.corrigido)
    }
}

/// Remove registros integralmente idênticos, preservando a ordem da primeira
/// ocorrência.
pub fn deduplicar(registros: Vec<RegistroErro>) -> Vec<RegistroErro> {
    let mut vistos: HashSet<RegistroErro> = HashSet::with_capacity(registros.len());
    let mut resultado = Vec::with_capacity(registros.len());
    for registro in registros {
        if vistos.insert(registro.clone()) {
            resultado.push(registro);
        }
    }
    resultado
}

/// Serializa o relatório como texto delimitado por ponto e vírgula, com as
/// colunas {linha, coluna, valor_encontrado, valor_corrigido, erro, corrigido}.
pub fn relatorio_csv(registros: &[RegistroErro]) -> Result<String, csv::Error> {
    let mut escritor = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    for registro in registros {
        escritor.serialize(registro)?;
    }

    let bytes = escritor
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn escrever_relatorio_csv(registros: &[RegistroErro], caminho: &Path) -> Result<(), csv::Error> {
    let conteudo = relatorio_csv(registros)?;
    std::fs::write(caminho, conteudo).map_err(csv::Error::from)?;
    Ok(())
}

/// Formata o relatório para o log de erros, agrupando por linha.
pub fn formatar_relatorio(registros: &[RegistroErro]) -> String {
    let mut texto = String::new();
    texto.push_str("=============================\n");
    texto.push_str(&format!("Total de registros: {}\n\n", registros.len()));

    for registro in registros {
        let marcador = if registro.corrigido {
            "corrigido"
        } else {
            "pendente"
        };
        texto.push_str(&format!(
            "Linha {} [{}] {}: {} (valor: '{}'",
            registro.linha, marcador, registro.coluna, registro.erro, registro.valor_encontrado
        ));
        if registro.corrigido {
            texto.push_str(&format!(" -> '{}'", registro.valor_corrigido));
        }
        texto.push_str(")\n");
    }

    texto
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registro(linha: usize, coluna: &str, erro: &str) -> RegistroErro {
        RegistroErro {
            linha,
            coluna: coluna.to_string(),
            valor_encontrado: "x".to_string(),
            valor_corrigido: String::new(),
            erro: erro.to_string(),
            corrigido: false,
        }
    }

    #[test]
    fn test_deduplicar_identicos() {
        let registros = vec![
            registro(2, "ATIVO", "inválido"),
            registro(2, "ATIVO", "inválido"),
            registro(3, "ATIVO", "inválido"),
        ];
        let unicos = deduplicar(registros);
        assert_eq!(unicos.len(), 2);
        assert_eq!(unicos[0].linha, 2);
        assert_eq!(unicos[1].linha, 3);
    }

    #[test]
    fn test_deduplicar_preserva_diferencas() {
        let mut a = registro(2, "ATIVO", "inválido");
        let b = registro(2, "ATIVO", "inválido");
        a.corrigido = true;
        assert_eq!(deduplicar(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_relatorio_csv_cabecalho() {
        let csv = relatorio_csv(&[registro(2, "CEP", "Formato inválido.")]).unwrap();
        let mut linhas = csv.lines();
        assert_eq!(
            linhas.next().unwrap(),
            "linha;coluna;valor_encontrado;valor_corrigido;erro;corrigido"
        );
        assert_eq!(linhas.next().unwrap(), "2;CEP;x;;Formato inválido.;false");
    }
}
