// Utilidades de teste compartilhadas entre testes unitários e de integração.
// Compiladas apenas durante os testes (ou com a feature `test`).

use std::collections::HashSet;

use crate::mestre::DadosMestre;
use crate::tabela::Tabela;

/// Monta uma tabela em memória a partir de literais.
#[allow(dead_code)]
pub fn tabela_de(colunas: &[&str], linhas: &[&[&str]]) -> Tabela {
    Tabela {
        colunas: colunas.iter().map(|c| c.to_string()).collect(),
        linhas: linhas
            .iter()
            .map(|linha| linha.iter().map(|v| v.to_string()).collect())
            .collect(),
    }
}

/// Dados mestres sintéticos com algumas cidades e UFs reais.
#[allow(dead_code)]
pub fn dados_mestre_de_teste() -> DadosMestre {
    let cidades = tabela_de(
        &["NOMECID", "CODCID"],
        &[
            &["São Paulo", "3550308"],
            &["Niterói", "3303302"],
            &["Belo Horizonte", "3106200"],
        ],
    );
    let ufs = tabela_de(
        &["UF", "CODREG"],
        &[&["SP", "35"], &["RJ", "33"], &["MG", "31"]],
    );
    DadosMestre::de_tabelas(cidades, ufs).expect("dados mestres de teste devem construir")
}

/// Conjunto de códigos de produto para os testes de estoque.
#[allow(dead_code)]
pub fn produtos_de_teste() -> HashSet<String> {
    ["1001", "1002", "2000"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Serializa um CSV de teste com separador ponto e vírgula.
#[allow(dead_code)]
pub fn csv_de(colunas: &[&str], linhas: &[&[&str]]) -> Vec<u8> {
    let mut texto = colunas.join(";");
    texto.push('\n');
    for linha in linhas {
        texto.push_str(&linha.join(";"));
        texto.push('\n');
    }
    texto.into_bytes()
}
