//! Normalização de cabeçalhos e mapeamento de apelidos de coluna.
//!
//! Os exports chegam com os nomes de coluna em qualquer caixa, com pontuação
//! perdida e com as grafias de sistemas legados. Antes de qualquer limpeza de
//! valores, cada coluna é normalizada e renomeada para o nome canônico que o
//! restante do pipeline endereça.

use tracing::debug;

use crate::tabela::Tabela;
use crate::utils::normalizar_espacos;

/// Par de apelidos: nome canônico → grafias aceitas, em ordem de
/// preferência. A primeira grafia presente vence; as demais são ignoradas.
pub type ParApelido = (&'static str, &'static [&'static str]);

pub type MapaApelidos = &'static [ParApelido];

/// Normaliza um nome de coluna: espaços e caracteres de controle colapsados,
/// caixa alta, espaços internos viram sublinhado e qualquer caractere fora de
/// [A-Z0-9_] é descartado.
pub fn normalizar_cabecalho(nome: &str) -> String {
    normalizar_espacos(nome)
        .to_uppercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Forma de comparação tolerante: a normalização de cabeçalho com os
/// sublinhados também removidos. "CNPJ/CPF" e "CNPJ_CPF" colidem aqui, que é
/// exatamente o comportamento desejado.
fn forma_comparavel(nome: &str) -> String {
    normalizar_cabecalho(nome).replace('_', "")
}

/// Resolve o nome canônico de uma coluna já normalizada, varrendo a lista de
/// apelidos na ordem declarada. Retorna `None` quando nenhuma grafia casa.
pub fn resolver_apelido(coluna: &str, apelidos: &[ParApelido]) -> Option<&'static str> {
    let comparavel = forma_comparavel(coluna);
    for (canonico, grafias) in apelidos {
        for grafia in *grafias {
            if forma_comparavel(grafia) == comparavel {
                return Some(*canonico);
            }
        }
    }
    None
}

/// Normaliza todos os cabeçalhos da tabela e renomeia cada coluna para seu
/// nome canônico. Deve rodar antes de qualquer limpeza de valores.
pub fn mapear_colunas(tabela: &mut Tabela, apelidos: &[ParApelido]) {
    for coluna in tabela.colunas.iter_mut() {
        *coluna = normalizar_cabecalho(coluna);
    }
    debug!(colunas = ?tabela.colunas, "colunas detectadas antes do mapeamento");

    for (canonico, grafias) in apelidos {
        if tabela.tem_coluna(canonico) {
            continue;
        }
        for grafia in *grafias {
            let comparavel = forma_comparavel(grafia);
            let encontrada = tabela
                .colunas
                .iter()
                .find(|c| forma_comparavel(c) == comparavel)
                .cloned();
            if let Some(original) = encontrada {
                tabela.renomear_coluna(&original, canonico);
                break;
            }
        }
    }
    debug!(colunas = ?tabela.colunas, "colunas após o mapeamento");
}

/// Verifica a presença de todas as colunas obrigatórias após o mapeamento.
/// Retorna o primeiro nome canônico ausente, se houver.
pub fn coluna_obrigatoria_ausente(
    tabela: &Tabela,
    obrigatorias: &[&'static str],
) -> Option<&'static str> {
    obrigatorias
        .iter()
        .find(|coluna| !tabela.tem_coluna(coluna))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    const APELIDOS: MapaApelidos = &[
        ("CGC_CPF", &["CGC_CPF", "CNPJ_CPF", "DOCUMENTO", "DOC"]),
        ("NOMEPARC", &["NOMEPARC", "NOME_FANTASIA", "NOME"]),
    ];

    #[test]
    fn test_normalizar_cabecalho() {
        assert_eq!(normalizar_cabecalho("  cnpj cpf "), "CNPJ_CPF");
        assert_eq!(normalizar_cabecalho("CNPJ/CPF"), "CNPJCPF");
        assert_eq!(normalizar_cabecalho("Código!"), "CDIGO");
    }

    #[test]
    fn test_resolver_apelido_exato() {
        assert_eq!(resolver_apelido("CNPJ_CPF", APELIDOS), Some("CGC_CPF"));
        assert_eq!(resolver_apelido("DOC", APELIDOS), Some("CGC_CPF"));
        assert_eq!(resolver_apelido("NOME", APELIDOS), Some("NOMEPARC"));
    }

    #[test]
    fn test_resolver_apelido_com_pontuacao() {
        // "CNPJ/CPF" normaliza para "CNPJCPF" e casa com o apelido "CNPJ_CPF".
        assert_eq!(resolver_apelido("CNPJCPF", APELIDOS), Some("CGC_CPF"));
    }

    #[test]
    fn test_resolver_apelido_desconhecido() {
        assert_eq!(resolver_apelido("TELEFONE", APELIDOS), None);
    }

    #[test]
    fn test_mapear_colunas_primeira_grafia_vence() {
        let mut tabela = Tabela {
            colunas: vec!["DOC".into(), "DOCUMENTO".into(), "NOME".into()],
            linhas: vec![],
        };
        mapear_colunas(&mut tabela, APELIDOS);
        // "DOCUMENTO" vem antes de "DOC" na lista de grafias, então é ele que
        // vira CGC_CPF; "DOC" permanece intocado.
        assert_eq!(tabela.colunas, vec!["DOC", "CGC_CPF", "NOMEPARC"]);
    }

    #[test]
    fn test_coluna_obrigatoria_ausente() {
        let tabela = Tabela {
            colunas: vec!["CGC_CPF".into()],
            linhas: vec![],
        };
        assert_eq!(
            coluna_obrigatoria_ausente(&tabela, &["CGC_CPF", "NOMEPARC"]),
            Some("NOMEPARC")
        );
        assert_eq!(coluna_obrigatoria_ausente(&tabela, &["CGC_CPF"]), None);
    }
}
