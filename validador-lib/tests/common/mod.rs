//! Utilidades comuns aos testes de integração da validador-lib.

use validador_lib::RegistroErro;

/// Colunas canônicas obrigatórias de um export de parceiros.
#[allow(dead_code)]
pub const COLUNAS_PARCEIRO: &[&str] = &[
    "AD_IDEXTERNO",
    "TIPPESSOA",
    "CGC_CPF",
    "NOMEPARC",
    "RAZAOSOCIAL",
    "ATIVO",
    "CLIENTE",
    "FORNECEDOR",
];

/// Linha de parceiro pessoa física válida, com flags por extenso que o
/// corretor padroniza.
#[allow(dead_code)]
pub const LINHA_PARCEIRO_VALIDA: &[&str] = &[
    "P001",
    "F",
    "11144477735",
    "Maria Silva",
    "Maria Silva",
    "sim",
    "não",
    "SIM",
];

#[allow(dead_code)]
pub fn pendencias(erros: &[RegistroErro]) -> Vec<&RegistroErro> {
    erros.iter().filter(|registro| !registro.corrigido).collect()
}

#[allow(dead_code)]
pub fn correcoes(erros: &[RegistroErro]) -> Vec<&RegistroErro> {
    erros.iter().filter(|registro| registro.corrigido).collect()
}

#[allow(dead_code)]
pub fn mensagens(erros: &[RegistroErro]) -> Vec<String> {
    erros.iter().map(|registro| registro.erro.clone()).collect()
}
