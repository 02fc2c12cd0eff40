//! Pontos de entrada de validação por entidade.
//!
//! Cada função recebe os bytes crus do arquivo enviado mais as referências
//! somente-leitura de que a entidade precisa, e devolve o contrato único do
//! núcleo: lista de registros de erro e tabela normalizada (ou nenhuma, em
//! falha irrecuperável).

use std::collections::HashSet;

pub mod estoque;
pub mod parceiro;
pub mod produto;

use crate::mestre::DadosMestre;
use crate::pipeline::{self, Contexto};
use crate::relatorio::ResultadoValidacao;

/// Valida um export de parceiros. Os mapas de Cidade/UF são obrigatórios:
/// com eles vazios a rodada é interrompida com um registro de sistema.
pub fn validar_parceiros(bytes: &[u8], dados_mestre: &DadosMestre) -> ResultadoValidacao {
    pipeline::executar(
        &parceiro::ESPEC,
        bytes,
        &Contexto {
            dados_mestre: Some(dados_mestre),
            produtos: None,
        },
    )
}

/// Valida um export de produtos. Não depende de tabelas auxiliares.
pub fn validar_produtos(bytes: &[u8]) -> ResultadoValidacao {
    pipeline::executar(&produto::ESPEC, bytes, &Contexto::default())
}

/// Valida uma planilha de estoque contra o conjunto de códigos do arquivo
/// mestre de produtos.
pub fn validar_estoque(bytes: &[u8], produtos: &HashSet<String>) -> ResultadoValidacao {
    pipeline::executar(
        &estoque::ESPEC,
        bytes,
        &Contexto {
            dados_mestre: None,
            produtos: Some(produtos),
        },
    )
}
