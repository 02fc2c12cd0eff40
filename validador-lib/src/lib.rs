//! Núcleo de validação e normalização de exports de ERP.
//!
//! O pipeline é um só para as três entidades: carregar o arquivo delimitado
//! com detecção de separador/codificação, mapear cabeçalhos para os nomes
//! canônicos, aplicar correções automáticas registrando os valores originais,
//! validar linha a linha e agregar o relatório deduplicado junto da tabela
//! corrigida.

pub mod cabecalho;
pub mod correcao;
pub mod documento;
pub mod entidades;
pub mod mestre;
pub mod pipeline;
pub mod relatorio;
pub mod tabela;
pub mod utils;

// Utilidades de teste - compiladas só em teste ou com a feature `test`.
// #[cfg(test)] sozinho não alcança os testes de integração (são crates
// externas); a feature as expõe via dev-dependencies.
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use entidades::{validar_estoque, validar_parceiros, validar_produtos};
pub use mestre::{DadosMestre, carregar_mestre};
pub use relatorio::{RegistroErro, ResultadoValidacao};
pub use tabela::Tabela;

pub const ARQUIVO_LOG_ERROS: &str = "erros.log";
