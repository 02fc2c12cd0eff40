//! Carga resiliente de arquivos texto delimitados.
//!
//! Exportações de ERP chegam com separador e codificação incertos. A carga
//! tenta uma lista ordenada de combinações (separador, codificação) e aceita
//! a primeira que produza mais de uma coluna. Toda célula é texto: nenhum
//! valor é inferido como número ou data, preservando zeros à esquerda e a
//! formatação original.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use thiserror::Error;
use tracing::{debug, warn};

/// Combinações tentadas, da mais para a menos provável. UTF-8 é decodificado
/// de forma estrita para que arquivos latin-1 caiam no fallback; WINDOWS_1252
/// decodifica qualquer sequência de bytes (equivalente ao latin-1 tolerante
/// dos exports antigos).
const TENTATIVAS: &[(u8, &Encoding)] = &[
    (b';', UTF_8),
    (b',', UTF_8),
    (b';', WINDOWS_1252),
    (b',', WINDOWS_1252),
];

const DELIMITADORES_CONHECIDOS: &[char] = &[';', ',', '\t'];

#[derive(Error, Debug)]
pub enum ErroLeitura {
    #[error("Arquivo não pôde ser lido. Detalhe: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Nenhuma combinação de separador/codificação produziu mais de uma coluna. Detalhe: {detalhe}"
    )]
    FormatoDesconhecido { detalhe: String },
}

/// Tabela carregada: colunas nomeadas e linhas de células texto.
///
/// O número de colunas é fixado na carga; linhas com contagem de campos
/// diferente do cabeçalho são descartadas ainda na leitura.
#[derive(Debug, Clone)]
pub struct Tabela {
    pub colunas: Vec<String>,
    pub linhas: Vec<Vec<String>>,
}

impl Tabela {
    /// Carrega a tabela a partir de bytes crus, tentando cada combinação de
    /// separador e codificação na ordem declarada.
    pub fn carregar_bytes(bytes: &[u8]) -> Result<Tabela, ErroLeitura> {
        let mut ultimo_erro = String::from("formato desconhecido");

        for (separador, codificacao) in TENTATIVAS.iter().copied() {
            let texto = match decodificar(bytes, codificacao) {
                Ok(texto) => texto,
                Err(erro) => {
                    ultimo_erro = erro;
                    continue;
                }
            };

            match parsear(&texto, separador) {
                Ok(tabela) if tabela.colunas.len() > 1 => {
                    debug!(
                        separador = %(separador as char),
                        codificacao = codificacao.name(),
                        colunas = tabela.colunas.len(),
                        linhas = tabela.linhas.len(),
                        "tabela carregada"
                    );
                    return Ok(tabela);
                }
                Ok(tabela) if tabela.colunas.len() == 1 => {
                    // Separador errado pode ter colapsado tudo numa coluna só;
                    // se o nome dela contém um delimitador conhecido, força a
                    // releitura com ele.
                    if let Some(forcado) = delimitador_embutido(&tabela.colunas[0]) {
                        if let Ok(refeita) = parsear(&texto, forcado as u8) {
                            if refeita.colunas.len() > 1 {
                                debug!(
                                    separador = %forcado,
                                    codificacao = codificacao.name(),
                                    "releitura forçada pelo delimitador embutido no cabeçalho"
                                );
                                return Ok(refeita);
                            }
                        }
                    }
                    ultimo_erro = String::from("apenas uma coluna detectada");
                }
                Ok(_) => {
                    ultimo_erro = String::from("nenhuma coluna detectada");
                }
                Err(erro) => {
                    ultimo_erro = erro.to_string();
                }
            }
        }

        Err(ErroLeitura::FormatoDesconhecido {
            detalhe: ultimo_erro,
        })
    }

    /// Carrega a tabela de um arquivo no disco.
    pub fn carregar_arquivo(caminho: &Path) -> Result<Tabela, ErroLeitura> {
        let bytes = std::fs::read(caminho)?;
        Tabela::carregar_bytes(&bytes)
    }

    /// Índice da coluna pelo nome exato, se presente.
    pub fn indice(&self, coluna: &str) -> Option<usize> {
        self.colunas.iter().position(|c| c == coluna)
    }

    pub fn tem_coluna(&self, coluna: &str) -> bool {
        self.indice(coluna).is_some()
    }

    /// Valor de uma célula; vazio quando a coluna não existe.
    pub fn valor(&self, linha: usize, coluna: &str) -> &str {
        match self.indice(coluna) {
            Some(i) => self.linhas[linha][i].as_str(),
            None => "",
        }
    }

    /// Renomeia uma coluna preservando a posição.
    pub fn renomear_coluna(&mut self, de: &str, para: &str) {
        if let Some(i) = self.indice(de) {
            self.colunas[i] = para.to_string();
        }
    }

    /// Serializa a tabela como texto delimitado por ponto e vírgula, com
    /// aspas somente onde necessário.
    pub fn para_csv(&self) -> Result<String, csv::Error> {
        let mut escritor = csv::WriterBuilder::new()
            .delimiter(b';')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        escritor.write_record(&self.colunas)?;
        for linha in &self.linhas {
            escritor.write_record(linha)?;
        }

        let bytes = escritor
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Grava a tabela corrigida em disco como CSV.
    pub fn escrever_csv(&self, caminho: &Path) -> Result<(), csv::Error> {
        let conteudo = self.para_csv()?;
        std::fs::write(caminho, conteudo).map_err(csv::Error::from)?;
        Ok(())
    }
}

fn decodificar(bytes: &[u8], codificacao: &'static Encoding) -> Result<String, String> {
    if codificacao == UTF_8 {
        // Estrito: bytes inválidos derrubam a tentativa e abrem caminho para
        // o fallback WINDOWS_1252, que aceita qualquer byte.
        return match std::str::from_utf8(bytes) {
            Ok(texto) => Ok(texto.to_string()),
            Err(erro) => Err(format!("UTF-8 inválido: {erro}")),
        };
    }
    let (texto, _, _) = codificacao.decode(bytes);
    Ok(texto.into_owned())
}

fn delimitador_embutido(cabecalho: &str) -> Option<char> {
    DELIMITADORES_CONHECIDOS
        .iter()
        .copied()
        .find(|d| cabecalho.contains(*d))
}

fn parsear(texto: &str, separador: u8) -> Result<Tabela, csv::Error> {
    let mut leitor = csv::ReaderBuilder::new()
        .delimiter(separador)
        .flexible(true)
        .from_reader(texto.as_bytes());

    let cabecalho = leitor.headers()?.clone();
    let colunas: Vec<String> = cabecalho
        .iter()
        .enumerate()
        .map(|(i, nome)| {
            // BOM sobrevive à decodificação e gruda na primeira coluna.
            let sem_bom = if i == 0 {
                nome.strip_prefix('\u{feff}').unwrap_or(nome)
            } else {
                nome
            };
            sem_bom.to_string()
        })
        .collect();

    let mut linhas = Vec::new();
    for registro in leitor.records() {
        let registro = registro?;
        if registro.len() != colunas.len() {
            // Linha malformada não derruba a carga inteira.
            warn!(
                campos = registro.len(),
                esperado = colunas.len(),
                "linha com contagem de campos divergente descartada"
            );
            continue;
        }
        linhas.push(registro.iter().map(|celula| celula.to_string()).collect());
    }

    Ok(Tabela { colunas, linhas })
}
