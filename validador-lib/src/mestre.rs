//! Dados mestres: tabelas auxiliares de consulta carregadas uma única vez.
//!
//! Os mapas de Cidade e UF alimentam as validações de existência do cadastro
//! de parceiros; o conjunto de códigos de produto alimenta a validação de
//! estoque. Tudo é construído na inicialização e somente lido depois — os
//! validadores recebem os dados por referência, sem estado global.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, anyhow};
use tracing::{info, warn};

use crate::cabecalho::normalizar_cabecalho;
use crate::tabela::Tabela;
use crate::utils::chave_normalizada;

/// Arquivos mestres de cidade, particionados por faixa de código no export
/// original. São concatenados em um único mapa.
pub const ARQUIVOS_CIDADE: &[&str] = &[
    "CIDADE DE 0 A 4999.xls - new sheet.csv",
    "CIDADE DE 5000 A 5572.xls - new sheet.csv",
];

pub const ARQUIVO_UF: &str = "UF ESTADOS.xls - new sheet.csv";

const COLUNAS_NOME_CIDADE: &[&str] = &["NOMECID", "CIDADE", "MUNICIPIO"];
const COLUNAS_CODIGO_CIDADE: &[&str] = &["CODCID", "CODIGO"];
const COLUNAS_SIGLA_UF: &[&str] = &["UF", "SIGLA", "SIGLA_UF"];
const COLUNAS_CODIGO_UF: &[&str] = &["CODREG", "CODIGO"];

/// Mapas de consulta de Cidade e UF, chaveados por texto normalizado
/// (acentos removidos, caixa alta, espaços aparados).
#[derive(Debug, Default)]
pub struct DadosMestre {
    cidades: HashMap<String, String>,
    ufs: HashMap<String, String>,
    /// Descrições das falhas de carga. A carga nunca aborta o processo; quem
    /// valida parceiros confere `disponivel()` antes de confiar nos mapas.
    pub falhas: Vec<String>,
}

impl DadosMestre {
    /// Carrega os arquivos mestres de um diretório. Falhas viram descrições
    /// em `falhas`, nunca erro.
    pub fn carregar(diretorio: &Path) -> DadosMestre {
        let mut dados = DadosMestre::default();

        let mut partes_cidade: Vec<Tabela> = Vec::new();
        for nome in ARQUIVOS_CIDADE {
            match Tabela::carregar_arquivo(&diretorio.join(nome)) {
                Ok(tabela) => partes_cidade.push(tabela),
                Err(erro) => dados
                    .falhas
                    .push(format!("Arquivo de cidades '{}': {}", nome, erro)),
            }
        }
        for mut parte in partes_cidade {
            match construir_mapa(&mut parte, COLUNAS_NOME_CIDADE, COLUNAS_CODIGO_CIDADE) {
                Ok(mapa) => dados.cidades.extend(mapa),
                Err(erro) => dados.falhas.push(format!("Cidades: {}", erro)),
            }
        }

        match Tabela::carregar_arquivo(&diretorio.join(ARQUIVO_UF)) {
            Ok(mut tabela) => match construir_mapa(&mut tabela, COLUNAS_SIGLA_UF, COLUNAS_CODIGO_UF)
            {
                Ok(mapa) => dados.ufs = mapa,
                Err(erro) => dados.falhas.push(format!("UF: {}", erro)),
            },
            Err(erro) => dados
                .falhas
                .push(format!("Arquivo de UF '{}': {}", ARQUIVO_UF, erro)),
        }

        if dados.falhas.is_empty() {
            info!(
                cidades = dados.cidades.len(),
                ufs = dados.ufs.len(),
                "dados mestres carregados"
            );
        } else {
            warn!(falhas = ?dados.falhas, "carga parcial dos dados mestres");
        }

        dados
    }

    /// Constrói os mapas a partir de tabelas já carregadas (testes e chamadas
    /// com dados sintéticos).
    pub fn de_tabelas(mut cidades: Tabela, mut ufs: Tabela) -> anyhow::Result<DadosMestre> {
        let mapa_cidades = construir_mapa(&mut cidades, COLUNAS_NOME_CIDADE, COLUNAS_CODIGO_CIDADE)?;
        let mapa_ufs = construir_mapa(&mut ufs, COLUNAS_SIGLA_UF, COLUNAS_CODIGO_UF)?;
        Ok(DadosMestre {
            cidades: mapa_cidades,
            ufs: mapa_ufs,
            falhas: Vec::new(),
        })
    }

    /// Código da cidade pelo nome, tolerante a acentos e caixa.
    pub fn codigo_cidade(&self, nome: &str) -> Option<&str> {
        self.cidades
            .get(&chave_normalizada(nome))
            .map(String::as_str)
    }

    /// Código de região pela sigla da UF.
    pub fn codigo_uf(&self, sigla: &str) -> Option<&str> {
        self.ufs.get(&chave_normalizada(sigla)).map(String::as_str)
    }

    /// Os dois mapas obrigatórios foram carregados? Com um deles vazio, toda
    /// consulta responderia "não encontrado" e a validação inteira perderia o
    /// sentido; o validador de parceiros interrompe a rodada nesse caso.
    pub fn disponivel(&self) -> bool {
        !self.cidades.is_empty() && !self.ufs.is_empty()
    }
}

/// Detecta as colunas de chave e código dentre as grafias aceitas e monta o
/// dicionário chave normalizada → código.
fn construir_mapa(
    tabela: &mut Tabela,
    colunas_chave: &[&str],
    colunas_codigo: &[&str],
) -> anyhow::Result<HashMap<String, String>> {
    for coluna in tabela.colunas.iter_mut() {
        *coluna = normalizar_cabecalho(coluna);
    }

    let chave = detectar_coluna(tabela, colunas_chave)
        .ok_or_else(|| anyhow!("coluna de chave não encontrada (esperada uma de {:?})", colunas_chave))?;
    let codigo = detectar_coluna(tabela, colunas_codigo)
        .ok_or_else(|| anyhow!("coluna de código não encontrada (esperada uma de {:?})", colunas_codigo))?;

    let mut mapa = HashMap::with_capacity(tabela.linhas.len());
    for i in 0..tabela.linhas.len() {
        let nome = tabela.valor(i, &chave);
        let valor = tabela.valor(i, &codigo);
        if nome.trim().is_empty() || valor.trim().is_empty() {
            continue;
        }
        mapa.insert(chave_normalizada(nome), valor.trim().to_string());
    }
    Ok(mapa)
}

fn detectar_coluna(tabela: &Tabela, candidatas: &[&str]) -> Option<String> {
    candidatas
        .iter()
        .find(|candidata| tabela.tem_coluna(candidata))
        .map(|candidata| candidata.to_string())
}

/// Carrega um arquivo mestre e devolve o conjunto de valores de uma coluna.
///
/// Diferente dos mapas de Cidade/UF, a ausência do arquivo ou da coluna é
/// falha dura: sem o mestre de produtos não há o que validar no estoque.
pub fn carregar_mestre(caminho: &Path, coluna: &str) -> anyhow::Result<HashSet<String>> {
    let mut tabela = Tabela::carregar_arquivo(caminho)
        .with_context(|| format!("falha ao ler o arquivo mestre '{}'", caminho.display()))?;

    for nome in tabela.colunas.iter_mut() {
        *nome = normalizar_cabecalho(nome);
    }

    if !tabela.tem_coluna(coluna) {
        return Err(anyhow!(
            "coluna '{}' ausente no arquivo mestre '{}'",
            coluna,
            caminho.display()
        ));
    }

    let mut valores = HashSet::with_capacity(tabela.linhas.len());
    for i in 0..tabela.linhas.len() {
        let valor = tabela.valor(i, coluna).trim();
        if !valor.is_empty() {
            valores.insert(valor.to_string());
        }
    }
    Ok(valores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabela(colunas: &[&str], linhas: &[&[&str]]) -> Tabela {
        Tabela {
            colunas: colunas.iter().map(|c| c.to_string()).collect(),
            linhas: linhas
                .iter()
                .map(|l| l.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_de_tabelas_e_consulta() {
        let cidades = tabela(
            &["NOMECID", "CODCID"],
            &[&["São Paulo", "3550308"], &["Niterói", "3303302"]],
        );
        let ufs = tabela(&["UF", "CODREG"], &[&["SP", "35"], &["RJ", "33"]]);
        let dados = DadosMestre::de_tabelas(cidades, ufs).unwrap();

        assert!(dados.disponivel());
        assert_eq!(dados.codigo_cidade("são paulo"), Some("3550308"));
        assert_eq!(dados.codigo_cidade("SAO PAULO"), Some("3550308"));
        assert_eq!(dados.codigo_cidade("Campinas"), None);
        assert_eq!(dados.codigo_uf(" sp "), Some("35"));
    }

    #[test]
    fn test_de_tabelas_sem_coluna_chave() {
        let cidades = tabela(&["QUALQUER", "CODCID"], &[]);
        let ufs = tabela(&["UF", "CODREG"], &[]);
        assert!(DadosMestre::de_tabelas(cidades, ufs).is_err());
    }

    #[test]
    fn test_indisponivel_quando_vazio() {
        assert!(!DadosMestre::default().disponivel());
    }
}
