//! Pipeline genérico de validação: Carregar → Mapear Cabeçalhos → Corrigir →
//! Validar → Agregar.
//!
//! As três entidades (parceiro, produto, estoque) passam pelo mesmo motor,
//! parametrizado por uma tabela de especificação de campos e por um gancho de
//! regras cruzadas. A fase de correção roda inteira antes da fase de
//! validação; as regras consomem somente valores corrigidos e nunca mutam a
//! linha.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::info;

use crate::cabecalho::{self, ParApelido};
use crate::correcao::Correcao;
use crate::mestre::DadosMestre;
use crate::relatorio::{self, RegistroErro, ResultadoValidacao};
use crate::tabela::Tabela;

/// Formato textual fixo de datas nos exports (dia/mês/ano).
pub const FORMATO_DATA: &str = "%d/%m/%Y";

/// Regras de campo avaliadas em ordem, sem curto-circuito entre elas.
/// Regras além de `Preenchido` ignoram valores vazios: a ausência já é
/// coberta pela regra de preenchimento onde a entidade a declara.
#[derive(Debug, Clone, Copy)]
pub enum Regra {
    /// Campo não pode estar vazio após aparar espaços. Mensagem vazia gera o
    /// texto padrão com o nome da coluna.
    Preenchido { mensagem: &'static str },
    /// Valor deve pertencer ao conjunto fixo.
    Dominio {
        valores: &'static [&'static str],
        mensagem: &'static str,
    },
    /// Somente dígitos, com tamanho exato. A restrição de dígitos é conferida
    /// antes do tamanho e ambas compartilham a mesma mensagem.
    DigitosExatos {
        tamanho: usize,
        mensagem: &'static str,
    },
    /// Deve interpretar como número e não pode ser negativo. Mensagens são
    /// montadas com o nome da coluna.
    NumeroNaoNegativo,
    /// Deve interpretar como data no formato fixo dia/mês/ano.
    Data { mensagem: &'static str },
}

/// Especificação de um campo canônico da entidade.
pub struct CampoSpec {
    pub nome: &'static str,
    /// Grafias aceitas no arquivo de origem, em ordem de preferência.
    pub apelidos: &'static [&'static str],
    /// Coluna precisa existir após o mapeamento de apelidos.
    pub obrigatorio: bool,
    pub correcao: Correcao,
    /// Mensagem do registro de correção automática; vazia quando o campo não
    /// tem correção.
    pub mensagem_correcao: &'static str,
    pub regras: &'static [Regra],
}

/// Referências somente-leitura compartilhadas por todas as linhas.
#[derive(Default)]
pub struct Contexto<'a> {
    pub dados_mestre: Option<&'a DadosMestre>,
    pub produtos: Option<&'a HashSet<String>>,
}

/// Especificação completa de uma entidade.
pub struct EspecEntidade {
    pub nome: &'static str,
    pub campos: &'static [CampoSpec],
    /// Regras cruzadas e condicionais, avaliadas após as regras de campo.
    pub validar_linha: fn(&Linha, &Contexto, &mut Relator),
    /// Conferência prévia do contexto; devolve um registro de nível de
    /// sistema quando uma referência obrigatória está indisponível.
    pub conferir_contexto: fn(&Contexto) -> Option<RegistroErro>,
}

/// Visão somente-leitura de uma linha durante a validação.
pub struct Linha<'a> {
    numero: usize,
    tabela: &'a Tabela,
    indice: usize,
    originais: &'a HashMap<&'static str, String>,
}

impl Linha<'_> {
    /// Número da linha no arquivo de origem (1-based, deslocado pelo
    /// cabeçalho: a primeira linha de dados é a 2).
    pub fn numero(&self) -> usize {
        self.numero
    }

    pub fn tem_coluna(&self, campo: &str) -> bool {
        self.tabela.tem_coluna(campo)
    }

    /// Valor corrigido do campo; vazio quando a coluna não existe.
    pub fn valor(&self, campo: &str) -> &str {
        self.tabela.valor(self.indice, campo)
    }

    /// Valor original (antes da correção) quando houve mudança; caso
    /// contrário, o valor corrente. É o valor mostrado ao operador.
    pub fn original(&self, campo: &str) -> &str {
        match self.originais.get(campo) {
            Some(original) => original.as_str(),
            None => self.valor(campo),
        }
    }
}

/// Acumulador de registros de uma linha, no espírito do `adicionar_erro`
/// original: fixa o número da linha e padroniza a montagem dos registros.
pub struct Relator {
    linha: usize,
    registros: Vec<RegistroErro>,
}

impl Relator {
    fn nova(linha: usize) -> Relator {
        Relator {
            linha,
            registros: Vec::new(),
        }
    }

    /// Registro que exige atenção do operador.
    pub fn erro(&mut self, coluna: &str, valor: &str, mensagem: impl Into<String>) {
        self.registros.push(RegistroErro {
            linha: self.linha,
            coluna: coluna.to_string(),
            valor_encontrado: valor.to_string(),
            valor_corrigido: String::new(),
            erro: mensagem.into(),
            corrigido: false,
        });
    }

    /// Registro de correção automática (não bloqueia a linha).
    pub fn correcao(&mut self, coluna: &str, original: &str, corrigido: &str, mensagem: &str) {
        self.registros.push(RegistroErro {
            linha: self.linha,
            coluna: coluna.to_string(),
            valor_encontrado: original.to_string(),
            valor_corrigido: corrigido.to_string(),
            erro: mensagem.to_string(),
            corrigido: true,
        });
    }
}

/// Executa o pipeline completo de uma entidade sobre os bytes do arquivo.
pub fn executar(espec: &EspecEntidade, bytes: &[u8], contexto: &Contexto) -> ResultadoValidacao {
    if let Some(registro) = (espec.conferir_contexto)(contexto) {
        return ResultadoValidacao::falha_de_arquivo(registro);
    }

    // 1. Carga resiliente.
    let mut tabela = match Tabela::carregar_bytes(bytes) {
        Ok(tabela) => tabela,
        Err(erro) => {
            return ResultadoValidacao::falha_de_arquivo(RegistroErro::de_arquivo(
                "Arquivo",
                "N/A",
                format!("Erro crítico de leitura. Detalhe: {erro}"),
            ));
        }
    };

    // 2. Mapeamento de cabeçalhos e conferência das colunas obrigatórias.
    let apelidos: Vec<ParApelido> = espec
        .campos
        .iter()
        .map(|campo| (campo.nome, campo.apelidos))
        .collect();
    cabecalho::mapear_colunas(&mut tabela, &apelidos);
    let obrigatorias: Vec<&'static str> = espec
        .campos
        .iter()
        .filter(|campo| campo.obrigatorio)
        .map(|campo| campo.nome)
        .collect();
    if let Some(ausente) = cabecalho::coluna_obrigatoria_ausente(&tabela, &obrigatorias) {
        return ResultadoValidacao::falha_de_arquivo(RegistroErro::de_arquivo(
            ausente,
            "-",
            format!(
                "Coluna obrigatória '{}' não foi encontrada após o mapeamento. Colunas encontradas: {}.",
                ausente,
                tabela.colunas.join(", ")
            ),
        ));
    }

    info!(
        entidade = espec.nome,
        linhas = tabela.linhas.len(),
        "iniciando validação"
    );

    let mut registros: Vec<RegistroErro> = Vec::new();

    // 3. Correção automática, linha a linha, guardando os originais fora da
    // tabela (o valor original nunca é sobrescrito).
    let mut originais_por_linha: Vec<HashMap<&'static str, String>> =
        Vec::with_capacity(tabela.linhas.len());
    for indice in 0..tabela.linhas.len() {
        let numero = indice + 2;
        let mut originais: HashMap<&'static str, String> = HashMap::new();
        let mut relator = Relator::nova(numero);

        for campo in espec.campos {
            if campo.correcao == Correcao::Nenhuma {
                continue;
            }
            let Some(coluna) = tabela.indice(campo.nome) else {
                continue;
            };
            let original = tabela.linhas[indice][coluna].clone();
            let corrigido = campo.correcao.aplicar(&original);
            if corrigido != original {
                relator.correcao(campo.nome, &original, &corrigido, campo.mensagem_correcao);
                originais.insert(campo.nome, original);
                tabela.linhas[indice][coluna] = corrigido;
            }
        }

        originais_por_linha.push(originais);
        registros.append(&mut relator.registros);
    }

    // 4. Validação, consumindo somente valores corrigidos.
    for indice in 0..tabela.linhas.len() {
        let numero = indice + 2;
        let linha = Linha {
            numero,
            tabela: &tabela,
            indice,
            originais: &originais_por_linha[indice],
        };
        let mut relator = Relator::nova(numero);

        for campo in espec.campos {
            if !tabela.tem_coluna(campo.nome) {
                continue;
            }
            for regra in campo.regras {
                aplicar_regra(regra, campo.nome, &linha, &mut relator);
            }
        }

        (espec.validar_linha)(&linha, contexto, &mut relator);
        registros.append(&mut relator.registros);
    }

    // 5. Agregação com deduplicação integral.
    let erros = relatorio::deduplicar(registros);
    info!(
        entidade = espec.nome,
        registros = erros.len(),
        "validação concluída"
    );

    ResultadoValidacao {
        erros,
        tabela: Some(tabela),
    }
}

fn aplicar_regra(regra: &Regra, campo: &'static str, linha: &Linha, relator: &mut Relator) {
    let valor = linha.valor(campo);
    let aparado = valor.trim();

    match regra {
        Regra::Preenchido { mensagem } => {
            if aparado.is_empty() {
                let texto = if mensagem.is_empty() {
                    format!("{} está vazio.", campo)
                } else {
                    (*mensagem).to_string()
                };
                relator.erro(campo, linha.original(campo), texto);
            }
        }
        Regra::Dominio { valores, mensagem } => {
            if !aparado.is_empty() && !valores.iter().any(|permitido| *permitido == aparado) {
                relator.erro(campo, linha.original(campo), *mensagem);
            }
        }
        Regra::DigitosExatos { tamanho, mensagem } => {
            if !aparado.is_empty()
                && (!aparado.chars().all(|c| c.is_ascii_digit()) || aparado.len() != *tamanho)
            {
                relator.erro(campo, linha.original(campo), *mensagem);
            }
        }
        Regra::NumeroNaoNegativo => {
            if aparado.is_empty() {
                return;
            }
            match aparado.parse::<f64>() {
                Ok(numero) if numero < 0.0 => {
                    relator.erro(
                        campo,
                        linha.original(campo),
                        format!("{} não pode ser negativo.", campo),
                    );
                }
                Ok(_) => {}
                Err(_) => {
                    relator.erro(
                        campo,
                        linha.original(campo),
                        format!("{} não é um número válido.", campo),
                    );
                }
            }
        }
        Regra::Data { mensagem } => {
            if !aparado.is_empty() && NaiveDate::parse_from_str(aparado, FORMATO_DATA).is_err() {
                relator.erro(campo, linha.original(campo), *mensagem);
            }
        }
    }
}

/// Interpreta um valor já corrigido como número, se possível. Usado pelas
/// regras cruzadas (mínimo ≤ máximo) e pelas entidades.
pub fn interpretar_numero(valor: &str) -> Option<f64> {
    let aparado = valor.trim();
    if aparado.is_empty() {
        return None;
    }
    aparado.parse::<f64>().ok()
}

/// Interpreta um valor como data no formato fixo.
pub fn interpretar_data(valor: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(valor.trim(), FORMATO_DATA).ok()
}
