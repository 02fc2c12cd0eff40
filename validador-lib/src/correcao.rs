//! Correções automáticas aplicadas antes da validação.
//!
//! Cada campo canônico tem no máximo um tipo de correção, fixado pela
//! especificação da entidade. Toda correção é determinística e idempotente:
//! aplicar duas vezes produz o mesmo resultado, e a segunda passada não gera
//! novos registros.

/// Sinônimos aceitos para campos Sim/Não, já em caixa alta.
pub const MAPA_SIM_NAO: &[(&str, &str)] = &[
    ("SIM", "S"),
    ("S", "S"),
    ("NÃO", "N"),
    ("NAO", "N"),
    ("N", "N"),
    ("YES", "S"),
    ("NO", "N"),
    ("1", "S"),
    ("0", "N"),
];

/// Variante do mapa Sim/Não usada no campo ATIVO de estoque, que também
/// aceita os valores por extenso.
pub const MAPA_ATIVO_ESTOQUE: &[(&str, &str)] = &[
    ("SIM", "S"),
    ("S", "S"),
    ("ATIVO", "S"),
    ("YES", "S"),
    ("1", "S"),
    ("NÃO", "N"),
    ("NAO", "N"),
    ("N", "N"),
    ("INATIVO", "N"),
    ("NO", "N"),
    ("0", "N"),
];

pub const MAPA_TIPO_ESTOQUE: &[(&str, &str)] = &[
    ("PROPRIO", "P"),
    ("PRÓPRIO", "P"),
    ("P", "P"),
    ("TERCEIRO", "T"),
    ("TERCEIROS", "T"),
    ("T", "T"),
];

/// Unidades por extenso mapeadas para as abreviações canônicas.
pub const MAPA_UNIDADES: &[(&str, &str)] = &[
    ("METRO", "M"),
    ("METROS", "M"),
    ("MTS", "M"),
    ("MT", "M"),
    ("CENTIMETRO", "CM"),
    ("CENTIMETROS", "CM"),
    ("CENT", "CM"),
    ("MILIMETRO", "MM"),
    ("MILIMETROS", "MM"),
    ("QUILO", "KG"),
    ("QUILOGRAMA", "KG"),
    ("KILO", "KG"),
    ("KILOGRAMA", "KG"),
    ("GRAMA", "G"),
    ("GRAMAS", "G"),
    ("GR", "G"),
    ("LITRO", "L"),
    ("LITROS", "L"),
    ("LT", "L"),
    ("MILILITRO", "ML"),
    ("MILILITROS", "ML"),
    ("UNIDADE", "UN"),
    ("UNIDADES", "UN"),
    ("UND", "UN"),
    ("PEÇA", "PC"),
    ("PECAS", "PC"),
    ("PECA", "PC"),
    ("PÇ", "PC"),
    ("CAIXA", "CX"),
    ("CAIXAS", "CX"),
    ("FARDO", "FD"),
    ("FARDOS", "FD"),
];

fn traduzir(
    mapa: &'static [(&'static str, &'static str)],
    valor: &str,
) -> Option<&'static str> {
    mapa.iter()
        .find(|(de, _)| *de == valor)
        .map(|(_, para)| *para)
}

fn caixa_alta(valor: &str) -> String {
    valor.trim().to_uppercase()
}

fn mapear_apos_caixa_alta(mapa: &'static [(&'static str, &'static str)], valor: &str) -> String {
    let limpo = caixa_alta(valor);
    match traduzir(mapa, &limpo) {
        Some(canonico) => canonico.to_string(),
        None => limpo,
    }
}

/// Pontos repetidos agrupando de três em três ("12.345.678") são separador de
/// milhar. Um único ponto sem vírgula é ambíguo ("1.000" pode ser mil ou um
/// com três decimais) e fica como está; é o que mantém a limpeza idempotente.
fn eh_agrupamento_milhar(valor: &str) -> bool {
    let sem_sinal = valor.strip_prefix(['-', '+']).unwrap_or(valor);
    let grupos: Vec<&str> = sem_sinal.split('.').collect();
    if grupos.len() < 3 {
        return false;
    }
    if !grupos
        .iter()
        .all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()))
    {
        return false;
    }
    (1..=3).contains(&grupos[0].len()) && grupos[1..].iter().all(|g| g.len() == 3)
}

/// Remove separadores de milhar e converte vírgula decimal em ponto.
fn limpar_numerico(valor: &str) -> String {
    let aparado = valor.trim();
    let virgulas = aparado.matches(',').count();
    if virgulas >= 2 {
        // Vírgula repetida só pode ser separador de milhar (formato
        // americano); não sobra separador decimal.
        return aparado.replace([',', '.'], "");
    }
    if virgulas == 1 {
        return aparado.replace('.', "").replace(',', ".");
    }
    if eh_agrupamento_milhar(aparado) {
        return aparado.replace('.', "");
    }
    aparado.to_string()
}

/// Tipos de correção automática, um por campo canônico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correcao {
    Nenhuma,
    /// Caixa alta e espaços aparados (TIPPESSOA, USOPROD).
    CaixaAlta,
    /// Sinônimos Sim/Não para 'S'/'N'.
    SimNao,
    /// Sim/Não do estoque, incluindo ATIVO/INATIVO por extenso.
    AtivoEstoque,
    /// Próprio/Terceiro para 'P'/'T'.
    TipoEstoque,
    /// Remove ponto, barra e hífen de CPF/CNPJ.
    Documento,
    /// Mantém somente dígitos (CEP).
    SomenteDigitos,
    /// Remove pontuação e espaços internos do NCM.
    Ncm,
    /// Unidades por extenso para a abreviação canônica.
    Unidade,
    /// Remove símbolo de moeda, separador de milhar e vírgula decimal.
    Monetario,
    /// Limpeza numérica de quantidades (milhar e vírgula decimal).
    Quantidade,
    /// Somente apara espaços (códigos de produto).
    Trim,
}

impl Correcao {
    /// Aplica a correção, devolvendo o valor possivelmente alterado.
    pub fn aplicar(&self, valor: &str) -> String {
        match self {
            Correcao::Nenhuma => valor.to_string(),
            Correcao::CaixaAlta => caixa_alta(valor),
            Correcao::SimNao => mapear_apos_caixa_alta(MAPA_SIM_NAO, valor),
            Correcao::AtivoEstoque => mapear_apos_caixa_alta(MAPA_ATIVO_ESTOQUE, valor),
            Correcao::TipoEstoque => mapear_apos_caixa_alta(MAPA_TIPO_ESTOQUE, valor),
            Correcao::Documento => crate::documento::limpar_documento(valor),
            Correcao::SomenteDigitos => valor.chars().filter(char::is_ascii_digit).collect(),
            Correcao::Ncm => valor
                .chars()
                .filter(|c| !matches!(c, '.' | '/' | '-' | ' '))
                .collect::<String>()
                .trim()
                .to_string(),
            Correcao::Unidade => mapear_apos_caixa_alta(MAPA_UNIDADES, valor),
            Correcao::Monetario => {
                let limpo = caixa_alta(valor).replace("R$", "").replace('$', "");
                limpar_numerico(&limpo)
            }
            Correcao::Quantidade => limpar_numerico(valor),
            Correcao::Trim => valor.trim().to_string(),
        }
    }
}
