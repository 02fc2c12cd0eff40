//! Planilha de estoque: especificação de campos e regras cruzadas.

use std::path::Path;

use crate::correcao::Correcao;
use crate::pipeline::{
    CampoSpec, Contexto, EspecEntidade, Linha, Regra, Relator, interpretar_numero,
};
use crate::relatorio::RegistroErro;

/// Coluna do arquivo mestre de produtos que alimenta o conjunto de códigos.
pub const COLUNA_MESTRE_PRODUTOS: &str = "CODPROD";

static CAMPOS: &[CampoSpec] = &[
    CampoSpec {
        nome: "CODPROD",
        apelidos: &["CODPROD"],
        obrigatorio: true,
        correcao: Correcao::Trim,
        mensagem_correcao: "Espaços extras removidos do código.",
        regras: &[Regra::Preenchido {
            mensagem: "Código do Produto está vazio.",
        }],
    },
    CampoSpec {
        nome: "ESTOQUE",
        apelidos: &["ESTOQUE"],
        obrigatorio: true,
        correcao: Correcao::Quantidade,
        mensagem_correcao: "Formato numérico corrigido.",
        regras: &[Regra::Preenchido { mensagem: "" }, Regra::NumeroNaoNegativo],
    },
    CampoSpec {
        nome: "ESTMAX",
        apelidos: &["ESTMAX"],
        obrigatorio: true,
        correcao: Correcao::Quantidade,
        mensagem_correcao: "Formato numérico corrigido.",
        regras: &[Regra::Preenchido { mensagem: "" }, Regra::NumeroNaoNegativo],
    },
    CampoSpec {
        nome: "ESTMIN",
        apelidos: &["ESTMIN"],
        obrigatorio: true,
        correcao: Correcao::Quantidade,
        mensagem_correcao: "Formato numérico corrigido.",
        regras: &[Regra::Preenchido { mensagem: "" }, Regra::NumeroNaoNegativo],
    },
    CampoSpec {
        nome: "ATIVO",
        apelidos: &["ATIVO"],
        obrigatorio: true,
        correcao: Correcao::AtivoEstoque,
        mensagem_correcao: "Status padronizado para 'S' ou 'N'.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (Ativo) está vazio.",
            },
            Regra::Dominio {
                valores: &["S", "N"],
                mensagem: "Valor inválido. Esperado 'S' ou 'N'.",
            },
        ],
    },
    CampoSpec {
        nome: "TIPO",
        apelidos: &["TIPO"],
        obrigatorio: true,
        correcao: Correcao::TipoEstoque,
        mensagem_correcao: "Tipo de estoque padronizado.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (Tipo) está vazio.",
            },
            Regra::Dominio {
                valores: &["P", "T"],
                mensagem: "Valor inválido. Esperado 'P' (Próprio) ou 'T' (Terceiro).",
            },
        ],
    },
];

pub static ESPEC: EspecEntidade = EspecEntidade {
    nome: "estoque",
    campos: CAMPOS,
    validar_linha,
    conferir_contexto,
};

fn validar_linha(linha: &Linha, contexto: &Contexto, relator: &mut Relator) {
    // Existência cruzada: código presente precisa constar no mestre.
    let codigo = linha.valor("CODPROD").trim();
    if !codigo.is_empty() {
        if let Some(produtos) = contexto.produtos {
            if !produtos.contains(codigo) {
                relator.erro(
                    "CODPROD",
                    linha.original("CODPROD"),
                    "Código do Produto não encontrado no Arquivo Mestre de Produtos.",
                );
            }
        }
    }

    // Coerência mínimo/máximo, só quando os dois interpretam como número.
    let minimo = interpretar_numero(linha.valor("ESTMIN"));
    let maximo = interpretar_numero(linha.valor("ESTMAX"));
    if let (Some(minimo), Some(maximo)) = (minimo, maximo) {
        if minimo > maximo {
            relator.erro(
                "ESTMIN",
                linha.original("ESTMIN"),
                format!(
                    "Estoque Mínimo ({}) não pode ser maior que Estoque Máximo ({}).",
                    minimo, maximo
                ),
            );
        }
    }
}

fn conferir_contexto(contexto: &Contexto) -> Option<RegistroErro> {
    match contexto.produtos {
        Some(_) => None,
        None => Some(RegistroErro::de_arquivo(
            "Mestre",
            "mestre_produtos.csv",
            "Arquivo Mestre de Produtos não encontrado ou incompleto (Verifique o cabeçalho 'CODPROD').",
        )),
    }
}

/// Registro de nível de sistema para quando o arquivo mestre de produtos não
/// pôde ser carregado; usado por quem orquestra a rodada.
pub fn erro_mestre_indisponivel(caminho: &Path) -> RegistroErro {
    RegistroErro::de_arquivo(
        "Mestre",
        &caminho.display().to_string(),
        "Arquivo Mestre de Produtos não encontrado ou incompleto (Verifique o cabeçalho 'CODPROD').",
    )
}
