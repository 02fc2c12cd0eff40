//! Cadastro de produtos: especificação de campos e regras cruzadas.

use crate::correcao::Correcao;
use crate::pipeline::{
    CampoSpec, Contexto, EspecEntidade, Linha, Regra, Relator, interpretar_data,
};
use crate::relatorio::RegistroErro;

const MSG_SIM_NAO: &str = "Valor inválido. Esperado 'S' ou 'N'.";
const MSG_DATA: &str = "Data inválida. Formato esperado: DD/MM/AAAA.";

const DOMINIO_UNIDADE: &[&str] = &[
    "CM", "M", "MM", "KG", "G", "L", "ML", "UN", "PC", "CX", "FD", "MT", "M2", "M3",
];

const DOMINIO_USOPROD: &[&str] = &[
    "1", "2", "4", "B", "C", "D", "E", "F", "I", "M", "O", "P", "R", "T", "V",
];

static CAMPOS: &[CampoSpec] = &[
    CampoSpec {
        nome: "AD_IDEXTERNO",
        apelidos: &["AD_IDEXTERNO", "COD_SIST_ANTERIOR", "ID_LEGADO", "ID_ORIGEM"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório está vazio.",
        }],
    },
    CampoSpec {
        nome: "DESCRPROD",
        apelidos: &["DESCRPROD"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório (Descrição do Produto) está vazio.",
        }],
    },
    CampoSpec {
        nome: "NCM",
        apelidos: &["NCM"],
        obrigatorio: true,
        correcao: Correcao::Ncm,
        mensagem_correcao: "Pontuação removida do NCM.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (NCM) está vazio.",
            },
            Regra::DigitosExatos {
                tamanho: 8,
                mensagem: "Formato inválido. NCM deve ter 8 dígitos numéricos.",
            },
        ],
    },
    CampoSpec {
        nome: "MARCA",
        apelidos: &["MARCA"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório (Marca) está vazio.",
        }],
    },
    CampoSpec {
        nome: "REFERENCIA",
        apelidos: &["REFERENCIA"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório (Referência) está vazio.",
        }],
    },
    CampoSpec {
        nome: "UNIDADE",
        apelidos: &["UNIDADE", "UND", "UNID_MEDIDA", "CODVOL", "UN"],
        obrigatorio: true,
        correcao: Correcao::Unidade,
        mensagem_correcao: "Unidade de medida padronizada.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (Unidade) está vazio.",
            },
            Regra::Dominio {
                valores: DOMINIO_UNIDADE,
                mensagem: "Unidade de medida inválida. Esperada uma de: CM, M, MM, KG, G, L, ML, UN, PC, CX, FD, MT, M2, M3.",
            },
        ],
    },
    CampoSpec {
        nome: "PRECO_VENDA",
        apelidos: &["PRECO_VENDA"],
        obrigatorio: false,
        correcao: Correcao::Monetario,
        mensagem_correcao: "Formato numérico corrigido.",
        regras: &[Regra::NumeroNaoNegativo],
    },
    CampoSpec {
        nome: "PRECO_CUSTO",
        apelidos: &["PRECO_CUSTO"],
        obrigatorio: false,
        correcao: Correcao::Monetario,
        mensagem_correcao: "Formato numérico corrigido.",
        regras: &[Regra::NumeroNaoNegativo],
    },
    CampoSpec {
        nome: "USOPROD",
        apelidos: &["USOPROD"],
        obrigatorio: false,
        correcao: Correcao::CaixaAlta,
        mensagem_correcao: "Uso do produto padronizado.",
        regras: &[Regra::Dominio {
            valores: DOMINIO_USOPROD,
            mensagem: "Uso do produto inválido. Valores permitidos: 1, 2, 4, B, C, D, E, F, I, M, O, P, R, T, V.",
        }],
    },
    CampoSpec {
        nome: "TEMIPICOMPRA",
        apelidos: &["TEMIPICOMPRA"],
        obrigatorio: false,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[Regra::Dominio {
            valores: &["S", "N"],
            mensagem: MSG_SIM_NAO,
        }],
    },
    CampoSpec {
        nome: "TEMIPIVENDA",
        apelidos: &["TEMIPIVENDA"],
        obrigatorio: false,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[Regra::Dominio {
            valores: &["S", "N"],
            mensagem: MSG_SIM_NAO,
        }],
    },
    CampoSpec {
        nome: "USACODBARRASQTD",
        apelidos: &["USACODBARRASQTD"],
        obrigatorio: false,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[Regra::Dominio {
            valores: &["S", "N"],
            mensagem: MSG_SIM_NAO,
        }],
    },
    CampoSpec {
        nome: "ATIVO",
        apelidos: &["ATIVO"],
        obrigatorio: false,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[Regra::Dominio {
            valores: &["S", "N"],
            mensagem: MSG_SIM_NAO,
        }],
    },
    CampoSpec {
        nome: "DTFABRICACAO",
        apelidos: &["DTFABRICACAO", "DATA_FABRICACAO", "FABRICACAO"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Data { mensagem: MSG_DATA }],
    },
    CampoSpec {
        nome: "DTVALIDADE",
        apelidos: &["DTVALIDADE", "DATA_VALIDADE", "VALIDADE"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Data { mensagem: MSG_DATA }],
    },
];

pub static ESPEC: EspecEntidade = EspecEntidade {
    nome: "produto",
    campos: CAMPOS,
    validar_linha,
    conferir_contexto,
};

fn validar_linha(linha: &Linha, _contexto: &Contexto, relator: &mut Relator) {
    // Quando fabricação e validade estão presentes e interpretáveis, a
    // validade não pode anteceder a fabricação. Datas ilegíveis já foram
    // apontadas pela regra de campo.
    let fabricacao = interpretar_data(linha.valor("DTFABRICACAO"));
    let validade = interpretar_data(linha.valor("DTVALIDADE"));
    if let (Some(fabricacao), Some(validade)) = (fabricacao, validade) {
        if validade < fabricacao {
            relator.erro(
                "DTVALIDADE",
                linha.original("DTVALIDADE"),
                format!(
                    "Data de validade ({}) não pode ser anterior à data de fabricação ({}).",
                    linha.valor("DTVALIDADE").trim(),
                    linha.valor("DTFABRICACAO").trim()
                ),
            );
        }
    }
}

fn conferir_contexto(_contexto: &Contexto) -> Option<RegistroErro> {
    // Produtos não dependem de tabelas auxiliares.
    None
}
