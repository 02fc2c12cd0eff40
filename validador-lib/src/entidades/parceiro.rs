//! Cadastro de parceiros: especificação de campos e regras cruzadas.

use crate::correcao::Correcao;
use crate::documento::{validar_cnpj, validar_cpf};
use crate::pipeline::{CampoSpec, Contexto, EspecEntidade, Linha, Regra, Relator};
use crate::relatorio::RegistroErro;

const MSG_SIM_NAO: &str = "Valor inválido. Esperado 'S' ou 'N'.";

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
        nome: "TIPPESSOA",
        apelidos: &["TIPPESSOA", "TIPO_PESSOA", "TIPO"],
        obrigatorio: true,
        correcao: Correcao::CaixaAlta,
        mensagem_correcao: "Tipo de pessoa padronizado.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (Tipo de Pessoa) está vazio.",
            },
            Regra::Dominio {
                valores: &["F", "J"],
                mensagem: "Valor inválido. Permitido apenas 'F' ou 'J'.",
            },
        ],
    },
    CampoSpec {
        nome: "CGC_CPF",
        apelidos: &[
            "CGC_CPF",
            "CNPJ_CPF",
            "DOCUMENTO",
            "DOC",
            "CPF_CNPJ",
            "CNPJ_E_CPF",
        ],
        obrigatorio: true,
        correcao: Correcao::Documento,
        mensagem_correcao: "Pontuação removida do documento.",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório (CNPJ/CPF) está vazio.",
        }],
    },
    CampoSpec {
        nome: "NOMEPARC",
        apelidos: &["NOMEPARC", "NOME_FANTASIA", "NOME"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[Regra::Preenchido {
            mensagem: "Campo obrigatório (Nome do Parceiro) está vazio.",
        }],
    },
    CampoSpec {
        nome: "RAZAOSOCIAL",
        apelidos: &["RAZAOSOCIAL", "RAZAO_SOCIAL"],
        obrigatorio: true,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        // A igualdade com NOMEPARC para pessoa física é regra cruzada.
        regras: &[],
    },
    CampoSpec {
        nome: "ATIVO",
        apelidos: &["ATIVO"],
        obrigatorio: true,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[
            Regra::Preenchido { mensagem: "" },
            Regra::Dominio {
                valores: &["S", "N"],
                mensagem: MSG_SIM_NAO,
            },
        ],
    },
    CampoSpec {
        nome: "CLIENTE",
        apelidos: &["CLIENTE"],
        obrigatorio: true,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[
            Regra::Preenchido { mensagem: "" },
            Regra::Dominio {
                valores: &["S", "N"],
                mensagem: MSG_SIM_NAO,
            },
        ],
    },
    CampoSpec {
        nome: "FORNECEDOR",
        apelidos: &["FORNECEDOR"],
        obrigatorio: true,
        correcao: Correcao::SimNao,
        mensagem_correcao: "Valor padronizado para 'S' ou 'N'.",
        regras: &[
            Regra::Preenchido { mensagem: "" },
            Regra::Dominio {
                valores: &["S", "N"],
                mensagem: MSG_SIM_NAO,
            },
        ],
    },
    CampoSpec {
        nome: "CEP",
        apelidos: &["CEP"],
        obrigatorio: false,
        correcao: Correcao::SomenteDigitos,
        mensagem_correcao: "CEP padronizado para somente dígitos.",
        regras: &[
            Regra::Preenchido {
                mensagem: "Campo obrigatório (CEP) está vazio.",
            },
            Regra::DigitosExatos {
                tamanho: 8,
                mensagem: "Formato inválido. CEP deve ter 8 dígitos numéricos.",
            },
        ],
    },
    CampoSpec {
        nome: "CIDADE",
        apelidos: &["CIDADE", "NOMECID", "MUNICIPIO"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[],
    },
    CampoSpec {
        nome: "UF",
        apelidos: &["UF", "ESTADO", "SIGLA_UF"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[],
    },
    CampoSpec {
        nome: "TELEFONE",
        apelidos: &["TELEFONE"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[],
    },
    CampoSpec {
        nome: "EMAIL",
        apelidos: &["EMAIL"],
        obrigatorio: false,
        correcao: Correcao::Nenhuma,
        mensagem_correcao: "",
        regras: &[],
    },
];

pub static ESPEC: EspecEntidade = EspecEntidade {
    nome: "parceiro",
    campos: CAMPOS,
    validar_linha,
    conferir_contexto,
};

fn validar_linha(linha: &Linha, contexto: &Contexto, relator: &mut Relator) {
    let tipo = linha.valor("TIPPESSOA").trim();
    let documento = linha.valor("CGC_CPF").trim();

    // Validação condicional do documento: o algoritmo depende do tipo de
    // pessoa, e tamanho errado dispensa a conferência do dígito.
    if !documento.is_empty() {
        let digitos = documento.chars().count();
        match tipo {
            "F" => {
                if digitos != 11 {
                    relator.erro(
                        "CGC_CPF",
                        linha.original("CGC_CPF"),
                        format!(
                            "Tipo Pessoa 'F', mas documento tem {} dígitos (esperado 11).",
                            digitos
                        ),
                    );
                } else if !validar_cpf(documento) {
                    relator.erro(
                        "CGC_CPF",
                        linha.original("CGC_CPF"),
                        "Tipo Pessoa 'F', mas o CPF é inválido (dígito verificador não confere).",
                    );
                }
            }
            "J" => {
                if digitos != 14 {
                    relator.erro(
                        "CGC_CPF",
                        linha.original("CGC_CPF"),
                        format!(
                            "Tipo Pessoa 'J', mas documento tem {} dígitos (esperado 14).",
                            digitos
                        ),
                    );
                } else if !validar_cnpj(documento) {
                    relator.erro(
                        "CGC_CPF",
                        linha.original("CGC_CPF"),
                        "Tipo Pessoa 'J', mas o CNPJ é inválido (dígito verificador não confere).",
                    );
                }
            }
            _ => {}
        }
    }

    // Pessoa física: razão social idêntica ao nome do parceiro.
    if tipo == "F" && linha.valor("NOMEPARC").trim() != linha.valor("RAZAOSOCIAL").trim() {
        relator.erro(
            "RAZAOSOCIAL",
            linha.original("RAZAOSOCIAL"),
            "Para Pessoa Física, a Razão Social deve ser IDÊNTICA ao Nome do Parceiro.",
        );
    }

    // Consultas aos dados mestres: entrada vazia não é erro aqui (coberta
    // pelo preenchimento onde declarado); entrada sem correspondência é.
    if let Some(mestre) = contexto.dados_mestre {
        if linha.tem_coluna("CIDADE") {
            let cidade = linha.valor("CIDADE").trim();
            if !cidade.is_empty() && mestre.codigo_cidade(cidade).is_none() {
                relator.erro(
                    "CIDADE",
                    linha.original("CIDADE"),
                    "Cidade não encontrada no Arquivo Mestre de Cidades.",
                );
            }
        }
        if linha.tem_coluna("UF") {
            let uf = linha.valor("UF").trim();
            if !uf.is_empty() && mestre.codigo_uf(uf).is_none() {
                relator.erro(
                    "UF",
                    linha.original("UF"),
                    "UF não encontrada no Arquivo Mestre de Estados.",
                );
            }
        }
    }
}

fn conferir_contexto(contexto: &Contexto) -> Option<RegistroErro> {
    match contexto.dados_mestre {
        Some(mestre) if mestre.disponivel() => None,
        Some(mestre) => {
            let detalhe = if mestre.falhas.is_empty() {
                String::from("mapas de consulta vazios")
            } else {
                mestre.falhas.join("; ")
            };
            Some(RegistroErro::de_arquivo(
                "Mestre",
                "Cidades/UF",
                format!(
                    "Dados mestres de Cidades/Estados indisponíveis ou vazios. Detalhe: {}.",
                    detalhe
                ),
            ))
        }
        None => Some(RegistroErro::de_arquivo(
            "Mestre",
            "Cidades/UF",
            "Dados mestres de Cidades/Estados não foram carregados.",
        )),
    }
}
