use validador_lib::cabecalho::{mapear_colunas, normalizar_cabecalho, resolver_apelido};
use validador_lib::entidades::{estoque, parceiro, produto};
use validador_lib::pipeline::EspecEntidade;
use validador_lib::test_utils::tabela_de;

#[test]
fn test_normalizacao_remove_pontuacao_e_padroniza_caixa() {
    assert_eq!(normalizar_cabecalho(" cgc_cpf "), "CGC_CPF");
    assert_eq!(normalizar_cabecalho("CNPJ/CPF"), "CNPJCPF");
    assert_eq!(normalizar_cabecalho("cnpj cpf"), "CNPJ_CPF");
    assert_eq!(normalizar_cabecalho("Preço!Venda"), "PREOVENDA");
}

/// Enumera todas as grafias declaradas em todas as entidades: cada uma deve
/// resolver para o próprio campo canônico.
#[test]
fn test_toda_grafia_declarada_resolve_para_o_canonico() {
    for espec in [&parceiro::ESPEC, &produto::ESPEC, &estoque::ESPEC] {
        let pares: Vec<(&'static str, &'static [&'static str])> = espec
            .campos
            .iter()
            .map(|campo| (campo.nome, campo.apelidos))
            .collect();
        for campo in espec.campos {
            for grafia in campo.apelidos {
                let normalizada = normalizar_cabecalho(grafia);
                assert_eq!(
                    resolver_apelido(&normalizada, &pares),
                    Some(campo.nome),
                    "grafia '{}' da entidade '{}' deveria resolver para '{}'",
                    grafia,
                    espec.nome,
                    campo.nome
                );
            }
        }
    }
}

/// Nenhuma grafia pode resolver para dois campos canônicos diferentes dentro
/// da mesma entidade.
#[test]
fn test_grafias_sem_ambiguidade() {
    let especs: [&EspecEntidade; 3] = [&parceiro::ESPEC, &produto::ESPEC, &estoque::ESPEC];
    for espec in especs {
        let mut vistas: Vec<(String, &'static str)> = Vec::new();
        for campo in espec.campos {
            for grafia in campo.apelidos {
                let normalizada = normalizar_cabecalho(grafia).replace('_', "");
                if let Some((_, dono)) = vistas.iter().find(|(g, _)| *g == normalizada) {
                    assert_eq!(
                        *dono, campo.nome,
                        "grafia '{}' ambígua na entidade '{}'",
                        grafia, espec.nome
                    );
                }
                vistas.push((normalizada, campo.nome));
            }
        }
    }
}

const PARES_DOCUMENTO: &[(&str, &[&str])] =
    &[("CGC_CPF", &["CGC_CPF", "CNPJ_CPF", "DOCUMENTO"])];

#[test]
fn test_cnpj_cpf_renomeado_para_cgc_cpf() {
    let mut tabela = tabela_de(&["CNPJ_CPF"], &[&["11144477735"]]);
    mapear_colunas(&mut tabela, PARES_DOCUMENTO);
    assert_eq!(tabela.colunas, vec!["CGC_CPF"]);
}

#[test]
fn test_cnpj_cpf_com_pontuacao_renomeado() {
    // "CNPJ/CPF" perde a barra na normalização e ainda assim casa com a
    // grafia "CNPJ_CPF".
    let mut tabela = tabela_de(&["CNPJ/CPF"], &[&["11144477735"]]);
    mapear_colunas(&mut tabela, PARES_DOCUMENTO);
    assert_eq!(tabela.colunas, vec!["CGC_CPF"]);
}

#[test]
fn test_primeira_grafia_presente_vence() {
    const PARES: &[(&str, &[&str])] = &[(
        "AD_IDEXTERNO",
        &["AD_IDEXTERNO", "COD_SIST_ANTERIOR", "ID_LEGADO"],
    )];
    let mut tabela = tabela_de(&["ID_LEGADO", "COD_SIST_ANTERIOR"], &[]);
    mapear_colunas(&mut tabela, PARES);
    // COD_SIST_ANTERIOR vem antes na lista; ID_LEGADO fica como está.
    assert_eq!(tabela.colunas, vec!["ID_LEGADO", "AD_IDEXTERNO"]);
}

#[test]
fn test_cabecalho_em_caixa_baixa_mapeado() {
    const PARES: &[(&str, &[&str])] = &[("NOMEPARC", &["NOMEPARC", "NOME"])];
    let mut tabela = tabela_de(&["nome"], &[]);
    mapear_colunas(&mut tabela, PARES);
    assert_eq!(tabela.colunas, vec!["NOMEPARC"]);
}
