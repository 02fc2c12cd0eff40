mod common;

use common::{correcoes, pendencias};
use validador_lib::test_utils::{csv_de, produtos_de_teste};
use validador_lib::validar_estoque;

const COLUNAS: &[&str] = &["CODPROD", "ESTOQUE", "ESTMAX", "ESTMIN", "ATIVO", "TIPO"];

#[test]
fn test_estoque_valido_sem_registros() {
    let linha = &["1001", "50", "100", "10", "S", "P"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    assert!(resultado.tabela.is_some());
    assert!(resultado.erros.is_empty(), "erros: {:?}", resultado.erros);
}

#[test]
fn test_codigo_ausente_do_mestre() {
    // Cenário de referência cruzada: código fora do mestre gera exatamente um
    // registro; os demais campos válidos não geram nada.
    let linha = &["999999", "50", "100", "10", "S", "P"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    assert_eq!(registros.len(), 1, "registros: {:?}", registros);
    assert_eq!(registros[0].coluna, "CODPROD");
    assert_eq!(registros[0].valor_encontrado, "999999");
    assert!(registros[0].erro.contains("não encontrado no Arquivo Mestre"));
}

#[test]
fn test_correcoes_automaticas_de_estoque() {
    let linha = &[" 1001 ", "1.000,00", "2.500,5", "10", "ativo", "próprio"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    assert!(
        pendencias(&resultado.erros).is_empty(),
        "erros: {:?}",
        resultado.erros
    );

    let registros = correcoes(&resultado.erros);
    assert_eq!(registros.len(), 5, "registros: {:?}", registros);

    let tabela = resultado.tabela.unwrap();
    assert_eq!(tabela.valor(0, "CODPROD"), "1001");
    assert_eq!(tabela.valor(0, "ESTOQUE"), "1000.00");
    assert_eq!(tabela.valor(0, "ESTMAX"), "2500.5");
    assert_eq!(tabela.valor(0, "ATIVO"), "S");
    assert_eq!(tabela.valor(0, "TIPO"), "P");

    // Mensagens fixas por transformação.
    assert!(
        registros
            .iter()
            .any(|registro| registro.coluna == "CODPROD"
                && registro.erro == "Espaços extras removidos do código.")
    );
    assert!(
        registros
            .iter()
            .any(|registro| registro.coluna == "TIPO"
                && registro.erro == "Tipo de estoque padronizado.")
    );
    assert!(
        registros
            .iter()
            .any(|registro| registro.coluna == "ATIVO"
                && registro.erro == "Status padronizado para 'S' ou 'N'.")
    );
}

#[test]
fn test_minimo_maior_que_maximo() {
    let linha = &["1001", "50", "10", "100", "S", "P"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    assert_eq!(registros.len(), 1);
    assert_eq!(registros[0].coluna, "ESTMIN");
    assert!(registros[0].erro.contains("Estoque Mínimo"));
    assert!(registros[0].erro.contains("100"));
    assert!(registros[0].erro.contains("10"));
}

#[test]
fn test_quantidade_negativa_e_ilegivel() {
    let linhas: &[&[&str]] = &[
        &["1001", "-5", "100", "10", "S", "P"],
        &["1002", "abc", "100", "10", "S", "P"],
    ];
    let bytes = csv_de(COLUNAS, linhas);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    assert_eq!(registros.len(), 2, "registros: {:?}", registros);
    assert!(
        registros
            .iter()
            .any(|registro| registro.linha == 2
                && registro.erro == "ESTOQUE não pode ser negativo.")
    );
    assert!(
        registros
            .iter()
            .any(|registro| registro.linha == 3
                && registro.erro == "ESTOQUE não é um número válido.")
    );
}

#[test]
fn test_campos_vazios() {
    let linha = &["", "", "100", "10", "", "P"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    let mensagens: Vec<&str> = registros.iter().map(|r| r.erro.as_str()).collect();
    assert!(mensagens.contains(&"Código do Produto está vazio."));
    assert!(mensagens.contains(&"ESTOQUE está vazio."));
    assert!(mensagens.contains(&"Campo obrigatório (Ativo) está vazio."));
    assert_eq!(registros.len(), 3, "registros: {:?}", registros);
}

#[test]
fn test_tipo_fora_do_dominio() {
    let linha = &["1001", "50", "100", "10", "S", "X"];
    let bytes = csv_de(COLUNAS, &[linha.as_slice()]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    assert_eq!(registros.len(), 1);
    assert!(registros[0].erro.contains("'P' (Próprio) ou 'T' (Terceiro)"));
}

#[test]
fn test_coluna_critica_ausente() {
    let colunas = ["CODPROD", "ESTOQUE", "ESTMAX", "ESTMIN", "ATIVO"];
    let bytes = csv_de(&colunas, &[&["1001", "50", "100", "10", "S"]]);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    assert!(resultado.tabela.is_none());
    assert_eq!(resultado.erros.len(), 1);
    assert_eq!(resultado.erros[0].coluna, "TIPO");
    assert_eq!(resultado.erros[0].linha, 0);
}

#[test]
fn test_registros_duplicados_sao_unificados() {
    // Duas linhas idênticas com o mesmo código inexistente geram registros
    // distintos (linhas diferentes); a mesma linha nunca gera dois registros
    // iguais.
    let linhas: &[&[&str]] = &[
        &["999999", "50", "100", "10", "S", "P"],
        &["999999", "50", "100", "10", "S", "P"],
    ];
    let bytes = csv_de(COLUNAS, linhas);
    let resultado = validar_estoque(&bytes, &produtos_de_teste());

    let registros = pendencias(&resultado.erros);
    assert_eq!(registros.len(), 2);
    assert_ne!(registros[0].linha, registros[1].linha);
}
