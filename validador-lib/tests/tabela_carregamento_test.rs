use std::io::Write;

use tempfile::NamedTempFile;
use validador_lib::Tabela;
use validador_lib::tabela::ErroLeitura;

#[test]
fn test_separador_ponto_e_virgula() {
    let tabela = Tabela::carregar_bytes("NOME;CODIGO\nAna;1\nBia;2\n".as_bytes()).unwrap();
    assert_eq!(tabela.colunas, vec!["NOME", "CODIGO"]);
    assert_eq!(tabela.linhas.len(), 2);
}

#[test]
fn test_separador_virgula() {
    let tabela = Tabela::carregar_bytes("NOME,CODIGO\nAna,1\n".as_bytes()).unwrap();
    assert_eq!(tabela.colunas, vec!["NOME", "CODIGO"]);
    assert_eq!(tabela.valor(0, "CODIGO"), "1");
}

#[test]
fn test_codificacao_latin1() {
    // "DESCRIÇÃO" e "Pêssego" em latin-1; bytes inválidos em UTF-8 forçam o
    // fallback de codificação.
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"DESCRI\xC7\xC3O;CODIGO\n");
    bytes.extend_from_slice(b"P\xEAssego;77\n");
    let tabela = Tabela::carregar_bytes(&bytes).unwrap();
    assert_eq!(tabela.colunas[0], "DESCRIÇÃO");
    assert_eq!(tabela.valor(0, "CODIGO"), "77");
    assert_eq!(tabela.linhas[0][0], "Pêssego");
}

#[test]
fn test_codificacao_utf8_preservada() {
    let tabela = Tabela::carregar_bytes("DESCRIÇÃO;CODIGO\nPêssego;77\n".as_bytes()).unwrap();
    assert_eq!(tabela.colunas[0], "DESCRIÇÃO");
    assert_eq!(tabela.linhas[0][0], "Pêssego");
}

#[test]
fn test_celulas_sempre_texto() {
    // Zeros à esquerda não podem ser perdidos por inferência numérica.
    let tabela = Tabela::carregar_bytes("CODIGO;CEP\n007;01310100\n".as_bytes()).unwrap();
    assert_eq!(tabela.valor(0, "CODIGO"), "007");
    assert_eq!(tabela.valor(0, "CEP"), "01310100");
}

#[test]
fn test_linhas_malformadas_sao_descartadas() {
    let tabela =
        Tabela::carregar_bytes("A;B\n1;2\ncampo_sobrando;x;y\nsozinho\n3;4\n".as_bytes()).unwrap();
    assert_eq!(tabela.linhas.len(), 2);
    assert_eq!(tabela.valor(1, "A"), "3");
}

#[test]
fn test_arquivo_ilegivel_gera_falha() {
    // Bytes binários sem nenhum delimitador: nenhuma combinação produz mais
    // de uma coluna.
    let bytes: Vec<u8> = vec![0x00, 0x01, 0x02, 0xFF, 0xFE, 0x80, 0x81];
    let resultado = Tabela::carregar_bytes(&bytes);
    assert!(matches!(
        resultado,
        Err(ErroLeitura::FormatoDesconhecido { .. })
    ));
}

#[test]
fn test_coluna_unica_sem_delimitador_embutido_falha() {
    let resultado = Tabela::carregar_bytes("COLUNA\nvalor\n".as_bytes());
    assert!(resultado.is_err());
}

#[test]
fn test_releitura_forcada_por_delimitador_embutido() {
    // Arquivo separado por tabulação: os separadores candidatos colapsam
    // tudo numa coluna cujo nome carrega o delimitador real.
    let tabela = Tabela::carregar_bytes("NOME\tCODIGO\nAna\t1\n".as_bytes()).unwrap();
    assert_eq!(tabela.colunas, vec!["NOME", "CODIGO"]);
    assert_eq!(tabela.valor(0, "CODIGO"), "1");
}

#[test]
fn test_carregar_de_arquivo() {
    let mut arquivo = NamedTempFile::new().unwrap();
    write!(arquivo, "CODPROD;ESTOQUE\n1001;5\n").unwrap();
    let tabela = Tabela::carregar_arquivo(arquivo.path()).unwrap();
    assert_eq!(tabela.colunas, vec!["CODPROD", "ESTOQUE"]);
}

#[test]
fn test_round_trip_para_csv() {
    let original = "NOME;CODIGO\nAna;001\nBia;002\n";
    let tabela = Tabela::carregar_bytes(original.as_bytes()).unwrap();
    let serializado = tabela.para_csv().unwrap();
    let relida = Tabela::carregar_bytes(serializado.as_bytes()).unwrap();
    assert_eq!(relida.colunas, tabela.colunas);
    assert_eq!(relida.linhas, tabela.linhas);
}

#[test]
fn test_bom_na_primeira_coluna() {
    let tabela = Tabela::carregar_bytes("\u{feff}NOME;CODIGO\nAna;1\n".as_bytes()).unwrap();
    assert_eq!(tabela.colunas[0], "NOME");
}
