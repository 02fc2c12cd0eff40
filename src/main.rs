// reset; cargo run -- --entidade parceiro --arquivo ./dados/parceiros.csv --dados-mestre ./mestres
// reset; cargo run -- --entidade estoque --arquivo ./dados/estoque.csv --mestre-produtos ./mestres/mestre_produtos.csv

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use validador_lib::entidades::estoque;
use validador_lib::relatorio::{escrever_relatorio_csv, formatar_relatorio};
use validador_lib::utils::registrar_erro_log;
use validador_lib::{
    ARQUIVO_LOG_ERROS, DadosMestre, ResultadoValidacao, carregar_mestre, validar_estoque,
    validar_parceiros, validar_produtos,
};

#[derive(Clone, Copy, ValueEnum)]
enum Entidade {
    Parceiro,
    Produto,
    Estoque,
}

#[derive(Parser)]
#[command(name = "validador-erp")]
#[command(about = "Valida e corrige exports de ERP (parceiros, produtos, estoque)")]
#[command(version)]
struct Args {
    /// Caminho do arquivo delimitado a validar
    #[arg(short, long)]
    arquivo: PathBuf,

    /// Entidade do arquivo
    #[arg(short, long)]
    entidade: Entidade,

    /// Diretório com os arquivos mestres de Cidade/UF (entidade parceiro)
    #[arg(long, default_value = ".")]
    dados_mestre: PathBuf,

    /// Arquivo mestre de produtos (entidade estoque)
    #[arg(long, default_value = "mestre_produtos.csv")]
    mestre_produtos: PathBuf,

    /// Caminho do relatório de erros gerado
    #[arg(long, default_value = "erros.csv")]
    relatorio: PathBuf,

    /// Caminho opcional para gravar a tabela corrigida
    #[arg(long)]
    corrigido: Option<PathBuf>,

    /// Grava o relatório também em JSON, ao lado do CSV
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let bytes = std::fs::read(&args.arquivo)
        .with_context(|| format!("falha ao ler '{}'", args.arquivo.display()))?;

    let resultado = match args.entidade {
        Entidade::Parceiro => {
            let dados_mestre = DadosMestre::carregar(&args.dados_mestre);
            validar_parceiros(&bytes, &dados_mestre)
        }
        Entidade::Produto => validar_produtos(&bytes),
        Entidade::Estoque => {
            match carregar_mestre(&args.mestre_produtos, estoque::COLUNA_MESTRE_PRODUTOS) {
                Ok(produtos) => validar_estoque(&bytes, &produtos),
                Err(erro) => {
                    tracing::error!(erro = %erro, "arquivo mestre de produtos indisponível");
                    ResultadoValidacao::falha_de_arquivo(estoque::erro_mestre_indisponivel(
                        &args.mestre_produtos,
                    ))
                }
            }
        }
    };

    if !resultado.erros.is_empty() {
        escrever_relatorio_csv(&resultado.erros, &args.relatorio)
            .with_context(|| format!("falha ao gravar '{}'", args.relatorio.display()))?;
        if args.json {
            let caminho_json = args.relatorio.with_extension("json");
            let conteudo = serde_json::to_string_pretty(&resultado.erros)?;
            std::fs::write(&caminho_json, conteudo)
                .with_context(|| format!("falha ao gravar '{}'", caminho_json.display()))?;
        }
        registrar_erro_log(
            "Relatório de Validação",
            &formatar_relatorio(&resultado.erros),
        );
    }

    let tabela = match resultado.tabela {
        Some(ref tabela) => tabela,
        None => {
            // Falha de nível de arquivo: nada chegou a ser validado.
            let diagnostico = resultado
                .erros
                .first()
                .map(|registro| registro.erro.clone())
                .unwrap_or_default();
            eprintln!("❌ Validação não pôde ser iniciada: {diagnostico}");
            eprintln!("❌ Consulte {} para detalhes.", ARQUIVO_LOG_ERROS);
            std::process::exit(2);
        }
    };

    if let Some(saida) = &args.corrigido {
        tabela
            .escrever_csv(saida)
            .with_context(|| format!("falha ao gravar '{}'", saida.display()))?;
        println!("✅ Tabela corrigida gravada em '{}'", saida.display());
    }

    let pendencias = resultado.pendencias().count();
    let correcoes = resultado.erros.len() - pendencias;
    if correcoes > 0 {
        println!("{} correções automáticas aplicadas.", correcoes);
    }

    if pendencias == 0 {
        println!("✅ Validação concluída!");
    } else {
        println!("❌ Validação encontrou {} pendências", pendencias);
        eprintln!(
            "❌ Consulte '{}' e {} para detalhes.",
            args.relatorio.display(),
            ARQUIVO_LOG_ERROS
        );
        std::process::exit(1);
    }

    Ok(())
}
