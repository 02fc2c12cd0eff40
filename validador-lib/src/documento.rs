//! Validação de dígitos verificadores de CPF e CNPJ.
//!
//! Funções puras sobre strings já limpas (somente dígitos). A limpeza de
//! pontuação fica em [`limpar_documento`]; a decisão de qual algoritmo aplicar
//! (11 ou 14 dígitos) é do validador de parceiro, condicionada ao tipo de
//! pessoa.

/// Dígito verificador de CPF sobre uma string parcial (9 ou 10 dígitos).
///
/// Pesos decrescentes a partir de `len + 1`; soma reduzida mod 11, resto
/// menor que 2 vira 0, senão 11 menos o resto.
fn digito_cpf(parcial: &str) -> u32 {
    let mut fator = parcial.len() as u32 + 1;
    let mut soma = 0u32;
    for digito in parcial.chars() {
        soma += digito.to_digit(10).unwrap_or(0) * fator;
        fator -= 1;
    }
    let resto = soma % 11;
    if resto < 2 { 0 } else { 11 - resto }
}

/// Dígito verificador de CNPJ sobre uma string parcial (12 ou 13 dígitos).
///
/// Ciclo fixo de pesos [5,4,3,2,9,8,7,6,5,4,3,2]; para o segundo dígito a
/// parcial tem 13 posições e o peso 6 entra na frente.
fn digito_cnpj(parcial: &str) -> u32 {
    let mut fatores: Vec<u32> = vec![5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    if parcial.len() == 13 {
        fatores.insert(0, 6);
    }
    let soma: u32 = parcial
        .chars()
        .zip(fatores.iter())
        .map(|(digito, fator)| digito.to_digit(10).unwrap_or(0) * fator)
        .sum();
    let resto = soma % 11;
    if resto < 2 { 0 } else { 11 - resto }
}

fn todos_iguais(documento: &str) -> bool {
    let mut chars = documento.chars();
    match chars.next() {
        Some(primeiro) => chars.all(|c| c == primeiro),
        None => false,
    }
}

/// Valida um CPF já limpo (11 dígitos, sem pontuação).
///
/// Rejeita strings não numéricas, de tamanho errado ou com todos os dígitos
/// iguais, antes de conferir os dois dígitos verificadores.
pub fn validar_cpf(cpf: &str) -> bool {
    if cpf.len() != 11 || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if todos_iguais(cpf) {
        return false;
    }
    let digito1 = digito_cpf(&cpf[..9]);
    let parcial = format!("{}{}", &cpf[..9], digito1);
    let digito2 = digito_cpf(&parcial);
    cpf == format!("{}{}{}", &cpf[..9], digito1, digito2)
}

/// Valida um CNPJ já limpo (14 dígitos, sem pontuação).
pub fn validar_cnpj(cnpj: &str) -> bool {
    if cnpj.len() != 14 || !cnpj.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if todos_iguais(cnpj) {
        return false;
    }
    let digito1 = digito_cnpj(&cnpj[..12]);
    let parcial = format!("{}{}", &cnpj[..12], digito1);
    let digito2 = digito_cnpj(&parcial);
    cnpj == format!("{}{}{}", &cnpj[..12], digito1, digito2)
}

/// Remove a pontuação usual de CPF/CNPJ (ponto, barra e hífen) e apara espaços.
pub fn limpar_documento(documento: &str) -> String {
    documento
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Gera os dois dígitos verificadores de CPF para um prefixo de 9 dígitos.
///
/// Usado pelos testes de propriedade; mantido aqui porque é a definição de
/// referência do algoritmo.
pub fn digitos_cpf(prefixo: &str) -> (u32, u32) {
    let digito1 = digito_cpf(prefixo);
    let parcial = format!("{}{}", prefixo, digito1);
    (digito1, digito_cpf(&parcial))
}

/// Gera os dois dígitos verificadores de CNPJ para um prefixo de 12 dígitos.
pub fn digitos_cnpj(prefixo: &str) -> (u32, u32) {
    let digito1 = digito_cnpj(prefixo);
    let parcial = format!("{}{}", prefixo, digito1);
    (digito1, digito_cnpj(&parcial))
}
