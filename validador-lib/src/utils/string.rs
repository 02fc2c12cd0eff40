/// Remove Portuguese diacritics, mapping each accented letter to its ASCII base.
/// Master-file keys and uploaded values disagree on accents often enough that
/// every lookup key must pass through here first.
pub fn remover_acentos(valor: &str) -> String {
    valor
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            _ => c,
        })
        .collect()
}

/// Normalized lookup key: accents stripped, upper-cased, trimmed.
pub fn chave_normalizada(valor: &str) -> String {
    remover_acentos(valor.trim()).to_uppercase()
}

/// Collapse runs of whitespace and control characters into single spaces.
pub fn normalizar_espacos(valor: &str) -> String {
    valor
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
