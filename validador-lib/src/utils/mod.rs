mod filesystem;
mod string;

pub use filesystem::registrar_erro_log;
pub use string::{chave_normalizada, normalizar_espacos, remover_acentos};
