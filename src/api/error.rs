//! Tipos de erro para o cliente da API de gerações.
//!
//! Define [`ApiError`] com variantes para erros reportados pelo backend,
//! registros inexistentes e falhas na camada de rede. Usa `thiserror` para
//! derivar `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com o serviço de gerações.
///
/// As variantes cobrem os três cenários de falha do transporte:
/// - [`Api`](ApiError::Api) — o backend respondeu com status não-2xx
/// - [`NotFound`](ApiError::NotFound) — HTTP 404 ao consultar um job
/// - [`Network`](ApiError::Network) — falha na camada de rede (DNS,
///   conexão recusada, timeout), encapsulando o erro do `reqwest`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Erro retornado pela API. `detail` vem do corpo `{"detail": ...}`;
    /// corpos não interpretáveis viram a mensagem genérica
    /// `"An error occurred"`.
    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: String },

    /// O backend não conhece o job consultado.
    #[error("generation not found")]
    NotFound,

    /// Falha de rede subjacente.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
