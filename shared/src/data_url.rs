use base64::engine::general_purpose::STANDARD;
use base64::Engine;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DataUrlError {
    #[error("not a data URL: no comma separator")]
    MissingSeparator,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Builds a `data:<mime>;base64,<payload>` string from raw bytes. This is the
/// same representation the browser's FileReader produces, so the endpoint
/// decodes both alike.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decodes the payload of a data URL back into raw bytes. Everything up to
/// and including the first comma is treated as the header; the header's mime
/// type is not inspected.
pub fn decode(data_url: &str) -> Result<Vec<u8>, DataUrlError> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;
    Ok(STANDARD.decode(payload)?)
}
