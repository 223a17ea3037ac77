use crate::foundation::error::{QrShapeError, QrShapeResult};
use crate::matrix::bits::BitMatrix;

/// Error-correction strength requested from the encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EccLevel {
    /// ~7% recovery.
    Lowest,
    /// ~15% recovery.
    #[default]
    Medium,
    /// ~25% recovery.
    Quality,
    /// ~30% recovery.
    Highest,
}

impl EccLevel {
    pub fn parse(s: &str) -> QrShapeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest" | "low" | "l" => Ok(Self::Lowest),
            "medium" | "m" => Ok(Self::Medium),
            "quality" | "q" => Ok(Self::Quality),
            "highest" | "high" | "h" => Ok(Self::Highest),
            other => Err(QrShapeError::validation(format!(
                "unknown ecc level '{other}'"
            ))),
        }
    }

    fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            Self::Lowest => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quality => qrcode::EcLevel::Q,
            Self::Highest => qrcode::EcLevel::H,
        }
    }
}

/// Turns a payload into a module matrix.
///
/// The ECC level is a per-call argument: implementations must not keep a settable level
/// that concurrent callers could race on.
pub trait Encoder: Send + Sync {
    fn encode(&self, data: &str, ecc: EccLevel) -> QrShapeResult<BitMatrix>;
}

/// [`Encoder`] backed by the `qrcode` crate (byte/alphanumeric/numeric mode auto-selected).
#[derive(Clone, Copy, Debug, Default)]
pub struct QrcodeEncoder;

impl Encoder for QrcodeEncoder {
    #[tracing::instrument(skip(self, data), fields(len = data.len()))]
    fn encode(&self, data: &str, ecc: EccLevel) -> QrShapeResult<BitMatrix> {
        let code = qrcode::QrCode::with_error_correction_level(data.as_bytes(), ecc.to_qrcode())
            .map_err(|e| {
                QrShapeError::encoding(format!(
                    "cannot encode {} bytes at {ecc:?} ecc: {e}",
                    data.len()
                ))
            })?;
        let width = code.width();
        let bits = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        let matrix = BitMatrix::from_raw(width, bits)?;
        tracing::debug!(dimension = width, "encoded payload");
        Ok(matrix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/qr.rs"]
mod tests;
