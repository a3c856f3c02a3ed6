//! QR codes linking to the invoice viewer.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};
use qrcode::QrCode;
use tracing::{debug, error};

use crate::config::qr_conf::QrConfig;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Quiet-zone width on each side of a standard QR code, in modules
const QUIET_ZONE_MODULES: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Failed to render QR image: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR code needs {required} pixels but the image is {width} pixels wide")]
    TooSmall { width: u32, required: u32 },
}

/// Renders `<base-url>/invoice/<id>` as a square PNG data URL.
#[derive(Debug, Clone)]
pub struct QrCodeGenerator {
    config: QrConfig,
}

impl QrCodeGenerator {
    pub fn new(config: QrConfig) -> Self {
        QrCodeGenerator { config }
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    pub fn invoice_url(&self, invoice_id: &str) -> String {
        self.config.invoice_url(invoice_id)
    }

    /// PNG bytes of the QR code for an invoice, `width` pixels on each side.
    ///
    /// Every module is drawn as a whole number of pixels and the code is
    /// centred on a white canvas, so the image stays scannable at any width
    /// that fits the code and its quiet zone.
    pub fn render_png(&self, invoice_id: &str) -> Result<Vec<u8>, QrError> {
        let url = self.invoice_url(invoice_id);
        let width = self.config.width;

        let code = QrCode::new(url.as_bytes()).map_err(|e| {
            error!("Failed to encode {} as QR code: {}", url, e);
            QrError::Encode(e)
        })?;
        let required = code.width() as u32 + 2 * QUIET_ZONE_MODULES;
        if width < required {
            error!(width, required, "QR image too small for {}", url);
            return Err(QrError::TooSmall { width, required });
        }

        let scale = width / required;
        let rendered = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(scale, scale)
            .build();
        let mut canvas = ImageBuffer::from_pixel(width, width, Luma([255u8]));
        let offset = i64::from((width - rendered.width()) / 2);
        imageops::replace(&mut canvas, &rendered, offset, offset);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        debug!(invoice_id, scale, bytes = png.len(), "Rendered invoice QR code");
        Ok(png)
    }

    /// `data:image/png;base64,...` payload for an invoice
    pub fn generate(&self, invoice_id: &str) -> Result<String, QrError> {
        let png = self.render_png(invoice_id)?;
        Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
    }
}
