use crate::config::DecoderConfig;
use crate::decoder::bitstream::assemble;
use crate::decoder::palette::Quantizer;
use crate::decoder::sampler::{GridRegion, sample_cells};
use crate::detector::marker::MarkerDetector;
use crate::detector::rectify::FrameRectifier;
use crate::error::DecodeError;
use crate::models::{Marker, RoleAssignment};
use image::RgbImage;
use tracing::debug;

/// Everything learned while decoding one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    /// Decoded characters, including trailing padding
    pub text: String,
    /// Detected fiducials (absent for aligned decodes)
    pub markers: Option<[Marker; 3]>,
    /// Marker roles (absent for aligned decodes)
    pub roles: Option<RoleAssignment>,
    /// Grid placement inside the sampled frame
    pub region: GridRegion,
    /// Number of data cells sampled
    pub cells: usize,
    /// True when an unpaired trailing cell was discarded
    pub dropped_trailing: bool,
}

/// Full pipeline: markers -> rectification -> sampling -> quantization -> text
pub(crate) fn run(image: &RgbImage, config: &DecoderConfig) -> Result<DecodeReport, DecodeError> {
    debug!(width = image.width(), height = image.height(), "decoding symbol");

    let markers = MarkerDetector::detect_three(image, &config.marker)?;
    let (roles, frame) = FrameRectifier::rectify(image, &markers)?;
    let region = GridRegion::canonical();

    let mut report = sample_and_assemble(&frame, region, config);
    report.markers = Some(markers);
    report.roles = Some(roles);
    Ok(report)
}

/// Pipeline for symbols that are already axis-aligned: the grid is located
/// from the content bounding box instead of the markers
pub(crate) fn run_aligned(
    image: &RgbImage,
    config: &DecoderConfig,
) -> Result<DecodeReport, DecodeError> {
    debug!(width = image.width(), height = image.height(), "decoding aligned symbol");

    let region = GridRegion::from_content(image)?;
    Ok(sample_and_assemble(image, region, config))
}

fn sample_and_assemble(frame: &RgbImage, region: GridRegion, config: &DecoderConfig) -> DecodeReport {
    let samples = sample_cells(frame, &region);
    let codes = Quantizer::new(config.channel_weights).quantize_all(&samples);
    let assembled = assemble(&codes);

    debug!(
        cells = codes.len(),
        chars = assembled.text.len(),
        "assembled payload"
    );

    DecodeReport {
        text: assembled.text,
        markers: None,
        roles: None,
        region,
        cells: codes.len(),
        dropped_trailing: assembled.dropped_trailing,
    }
}
