//! RGB export of a finished layer

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageResult, Rgb, RgbImage};

use crate::io::configuration::PPM_EXTENSION;
use crate::io::error::{GeneratorError, Result, invalid_parameter, layer_not_found};
use crate::math::interpolation::clamp_unit;
use crate::raster::Generator;

/// Channels written to the image, in red, green, blue order
const COLOR_CHANNELS: [usize; 3] = [1, 2, 3];

/// Map a layer value onto a byte: clamp to `[0, 1]`, scale by 255, truncate
pub fn to_byte(value: f64) -> u8 {
    (clamp_unit(value) * 255.0) as u8
}

/// Export channels 1..3 of a layer as an 8-bit RGB image
///
/// The format follows the file extension: `ppm` writes a binary pixmap
/// (`P6`), anything else goes through the `image` format detection.
///
/// # Errors
///
/// Returns an error if:
/// - The layer does not exist or has fewer than four channels
/// - The layer is too large for the image format
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layer(generator: &Generator, layer: &str, output_path: &Path) -> Result<()> {
    let source = generator.layer(layer).ok_or_else(|| layer_not_found(layer))?;
    if source.channels() < 4 {
        return Err(GeneratorError::InsufficientChannels {
            operator: "export",
            required: 4,
            found: source.channels(),
        });
    }

    let (width, height) = source.dimensions();
    let image_width = u32::try_from(width)
        .ok()
        .ok_or_else(|| too_large("width", width))?;
    let image_height = u32::try_from(height)
        .ok()
        .ok_or_else(|| too_large("height", height))?;

    let mut img = RgbImage::new(image_width, image_height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let mut rgb = [0_u8; 3];
        for (byte, channel) in rgb.iter_mut().zip(COLOR_CHANNELS) {
            *byte = to_byte(generator.sample(layer, x as usize, y as usize, channel)?);
        }
        *pixel = Rgb(rgb);
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GeneratorError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let saved = if is_ppm(output_path) {
        let file = File::create(output_path).map_err(|e| GeneratorError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create image",
            source: e,
        })?;
        write_ppm(&img, BufWriter::new(file))
    } else {
        img.save(output_path)
    };
    saved.map_err(|e| GeneratorError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

// The default PNM subtype is PAM (`P7`); PPM output must be a `P6` pixmap
fn write_ppm(img: &RgbImage, writer: BufWriter<File>) -> ImageResult<()> {
    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PPM_EXTENSION))
}

fn too_large(parameter: &'static str, value: usize) -> GeneratorError {
    invalid_parameter(parameter, &value, &"too large for image export")
}
