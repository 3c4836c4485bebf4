use crate::{Color, EngineResult, Size};

/// Pixels per cell used by the original export, kept as the default.
pub const DEFAULT_EXPORT_SCALE: u32 = 20;

/// Upper bound on pixels per cell; keeps a 64x64 grid well inside u32
/// pixel arithmetic.
pub const MAX_EXPORT_SCALE: u32 = 256;

/// Rasterizes a raster-order color sequence into PNG bytes, `scale`
/// image pixels per cell, clamped to `[1, 256]`. Cells are drawn as
/// solid blocks (no smoothing); missing trailing cells render white.
pub fn export_png(colors: &[Color], size: Size, scale: u32) -> EngineResult<Vec<u8>> {
    let scale = scale.clamp(1, MAX_EXPORT_SCALE);
    let width = size.width as u32 * scale;
    let height = size.height as u32 * scale;

    let mut rgb = vec![0xFF_u8; (width * height * 3) as usize];
    for index in 0..size.cell_count() {
        let (r, g, b) = colors.get(index).copied().unwrap_or(Color::WHITE).get_rgb();
        let pos = size.to_position(index);
        for dy in 0..scale {
            let row_start = (pos.y as u32 * scale + dy) * width + pos.x as u32 * scale;
            for dx in 0..scale {
                let offset = ((row_start + dx) * 3) as usize;
                rgb[offset] = r;
                rgb[offset + 1] = g;
                rgb[offset + 2] = b;
            }
        }
    }

    let mut result = Vec::new();
    let mut encoder = png::Encoder::new(&mut result, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgb)?;
    writer.finish()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{export_png, Color, PixelBuffer, PixelPane, Size};

    #[test]
    fn test_export_round_trip() {
        let size = Size::new(8, 8);
        let mut buffer = PixelBuffer::new(size);
        buffer.set_color(0, Color::RED);

        let bytes = export_png(buffer.colors(), size, 2).unwrap();
        assert_eq!(&[0x89, b'P', b'N', b'G'], &bytes[0..4]);

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes.as_slice()));
        let mut reader = decoder.read_info().unwrap();
        let mut data = vec![0; reader.output_buffer_size().unwrap()];
        let info = reader.next_frame(&mut data).unwrap();
        assert_eq!(16, info.width);
        assert_eq!(16, info.height);
        // top-left cell is a 2x2 red block
        assert_eq!(&[0xFF, 0x00, 0x00], &data[0..3]);
        assert_eq!(&[0xFF, 0x00, 0x00], &data[3..6]);
        // the cell to its right stays white
        assert_eq!(&[0xFF, 0xFF, 0xFF], &data[6..9]);
    }

    #[test]
    fn test_zero_scale_is_bumped_to_one() {
        let size = Size::new(8, 8);
        let buffer = PixelBuffer::new(size);
        let bytes = export_png(buffer.colors(), size, 0).unwrap();
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes.as_slice()));
        let reader = decoder.read_info().unwrap();
        assert_eq!(8, reader.info().width);
    }

    #[test]
    fn test_oversized_scale_is_capped() {
        let size = Size::new(8, 8);
        let buffer = PixelBuffer::new(size);
        let bytes = export_png(buffer.colors(), size, u32::MAX).unwrap();
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes.as_slice()));
        let reader = decoder.read_info().unwrap();
        assert_eq!(8 * super::MAX_EXPORT_SCALE, reader.info().width);
    }
}
