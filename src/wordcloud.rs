use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, GlyphId, PxScale, PxScaleFont, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::error::{ChatStatsError, Result};

/// Fixed name of the rendered image inside the output directory.
pub const CLOUD_FILENAME: &str = "chat_wordcloud.png";

// One color per frequency rank, cycled.
const PALETTE: [Rgba<u8>; 6] = [
    Rgba([31, 119, 180, 255]),
    Rgba([214, 39, 40, 255]),
    Rgba([44, 160, 44, 255]),
    Rgba([148, 103, 189, 255]),
    Rgba([255, 127, 14, 255]),
    Rgba([23, 158, 187, 255]),
];

/// Frequency-weighted raster renderer.
///
/// Takes a prepared corpus (already normalized, reshaped, and reordered to
/// visual order), derives the token frequency table itself, and draws the most
/// frequent tokens left-to-right, top-to-bottom, scaled by relative frequency.
/// Input must already be in visual order; glyphs are drawn in storage order.
pub struct WordCloud {
    width: u32,
    height: u32,
    font_path: PathBuf,
    background: Rgba<u8>,
    max_font_size: f32,
    min_font_size: f32,
    max_words: usize,
}

impl WordCloud {
    pub fn new<P: Into<PathBuf>>(font_path: P) -> Self {
        WordCloud {
            width: 1200,
            height: 1000,
            font_path: font_path.into(),
            background: Rgba([255, 255, 255, 255]),
            max_font_size: 150.0,
            min_font_size: 12.0,
            max_words: 200,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn max_font_size(mut self, size: f32) -> Self {
        self.max_font_size = size;
        self
    }

    pub fn max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Renders the corpus to an image.
    ///
    /// Fails with `EmptyCorpus` when the corpus has no tokens (checked before
    /// the font is touched) and with `ResourceNotFound` when the font file
    /// cannot be read or parsed.
    pub fn render(&self, corpus: &str) -> Result<RgbaImage> {
        let frequencies = sort_by_frequency(count_tokens(corpus));
        if frequencies.is_empty() {
            return Err(ChatStatsError::EmptyCorpus);
        }
        let font = load_font(&self.font_path)?;
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, self.background);

        let max_count = frequencies[0].1 as f32;
        let margin = 12.0_f32;
        let padding = 8.0_f32;
        let mut x = margin;
        let mut y = margin;
        let mut row_height = 0.0_f32;

        for (rank, (token, count)) in frequencies.iter().take(self.max_words).enumerate() {
            let size = (self.max_font_size * *count as f32 / max_count).max(self.min_font_size);
            let scaled = font.as_scaled(PxScale::from(size));
            let token_width = text_width(&scaled, token);
            let token_height = scaled.ascent() - scaled.descent();

            if x > margin && x + token_width > self.width as f32 - margin {
                x = margin;
                y += row_height + padding;
                row_height = 0.0;
            }
            if y + token_height > self.height as f32 - margin {
                break; // canvas full; everything below this rank is smaller anyway
            }

            draw_token(
                &mut canvas,
                &font,
                size,
                x,
                y,
                PALETTE[rank % PALETTE.len()],
                token,
            );
            x += token_width + padding;
            row_height = row_height.max(token_height);
        }

        Ok(canvas)
    }

    /// Renders the corpus and writes the image under [`CLOUD_FILENAME`] into
    /// `output_dir`. Returns the full path of the written file.
    pub fn to_file(&self, corpus: &str, output_dir: &Path) -> Result<PathBuf> {
        let canvas = self.render(corpus)?;
        if !output_dir.is_dir() {
            return Err(ChatStatsError::ResourceNotFound {
                path: output_dir.to_path_buf(),
            });
        }
        let target = output_dir.join(CLOUD_FILENAME);
        canvas
            .save(&target)
            .map_err(|_| ChatStatsError::ResourceNotFound {
                path: target.clone(),
            })?;
        Ok(target)
    }
}

/// Counts whitespace-separated tokens of the prepared corpus.
fn count_tokens(corpus: &str) -> HashMap<String, u32> {
    let mut frequency: HashMap<String, u32> = HashMap::new();
    for token in corpus.split_whitespace() {
        *frequency.entry(token.to_owned()).or_insert(0) += 1;
    }
    frequency
}

/// Sorts the frequency table into a Vec, most frequent first. Equal counts are
/// ordered by token so the layout is deterministic.
fn sort_by_frequency(frequency: HashMap<String, u32>) -> Vec<(String, u32)> {
    let mut sorted: Vec<(String, u32)> = frequency.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}

fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path).map_err(|_| ChatStatsError::ResourceNotFound {
        path: path.to_path_buf(),
    })?;
    FontVec::try_from_vec(data).map_err(|_| ChatStatsError::ResourceNotFound {
        path: path.to_path_buf(),
    })
}

fn text_width(scaled: &PxScaleFont<&FontVec>, text: &str) -> f32 {
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

fn draw_token(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    x: f32,
    y: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut caret = point(x, y + scaled.ascent());
    let mut previous: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height()
                {
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    *pixel = blend(*pixel, color, coverage);
                }
            });
        }
    }
}

fn blend(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let alpha = coverage.clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (d as f32 * (1.0 - alpha) + s as f32 * alpha).round() as u8;
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        255,
    ])
}
