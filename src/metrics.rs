//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Text measurement backends.

use crate::{Dimensionf, TextMetrics};

#[derive(Copy, Clone, Debug)]
/// Monospaced metrics: every character advances by the same amount.
pub struct FixedMetrics {
    advance: f32,
    line_height: f32,
}

impl FixedMetrics {
    /// Creates metrics with the given per-character advance and line height.
    pub fn new(advance: f32, line_height: f32) -> Self { Self { advance, line_height } }
}

impl Default for FixedMetrics {
    fn default() -> Self { Self::new(8.0, 16.0) }
}

impl TextMetrics for FixedMetrics {
    fn measure(&self, text: &str) -> Dimensionf {
        if text.is_empty() {
            return Dimensionf::new(0.0, 0.0);
        }
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        Dimensionf::new(widest as f32 * self.advance, lines as f32 * self.line_height)
    }
}

#[cfg(feature = "fontdue")]
pub use self::font::FontdueMetrics;

#[cfg(feature = "fontdue")]
mod font {
    use crate::{Dimensionf, Error, TextMetrics};
    use fontdue::{Font, FontSettings};
    use std::path::Path;

    /// Metrics backed by a TrueType/OpenType font rasterized at a fixed pixel size.
    pub struct FontdueMetrics {
        font: Font,
        size: f32,
        line_height: f32,
    }

    impl FontdueMetrics {
        /// Parses a font from memory.
        pub fn from_bytes(data: &[u8], size: f32) -> Result<Self, Error> {
            let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| Error::FontLoad(e.to_string()))?;
            let line_height = font.horizontal_line_metrics(size).map(|m| m.new_line_size).unwrap_or(size);
            log::debug!("loaded font at {}px, line height {}", size, line_height);
            Ok(Self { font, size, line_height })
        }

        /// Reads and parses a font file.
        pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self, Error> {
            let data = std::fs::read(path)?;
            Self::from_bytes(&data, size)
        }

        /// Returns the pixel size glyphs are measured at.
        pub fn size(&self) -> f32 { self.size }
    }

    impl TextMetrics for FontdueMetrics {
        fn measure(&self, text: &str) -> Dimensionf {
            if text.is_empty() {
                return Dimensionf::new(0.0, 0.0);
            }
            let mut widest = 0.0f32;
            let mut lines = 0;
            for line in text.lines() {
                let width: f32 = line.chars().map(|c| self.font.metrics(c, self.size).advance_width).sum();
                widest = widest.max(width);
                lines += 1;
            }
            Dimensionf::new(widest.ceil(), lines.max(1) as f32 * self.line_height)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn garbage_bytes_are_rejected() {
            let err = FontdueMetrics::from_bytes(&[0u8, 1, 2, 3], 16.0).err();
            assert!(matches!(err, Some(Error::FontLoad(_))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_measure_widest_line() {
        let m = FixedMetrics::new(8.0, 16.0);
        let d = m.measure("abc");
        assert_eq!((d.width, d.height), (24.0, 16.0));
        let d = m.measure("a\nlonger");
        assert_eq!((d.width, d.height), (48.0, 32.0));
        let d = m.measure("");
        assert_eq!((d.width, d.height), (0.0, 0.0));
    }
}
