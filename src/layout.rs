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
use crate::{rectf, vec2f, Rectf, Vec2f};

/// Flow cursor that places controls top-to-bottom, or side by side after [`LayoutCursor::same_line`].
///
/// Coordinates are local to the window's content area before scrolling is applied.
#[derive(Clone, Debug)]
pub struct LayoutCursor {
    padding: f32,
    spacing: f32,
    last_rect: Option<Rectf>,
    line_bottom: f32,
    same_line: bool,
    max: Vec2f,
}

impl LayoutCursor {
    /// Creates a cursor with the given padding and spacing.
    pub fn new(padding: f32, spacing: f32) -> Self {
        Self {
            padding,
            spacing,
            last_rect: None,
            line_bottom: 0.0,
            same_line: false,
            max: vec2f(0.0, 0.0),
        }
    }

    /// Forgets every placement of the previous frame and re-reads the spacing constants.
    pub fn reset(&mut self, padding: f32, spacing: f32) { *self = Self::new(padding, spacing); }

    /// Places the next control to the right of the previous one instead of on a new line.
    pub fn same_line(&mut self) { self.same_line = true; }

    /// Returns `true` if the next placement continues the current line.
    pub fn is_same_line(&self) -> bool { self.same_line }

    /// Allocates a rectangle of `size` and advances the cursor.
    pub fn push_rect(&mut self, size: Vec2f) -> Rectf {
        let size = vec2f(size.x.max(0.0), size.y.max(0.0));
        let origin = match self.last_rect {
            None => vec2f(self.padding, self.padding),
            Some(last) if self.same_line => vec2f(last.x + last.width + self.spacing, last.y),
            Some(_) => vec2f(self.padding, self.line_bottom + self.spacing),
        };
        self.same_line = false;

        let r = rectf(origin.x, origin.y, size.x, size.y);
        // a line is as tall as its tallest control
        let starts_line = match self.last_rect {
            Some(last) => origin.y != last.y,
            None => true,
        };
        self.line_bottom = if starts_line { r.y + r.height } else { self.line_bottom.max(r.y + r.height) };
        self.max = vec2f(self.max.x.max(r.x + r.width), self.max.y.max(r.y + r.height));
        self.last_rect = Some(r);
        r
    }

    /// Rectangle of the latest placement.
    pub fn last_rect(&self) -> Option<Rectf> { self.last_rect }

    /// Returns `true` if anything was placed since the last reset.
    pub fn has_placed(&self) -> bool { self.last_rect.is_some() }

    /// Bottom-right corner of the union of all placements.
    pub fn max_corner(&self) -> Vec2f { self.max }

    /// Size of the declared content, including the trailing padding. Zero when nothing was placed.
    pub fn content_size(&self) -> Vec2f {
        if self.has_placed() { vec2f(self.max.x + self.padding, self.max.y + self.padding) } else { vec2f(0.0, 0.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(r: Rectf) -> (f32, f32, f32, f32) { (r.x, r.y, r.width, r.height) }

    #[test]
    fn controls_flow_down_by_default() {
        let mut cursor = LayoutCursor::new(10.0, 5.0);
        assert_eq!(tuple(cursor.push_rect(vec2f(100.0, 20.0))), (10.0, 10.0, 100.0, 20.0));
        assert_eq!(tuple(cursor.push_rect(vec2f(50.0, 30.0))), (10.0, 35.0, 50.0, 30.0));
        let size = cursor.content_size();
        assert_eq!((size.x, size.y), (120.0, 75.0));
    }

    #[test]
    fn same_line_places_to_the_right_once() {
        let mut cursor = LayoutCursor::new(10.0, 5.0);
        cursor.push_rect(vec2f(40.0, 20.0));
        cursor.same_line();
        assert_eq!(tuple(cursor.push_rect(vec2f(30.0, 40.0))), (55.0, 10.0, 30.0, 40.0));
        assert!(!cursor.is_same_line());
        // next line starts below the taller control
        assert_eq!(tuple(cursor.push_rect(vec2f(10.0, 10.0))), (10.0, 55.0, 10.0, 10.0));
    }

    #[test]
    fn empty_layout_has_no_content() {
        let mut cursor = LayoutCursor::new(10.0, 5.0);
        assert!(!cursor.has_placed());
        let size = cursor.content_size();
        assert_eq!((size.x, size.y), (0.0, 0.0));
        cursor.push_rect(vec2f(0.0, 0.0));
        cursor.reset(10.0, 5.0);
        assert!(!cursor.has_placed());
    }
}
