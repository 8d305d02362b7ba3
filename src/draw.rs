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
use crate::{rectf, vec2f, Color, ControlColor, Dimensionf, Rectf, Style, TextMetrics, Vec2f};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned image.
pub struct ImageId(u32);

impl ImageId {
    /// Wraps a renderer-defined image handle.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Pointer shapes the runtime may request from the renderer.
pub enum CursorIcon {
    /// Regular pointer.
    Arrow,
    /// Vertical resize.
    ResizeUpDown,
    /// Horizontal resize.
    ResizeLeftRight,
    /// Diagonal resize, top-left to bottom-right.
    ResizeNwse,
    /// Diagonal resize, top-right to bottom-left.
    ResizeNesw,
}

#[derive(Clone, Debug)]
/// One draw primitive, in canvas coordinates.
pub enum Command {
    /// Restricts subsequent commands to `rect`.
    Clip {
        /// Visible region.
        rect: Rectf,
    },
    /// Removes the current clip.
    ResetClip,
    /// Draws a solid rectangle.
    Rect {
        /// Target rectangle.
        rect: Rectf,
        /// Fill color.
        color: Color,
    },
    /// Draws a rectangle outline.
    RectOutline {
        /// Target rectangle.
        rect: Rectf,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        thickness: f32,
    },
    /// Draws a solid rounded rectangle.
    RoundRect {
        /// Target rectangle.
        rect: Rectf,
        /// Corner radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Draws a line segment.
    Line {
        /// Start point.
        from: Vec2f,
        /// End point.
        to: Vec2f,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        thickness: f32,
    },
    /// Draws text with its top-left corner at `pos`.
    Text {
        /// UTF-8 string to render.
        text: String,
        /// Top-left text position.
        pos: Vec2f,
        /// Text color.
        color: Color,
    },
    /// Draws an image stretched over `rect`.
    Image {
        /// Image to draw.
        image: ImageId,
        /// Target rectangle.
        rect: Rectf,
        /// Tint color.
        color: Color,
    },
    /// Overlays a cursor icon at the pointer position.
    Cursor {
        /// Requested icon.
        icon: CursorIcon,
        /// Pointer position.
        pos: Vec2f,
    },
}

/// Consumer of the command list produced every frame.
pub trait Renderer {
    /// Begins a new frame with the canvas size.
    fn begin(&mut self, _canvas: Dimensionf) {}
    /// Executes a single draw command.
    fn command(&mut self, command: &Command);
    /// Ends the frame.
    fn end(&mut self) {}
}

/// Records draw commands, translating from a local coordinate space to canvas space.
pub struct DrawCtx<'a> {
    commands: &'a mut Vec<Command>,
    style: &'a Style,
    metrics: &'a dyn TextMetrics,
    offset: Vec2f,
    clip_stack: Vec<Rectf>,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(commands: &'a mut Vec<Command>, style: &'a Style, metrics: &'a dyn TextMetrics) -> Self {
        Self { commands, style, metrics, offset: vec2f(0.0, 0.0), clip_stack: Vec::new() }
    }

    /// Returns the active style.
    pub fn style(&self) -> &'a Style { self.style }

    /// Returns the palette entry for `id`.
    pub fn color(&self, id: ControlColor) -> Color { self.style.color(id) }

    /// Measures `text` with the application's font.
    pub fn measure(&self, text: &str) -> Dimensionf { self.metrics.measure(text) }

    /// Height of one line of text.
    pub fn line_height(&self) -> f32 { self.metrics.line_height() }

    pub(crate) fn set_offset(&mut self, offset: Vec2f) { self.offset = offset; }

    /// Translates a local rectangle to canvas space.
    pub fn map_rect(&self, r: Rectf) -> Rectf { rectf(r.x + self.offset.x, r.y + self.offset.y, r.width, r.height) }

    /// Translates a local point to canvas space.
    pub fn map_point(&self, p: Vec2f) -> Vec2f { vec2f(p.x + self.offset.x, p.y + self.offset.y) }

    /// Current clip rectangle in canvas space, if any.
    pub fn current_clip(&self) -> Option<Rectf> { self.clip_stack.last().copied() }

    /// Narrows the clip to `rect` (canvas space) intersected with the current clip.
    pub(crate) fn push_clip(&mut self, rect: Rectf) {
        let rect = match self.current_clip() {
            Some(current) => rect.intersect(&current).unwrap_or_default(),
            None => rect,
        };
        self.clip_stack.push(rect);
        self.commands.push(Command::Clip { rect });
    }

    /// Restores the clip that was active before the matching [`DrawCtx::push_clip`].
    pub(crate) fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            return;
        }
        match self.current_clip() {
            Some(rect) => self.commands.push(Command::Clip { rect }),
            None => self.commands.push(Command::ResetClip),
        }
    }

    // culls canvas-space rectangles entirely outside the clip
    fn visible(&self, r: &Rectf) -> bool {
        match self.current_clip() {
            None => true,
            Some(clip) => r.intersect(&clip).is_some_and(|hit| hit.width > 0.0 && hit.height > 0.0),
        }
    }

    pub(crate) fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    /// Draws a filled rectangle.
    pub fn draw_rect(&mut self, rect: Rectf, color: Color) {
        let rect = self.map_rect(rect);
        if rect.width > 0.0 && rect.height > 0.0 && self.visible(&rect) {
            self.push_command(Command::Rect { rect, color });
        }
    }

    /// Draws a rectangle outline.
    pub fn draw_box(&mut self, rect: Rectf, color: Color) {
        let rect = self.map_rect(rect);
        if self.visible(&rect) {
            self.push_command(Command::RectOutline { rect, color, thickness: 1.0 });
        }
    }

    /// Draws a filled rounded rectangle.
    pub fn draw_round_rect(&mut self, rect: Rectf, radius: f32, color: Color) {
        let rect = self.map_rect(rect);
        if rect.width > 0.0 && rect.height > 0.0 && self.visible(&rect) {
            self.push_command(Command::RoundRect { rect, radius, color });
        }
    }

    /// Draws a line segment.
    pub fn draw_line(&mut self, from: Vec2f, to: Vec2f, color: Color, thickness: f32) {
        let from = self.map_point(from);
        let to = self.map_point(to);
        self.push_command(Command::Line { from, to, color, thickness });
    }

    /// Draws text at `pos`.
    pub fn draw_text(&mut self, text: &str, pos: Vec2f, color: Color) {
        if text.is_empty() {
            return;
        }
        let pos = self.map_point(pos);
        let size = self.metrics.measure(text);
        if !self.visible(&rectf(pos.x, pos.y, size.width.max(1.0), size.height.max(1.0))) {
            return;
        }
        self.push_command(Command::Text { text: String::from(text), pos, color });
    }

    /// Draws text vertically centered inside `rect`, left aligned.
    pub fn draw_control_text(&mut self, text: &str, rect: Rectf, color: Color) {
        let size = self.metrics.measure(text);
        let y = rect.y + (rect.height - size.height) / 2.0;
        self.draw_text(text, vec2f(rect.x, y), color);
    }

    /// Draws an image stretched over `rect`.
    pub fn draw_image(&mut self, image: ImageId, rect: Rectf, color: Color) {
        let rect = self.map_rect(rect);
        if self.visible(&rect) {
            self.push_command(Command::Image { image, rect, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedMetrics;

    #[test]
    fn offset_is_applied_to_rects() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let mut commands = Vec::new();
        let mut draw = DrawCtx::new(&mut commands, &style, &metrics);
        draw.set_offset(vec2f(100.0, 50.0));
        draw.draw_rect(rectf(1.0, 2.0, 3.0, 4.0), Color::default());
        match &commands[0] {
            Command::Rect { rect, .. } => assert_eq!((rect.x, rect.y, rect.width, rect.height), (101.0, 52.0, 3.0, 4.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn clipped_out_rects_are_culled() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let mut commands = Vec::new();
        let mut draw = DrawCtx::new(&mut commands, &style, &metrics);
        draw.push_clip(rectf(0.0, 0.0, 10.0, 10.0));
        draw.draw_rect(rectf(20.0, 20.0, 5.0, 5.0), Color::default());
        draw.draw_rect(rectf(5.0, 5.0, 10.0, 10.0), Color::default());
        draw.pop_clip();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::Clip { .. }));
        assert!(matches!(commands[1], Command::Rect { .. }));
        assert!(matches!(commands[2], Command::ResetClip));
    }

    #[test]
    fn popping_a_nested_clip_restores_the_outer_one() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let mut commands = Vec::new();
        let mut draw = DrawCtx::new(&mut commands, &style, &metrics);
        draw.push_clip(rectf(0.0, 0.0, 100.0, 100.0));
        draw.push_clip(rectf(50.0, 50.0, 100.0, 100.0));
        assert_eq!(draw.current_clip().map(|r| (r.x, r.y, r.width, r.height)), Some((50.0, 50.0, 50.0, 50.0)));
        draw.pop_clip();
        draw.pop_clip();
        draw.pop_clip();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[2], Command::Clip { rect } if rect.x == 0.0 && rect.width == 100.0));
        assert!(matches!(commands[3], Command::ResetClip));
    }

    #[test]
    fn text_is_culled_by_its_measured_extent() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let mut commands = Vec::new();
        let mut draw = DrawCtx::new(&mut commands, &style, &metrics);
        draw.push_clip(rectf(100.0, 100.0, 50.0, 50.0));
        // "abcd" is 32 wide: ends at x = 98, left of the clip
        draw.draw_text("abcd", vec2f(66.0, 110.0), Color::default());
        // starts left of the clip but reaches into it
        draw.draw_text("abcd", vec2f(80.0, 110.0), Color::default());
        // below the clip
        draw.draw_text("abcd", vec2f(110.0, 200.0), Color::default());
        let texts = commands.iter().filter(|c| matches!(c, Command::Text { .. })).count();
        assert_eq!(texts, 1);
    }
}
