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
use super::{Control, ControlCtx};
use crate::{rectf, vec2f, ControlColor, DrawCtx, Rectf, ResourceState, Style, TextMetrics, Vec2f};

// horizontal room between the frame and the text
const TEXT_PAD: f32 = 4.0;
const TEXT_INSET: f32 = 2.0;

#[derive(Clone, Debug)]
/// Single-line text field.
///
/// A press over the field takes keyboard focus and places the caret; a press anywhere else gives it up.
/// While focused the field consumes typed text, Backspace/Delete, the arrow keys, Home and End. Return
/// reports [`ResourceState::SUBMIT`] and releases the focus. Edits report [`ResourceState::CHANGE`].
///
/// The caret, the horizontal scroll and the focus live in the control, so the field must be declared
/// under a stable key to keep them across frames.
pub struct TextBox {
    /// Shown dimmed while the field is empty and unfocused.
    pub hint: String,
    /// Overrides the default width ([`Style::bar_size`]'s width).
    pub width: Option<f32>,
    text: String,
    cursor: usize,
    scroll: f32,
    caret_x: f32,
    focused: bool,
    hovered: bool,
    enabled: bool,
}

impl TextBox {
    /// Creates a field holding `text` with the caret at its end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            hint: String::new(),
            width: None,
            cursor: text.len(),
            text,
            scroll: 0.0,
            caret_x: 0.0,
            focused: false,
            hovered: false,
            enabled: true,
        }
    }

    /// Current content.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the content, keeping the caret on a character boundary.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let mut cursor = self.cursor.min(self.text.len());
        while !self.text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    /// Caret position, as a byte index into [`TextBox::text`].
    pub fn cursor(&self) -> usize { self.cursor }

    /// Returns `true` while the field holds keyboard focus.
    pub fn is_focused(&self) -> bool { self.focused }

    fn prev_boundary(&self) -> usize { self.text[..self.cursor].char_indices().next_back().map_or(0, |(i, _)| i) }

    fn next_boundary(&self) -> usize { self.text[self.cursor..].chars().next().map_or(self.cursor, |c| self.cursor + c.len_utf8()) }

    // byte index closest to `x` (text space), snapping to the nearer half of the glyph under it
    fn index_at(&self, ctx: &ControlCtx<'_>, x: f32) -> usize {
        if x <= 0.0 {
            return 0;
        }
        let mut last = 0.0;
        for (idx, ch) in self.text.char_indices() {
            let next = idx + ch.len_utf8();
            let width = ctx.measure(&self.text[..next]).width;
            if x < width {
                return if x < (last + width) / 2.0 { idx } else { next };
            }
            last = width;
        }
        self.text.len()
    }

    fn edit(&mut self, ctx: &ControlCtx<'_>) -> ResourceState {
        let input = ctx.input();
        let mut res = ResourceState::NONE;

        let typed: String = input.text_input().chars().filter(|c| !c.is_control()).collect();
        if !typed.is_empty() {
            self.text.insert_str(self.cursor, &typed);
            self.cursor += typed.len();
            res |= ResourceState::CHANGE;
        }

        let keys = input.key_pressed();
        if keys.is_backspace() && self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
            res |= ResourceState::CHANGE;
        }
        if keys.is_delete() && self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.replace_range(self.cursor..next, "");
            res |= ResourceState::CHANGE;
        }

        let codes = input.key_code_pressed();
        if codes.is_left() {
            self.cursor = self.prev_boundary();
        }
        if codes.is_right() {
            self.cursor = self.next_boundary();
        }
        if codes.is_home() {
            self.cursor = 0;
        }
        if codes.is_end() {
            self.cursor = self.text.len();
        }

        if keys.is_return() {
            res |= ResourceState::SUBMIT;
        }
        res
    }
}

impl Default for TextBox {
    fn default() -> Self { Self::new("") }
}

impl Control for TextBox {
    fn compute_size(&self, style: &Style, metrics: &dyn TextMetrics) -> Vec2f {
        vec2f(self.width.unwrap_or(style.bar_size.x), metrics.line_height() + TEXT_INSET * 2.0)
    }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        if !self.enabled {
            ctx.blur();
            self.focused = false;
            self.hovered = false;
            return ResourceState::NONE;
        }

        let rect = ctx.rect();
        self.hovered = ctx.mouse_over();
        if ctx.input().left_pressed() {
            match ctx.cursor() {
                Some(p) if self.hovered => {
                    ctx.focus();
                    self.cursor = self.index_at(ctx, p.x - rect.x - TEXT_PAD + self.scroll);
                }
                _ => ctx.blur(),
            }
        }

        self.focused = ctx.is_focused();
        let mut res = ResourceState::NONE;
        if self.focused {
            res = self.edit(ctx);
            if res.is_submitted() {
                ctx.blur();
                self.focused = false;
            }
            res |= ResourceState::ACTIVE;
        }

        // keep the caret inside the visible part of the field
        let inner = (rect.width - TEXT_PAD * 2.0).max(0.0);
        self.caret_x = ctx.measure(&self.text[..self.cursor]).width;
        if self.caret_x - self.scroll > inner {
            self.scroll = self.caret_x - inner;
        }
        if self.caret_x < self.scroll {
            self.scroll = self.caret_x;
        }
        let overflow = (ctx.measure(&self.text).width - inner).max(0.0);
        self.scroll = self.scroll.clamp(0.0, overflow);
        res
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        draw.draw_rect(rect, draw.color(ControlColor::Base));
        let border = if self.focused {
            ControlColor::Accent
        } else if self.hovered {
            ControlColor::ButtonHover
        } else {
            ControlColor::Border
        };
        draw.draw_box(rect, draw.color(border));

        let inner = rectf(rect.x + TEXT_PAD, rect.y, (rect.width - TEXT_PAD * 2.0).max(0.0), rect.height);
        let clip = draw.map_rect(inner);
        draw.push_clip(clip);
        if self.text.is_empty() && !self.focused {
            let color = draw.color(ControlColor::TextDisabled);
            draw.draw_control_text(&self.hint, inner, color);
        } else {
            let color = draw.color(if self.enabled { ControlColor::Text } else { ControlColor::TextDisabled });
            draw.draw_control_text(&self.text, rectf(inner.x - self.scroll, inner.y, inner.width, inner.height), color);
        }
        if self.focused {
            let height = draw.line_height();
            let caret = rectf(inner.x + self.caret_x - self.scroll, inner.y + (inner.height - height) / 2.0, 1.0, height);
            draw.draw_rect(caret, draw.color(ControlColor::Text));
        }
        draw.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::run_update;
    use crate::{FixedMetrics, Id, Input, InputArbiter, KeyCode, KeyMode, MouseButton};

    fn field() -> Rectf { rectf(0.0, 0.0, 80.0, 20.0) }

    fn focused(text: &str, arbiter: &mut InputArbiter) -> TextBox {
        let mut tb = TextBox::new(text);
        let mut input = Input::default();
        input.mousedown(70.0, 10.0, MouseButton::LEFT);
        run_update(&mut tb, field(), Some(vec2f(70.0, 10.0)), &input, arbiter);
        assert!(tb.is_focused());
        tb
    }

    #[test]
    fn size_is_one_line_high() {
        let style = Style::default();
        let size = TextBox::new("").compute_size(&style, &FixedMetrics::new(8.0, 16.0));
        assert_eq!((size.x, size.y), (style.bar_size.x, 20.0));
    }

    #[test]
    fn press_places_the_caret_by_glyph_midpoint() {
        let mut arbiter = InputArbiter::new();
        let mut tb = TextBox::new("abcd");
        let mut input = Input::default();
        // text starts at x = 4, glyphs are 8 wide: 4 + 8 + 5 lands past the middle of 'b'
        input.mousedown(17.0, 10.0, MouseButton::LEFT);
        let res = run_update(&mut tb, field(), Some(vec2f(17.0, 10.0)), &input, &mut arbiter);
        assert!(res.is_active());
        assert_eq!(tb.cursor(), 2);
        assert!(arbiter.is_focused(Id::new(99)));

        input.epilogue();
        input.mouseup(17.0, 10.0, MouseButton::LEFT);
        input.epilogue();
        input.mousedown(7.0, 10.0, MouseButton::LEFT);
        run_update(&mut tb, field(), Some(vec2f(7.0, 10.0)), &input, &mut arbiter);
        assert_eq!(tb.cursor(), 0);
    }

    #[test]
    fn typing_edits_at_the_caret() {
        let mut arbiter = InputArbiter::new();
        let mut tb = focused("ac", &mut arbiter);
        let mut input = Input::default();
        input.keydown_code(KeyCode::LEFT);
        input.text("b\u{7}");
        // typed text lands before the arrow moves the caret
        assert!(run_update(&mut tb, field(), None, &input, &mut arbiter).is_changed());
        assert_eq!(tb.text(), "acb");
        assert_eq!(tb.cursor(), 2);

        input.epilogue();
        input.keydown(KeyMode::BACKSPACE);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.text(), "ab");
        assert_eq!(tb.cursor(), 1);

        input.epilogue();
        input.keydown_code(KeyCode::HOME);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.cursor(), 0);

        input.epilogue();
        input.keydown(KeyMode::DELETE);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.text(), "b");
        assert_eq!(tb.cursor(), 0);
    }

    #[test]
    fn caret_moves_over_whole_characters() {
        let mut arbiter = InputArbiter::new();
        let mut tb = focused("hé", &mut arbiter);
        assert_eq!(tb.cursor(), 3);
        let mut input = Input::default();
        input.keydown(KeyMode::BACKSPACE);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.text(), "h");
        assert_eq!(tb.cursor(), 1);

        tb.set_text("é");
        assert_eq!(tb.cursor(), 0);
    }

    #[test]
    fn unfocused_field_ignores_keys() {
        let mut arbiter = InputArbiter::new();
        let mut tb = TextBox::new("x");
        let mut input = Input::default();
        input.text("y");
        input.keydown(KeyMode::BACKSPACE);
        assert!(run_update(&mut tb, field(), None, &input, &mut arbiter).is_none());
        assert_eq!(tb.text(), "x");
    }

    #[test]
    fn return_submits_and_releases_focus() {
        let mut arbiter = InputArbiter::new();
        let mut tb = focused("x", &mut arbiter);
        let mut input = Input::default();
        input.keydown(KeyMode::RETURN);
        let res = run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert!(res.is_submitted());
        assert!(!tb.is_focused());
        assert_eq!(arbiter.focused(), None);
    }

    #[test]
    fn press_elsewhere_releases_focus() {
        let mut arbiter = InputArbiter::new();
        let mut tb = focused("x", &mut arbiter);
        let mut input = Input::default();
        input.mousedown(300.0, 10.0, MouseButton::LEFT);
        run_update(&mut tb, field(), Some(vec2f(300.0, 10.0)), &input, &mut arbiter);
        assert!(!tb.is_focused());
        assert_eq!(arbiter.focused(), None);
    }

    #[test]
    fn long_text_scrolls_to_keep_the_caret_visible() {
        let mut arbiter = InputArbiter::new();
        // 12 glyphs are 96 wide, the field shows 72
        let mut tb = focused("abcdefghijkl", &mut arbiter);
        assert_eq!(tb.scroll, 0.0);
        let mut input = Input::default();
        input.keydown_code(KeyCode::END);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.cursor(), 12);
        assert_eq!(tb.scroll, 24.0);

        let mut input = Input::default();
        input.keydown_code(KeyCode::HOME);
        run_update(&mut tb, field(), None, &input, &mut arbiter);
        assert_eq!(tb.scroll, 0.0);
    }
}
