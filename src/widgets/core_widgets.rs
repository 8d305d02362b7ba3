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
use super::{ButtonBehavior, Control, ControlCtx};
use crate::{rectf, vec2f, Color, ControlColor, Dimensionf, DrawCtx, ImageId, Rectf, ResourceState, Style, TextMetrics, Vec2f};

fn text_color(enabled: bool) -> ControlColor {
    if enabled { ControlColor::Text } else { ControlColor::TextDisabled }
}

#[derive(Clone, Debug)]
/// Static line of text.
pub struct Label {
    /// Displayed text.
    pub text: String,
    /// Overrides the palette text color.
    pub color: Option<Color>,
    enabled: bool,
}

impl Label {
    /// Creates a label.
    pub fn new(text: impl Into<String>) -> Self { Self { text: text.into(), color: None, enabled: true } }
}

impl Control for Label {
    fn compute_size(&self, _style: &Style, metrics: &dyn TextMetrics) -> Vec2f {
        let size = metrics.measure(&self.text);
        vec2f(size.width, size.height)
    }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        ResourceState::NONE
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let color = self.color.unwrap_or_else(|| draw.color(text_color(self.enabled)));
        draw.draw_text(&self.text, vec2f(rect.x, rect.y), color);
    }
}

#[derive(Clone, Debug)]
/// Push button reporting [`ResourceState::SUBMIT`] when clicked.
pub struct Button {
    /// Text displayed on the button.
    pub label: String,
    behavior: ButtonBehavior,
    text_size: Dimensionf,
    enabled: bool,
}

impl Button {
    /// Creates a button.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), behavior: ButtonBehavior::default(), text_size: Dimensionf::new(0.0, 0.0), enabled: true }
    }

    /// Returns the press state of the button.
    pub fn behavior(&self) -> &ButtonBehavior { &self.behavior }
}

impl Control for Button {
    fn compute_size(&self, style: &Style, metrics: &dyn TextMetrics) -> Vec2f {
        let text = metrics.measure(&self.label);
        vec2f(text.width + style.button_padding.x * 2.0, text.height + style.button_padding.y * 2.0)
    }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        self.text_size = ctx.measure(&self.label);
        let rect = ctx.rect();
        self.behavior.update(ctx, rect);

        let mut res = ResourceState::NONE;
        if self.behavior.is_held() {
            res |= ResourceState::ACTIVE;
        }
        if self.behavior.is_clicked() {
            res |= ResourceState::SUBMIT;
        }
        res
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let mut fill = ControlColor::Button;
        if self.behavior.is_held() {
            fill.active();
        } else if self.behavior.is_hovered() {
            fill.hover();
        }
        let radius = draw.style().corner_radius;
        draw.draw_round_rect(rect, radius, draw.color(fill));
        draw.draw_box(rect, draw.color(ControlColor::Border));
        let x = rect.x + (rect.width - self.text_size.width) / 2.0;
        let text_rect = rectf(x, rect.y, self.text_size.width, rect.height);
        let color = draw.color(text_color(self.enabled));
        draw.draw_control_text(&self.label, text_rect, color);
    }
}

#[derive(Clone, Debug)]
/// Toggle bound to a `bool`.
pub struct Checkbox {
    /// Text displayed next to the box.
    pub label: String,
    /// Current state; written back to the bound value after each update.
    pub checked: bool,
    hovered: bool,
    enabled: bool,
    text_size: Dimensionf,
}

const CHECK_LABEL_GAP: f32 = 3.0;

impl Checkbox {
    /// Creates a checkbox.
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self { label: label.into(), checked, hovered: false, enabled: true, text_size: Dimensionf::new(0.0, 0.0) }
    }

    fn box_rect(&self, rect: Rectf, size: f32) -> Rectf { rectf(rect.x, rect.y + (rect.height - size) / 2.0, size, size) }
}

impl Control for Checkbox {
    fn compute_size(&self, style: &Style, metrics: &dyn TextMetrics) -> Vec2f {
        let text = metrics.measure(&self.label);
        let gap = if self.label.is_empty() { 0.0 } else { CHECK_LABEL_GAP };
        vec2f(style.check_size + gap + text.width, style.check_size.max(text.height))
    }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        self.text_size = ctx.measure(&self.label);
        self.hovered = ctx.mouse_over();
        if self.hovered && ctx.input().left_pressed() {
            self.checked = !self.checked;
            return ResourceState::CHANGE;
        }
        ResourceState::NONE
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let size = draw.style().check_size;
        let b = self.box_rect(rect, size);
        if self.checked {
            draw.draw_rect(b, draw.color(if self.enabled { ControlColor::Accent } else { ControlColor::TextDisabled }));
            // tick
            let color = draw.color(ControlColor::Text);
            let a = vec2f(b.x + size * 0.2, b.y + size * 0.5);
            let m = vec2f(b.x + size * 0.42, b.y + size * 0.72);
            let c = vec2f(b.x + size * 0.8, b.y + size * 0.28);
            draw.draw_line(a, m, color, 2.0);
            draw.draw_line(m, c, color, 2.0);
        } else {
            let fill = if self.hovered { ControlColor::ButtonHover } else { ControlColor::Base };
            draw.draw_rect(b, draw.color(fill));
            draw.draw_box(b, draw.color(ControlColor::Border));
        }
        let text_rect = rectf(rect.x + size + CHECK_LABEL_GAP, rect.y, self.text_size.width, rect.height);
        let color = draw.color(text_color(self.enabled));
        draw.draw_control_text(&self.label, text_rect, color);
    }
}

#[derive(Clone, Debug)]
/// One choice of a group; pressing it selects it. Selecting is one-way, the group owner clears the others.
pub struct RadioButton {
    /// Text displayed next to the dot.
    pub label: String,
    /// `true` when this choice is the group's current value.
    pub selected: bool,
    hovered: bool,
    enabled: bool,
    text_size: Dimensionf,
}

impl RadioButton {
    /// Creates a radio button.
    pub fn new(label: impl Into<String>, selected: bool) -> Self {
        Self { label: label.into(), selected, hovered: false, enabled: true, text_size: Dimensionf::new(0.0, 0.0) }
    }
}

impl Control for RadioButton {
    fn compute_size(&self, style: &Style, metrics: &dyn TextMetrics) -> Vec2f {
        let text = metrics.measure(&self.label);
        let gap = if self.label.is_empty() { 0.0 } else { CHECK_LABEL_GAP };
        vec2f(style.check_size + gap + text.width, style.check_size.max(text.height))
    }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        self.text_size = ctx.measure(&self.label);
        self.hovered = ctx.mouse_over();
        if self.hovered && ctx.input().left_pressed() && !self.selected {
            self.selected = true;
            return ResourceState::CHANGE;
        }
        ResourceState::NONE
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let size = draw.style().check_size;
        let b = rectf(rect.x, rect.y + (rect.height - size) / 2.0, size, size);
        let fill = if self.hovered { ControlColor::ButtonHover } else { ControlColor::Base };
        draw.draw_round_rect(b, size / 2.0, draw.color(fill));
        if self.selected {
            let dot = size / 2.0;
            let d = rectf(b.x + (size - dot) / 2.0, b.y + (size - dot) / 2.0, dot, dot);
            draw.draw_round_rect(d, dot / 2.0, draw.color(if self.enabled { ControlColor::Accent } else { ControlColor::TextDisabled }));
        }
        let text_rect = rectf(rect.x + size + CHECK_LABEL_GAP, rect.y, self.text_size.width, rect.height);
        let color = draw.color(text_color(self.enabled));
        draw.draw_control_text(&self.label, text_rect, color);
    }
}

#[derive(Clone, Debug)]
/// Horizontal bar filled to a fraction in `0..=1`.
pub struct ProgressBar {
    /// Filled fraction.
    pub value: f32,
    /// Overrides [`Style::bar_size`].
    pub size: Option<Vec2f>,
    enabled: bool,
}

impl ProgressBar {
    /// Creates a progress bar.
    pub fn new(value: f32) -> Self { Self { value, size: None, enabled: true } }
}

impl Control for ProgressBar {
    fn compute_size(&self, style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { self.size.unwrap_or(style.bar_size) }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        ResourceState::NONE
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        draw.draw_rect(rect, draw.color(ControlColor::Base));
        let filled = rectf(rect.x, rect.y, rect.width * self.value.clamp(0.0, 1.0), rect.height);
        let fill = if self.enabled { ControlColor::Accent } else { ControlColor::TextDisabled };
        draw.draw_rect(filled, draw.color(fill));
        draw.draw_box(rect, draw.color(ControlColor::Border));
    }
}

#[derive(Clone, Debug, Default)]
/// Thin horizontal rule.
pub struct Separator {
    /// Overrides the default width ([`Style::bar_size`]'s width).
    pub width: Option<f32>,
}

impl Separator {
    /// Creates a separator.
    pub fn new() -> Self { Self::default() }
}

impl Control for Separator {
    fn compute_size(&self, style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { vec2f(self.width.unwrap_or(style.bar_size.x), 1.0) }

    fn update(&mut self, _ctx: &mut ControlCtx<'_>) -> ResourceState { ResourceState::NONE }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let y = rect.y + rect.height / 2.0;
        let color = draw.color(ControlColor::Separator);
        draw.draw_line(vec2f(rect.x, y), vec2f(rect.x + rect.width, y), color, 1.0);
    }
}

#[derive(Clone, Debug)]
/// Renderer-owned image shown at a fixed size.
pub struct Image {
    /// Image handle.
    pub image: ImageId,
    /// Displayed size.
    pub size: Vec2f,
    /// Tint.
    pub tint: Color,
}

impl Image {
    /// Creates an image control with a white tint.
    pub fn new(image: ImageId, size: Vec2f) -> Self { Self { image, size, tint: Color { r: 255, g: 255, b: 255, a: 255 } } }
}

impl Control for Image {
    fn compute_size(&self, _style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { self.size }

    fn update(&mut self, _ctx: &mut ControlCtx<'_>) -> ResourceState { ResourceState::NONE }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) { draw.draw_image(self.image, rect, self.tint); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::run_update;
    use crate::{FixedMetrics, Input, InputArbiter, MouseButton};

    #[test]
    fn button_size_wraps_label_with_padding() {
        let style = Style::default();
        let metrics = FixedMetrics::new(8.0, 16.0);
        let size = Button::new("OK").compute_size(&style, &metrics);
        assert_eq!((size.x, size.y), (16.0 + 14.0, 16.0 + 8.0));
    }

    #[test]
    fn button_submits_on_click() {
        let rect = rectf(0.0, 0.0, 40.0, 20.0);
        let mut button = Button::new("Go");
        let mut arbiter = InputArbiter::new();
        let mut input = Input::default();
        input.mousedown(10.0, 10.0, MouseButton::LEFT);
        let res = run_update(&mut button, rect, Some(vec2f(10.0, 10.0)), &input, &mut arbiter);
        assert!(res.is_active());
        assert!(!res.is_submitted());

        input.epilogue();
        input.mouseup(10.0, 10.0, MouseButton::LEFT);
        let res = run_update(&mut button, rect, Some(vec2f(10.0, 10.0)), &input, &mut arbiter);
        assert!(res.is_submitted());
    }

    #[test]
    fn button_without_cursor_never_reacts() {
        let rect = rectf(0.0, 0.0, 40.0, 20.0);
        let mut button = Button::new("Go");
        let mut arbiter = InputArbiter::new();
        let mut input = Input::default();
        input.mousedown(10.0, 10.0, MouseButton::LEFT);
        let res = run_update(&mut button, rect, None, &input, &mut arbiter);
        assert!(res.is_none());
        assert!(!arbiter.is_capturing());
    }

    #[test]
    fn checkbox_toggles_on_press() {
        let rect = rectf(0.0, 0.0, 60.0, 16.0);
        let mut check = Checkbox::new("a", false);
        let mut arbiter = InputArbiter::new();
        let mut input = Input::default();
        input.mousedown(4.0, 4.0, MouseButton::LEFT);
        assert!(run_update(&mut check, rect, Some(vec2f(4.0, 4.0)), &input, &mut arbiter).is_changed());
        assert!(check.checked);

        // holding does not toggle again
        input.epilogue();
        assert!(run_update(&mut check, rect, Some(vec2f(4.0, 4.0)), &input, &mut arbiter).is_none());
        assert!(check.checked);
    }

    #[test]
    fn radio_button_only_selects() {
        let rect = rectf(0.0, 0.0, 60.0, 16.0);
        let mut radio = RadioButton::new("a", false);
        let mut arbiter = InputArbiter::new();
        let mut input = Input::default();
        input.mousedown(4.0, 4.0, MouseButton::LEFT);
        assert!(run_update(&mut radio, rect, Some(vec2f(4.0, 4.0)), &input, &mut arbiter).is_changed());
        assert!(radio.selected);

        // a second press on a selected choice changes nothing
        input.epilogue();
        input.mouseup(4.0, 4.0, MouseButton::LEFT);
        input.epilogue();
        input.mousedown(4.0, 4.0, MouseButton::LEFT);
        assert!(run_update(&mut radio, rect, Some(vec2f(4.0, 4.0)), &input, &mut arbiter).is_none());
        assert!(radio.selected);
    }

    #[test]
    fn bars_default_to_style_size() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let size = ProgressBar::new(0.5).compute_size(&style, &metrics);
        assert_eq!((size.x, size.y), (style.bar_size.x, style.bar_size.y));
        let size = Separator::new().compute_size(&style, &metrics);
        assert_eq!((size.x, size.y), (style.bar_size.x, 1.0));
    }

    #[test]
    fn progress_fill_is_clamped() {
        let style = Style::default();
        let metrics = FixedMetrics::default();
        let mut commands = Vec::new();
        let mut draw = DrawCtx::new(&mut commands, &style, &metrics);
        ProgressBar::new(2.0).draw(&mut draw, rectf(0.0, 0.0, 100.0, 10.0));
        match &commands[1] {
            crate::Command::Rect { rect, .. } => assert_eq!(rect.width, 100.0),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
