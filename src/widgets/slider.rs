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
use crate::{rectf, vec2f, ControlColor, Dimensionf, DrawCtx, Rectf, ResourceState, Style, TextMetrics, Vec2f};
use std::fmt::Write;

const GRIP_WIDTH: f32 = 10.0;

#[derive(Clone, Debug)]
/// Horizontal slider bound to an `f32`.
///
/// Dragging the grip captures the pointer, so the drag keeps working outside the window. Pressing the track
/// jumps the value to the pressed position.
pub struct Slider {
    /// Current value; written back to the bound value after each update.
    pub value: f32,
    /// Lower bound of the range.
    pub low: f32,
    /// Upper bound of the range.
    pub high: f32,
    /// Snapping step (0 for continuous).
    pub step: f32,
    /// Digits shown after the decimal point.
    pub precision: usize,
    /// Overrides [`Style::bar_size`].
    pub size: Option<Vec2f>,
    grip: ButtonBehavior,
    grab_offset: f32,
    enabled: bool,
    text: String,
    text_size: Dimensionf,
}

impl Slider {
    /// Creates a continuous slider over `low..=high`.
    pub fn new(value: f32, low: f32, high: f32) -> Self {
        Self {
            value,
            low,
            high,
            step: 0.0,
            precision: 2,
            size: None,
            grip: ButtonBehavior::default(),
            grab_offset: 0.0,
            enabled: true,
            text: String::new(),
            text_size: Dimensionf::new(0.0, 0.0),
        }
    }

    /// Returns the slider with snapping to multiples of `step` from `low`.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Returns `true` while the grip is dragged.
    pub fn is_dragging(&self) -> bool { self.grip.is_held() }

    fn grip_rect(&self, rect: Rectf) -> Rectf {
        let range = self.high - self.low;
        let travel = (rect.width - GRIP_WIDTH).max(0.0);
        let t = if range != 0.0 { ((self.value - self.low) / range).clamp(0.0, 1.0) } else { 0.0 };
        rectf(rect.x + t * travel, rect.y, GRIP_WIDTH.min(rect.width), rect.height)
    }

    // value whose grip would start at `grip_x`
    fn value_at(&self, rect: Rectf, grip_x: f32) -> f32 {
        let travel = rect.width - GRIP_WIDTH;
        if travel <= 0.0 {
            return self.low;
        }
        self.low + (grip_x - rect.x) / travel * (self.high - self.low)
    }

    fn normalize(&self, v: f32) -> f32 {
        let mut v = v;
        if self.step > 0.0 {
            v = self.low + ((v - self.low) / self.step).round() * self.step;
        }
        let (lo, hi) = if self.low <= self.high { (self.low, self.high) } else { (self.high, self.low) };
        v.clamp(lo, hi)
    }
}

impl Control for Slider {
    fn compute_size(&self, style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { self.size.unwrap_or(style.bar_size) }

    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
        self.enabled = ctx.is_enabled();
        let rect = ctx.rect();
        let last = self.value;
        let grip = self.grip_rect(rect);

        self.grip.update(ctx, grip);
        let pressed = ctx.input().left_pressed();
        if let Some(cursor) = ctx.cursor() {
            if self.grip.is_held() {
                if pressed {
                    self.grab_offset = cursor.x - grip.x;
                }
                self.value = self.value_at(rect, cursor.x - self.grab_offset);
            } else if pressed && ctx.mouse_over() {
                self.value = self.value_at(rect, cursor.x - GRIP_WIDTH / 2.0);
            }
        }
        self.value = if self.high == self.low { self.low } else { self.normalize(self.value) };

        self.text.clear();
        let _ = write!(self.text, "{:.*}", self.precision, self.value);
        self.text_size = ctx.measure(&self.text);

        let mut res = ResourceState::NONE;
        if self.grip.is_held() {
            res |= ResourceState::ACTIVE;
        }
        if self.value != last {
            res |= ResourceState::CHANGE;
        }
        res
    }

    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf) {
        let track = rectf(rect.x + GRIP_WIDTH / 2.0, rect.y + rect.height / 2.0 - 2.0, (rect.width - GRIP_WIDTH).max(0.0), 4.0);
        draw.draw_rect(track, draw.color(ControlColor::Base));

        let mut fill = ControlColor::Button;
        if self.grip.is_held() {
            fill.active();
        } else if self.grip.is_hovered() {
            fill.hover();
        }
        let radius = draw.style().corner_radius;
        draw.draw_round_rect(self.grip_rect(rect), radius, draw.color(fill));

        let color = draw.color(if self.enabled { ControlColor::Text } else { ControlColor::TextDisabled });
        let x = rect.x + (rect.width - self.text_size.width) / 2.0;
        draw.draw_control_text(&self.text, rectf(x, rect.y, self.text_size.width, rect.height), color);
    }
}
