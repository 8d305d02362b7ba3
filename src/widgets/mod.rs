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
//! Control abstraction and the built-in controls.

mod core_widgets;
mod slider;
mod textbox;

pub use core_widgets::*;
pub use slider::*;
pub use textbox::*;

use crate::{rect_contains, Dimensionf, DrawCtx, Id, Input, InputArbiter, Rectf, ResourceState, Style, TextMetrics, Vec2f};
use std::any::Any;

/// Type-erasure helper implemented for every `'static` type.
pub trait AsAny: Any {
    /// Returns `self` as [`Any`].
    fn as_any(&self) -> &dyn Any;
    /// Converts the box into a boxed [`Any`], keeping the concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any { self }
    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
}

/// A unit of UI owned by exactly one window.
///
/// Every frame the owning window asks for the control's size, places it, runs `update` with the placement and
/// (when eligible) a cursor, and later calls `draw` with the final rectangle.
pub trait Control: AsAny {
    /// Returns the size the control wants. Must not depend on where it is placed.
    fn compute_size(&self, style: &Style, metrics: &dyn TextMetrics) -> Vec2f;

    /// Reacts to input for this frame.
    fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState;

    /// Records draw commands in content-local coordinates.
    fn draw(&self, draw: &mut DrawCtx<'_>, rect: Rectf);
}

/// Per-call context handed to [`Control::update`].
pub struct ControlCtx<'a> {
    id: Id,
    rect: Rectf,
    cursor: Option<Vec2f>,
    enabled: bool,
    input: &'a Input,
    arbiter: &'a mut InputArbiter,
    style: &'a Style,
    metrics: &'a dyn TextMetrics,
}

impl<'a> ControlCtx<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: Id,
        rect: Rectf,
        cursor: Option<Vec2f>,
        enabled: bool,
        input: &'a Input,
        arbiter: &'a mut InputArbiter,
        style: &'a Style,
        metrics: &'a dyn TextMetrics,
    ) -> Self {
        Self { id, rect, cursor, enabled, input, arbiter, style, metrics }
    }

    /// Returns the control identifier.
    pub fn id(&self) -> Id { self.id }

    /// Returns the placement rectangle, in content-local coordinates.
    pub fn rect(&self) -> Rectf { self.rect }

    /// Returns the content-local cursor, or `None` if the control may not react to the pointer this frame.
    pub fn cursor(&self) -> Option<Vec2f> { self.cursor }

    /// Returns `false` inside disabled windows.
    pub fn is_enabled(&self) -> bool { self.enabled }

    /// Returns the raw device state.
    pub fn input(&self) -> &'a Input { self.input }

    /// Returns the active style.
    pub fn style(&self) -> &Style { self.style }

    /// Measures `text` with the application's font.
    pub fn measure(&self, text: &str) -> Dimensionf { self.metrics.measure(text) }

    /// Returns the elapsed frame time, in seconds.
    pub fn delta_time(&self) -> f32 { self.input.delta_time() }

    /// Returns `true` if the cursor lies inside the placement rectangle.
    pub fn mouse_over(&self) -> bool { self.mouse_over_rect(self.rect) }

    /// Returns `true` if the cursor lies inside `rect`.
    pub fn mouse_over_rect(&self, rect: Rectf) -> bool { self.enabled && self.cursor.is_some_and(|p| rect_contains(&rect, p)) }

    /// Takes exclusive ownership of the pointer until [`ControlCtx::release`].
    pub fn capture(&mut self) -> bool { self.arbiter.try_capture(self.id, true) }

    /// Gives up a capture taken with [`ControlCtx::capture`].
    pub fn release(&mut self) {
        if self.arbiter.is_captured_by(self.id) {
            self.arbiter.try_capture(self.id, false);
        }
    }

    /// Returns `true` while this control holds the capture.
    pub fn is_captured(&self) -> bool { self.arbiter.is_captured_by(self.id) }

    /// Takes keyboard focus.
    pub fn focus(&mut self) { self.arbiter.set_focus(self.id); }

    /// Gives up keyboard focus if this control holds it.
    pub fn blur(&mut self) { self.arbiter.clear_focus(self.id); }

    /// Returns `true` while this control holds keyboard focus.
    pub fn is_focused(&self) -> bool { self.arbiter.is_focused(self.id) }
}

#[derive(Copy, Clone, Debug, Default)]
/// Press/hold/click tracking shared by clickable controls.
///
/// A click is reported when the button is released over the area it was pressed on. The press captures the
/// arbiter so the hold survives the cursor leaving the window.
pub struct ButtonBehavior {
    hovered: bool,
    held: bool,
    clicked: bool,
}

impl ButtonBehavior {
    /// Advances the behaviour for the clickable `area`.
    pub fn update(&mut self, ctx: &mut ControlCtx<'_>, area: Rectf) {
        self.clicked = false;
        if !ctx.is_enabled() {
            if self.held {
                ctx.release();
            }
            *self = Self::default();
            return;
        }

        if self.held && !ctx.is_captured() {
            // the capture was dropped from outside, e.g. while the control was not declared
            self.held = false;
        }

        self.hovered = ctx.mouse_over_rect(area);
        if self.hovered && ctx.input().left_pressed() && !self.held && ctx.capture() {
            self.held = true;
        }
        if self.held && !ctx.input().left_down() {
            self.clicked = self.hovered;
            self.held = false;
            ctx.release();
        }
    }

    /// Returns `true` while the cursor is over the area.
    pub fn is_hovered(&self) -> bool { self.hovered }

    /// Returns `true` while the press that started on the area continues.
    pub fn is_held(&self) -> bool { self.held }

    /// Returns `true` on the frame a click completed.
    pub fn is_clicked(&self) -> bool { self.clicked }
}
