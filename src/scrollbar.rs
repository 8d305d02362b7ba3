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
use crate::{rect_contains, ControlColor, Delay, DrawCtx, Input, Rectf, Repeater, Style, Transition, Vec2f};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Axis a scrollbar moves along.
pub enum ScrollAxis {
    /// Scrolls content up and down.
    Vertical,
    /// Scrolls content left and right.
    Horizontal,
}

impl ScrollAxis {
    fn along(self, p: Vec2f) -> f32 {
        match self {
            ScrollAxis::Vertical => p.y,
            ScrollAxis::Horizontal => p.x,
        }
    }

    fn start(self, r: &Rectf) -> f32 {
        match self {
            ScrollAxis::Vertical => r.y,
            ScrollAxis::Horizontal => r.x,
        }
    }

    fn length(self, r: &Rectf) -> f32 {
        match self {
            ScrollAxis::Vertical => r.height,
            ScrollAxis::Horizontal => r.width,
        }
    }
}

const SNAP_EPSILON: f32 = 0.01;

/// One-dimensional scrollable range with smoothed motion, thumb drag, and track-press auto-repeat.
///
/// `value` always stays within `minimum ..= maximum - viewport`. When the viewport covers the whole range the
/// thumb length is zero and the bar neither draws nor reacts.
#[derive(Clone, Debug)]
pub struct ScrollBar {
    axis: ScrollAxis,
    minimum: f32,
    maximum: f32,
    viewport: f32,
    value: f32,
    target: f32,
    velocity: f32,

    track: Rectf,
    thumb: Rectf,
    thumb_length: f32,
    min_thumb: f32,
    smooth_time: f32,

    hovered: bool,
    grabbed: bool,
    grab_offset: f32,
    track_pressed: bool,
    large_scroll_dir: f32,
    large_scroll_point: f32,

    repeater: Repeater,
    hold: Delay,
    fade: Transition,
}

impl ScrollBar {
    /// Creates an empty bar using the default style's timing.
    pub fn new(axis: ScrollAxis) -> Self { Self::with_style(axis, &Style::default()) }

    /// Creates an empty bar using the timing constants of `style`.
    pub fn with_style(axis: ScrollAxis, style: &Style) -> Self {
        Self {
            axis,
            minimum: 0.0,
            maximum: 0.0,
            viewport: 0.0,
            value: 0.0,
            target: 0.0,
            velocity: 0.0,
            track: Rectf::default(),
            thumb: Rectf::default(),
            thumb_length: 0.0,
            min_thumb: style.min_thumb_size,
            smooth_time: style.scroll_smooth_time,
            hovered: false,
            grabbed: false,
            grab_offset: 0.0,
            track_pressed: false,
            large_scroll_dir: 0.0,
            large_scroll_point: 0.0,
            repeater: Repeater::new(style.repeat_delay, style.repeat_interval),
            hold: Delay::new(style.fade_hold),
            fade: Transition::new(style.fade_in, style.fade_out),
        }
    }

    /// Re-reads sizing and timing constants from `style`.
    pub fn apply_style(&mut self, style: &Style) {
        self.min_thumb = style.min_thumb_size;
        self.smooth_time = style.scroll_smooth_time;
        self.repeater = Repeater::new(style.repeat_delay, style.repeat_interval);
        self.hold.set_duration(style.fade_hold);
        self.fade.set_durations(style.fade_in, style.fade_out);
        self.update_thumb();
    }

    /// Returns the axis of this bar.
    pub fn axis(&self) -> ScrollAxis { self.axis }

    /// Current (displayed) scroll position.
    pub fn value(&self) -> f32 { self.value }

    /// Position the smoothed value is moving toward.
    pub fn target(&self) -> f32 { self.target }

    /// Lower end of the range.
    pub fn minimum(&self) -> f32 { self.minimum }

    /// Upper end of the range.
    pub fn maximum(&self) -> f32 { self.maximum }

    /// Visible extent of the range.
    pub fn viewport(&self) -> f32 { self.viewport }

    /// Length of the thumb along the axis; zero when the bar is absent.
    pub fn thumb_length(&self) -> f32 { self.thumb_length }

    /// Returns `true` when the range exceeds the viewport.
    pub fn is_visible(&self) -> bool { self.thumb_length > 0.0 }

    /// Track rectangle passed to the last [`ScrollBar::layout`].
    pub fn track_rect(&self) -> Rectf { self.track }

    /// Thumb rectangle derived from the current value.
    pub fn thumb_rect(&self) -> Rectf { self.thumb }

    /// Returns `true` while the thumb is being dragged.
    pub fn is_grabbed(&self) -> bool { self.grabbed }

    /// Returns `true` while the track is held outside the thumb.
    pub fn is_track_pressed(&self) -> bool { self.track_pressed }

    /// Returns `true` if the pointer was over the track during the last update.
    pub fn is_hovered(&self) -> bool { self.hovered }

    /// Fade-in/out level in `0..=1`.
    pub fn visibility(&self) -> f32 { self.fade.value() }

    fn clamp(&self, v: f32) -> f32 { v.min(self.maximum - self.viewport).max(self.minimum) }

    /// Places the bar inside `track` and recomputes the thumb.
    pub fn layout(&mut self, track: Rectf) {
        self.track = track;
        self.update_thumb();
    }

    /// Replaces the range and viewport, re-clamping the value.
    pub fn update_constraints(&mut self, minimum: f32, maximum: f32, viewport: f32) {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.viewport = viewport.max(0.0);
        self.value = self.clamp(self.value);
        self.target = self.clamp(self.target);
        self.update_thumb();
    }

    /// Moves the scroll target by `delta`. Teleporting moves the value immediately; otherwise it is smoothed
    /// toward the target over the following updates.
    pub fn scroll(&mut self, delta: f32, teleport: bool) {
        if delta == 0.0 {
            return;
        }
        self.target = self.clamp(self.target + delta);
        if teleport {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.update_thumb();
    }

    /// Jumps to an absolute value.
    pub fn set_value(&mut self, value: f32) {
        self.target = self.clamp(value);
        self.value = self.target;
        self.velocity = 0.0;
        self.update_thumb();
    }

    fn update_thumb(&mut self) {
        let range = self.maximum - self.minimum;
        let track_len = self.axis.length(&self.track);
        let mut thumb = self.track;
        if range <= 0.0 || self.viewport >= range || track_len <= 0.0 {
            self.thumb_length = 0.0;
            match self.axis {
                ScrollAxis::Vertical => thumb.height = 0.0,
                ScrollAxis::Horizontal => thumb.width = 0.0,
            }
            self.thumb = thumb;
            return;
        }

        let length = (track_len * self.viewport / range).max(self.min_thumb).min(track_len);
        let free = track_len - length;
        let t = (self.value - self.minimum) / (range - self.viewport);
        let offset = free * t.clamp(0.0, 1.0);
        match self.axis {
            ScrollAxis::Vertical => {
                thumb.y += offset;
                thumb.height = length;
            }
            ScrollAxis::Horizontal => {
                thumb.x += offset;
                thumb.width = length;
            }
        }
        self.thumb_length = length;
        self.thumb = thumb;
    }

    // value whose position on the track corresponds to the pixel `pos`
    fn value_at(&self, pos: f32) -> f32 {
        let track_len = self.axis.length(&self.track);
        if track_len <= 0.0 {
            return self.minimum;
        }
        let t = (pos - self.axis.start(&self.track)) / track_len;
        self.minimum + t.clamp(0.0, 1.0) * (self.maximum - self.minimum)
    }

    fn large_scroll_done(&self) -> bool {
        if self.large_scroll_dir > 0.0 {
            self.target + self.viewport > self.large_scroll_point || self.target >= self.maximum - self.viewport
        } else if self.large_scroll_dir < 0.0 {
            self.target <= self.large_scroll_point || self.target <= self.minimum
        } else {
            true
        }
    }

    /// Runs one frame of interaction. `cursor` is `None` when the bar may not react to the pointer.
    pub fn update(&mut self, cursor: Option<Vec2f>, input: &Input, dt: f32) {
        let held = input.left_down();
        if !held || self.thumb_length <= 0.0 {
            self.grabbed = false;
            self.track_pressed = false;
        }

        self.hovered = self.thumb_length > 0.0 && cursor.is_some_and(|p| rect_contains(&self.track, p));

        if let Some(p) = cursor {
            if self.thumb_length > 0.0 && held && input.left_pressed() && !self.grabbed && !self.track_pressed {
                if rect_contains(&self.thumb, p) {
                    self.grabbed = true;
                    self.grab_offset = self.axis.along(p) - self.axis.start(&self.thumb);
                } else if rect_contains(&self.track, p) {
                    self.track_pressed = true;
                    self.large_scroll_point = self.value_at(self.axis.along(p));
                    self.large_scroll_dir = (self.large_scroll_point - self.target).signum();
                    self.repeater.reset();
                }
            }

            if self.grabbed {
                let free = self.axis.length(&self.track) - self.thumb_length;
                if free > 0.0 {
                    let thumb_start = self.axis.along(p) - self.grab_offset - self.axis.start(&self.track);
                    let scrollable = self.maximum - self.minimum - self.viewport;
                    self.set_value(self.minimum + thumb_start / free * scrollable);
                }
            }
        }

        let fires = self.repeater.update(self.track_pressed, dt);
        for _ in 0..fires {
            if self.large_scroll_done() {
                break;
            }
            let step = self.large_scroll_dir * self.viewport;
            self.scroll(step, false);
        }

        self.smooth(dt);

        let moving = (self.value - self.target).abs() > SNAP_EPSILON;
        let active = self.hovered || self.grabbed || self.track_pressed || moving;
        let on = self.hold.update(active, dt);
        self.fade.update(on, dt);
        self.update_thumb();
    }

    // critically damped spring toward the target
    fn smooth(&mut self, dt: f32) {
        if (self.target - self.value).abs() <= SNAP_EPSILON || self.smooth_time <= 0.0 {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        if dt <= 0.0 {
            return;
        }

        let omega = 2.0 / self.smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = self.value - self.target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut next = self.target + (change + temp) * decay;

        // never overshoot
        if (self.target - self.value > 0.0) == (next > self.target) {
            next = self.target;
            self.velocity = 0.0;
        }
        self.value = self.clamp(next);
    }

    /// Records the track and thumb. Draws nothing when the bar is absent.
    pub fn draw(&self, draw: &mut DrawCtx<'_>) {
        if self.thumb_length <= 0.0 {
            return;
        }
        let fade = self.fade.value();
        let radius = match self.axis {
            ScrollAxis::Vertical => self.track.width,
            ScrollAxis::Horizontal => self.track.height,
        } / 2.0;
        let base = draw.color(ControlColor::ScrollBase).fade(fade);
        let thumb = draw.color(ControlColor::ScrollThumb).fade(fade.max(0.4));
        draw.draw_round_rect(self.track, radius, base);
        draw.draw_round_rect(self.thumb, radius, thumb);
    }
}
