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
use crate::{
    expand_rectf, rect_contains, rectf, vec2f, Command, Control, ControlColor, ControlCtx, CursorIcon, Dimensionf, DrawCtx, Id, Input, InputArbiter,
    LayoutCursor, Rectf, ResizeDir, ResourceState, ScrollAxis, ScrollBar, Style, TextMetrics, Vec2f, WindowFlags,
};
use std::any::TypeId;
use std::collections::HashMap;

/// Interaction state of a window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Idle; the window hit-tests the pointer every frame.
    Default,
    /// Being dragged by its titlebar.
    Moving,
    /// Being resized from the given edges.
    Resizing(ResizeDir),
    /// One of its scrollbars is being operated.
    Scrolling(ScrollAxis),
}

/// Borrowed per-frame environment shared by every window of the runtime.
pub(crate) struct FrameEnv<'a> {
    pub input: &'a Input,
    pub arbiter: &'a mut InputArbiter,
    pub style: &'a Style,
    pub metrics: &'a dyn TextMetrics,
    pub canvas: Dimensionf,
}

/// Horizontal extent of a dragged window that always stays on the canvas.
const DRAG_KEEP_VISIBLE: f32 = 20.0;

struct ControlEntry {
    control: Box<dyn Control>,
    type_id: TypeId,
    rect: Rectf,
    keyed: bool,
    declared: bool,
}

/// Persistent state of one window: geometry, interaction state, scrollbars and the controls it owns.
///
/// Controls are addressed two ways. Unkeyed controls are identified by their position in the frame's
/// declaration sequence and survive only while the same control type recurs at the same position; a type
/// change at a position discards that control and every later one. Keyed controls are looked up by key and
/// survive regardless of order, for as long as the window lives.
pub struct Window {
    key: String,
    id: Id,
    title: String,
    flags: WindowFlags,
    rect: Rectf,
    state: WindowState,

    title_rect: Rectf,
    viewport: Rectf,
    vscroll: ScrollBar,
    hscroll: ScrollBar,
    layout: LayoutCursor,
    content_size: Vec2f,

    slots: Vec<Id>,
    slot_cursor: usize,
    entries: HashMap<Id, ControlEntry>,
    draw_list: Vec<Id>,

    declared: bool,
    first_frame: bool,
    hovered: bool,
    content_hovered: bool,
    hovered_grip: ResizeDir,
    front_requested: bool,
    grab_rect: Rectf,
    grab_cursor: Vec2f,
    pos_override: Option<Vec2f>,
    size_override: Option<Vec2f>,
}

impl Window {
    pub(crate) fn new(key: &str, flags: WindowFlags, origin: Vec2f, style: &Style) -> Self {
        let id = Id::random();
        log::debug!("window '{}' created as {}", key, id);
        let mut window = Self {
            key: String::from(key),
            id,
            title: String::from(key),
            flags,
            rect: rectf(origin.x, origin.y, 0.0, 0.0),
            state: WindowState::Default,
            title_rect: Rectf::default(),
            viewport: Rectf::default(),
            vscroll: ScrollBar::with_style(ScrollAxis::Vertical, style),
            hscroll: ScrollBar::with_style(ScrollAxis::Horizontal, style),
            layout: LayoutCursor::new(style.padding, style.spacing),
            content_size: vec2f(0.0, 0.0),
            slots: Vec::new(),
            slot_cursor: 0,
            entries: HashMap::new(),
            draw_list: Vec::new(),
            declared: false,
            first_frame: true,
            hovered: false,
            content_hovered: false,
            hovered_grip: ResizeDir::NONE,
            front_requested: false,
            grab_rect: Rectf::default(),
            grab_cursor: vec2f(0.0, 0.0),
            pos_override: None,
            size_override: None,
        };
        window.compute_layout(style);
        window
    }

    /// Key the window was declared with.
    pub fn key(&self) -> &str { &self.key }

    /// Opaque identity, stable for the life of the window.
    pub fn id(&self) -> Id { self.id }

    /// Text shown in the titlebar.
    pub fn title(&self) -> &str { &self.title }

    /// Flags of the latest declaration.
    pub fn flags(&self) -> WindowFlags { self.flags }

    /// Outer rectangle, titlebar included.
    pub fn rect(&self) -> Rectf { self.rect }

    /// Current interaction state.
    pub fn state(&self) -> WindowState { self.state }

    /// Size of the content declared last frame, padding included.
    pub fn content_size(&self) -> Vec2f { self.content_size }

    /// Visible content region, in canvas coordinates.
    pub fn viewport(&self) -> Rectf { self.viewport }

    /// Titlebar region, in canvas coordinates. Zero height without a titlebar.
    pub fn title_rect(&self) -> Rectf { self.title_rect }

    /// Current scroll offset.
    pub fn scroll(&self) -> Vec2f { vec2f(self.hscroll.value(), self.vscroll.value()) }

    /// Returns the scrollbar of `axis`.
    pub fn scrollbar(&self, axis: ScrollAxis) -> &ScrollBar {
        match axis {
            ScrollAxis::Vertical => &self.vscroll,
            ScrollAxis::Horizontal => &self.hscroll,
        }
    }

    /// Returns `true` if the window owned the hover this frame.
    pub fn is_hovered(&self) -> bool { self.hovered }

    /// Returns `true` if the pointer is over the content region and the window may pass it to its controls.
    pub fn is_content_hovered(&self) -> bool { self.content_hovered }

    /// Number of controls currently kept alive.
    pub fn control_count(&self) -> usize { self.entries.len() }

    /// Number of keyed controls currently kept alive.
    pub fn keyed_count(&self) -> usize { self.entries.values().filter(|e| e.keyed).count() }

    pub(crate) fn set_flags(&mut self, flags: WindowFlags) { self.flags = flags; }

    pub(crate) fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = String::from(title);
        }
    }

    pub(crate) fn mark_declared(&mut self) { self.declared = true; }

    pub(crate) fn is_declared(&self) -> bool { self.declared }

    pub(crate) fn take_front_request(&mut self) -> bool { std::mem::take(&mut self.front_requested) }

    pub(crate) fn set_pos_override(&mut self, pos: Vec2f) { self.pos_override = Some(pos); }

    pub(crate) fn set_size_override(&mut self, size: Vec2f) { self.size_override = Some(size); }

    /// Pins the window to `rect` immediately and for the end of this frame.
    pub(crate) fn set_fixed_rect(&mut self, rect: Rectf, style: &Style) {
        self.rect = rect;
        self.pos_override = Some(vec2f(rect.x, rect.y));
        self.size_override = Some(vec2f(rect.width, rect.height));
        self.compute_layout(style);
    }

    pub(crate) fn apply_style(&mut self, style: &Style) {
        self.vscroll.apply_style(style);
        self.hscroll.apply_style(style);
    }

    pub(crate) fn same_line(&mut self) { self.layout.same_line(); }

    /// Smallest size the window may take, derived from its flags.
    pub fn min_size(&self, style: &Style) -> Vec2f {
        let f = self.flags;
        if !f.has_background() && !f.has_titlebar() {
            return vec2f(style.grip_size * 2.0, style.grip_size * 2.0);
        }
        let mut size = vec2f(style.padding * 4.0, self.title_height(style) + style.padding * 2.0);
        if f.needs_scrollbars() {
            size.x += style.scrollbar_size + style.min_thumb_size;
            size.y += style.scrollbar_size + style.min_thumb_size;
        }
        size
    }

    fn title_height(&self, style: &Style) -> f32 {
        if self.flags.has_titlebar() { style.title_height } else { 0.0 }
    }

    // titlebar, viewport and scrollbar tracks from the current rect and last content size
    fn compute_layout(&mut self, style: &Style) {
        let r = self.rect;
        let th = self.title_height(style).min(r.height.max(0.0));
        self.title_rect = rectf(r.x, r.y, r.width, th);
        let body = rectf(r.x, r.y + th, r.width, (r.height - th).max(0.0));

        let sb = style.scrollbar_size;
        let content = self.content_size;
        let scrollable = self.flags.is_scrollable();
        let mut view = vec2f(body.width, body.height);
        let mut need_v = scrollable && content.y > view.y;
        if need_v {
            view.x -= sb;
        }
        let need_h = scrollable && content.x > view.x;
        if need_h {
            view.y -= sb;
            if !need_v && content.y > view.y {
                need_v = true;
                view.x -= sb;
            }
        }
        view = vec2f(view.x.max(0.0), view.y.max(0.0));
        self.viewport = rectf(body.x, body.y, view.x, view.y);

        let vtrack = if need_v { rectf(body.x + view.x, body.y, sb, view.y) } else { rectf(body.x + body.width, body.y, 0.0, 0.0) };
        let htrack = if need_h { rectf(body.x, body.y + view.y, view.x, sb) } else { rectf(body.x, body.y + body.height, 0.0, 0.0) };
        let (content_w, content_h) = if scrollable { (content.x, content.y) } else { (0.0, 0.0) };
        self.vscroll.update_constraints(0.0, content_h, view.y);
        self.vscroll.layout(vtrack);
        self.hscroll.update_constraints(0.0, content_w, view.x);
        self.hscroll.layout(htrack);
    }

    fn grip_at(&self, p: Vec2f, grip: f32) -> ResizeDir {
        let r = self.rect;
        let mut dir = ResizeDir::NONE;
        if (p.x - r.x).abs() <= grip {
            dir |= ResizeDir::LEFT;
        } else if (p.x - (r.x + r.width)).abs() <= grip {
            dir |= ResizeDir::RIGHT;
        }
        if (p.y - r.y).abs() <= grip {
            dir |= ResizeDir::TOP;
        } else if (p.y - (r.y + r.height)).abs() <= grip {
            dir |= ResizeDir::BOTTOM;
        }
        dir
    }

    fn begin_drag(&mut self, state: WindowState, cursor: Vec2f) {
        log::trace!("window '{}' enters {:?}", self.key, state);
        self.state = state;
        self.grab_rect = self.rect;
        self.grab_cursor = cursor;
    }

    fn apply_resize(&mut self, dir: ResizeDir, cursor: Vec2f, style: &Style) {
        let min = self.min_size(style);
        let g = self.grab_rect;
        let d = vec2f(cursor.x - self.grab_cursor.x, cursor.y - self.grab_cursor.y);
        let mut r = g;
        if dir.contains(ResizeDir::RIGHT) {
            r.width = (g.width + d.x).max(min.x);
        }
        if dir.contains(ResizeDir::LEFT) {
            r.width = (g.width - d.x).max(min.x);
            r.x = g.x + g.width - r.width;
        }
        if dir.contains(ResizeDir::BOTTOM) {
            r.height = (g.height + d.y).max(min.y);
        }
        if dir.contains(ResizeDir::TOP) {
            r.height = (g.height - d.y).max(min.y);
            r.y = g.y + g.height - r.height;
        }
        self.rect = r;
    }

    /// Advances the interaction state machine and the scrollbars, then opens the window for declarations.
    pub(crate) fn frame_begin(&mut self, env: &mut FrameEnv<'_>) {
        let style = env.style;
        let input = env.input;
        let cursor = env.arbiter.cursor();
        self.hovered = false;
        self.content_hovered = false;
        self.hovered_grip = ResizeDir::NONE;
        self.front_requested = false;
        self.compute_layout(style);

        if self.state != WindowState::Default {
            if !env.arbiter.is_captured_by(self.id) {
                // capture was taken away from us
                self.state = WindowState::Default;
            } else if !input.left_down() || self.flags.is_hidden() {
                log::trace!("window '{}' leaves {:?}", self.key, self.state);
                env.arbiter.try_capture(self.id, false);
                self.state = WindowState::Default;
            } else {
                self.hovered = true;
                match self.state {
                    WindowState::Moving => {
                        let x = self.grab_rect.x + cursor.x - self.grab_cursor.x;
                        let y = self.grab_rect.y + cursor.y - self.grab_cursor.y;
                        let canvas = env.canvas;
                        // the titlebar stays reachable
                        self.rect.x = x.min(canvas.width - DRAG_KEEP_VISIBLE).max(DRAG_KEEP_VISIBLE - self.rect.width);
                        self.rect.y = y.min(canvas.height - self.title_height(style)).max(0.0);
                    }
                    WindowState::Resizing(dir) => self.apply_resize(dir, cursor, style),
                    WindowState::Scrolling(_) | WindowState::Default => (),
                }
            }
        }

        if self.state == WindowState::Default && !self.flags.is_hidden() {
            self.hit_test(env, cursor);
        }
        self.compute_layout(style);

        let dt = input.delta_time();
        let (vcursor, hcursor) = match self.state {
            WindowState::Scrolling(ScrollAxis::Vertical) => (Some(cursor), None),
            WindowState::Scrolling(ScrollAxis::Horizontal) => (None, Some(cursor)),
            WindowState::Default if self.hovered && self.hovered_grip.is_empty() => (Some(cursor), Some(cursor)),
            _ => (None, None),
        };
        self.vscroll.update(vcursor, input, dt);
        self.hscroll.update(hcursor, input, dt);

        self.layout.reset(style.padding, style.spacing);
        self.slot_cursor = 0;
        self.draw_list.clear();
    }

    // grips, then titlebar, then content, then scrollbars; first match wins
    fn hit_test(&mut self, env: &mut FrameEnv<'_>, cursor: Vec2f) {
        let style = env.style;
        let grip = style.grip_size;
        let resizable = self.flags.is_resizable();
        let area = if resizable { expand_rectf(self.rect, grip) } else { self.rect };
        if !rect_contains(&area, cursor) || !env.arbiter.try_hover(self.id) {
            return;
        }
        self.hovered = true;

        let input = env.input;
        let pressed = input.left_pressed();
        if pressed && !self.flags.is_focus_exempt() {
            self.front_requested = true;
        }

        let dir = if resizable { self.grip_at(cursor, grip) } else { ResizeDir::NONE };
        if !dir.is_empty() {
            self.hovered_grip = dir;
            if pressed && env.arbiter.try_capture(self.id, true) {
                self.begin_drag(WindowState::Resizing(dir), cursor);
            }
        } else if self.flags.has_titlebar() && rect_contains(&self.title_rect, cursor) {
            if self.flags.is_movable() && pressed && env.arbiter.try_capture(self.id, true) {
                self.begin_drag(WindowState::Moving, cursor);
            }
        } else if rect_contains(&self.viewport, cursor) {
            self.content_hovered = true;
            if self.flags.is_scrollable() {
                let wheel = input.scroll_delta();
                self.vscroll.scroll(wheel.y * style.wheel_step, false);
                self.hscroll.scroll(wheel.x * style.wheel_step, false);
            }
        } else {
            for axis in [ScrollAxis::Vertical, ScrollAxis::Horizontal] {
                let bar = self.scrollbar(axis);
                if bar.is_visible() && rect_contains(&bar.track_rect(), cursor) {
                    if pressed && env.arbiter.try_capture(self.id, true) {
                        self.begin_drag(WindowState::Scrolling(axis), cursor);
                    }
                    break;
                }
            }
        }
    }

    // content-local pointer for control `id`, if it may see the pointer at all
    fn local_cursor(&self, id: Id, arbiter: &InputArbiter) -> Option<Vec2f> {
        let global = arbiter.cursor();
        let scroll = self.scroll();
        let local = vec2f(global.x - self.viewport.x + scroll.x, global.y - self.viewport.y + scroll.y);
        if arbiter.is_captured_by(id) {
            return Some(local);
        }
        let eligible = self.content_hovered
            && self.state == WindowState::Default
            && !self.flags.is_disabled()
            && !arbiter.is_capturing()
            && rect_contains(&self.viewport, global);
        eligible.then_some(local)
    }

    /// Declares a control: resolves its persistent instance, binds caller values into it, places and updates
    /// it, and hands it to `read` so bound values can be written back.
    pub(crate) fn update_control<T: Control, R>(
        &mut self,
        key: Option<&str>,
        env: &mut FrameEnv<'_>,
        make: impl FnOnce() -> T,
        bind: impl FnOnce(&mut T),
        read: impl FnOnce(&T, ResourceState) -> R,
    ) -> R {
        let type_id = TypeId::of::<T>();
        let id = match key {
            Some(key) => Id::from_str(key).combine(self.id.raw()),
            None => {
                let index = self.slot_cursor;
                self.slot_cursor += 1;
                let id = self.id.combine(index as u64);
                if self.entries.get(&id).is_some_and(|e| e.type_id != type_id) {
                    log::debug!("window '{}': control type changed at slot {}, rebuilding {} slot(s)", self.key, index, self.slots.len() - index);
                    self.truncate_slots(index, env.arbiter);
                }
                if self.slots.len() <= index {
                    self.slots.push(id);
                }
                id
            }
        };

        let previous = self.entries.remove(&id);
        let already_declared = previous.as_ref().is_some_and(|e| e.declared);
        let mut control: Box<T> = match previous.map(|e| e.control.into_any().downcast::<T>()) {
            Some(Ok(control)) => control,
            Some(Err(_)) => {
                log::debug!("window '{}': keyed control {} replaced by a different type", self.key, id);
                env.arbiter.force_release(id);
                Box::new(make())
            }
            None => Box::new(make()),
        };

        bind(&mut control);
        let size = control.compute_size(env.style, env.metrics);
        let rect = self.layout.push_rect(size);
        let cursor = self.local_cursor(id, env.arbiter);
        let enabled = !self.flags.is_disabled();
        let res = {
            let mut ctx = ControlCtx::new(id, rect, cursor, enabled, env.input, &mut *env.arbiter, env.style, env.metrics);
            control.update(&mut ctx)
        };
        let out = read(&control, res);

        if !already_declared {
            self.draw_list.push(id);
        }
        self.entries.insert(id, ControlEntry { control, type_id, rect, keyed: key.is_some(), declared: true });
        out
    }

    fn truncate_slots(&mut self, from: usize, arbiter: &mut InputArbiter) {
        if from >= self.slots.len() {
            return;
        }
        for id in self.slots.drain(from..) {
            if self.entries.remove(&id).is_some() {
                arbiter.force_release(id);
            }
        }
    }

    /// Drops the keyed control `key`. Returns `true` if it existed.
    pub(crate) fn forget_keyed(&mut self, key: &str, arbiter: &mut InputArbiter) -> bool {
        let id = Id::from_str(key).combine(self.id.raw());
        match self.entries.get(&id) {
            Some(entry) if entry.keyed => {
                self.entries.remove(&id);
                self.draw_list.retain(|d| *d != id);
                arbiter.force_release(id);
                true
            }
            _ => false,
        }
    }

    /// Finalizes size, drops undeclared controls and records draw commands.
    pub(crate) fn frame_end(&mut self, env: &mut FrameEnv<'_>, commands: &mut Vec<Command>) {
        let style = env.style;
        self.content_size = self.layout.content_size();
        let min = self.min_size(style);

        if let Some(pos) = self.pos_override.take() {
            self.rect.x = pos.x;
            self.rect.y = pos.y;
        }
        if let Some(size) = self.size_override.take() {
            self.rect.width = size.x.max(min.x);
            self.rect.height = size.y.max(min.y);
        } else if self.first_frame || self.flags.is_auto_sizing() {
            self.rect.width = self.content_size.x.max(min.x);
            self.rect.height = (self.content_size.y + self.title_height(style)).max(min.y);
        }
        self.first_frame = false;
        self.compute_layout(style);

        let used = self.slot_cursor;
        self.truncate_slots(used, env.arbiter);
        for (id, entry) in self.entries.iter() {
            if entry.keyed && !entry.declared {
                env.arbiter.force_release(*id);
            }
        }

        if !self.flags.is_hidden() {
            let mut draw = DrawCtx::new(commands, style, env.metrics);
            self.draw(&mut draw);
        }

        for entry in self.entries.values_mut() {
            entry.declared = false;
        }
        self.declared = false;
    }

    fn draw(&self, draw: &mut DrawCtx<'_>) {
        let style = draw.style();
        if self.flags.has_background() {
            draw.draw_round_rect(self.rect, style.corner_radius, style.color(ControlColor::WindowBG));
            draw.draw_box(self.rect, style.color(ControlColor::Border));
        }
        if self.flags.has_titlebar() {
            let t = self.title_rect;
            draw.draw_rect(t, style.color(ControlColor::TitleBG));
            draw.push_clip(t);
            let text_rect = rectf(t.x + style.padding, t.y, (t.width - style.padding * 2.0).max(0.0), t.height);
            draw.draw_control_text(&self.title, text_rect, style.color(ControlColor::TitleText));
            draw.pop_clip();
        }

        let scroll = self.scroll();
        draw.push_clip(self.viewport);
        draw.set_offset(vec2f(self.viewport.x - scroll.x, self.viewport.y - scroll.y));
        for id in &self.draw_list {
            if let Some(entry) = self.entries.get(id) {
                entry.control.draw(draw, entry.rect);
            }
        }
        draw.set_offset(vec2f(0.0, 0.0));
        draw.pop_clip();

        self.vscroll.draw(draw);
        self.hscroll.draw(draw);
    }

    /// Cursor shape this window wants: a resize arrow while a grip is hovered or dragged.
    pub(crate) fn cursor_request(&self) -> Option<CursorIcon> {
        match self.state {
            WindowState::Resizing(dir) => Some(dir.cursor_icon()),
            _ if !self.hovered_grip.is_empty() => Some(self.hovered_grip.cursor_icon()),
            _ => None,
        }
    }

    /// Releases every hover/capture held by the window or its controls. Called before destruction.
    pub(crate) fn release_all(&mut self, arbiter: &mut InputArbiter) {
        log::debug!("window '{}' ({}) destroyed with {} control(s)", self.key, self.id, self.entries.len());
        arbiter.force_release(self.id);
        for id in self.entries.keys() {
            arbiter.force_release(*id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Button, FixedMetrics, MouseButton};

    struct Counter {
        updates: u32,
    }

    impl Control for Counter {
        fn compute_size(&self, _style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { vec2f(10.0, 10.0) }
        fn update(&mut self, _ctx: &mut ControlCtx<'_>) -> ResourceState {
            self.updates += 1;
            ResourceState::NONE
        }
        fn draw(&self, _draw: &mut DrawCtx<'_>, _rect: Rectf) {}
    }

    struct Other;

    impl Control for Other {
        fn compute_size(&self, _style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { vec2f(10.0, 10.0) }
        fn update(&mut self, _ctx: &mut ControlCtx<'_>) -> ResourceState { ResourceState::NONE }
        fn draw(&self, _draw: &mut DrawCtx<'_>, _rect: Rectf) {}
    }

    struct Recorder {
        cursor: Option<Vec2f>,
        size: Vec2f,
    }

    impl Control for Recorder {
        fn compute_size(&self, _style: &Style, _metrics: &dyn TextMetrics) -> Vec2f { self.size }
        fn update(&mut self, ctx: &mut ControlCtx<'_>) -> ResourceState {
            self.cursor = ctx.cursor();
            ResourceState::NONE
        }
        fn draw(&self, _draw: &mut DrawCtx<'_>, _rect: Rectf) {}
    }

    struct Harness {
        input: Input,
        arbiter: InputArbiter,
        style: Style,
        metrics: FixedMetrics,
        commands: Vec<Command>,
    }

    impl Harness {
        fn new() -> Self {
            Self { input: Input::default(), arbiter: InputArbiter::new(), style: Style::default(), metrics: FixedMetrics::default(), commands: Vec::new() }
        }

        fn begin(&mut self, w: &mut Window) {
            self.input.prelude();
            self.arbiter.sample_frame(self.input.mouse_pos());
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.frame_begin(&mut env);
        }

        fn end(&mut self, w: &mut Window) {
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.frame_end(&mut env, &mut self.commands);
            self.commands.clear();
            self.input.epilogue();
        }

        fn counter(&mut self, w: &mut Window, key: Option<&str>) -> u32 {
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.update_control(key, &mut env, || Counter { updates: 0 }, |_| (), |c, _| c.updates)
        }

        fn other(&mut self, w: &mut Window) {
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.update_control(None, &mut env, || Other, |_| (), |_, _| ());
        }

        fn button(&mut self, w: &mut Window) -> ResourceState {
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.update_control(None, &mut env, || Button::new("b"), |_| (), |_, res| res)
        }

        fn recorder(&mut self, w: &mut Window, size: Vec2f) -> Option<Vec2f> {
            let mut env = FrameEnv { input: &self.input, arbiter: &mut self.arbiter, style: &self.style, metrics: &self.metrics, canvas: Dimensionf::new(800.0, 600.0) };
            w.update_control(None, &mut env, || Recorder { cursor: None, size }, |_| (), |r, _| r.cursor)
        }
    }

    fn placed_window(h: &mut Harness, flags: WindowFlags, rect: Rectf) -> Window {
        let mut w = Window::new("w", flags, vec2f(rect.x, rect.y), &h.style);
        w.set_size_override(vec2f(rect.width, rect.height));
        h.begin(&mut w);
        h.end(&mut w);
        w
    }

    #[test]
    fn slot_controls_persist_by_position() {
        let mut h = Harness::new();
        let mut w = Window::new("w", WindowFlags::DEFAULT, vec2f(0.0, 0.0), &h.style);
        for frame in 1..=3 {
            h.begin(&mut w);
            assert_eq!(h.counter(&mut w, None), frame);
            assert_eq!(h.counter(&mut w, None), frame);
            h.end(&mut w);
        }
        assert_eq!(w.control_count(), 2);
    }

    #[test]
    fn type_change_rebuilds_the_tail() {
        let mut h = Harness::new();
        let mut w = Window::new("w", WindowFlags::DEFAULT, vec2f(0.0, 0.0), &h.style);
        h.begin(&mut w);
        for _ in 0..3 {
            h.counter(&mut w, None);
        }
        h.end(&mut w);

        h.begin(&mut w);
        assert_eq!(h.counter(&mut w, None), 2);
        h.other(&mut w);
        assert_eq!(h.counter(&mut w, None), 1);
        h.end(&mut w);
        assert_eq!(w.control_count(), 3);
    }

    #[test]
    fn undeclared_tail_is_dropped() {
        let mut h = Harness::new();
        let mut w = Window::new("w", WindowFlags::DEFAULT, vec2f(0.0, 0.0), &h.style);
        h.begin(&mut w);
        for _ in 0..3 {
            h.counter(&mut w, None);
        }
        h.end(&mut w);
        h.begin(&mut w);
        h.counter(&mut w, None);
        h.end(&mut w);
        assert_eq!(w.control_count(), 1);
    }

    #[test]
    fn keyed_controls_survive_reordering_and_absence() {
        let mut h = Harness::new();
        let mut w = Window::new("w", WindowFlags::DEFAULT, vec2f(0.0, 0.0), &h.style);
        h.begin(&mut w);
        assert_eq!(h.counter(&mut w, Some("a")), 1);
        assert_eq!(h.counter(&mut w, Some("b")), 1);
        h.end(&mut w);

        h.begin(&mut w);
        assert_eq!(h.counter(&mut w, Some("b")), 2);
        assert_eq!(h.counter(&mut w, Some("a")), 2);
        h.end(&mut w);

        h.begin(&mut w);
        h.end(&mut w);
        assert_eq!(w.keyed_count(), 2);

        h.begin(&mut w);
        assert_eq!(h.counter(&mut w, Some("a")), 3);
        h.end(&mut w);

        assert!(w.forget_keyed("b", &mut h.arbiter));
        assert!(!w.forget_keyed("b", &mut h.arbiter));
        assert_eq!(w.keyed_count(), 1);
    }

    #[test]
    fn min_size_depends_on_flags() {
        let style = Style::default();
        let bare = Window::new("a", WindowFlags::NONE, vec2f(0.0, 0.0), &style);
        let m = bare.min_size(&style);
        assert_eq!((m.x, m.y), (10.0, 10.0));

        let auto = Window::new("b", WindowFlags::DEFAULT | WindowFlags::AUTO_RESIZE, vec2f(0.0, 0.0), &style);
        let m = auto.min_size(&style);
        assert_eq!((m.x, m.y), (40.0, 50.0));

        let full = Window::new("c", WindowFlags::DEFAULT, vec2f(0.0, 0.0), &style);
        let m = full.min_size(&style);
        assert_eq!((m.x, m.y), (70.0, 80.0));
    }

    #[test]
    fn resize_from_corner_clamps_to_min_size() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(100.0, 100.0, 200.0, 200.0));

        h.input.mousedown(300.0, 300.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Resizing(ResizeDir::BOTTOM | ResizeDir::RIGHT));
        assert_eq!(w.cursor_request(), Some(CursorIcon::ResizeNwse));
        h.end(&mut w);

        h.input.mousemove(0.0, 0.0);
        h.begin(&mut w);
        let r = w.rect();
        assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 70.0, 80.0));
        h.end(&mut w);

        h.input.mouseup(0.0, 0.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Default);
        assert!(!h.arbiter.is_capturing());
        h.end(&mut w);
    }

    #[test]
    fn left_grip_keeps_the_right_edge() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(100.0, 100.0, 200.0, 200.0));
        h.input.mousedown(100.0, 200.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Resizing(ResizeDir::LEFT));
        assert_eq!(w.cursor_request(), Some(CursorIcon::ResizeLeftRight));
        h.end(&mut w);
        h.input.mousemove(150.0, 250.0);
        h.begin(&mut w);
        let r = w.rect();
        assert_eq!((r.x, r.y, r.width, r.height), (150.0, 100.0, 150.0, 200.0));
        h.end(&mut w);
    }

    #[test]
    fn titlebar_drag_moves_the_window() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(100.0, 100.0, 200.0, 200.0));
        h.input.mousedown(150.0, 110.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Moving);
        assert!(h.arbiter.is_captured_by(w.id()));
        h.end(&mut w);

        h.input.mousemove(170.0, 130.0);
        h.begin(&mut w);
        let r = w.rect();
        assert_eq!((r.x, r.y), (120.0, 120.0));
        h.end(&mut w);
    }

    #[test]
    fn immovable_window_ignores_titlebar_press() {
        let mut h = Harness::new();
        let flags = WindowFlags::DEFAULT & !WindowFlags::MOVABLE;
        let mut w = placed_window(&mut h, flags, rectf(100.0, 100.0, 200.0, 200.0));
        h.input.mousedown(150.0, 110.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Default);
        assert!(w.is_hovered());
        assert!(!h.arbiter.is_capturing());
        h.end(&mut w);
    }

    #[test]
    fn wheel_scrolls_overflowing_content() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(0.0, 0.0, 200.0, 200.0));
        h.begin(&mut w);
        for _ in 0..30 {
            h.counter(&mut w, None);
        }
        h.end(&mut w);
        assert_eq!(w.content_size().y, 10.0 + 30.0 * 10.0 + 29.0 * 5.0 + 10.0);
        assert_eq!(w.viewport().width, 200.0 - 14.0);
        assert!(w.scrollbar(ScrollAxis::Vertical).is_visible());
        assert!(!w.scrollbar(ScrollAxis::Horizontal).is_visible());

        h.input.mousemove(50.0, 100.0);
        h.input.scroll(0.0, 1.0);
        h.begin(&mut w);
        assert!(w.is_content_hovered());
        assert_eq!(w.scrollbar(ScrollAxis::Vertical).target(), 40.0);
        h.end(&mut w);
    }

    #[test]
    fn controls_get_local_cursor_only_when_eligible() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(100.0, 100.0, 200.0, 200.0));

        h.input.mousemove(115.0, 145.0);
        h.begin(&mut w);
        let seen = h.recorder(&mut w, vec2f(10.0, 10.0)).map(|p| (p.x, p.y));
        assert_eq!(seen, Some((15.0, 15.0)));
        h.end(&mut w);

        // over the titlebar: the window is hovered but its content is not
        h.input.mousemove(115.0, 110.0);
        h.begin(&mut w);
        assert!(w.is_hovered());
        assert!(h.recorder(&mut w, vec2f(10.0, 10.0)).is_none());
        h.end(&mut w);

        w.set_flags(WindowFlags::DEFAULT | WindowFlags::DISABLED);
        h.input.mousemove(115.0, 145.0);
        h.begin(&mut w);
        assert!(h.recorder(&mut w, vec2f(10.0, 10.0)).is_none());
        h.end(&mut w);
    }

    #[test]
    fn auto_resize_fits_content_every_frame() {
        let mut h = Harness::new();
        let mut w = Window::new("w", WindowFlags::DEFAULT | WindowFlags::AUTO_RESIZE, vec2f(0.0, 0.0), &h.style);
        h.begin(&mut w);
        h.recorder(&mut w, vec2f(80.0, 20.0));
        h.end(&mut w);
        let r = w.rect();
        assert_eq!((r.width, r.height), (100.0, 70.0));

        h.begin(&mut w);
        h.recorder(&mut w, vec2f(120.0, 20.0));
        h.recorder(&mut w, vec2f(10.0, 40.0));
        h.end(&mut w);
        let r = w.rect();
        assert_eq!((r.width, r.height), (140.0, 115.0));
    }

    #[test]
    fn hidden_window_draws_nothing_and_ignores_input() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT | WindowFlags::HIDDEN, rectf(0.0, 0.0, 200.0, 200.0));
        h.input.mousedown(50.0, 10.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert!(!w.is_hovered());
        let mut env = FrameEnv { input: &h.input, arbiter: &mut h.arbiter, style: &h.style, metrics: &h.metrics, canvas: Dimensionf::new(800.0, 600.0) };
        w.frame_end(&mut env, &mut h.commands);
        assert!(h.commands.is_empty());
    }

    #[test]
    fn dragged_window_keeps_its_titlebar_on_the_canvas() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(100.0, 100.0, 200.0, 200.0));
        h.input.mousedown(150.0, 110.0, MouseButton::LEFT);
        h.begin(&mut w);
        h.end(&mut w);

        h.input.mousemove(-1000.0, -1000.0);
        h.begin(&mut w);
        let r = w.rect();
        assert_eq!((r.x, r.y), (20.0 - 200.0, 0.0));
        h.end(&mut w);

        h.input.mousemove(5000.0, 5000.0);
        h.begin(&mut w);
        let r = w.rect();
        assert_eq!((r.x, r.y), (800.0 - 20.0, 600.0 - 30.0));
        h.end(&mut w);
    }

    #[test]
    fn scrollbar_press_enters_scrolling_until_release() {
        let mut h = Harness::new();
        let mut w = placed_window(&mut h, WindowFlags::DEFAULT, rectf(0.0, 0.0, 200.0, 200.0));
        let fill = |h: &mut Harness, w: &mut Window| {
            for _ in 0..30 {
                h.counter(w, None);
            }
        };
        h.begin(&mut w);
        fill(&mut h, &mut w);
        h.end(&mut w);

        // below the thumb on the vertical track
        h.input.mousedown(193.0, 150.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Scrolling(ScrollAxis::Vertical));
        assert!(h.arbiter.is_captured_by(w.id()));
        assert!(w.scrollbar(ScrollAxis::Vertical).is_track_pressed());
        assert!(!w.is_content_hovered());
        fill(&mut h, &mut w);
        h.end(&mut w);

        // the drag keeps the state while the button is held, even off the window
        h.input.mousemove(400.0, 400.0);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Scrolling(ScrollAxis::Vertical));
        fill(&mut h, &mut w);
        h.end(&mut w);

        h.input.mouseup(400.0, 400.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert_eq!(w.state(), WindowState::Default);
        assert!(!h.arbiter.is_capturing());
        h.end(&mut w);
    }

    fn pressed_button(h: &mut Harness) -> Window {
        let mut w = placed_window(h, WindowFlags::DEFAULT, rectf(0.0, 0.0, 200.0, 200.0));
        h.begin(&mut w);
        h.button(&mut w);
        h.end(&mut w);

        // the button sits at local (10, 10), under a 30px titlebar
        h.input.mousedown(15.0, 45.0, MouseButton::LEFT);
        h.begin(&mut w);
        assert!(h.button(&mut w).is_active());
        h.end(&mut w);
        assert!(h.arbiter.is_capturing());
        assert!(!h.arbiter.is_captured_by(w.id()));
        w
    }

    #[test]
    fn replacing_a_capturing_control_releases_the_capture() {
        let mut h = Harness::new();
        let mut w = pressed_button(&mut h);
        h.begin(&mut w);
        h.other(&mut w);
        assert!(!h.arbiter.is_capturing());
        h.end(&mut w);
    }

    #[test]
    fn dropping_a_capturing_control_releases_the_capture() {
        let mut h = Harness::new();
        let mut w = pressed_button(&mut h);
        h.begin(&mut w);
        assert!(h.arbiter.is_capturing());
        h.end(&mut w);
        assert!(!h.arbiter.is_capturing());
        assert_eq!(w.control_count(), 0);
    }
}
