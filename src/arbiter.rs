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
use crate::{vec2f, Id, Vec2f};

/// Single owner of "who is hovered" and "who has captured input" for the current frame.
///
/// Windows and controls never look at each other; they ask the arbiter. Whoever asks first in a frame wins
/// the hover, and a capture stays with its owner across frames until that owner releases it.
///
/// Keyboard focus is tracked separately: it is not tied to the pointer and survives any number of frames.
#[derive(Clone, Debug)]
pub struct InputArbiter {
    hovered: Option<Id>,
    captured: bool,
    focused: Option<Id>,
    cursor: Vec2f,
}

impl Default for InputArbiter {
    fn default() -> Self { Self { hovered: None, captured: false, focused: None, cursor: vec2f(0.0, 0.0) } }
}

impl InputArbiter {
    /// Creates an arbiter with nobody hovered.
    pub fn new() -> Self { Self::default() }

    /// Latches the pointer position for this frame and drops a stale hover unless a capture is in progress.
    pub fn sample_frame(&mut self, cursor: Vec2f) {
        self.cursor = cursor;
        if !self.captured {
            self.hovered = None;
        }
    }

    /// Claims the hover for `id`. Fails if somebody else already holds it.
    pub fn try_hover(&mut self, id: Id) -> bool {
        match self.hovered {
            None => {
                self.hovered = Some(id);
                true
            }
            Some(current) => current == id,
        }
    }

    /// Starts (`capturing == true`) or ends a capture for `id`.
    /// Fails if a different entity holds the capture.
    pub fn try_capture(&mut self, id: Id, capturing: bool) -> bool {
        if self.captured && self.hovered != Some(id) {
            return false;
        }
        if capturing {
            if !self.captured {
                log::trace!("input captured by {}", id);
            }
            self.hovered = Some(id);
            self.captured = true;
        } else {
            if self.captured {
                log::trace!("input released by {}", id);
            }
            self.hovered = None;
            self.captured = false;
        }
        true
    }

    /// Returns the pointer position if `id` may react to it: nobody is hovered yet, or `id` is the hovered entity.
    pub fn cursor_position_for(&self, id: Id) -> Option<Vec2f> {
        match self.hovered {
            None => Some(self.cursor),
            Some(current) if current == id => Some(self.cursor),
            Some(_) => None,
        }
    }

    /// Drops any hover, capture or focus held by `id`. Used when the entity is destroyed or hidden.
    pub fn force_release(&mut self, id: Id) {
        if self.hovered == Some(id) {
            log::trace!("forced release of {}", id);
            self.hovered = None;
            self.captured = false;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Gives keyboard focus to `id`, taking it from whoever held it.
    pub fn set_focus(&mut self, id: Id) {
        if self.focused != Some(id) {
            log::trace!("focus moved to {}", id);
        }
        self.focused = Some(id);
    }

    /// Drops the focus if `id` holds it.
    pub fn clear_focus(&mut self, id: Id) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Returns the entity holding keyboard focus.
    pub fn focused(&self) -> Option<Id> { self.focused }

    /// Returns `true` if `id` holds keyboard focus.
    pub fn is_focused(&self, id: Id) -> bool { self.focused == Some(id) }

    /// Returns the currently hovered entity.
    pub fn hovered(&self) -> Option<Id> { self.hovered }

    /// Returns `true` if `id` is the hovered entity.
    pub fn is_hovered(&self, id: Id) -> bool { self.hovered == Some(id) }

    /// Returns `true` if some entity holds the capture.
    pub fn is_capturing(&self) -> bool { self.captured }

    /// Returns `true` if `id` holds the capture.
    pub fn is_captured_by(&self, id: Id) -> bool { self.captured && self.hovered == Some(id) }

    /// Returns the pointer position latched by [`InputArbiter::sample_frame`].
    pub fn cursor(&self) -> Vec2f { self.cursor }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hover_wins() {
        let mut arbiter = InputArbiter::new();
        arbiter.sample_frame(vec2f(5.0, 5.0));
        assert!(arbiter.try_hover(Id::new(1)));
        assert!(arbiter.try_hover(Id::new(1)));
        assert!(!arbiter.try_hover(Id::new(2)));
        assert_eq!(arbiter.hovered(), Some(Id::new(1)));
    }

    #[test]
    fn sampling_clears_hover_without_capture() {
        let mut arbiter = InputArbiter::new();
        arbiter.sample_frame(vec2f(0.0, 0.0));
        assert!(arbiter.try_hover(Id::new(1)));
        arbiter.sample_frame(vec2f(1.0, 1.0));
        assert_eq!(arbiter.hovered(), None);
        assert!(arbiter.try_hover(Id::new(2)));
    }

    #[test]
    fn capture_is_sticky_until_released() {
        let mut arbiter = InputArbiter::new();
        let a = Id::new(10);
        let b = Id::new(20);
        arbiter.sample_frame(vec2f(0.0, 0.0));
        assert!(arbiter.try_capture(a, true));
        for _ in 0..3 {
            arbiter.sample_frame(vec2f(3.0, 3.0));
            assert!(!arbiter.try_capture(b, true));
            assert!(!arbiter.try_hover(b));
            assert!(arbiter.is_captured_by(a));
        }
        assert!(!arbiter.try_capture(b, false));
        assert!(arbiter.try_capture(a, false));
        assert_eq!(arbiter.hovered(), None);
        assert!(arbiter.try_capture(b, true));
    }

    #[test]
    fn occluded_entity_gets_no_cursor() {
        let mut arbiter = InputArbiter::new();
        arbiter.sample_frame(vec2f(7.0, 8.0));
        assert!(arbiter.cursor_position_for(Id::new(2)).is_some());
        assert!(arbiter.try_hover(Id::new(1)));
        assert!(arbiter.cursor_position_for(Id::new(2)).is_none());
        let p = arbiter.cursor_position_for(Id::new(1)).map(|p| (p.x, p.y));
        assert_eq!(p, Some((7.0, 8.0)));
    }

    #[test]
    fn force_release_unblocks_others() {
        let mut arbiter = InputArbiter::new();
        let gone = Id::new(3);
        assert!(arbiter.try_capture(gone, true));
        arbiter.force_release(Id::new(4));
        assert!(arbiter.is_capturing());
        arbiter.force_release(gone);
        assert!(!arbiter.is_capturing());
        assert!(arbiter.try_hover(Id::new(4)));
    }

    #[test]
    fn focus_is_independent_of_hover() {
        let mut arbiter = InputArbiter::new();
        let field = Id::new(5);
        arbiter.set_focus(field);
        arbiter.sample_frame(vec2f(0.0, 0.0));
        assert!(arbiter.try_hover(Id::new(6)));
        assert!(arbiter.is_focused(field));

        arbiter.clear_focus(Id::new(6));
        assert_eq!(arbiter.focused(), Some(field));
        arbiter.force_release(field);
        assert_eq!(arbiter.focused(), None);
    }
}
