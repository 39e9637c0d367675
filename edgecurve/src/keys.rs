//! Keyboard combination tracking.
//!
//! A binding is a list of alternatives, each alternative a `+`-joined set of
//! keys that must be held together: `["a", "d+s"]` fires on `a` alone or on
//! `d` and `s` together. Keys can be named either by `KeyboardEvent.key`
//! (`"Meta"`) or by `KeyboardEvent.code` (`"MetaLeft"`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCombos {
    combos: Vec<Vec<String>>,
    watched: HashSet<String>,
}

impl KeyCombos {
    pub fn parse<S: AsRef<str>>(bindings: &[S]) -> Self {
        let combos: Vec<Vec<String>> = bindings
            .iter()
            .map(|b| b.as_ref().split('+').map(str::to_string).collect())
            .collect();
        let watched = combos.iter().flatten().cloned().collect();
        Self { combos, watched }
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn combos(&self) -> &[Vec<String>] {
        &self.combos
    }

    /// Codes take precedence when the binding names them explicitly.
    fn name_for<'a>(&self, event: &'a KeyEvent) -> &'a str {
        if self.watched.contains(&event.code) {
            &event.code
        } else {
            &event.key
        }
    }

    // On key-down only combos of the same size as the pressed set count, so a
    // `Meta` binding does not fire while `Meta+r` is held.
    fn matches(&self, pressed: &HashSet<String>, is_up: bool) -> bool {
        self.combos
            .iter()
            .filter(|keys| is_up || keys.len() == pressed.len())
            .any(|keys| keys.iter().all(|k| pressed.contains(k)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    /// Event target is a text input, textarea or contenteditable.
    pub in_input: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self { key: key.into(), code: code.into(), ..Default::default() }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_input(mut self) -> Self {
        self.in_input = true;
        self
    }

    fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOutcome {
    /// Swallowed because focus is in a text input.
    Ignored,
    /// Recorded, binding not (or no longer) satisfied.
    Tracked,
    /// Binding satisfied on this key-down; the host should prevent the default action.
    Matched,
    /// Binding released on this key-up.
    Released,
}

#[derive(Clone, Debug)]
pub struct KeyPressTracker {
    combos: KeyCombos,
    act_inside_input_with_modifier: bool,
    modifier_pressed: bool,
    pressed: HashSet<String>,
    active: bool,
}

impl KeyPressTracker {
    pub fn new(combos: KeyCombos) -> Self {
        Self {
            combos,
            act_inside_input_with_modifier: true,
            modifier_pressed: false,
            pressed: HashSet::new(),
            active: false,
        }
    }

    pub fn act_inside_input_with_modifier(mut self, yes: bool) -> Self {
        self.act_inside_input_with_modifier = yes;
        self
    }

    pub fn is_pressed(&self) -> bool {
        self.active
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.pressed.iter().map(String::as_str)
    }

    fn blocked(&self, event: &KeyEvent) -> bool {
        (!self.modifier_pressed || !self.act_inside_input_with_modifier) && event.in_input
    }

    pub fn key_down(&mut self, event: &KeyEvent) -> KeyOutcome {
        if self.combos.is_empty() {
            return KeyOutcome::Ignored;
        }
        self.modifier_pressed = event.has_modifier();
        if self.blocked(event) {
            return KeyOutcome::Ignored;
        }

        let name = self.combos.name_for(event).to_string();
        self.pressed.insert(name);

        if self.combos.matches(&self.pressed, false) {
            if !self.active {
                log::debug!("key combo matched: {:?}", self.pressed);
            }
            self.active = true;
            KeyOutcome::Matched
        } else {
            KeyOutcome::Tracked
        }
    }

    pub fn key_up(&mut self, event: &KeyEvent) -> KeyOutcome {
        if self.combos.is_empty() {
            return KeyOutcome::Ignored;
        }
        if self.blocked(event) {
            return KeyOutcome::Ignored;
        }

        let outcome = if self.combos.matches(&self.pressed, true) {
            self.active = false;
            self.pressed.clear();
            KeyOutcome::Released
        } else {
            let name = self.combos.name_for(event);
            self.pressed.remove(name);
            KeyOutcome::Tracked
        };

        // macOS swallows key-up for other keys while Cmd is held
        if event.key == "Meta" {
            self.pressed.clear();
        }

        self.modifier_pressed = false;
        outcome
    }

    /// Window lost focus: forget everything.
    pub fn blur(&mut self) {
        self.pressed.clear();
        self.active = false;
    }
}
