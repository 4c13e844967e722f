//! Asynchronously loaded text label.
//!
//! The host fetches the typeface and builds the glyph geometry; Rust owns the
//! label's placement. The load is modelled as a one-shot: the host side holds
//! a `LabelPromise`, the scene polls a `LabelSlot` once per frame and never
//! blocks. A failed or abandoned load simply leaves the label out.

use futures_channel::oneshot;
use serde::{Deserialize, Serialize};
use glam::Vec3;
use crate::components::mesh::Color;

/// Bevel parameters for extruded text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bevel {
    pub enabled: bool,
    pub thickness: f32,
    pub size: f32,
    pub offset: f32,
    pub segments: u32,
}

impl Default for Bevel {
    fn default() -> Self {
        Self {
            enabled: true,
            thickness: 0.1,
            size: 0.05,
            offset: 0.0,
            segments: 5,
        }
    }
}

/// Description of an extruded 3D text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Typeface JSON the host loads before building the geometry.
    pub font_url: String,
    pub position: Vec3,
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion depth.
    pub height: f32,
    pub curve_segments: u32,
    pub bevel: Bevel,
    pub color: Color,
    pub render_order: u32,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, font_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_url: font_url.into(),
            position: Vec3::ZERO,
            size: 1.0,
            height: 0.2,
            curve_segments: 12,
            bevel: Bevel::default(),
            color: Color::WHITE,
            render_order: 0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, hex: u32) -> Self {
        self.color = Color::from_hex(hex);
        self
    }

    pub fn with_render_order(mut self, order: u32) -> Self {
        self.render_order = order;
        self
    }
}

/// Host-side half of the label one-shot.
#[derive(Debug)]
pub struct LabelPromise {
    label: TextLabel,
    tx: oneshot::Sender<TextLabel>,
}

impl LabelPromise {
    /// The label waiting for its font.
    pub fn label(&self) -> &TextLabel {
        &self.label
    }

    /// The font loaded: hand the label to the scene.
    pub fn resolve(self) {
        // The slot may already be gone (scene torn down); nothing to do then.
        let _ = self.tx.send(self.label);
    }

    /// The font failed to load: the label never appears.
    pub fn reject(self) {}
}

/// Outcome of polling a `LabelSlot`.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelPoll {
    /// Font still loading.
    Pending,
    /// Font loaded; the label should be spawned now.
    Ready(TextLabel),
    /// Load failed or was dropped; stop polling.
    Abandoned,
}

/// Scene-side half of the label one-shot.
#[derive(Debug, Default)]
pub struct LabelSlot {
    rx: Option<oneshot::Receiver<TextLabel>>,
}

impl LabelSlot {
    /// A slot that never resolves.
    pub fn empty() -> Self {
        Self { rx: None }
    }

    /// Whether a label is still outstanding.
    pub fn is_waiting(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking poll. Yields `Ready` or `Abandoned` at most once;
    /// afterwards the slot is empty and reports `Abandoned`.
    pub fn poll(&mut self) -> LabelPoll {
        let Some(rx) = self.rx.as_mut() else {
            return LabelPoll::Abandoned;
        };
        match rx.try_recv() {
            Ok(None) => LabelPoll::Pending,
            Ok(Some(label)) => {
                self.rx = None;
                LabelPoll::Ready(label)
            }
            Err(oneshot::Canceled) => {
                self.rx = None;
                LabelPoll::Abandoned
            }
        }
    }
}

/// Create a linked promise/slot pair for `label`.
pub fn label_channel(label: TextLabel) -> (LabelPromise, LabelSlot) {
    let (tx, rx) = oneshot::channel();
    (LabelPromise { label, tx }, LabelSlot { rx: Some(rx) })
}
