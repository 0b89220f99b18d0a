//! Text renderings of the journaling screens. Every view borrows its data
//! and implements `Display`; the radar chart additionally renders SVG.

pub mod cards;
pub mod form;
pub mod picker;
pub mod quiz;
pub mod radar;
pub mod result;
pub mod screens;

pub(crate) const RULE: &str = "────────────────────────────────";

pub(crate) fn chip(label: &str, on: bool) -> String {
    format!("[{}] {label}", if on { 'x' } else { ' ' })
}
