// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the immutable `Toast` record, the `ToastInput` used
//! to request one, and the `Variant` enum shared by both.

use crate::domain::queue::DurationMs;
use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a toast, rendered as `toast-N`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("toast-{sequence}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ToastId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ToastId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ToastId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Visual variant of a toast.
///
/// Only used by the queue to pick a default duration; everything else about
/// it belongs to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    Success,
    Error,
    Warning,
    Info,
    #[default]
    Neutral,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 5] = [
        Variant::Success,
        Variant::Error,
        Variant::Warning,
        Variant::Info,
        Variant::Neutral,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
            Variant::Neutral => "neutral",
        }
    }

    /// Parses a lowercase variant name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.as_str() == name)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional call-to-action attached to a toast.
///
/// The queue never invokes the callback; it is carried through for the
/// rendering layer.
#[derive(Clone)]
pub struct Action {
    label: String,
    on_invoke: Rc<dyn Fn()>,
}

impl Action {
    pub fn new(label: impl Into<String>, on_invoke: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            on_invoke: Rc::new(on_invoke),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the attached callback.
    pub fn invoke(&self) {
        (self.on_invoke)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Request passed to [`ToastStore::add`](super::ToastStore::add).
#[derive(Debug, Clone)]
pub struct ToastInput {
    pub(crate) variant: Variant,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) action: Option<Action>,
    pub(crate) duration: Option<DurationMs>,
}

impl ToastInput {
    /// Creates an input with the given variant and title.
    ///
    /// The title is expected to be non-empty; the caller validates it.
    pub fn new(variant: Variant, title: impl Into<String>) -> Self {
        Self {
            variant,
            title: title.into(),
            description: None,
            action: None,
            duration: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Variant::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Variant::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Variant::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Variant::Info, title)
    }

    pub fn neutral(title: impl Into<String>) -> Self {
        Self::new(Variant::Neutral, title)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Overrides the per-variant default duration.
    ///
    /// `0` makes the toast persistent. Negative values are clamped to `0`.
    #[must_use]
    pub fn with_duration_ms(mut self, millis: i64) -> Self {
        self.duration = Some(DurationMs::from_signed(millis));
        self
    }

    /// Shorthand for `with_duration_ms(0)`.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.duration = Some(DurationMs::PERSISTENT);
        self
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// An active toast. Immutable once created.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    variant: Variant,
    title: String,
    description: Option<String>,
    action: Option<Action>,
    duration: DurationMs,
    created_at: u64,
}

impl Toast {
    pub(crate) fn from_input(
        id: ToastId,
        input: ToastInput,
        duration: DurationMs,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            variant: input.variant,
            title: input.title,
            description: input.description,
            action: input.action,
            duration,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Resolved auto-dismiss delay; zero for persistent toasts.
    #[must_use]
    pub fn duration(&self) -> DurationMs {
        self.duration
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration.is_persistent()
    }

    /// Logical insertion sequence within the owning store.
    #[must_use]
    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}
