// Standard Library Imports
use std::fmt::{self, Display, Formatter};

// External Crate Imports
use serde::Serialize;

// Local Crate Imports
use crate::queue_state::{Flag, Flags};

// Public API ==========================================================================================================

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Gray,
    Blue,
    Green,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Minus,
    Spinner,
    Refresh,
    Warning,
    Pencil,
    Check,
}

/// The derived values a `StatusIndicator` exposes
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Derived {
    Loaded,
    TooltipVisible,
    WarningActive,
    Color,
    Icon,
}

/// The `(color, icon)` rules, highest priority first: the first rule whose flag is set wins. Deleted > saving > new >
/// error > dirty.
pub const PRIORITY: [(Flag, Color, Icon); 5] = [
    (Flag::DeletedQueue, Color::Red, Icon::Minus),
    (Flag::Saving, Color::Gray, Icon::Spinner),
    (Flag::NewQueue, Color::Blue, Icon::Refresh),
    (Flag::Error, Color::Red, Icon::Warning),
    (Flag::AnyDirty, Color::Blue, Icon::Pencil),
];

pub const FALLBACK: (Color, Icon) = (Color::Green, Icon::Check);

pub const TOOLTIP: &str = "Unsaved changes";

#[must_use]
pub const fn loaded(flags: &Flags) -> bool {
    !flags.is_saving
}

#[must_use]
pub const fn tooltip_visible(flags: &Flags) -> bool {
    loaded(flags) && flags.is_any_dirty
}

#[must_use]
pub const fn warning_active(flags: &Flags) -> bool {
    flags.over_capacity
}

#[must_use]
pub fn resolve(flags: &Flags) -> (Color, Icon) {
    PRIORITY
        .iter()
        .find(|&&(flag, _, _)| flags.get(flag))
        .map_or(FALLBACK, |&(_, color, icon)| (color, icon))
}

/// Everything a renderer needs to draw a queue's badge
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub loaded: bool,
    pub tooltip_visible: bool,
    pub warning_active: bool,
    pub color: Color,
    pub icon: Icon,
}

impl Badge {
    #[must_use]
    pub fn from_flags(flags: &Flags) -> Self {
        let (color, icon) = resolve(flags);

        Self {
            loaded: loaded(flags),
            tooltip_visible: tooltip_visible(flags),
            warning_active: warning_active(flags),
            color,
            icon,
        }
    }

    /// The tooltip text to show, if any. Only `tooltip_visible` decides whether there is one.
    #[must_use]
    pub const fn tooltip(&self) -> Option<&'static str> {
        if self.tooltip_visible {
            Some(TOOLTIP)
        } else {
            None
        }
    }
}

impl Color {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl Icon {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Minus => "minus",
            Self::Spinner => "spinner",
            Self::Refresh => "refresh",
            Self::Warning => "warning",
            Self::Pencil => "pencil",
            Self::Check => "check",
        }
    }

    /// The Font Awesome class the console draws this icon with
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Minus => "fa-minus",
            Self::Spinner => "fa-spinner",
            Self::Refresh => "fa-refresh",
            Self::Warning => "fa-warning",
            Self::Pencil => "fa-pencil",
            Self::Check => "fa-check",
        }
    }

    /// Whether the icon should be drawn with a continuous rotation
    #[must_use]
    pub const fn spins(self) -> bool {
        matches!(self, Self::Spinner)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Icon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Derived {
    pub const ALL: [Self; 5] = [
        Self::Loaded,
        Self::TooltipVisible,
        Self::WarningActive,
        Self::Color,
        Self::Icon,
    ];

    /// The property name used by the console
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::TooltipVisible => "tooltipVisible",
            Self::WarningActive => "warningActive",
            Self::Color => "color",
            Self::Icon => "icon",
        }
    }

    /// The flags this value is computed from
    #[must_use]
    pub const fn dependencies(self) -> &'static [Flag] {
        match self {
            Self::Loaded => &[Flag::Saving],
            Self::TooltipVisible => &[Flag::Saving, Flag::AnyDirty],
            Self::WarningActive => &[Flag::OverCapacity],
            Self::Color | Self::Icon => &[
                Flag::NewQueue,
                Flag::Saving,
                Flag::Error,
                Flag::AnyDirty,
                Flag::DeletedQueue,
            ],
        }
    }
}

impl Flag {
    #[must_use]
    pub fn affects(self, derived: Derived) -> bool {
        derived.dependencies().contains(&self)
    }
}

// Unit Tests ==========================================================================================================
