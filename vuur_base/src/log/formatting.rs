//! Contains the ANSI escape codes used to style console messages.

use std::fmt::Display;

const RESET: &str = "\x1B[0m";

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
}

impl Style {
    /// Applies the style to the given displayable object.
    pub fn with<T>(self, display: T) -> WithStyle<T> {
        WithStyle {
            style: self,
            display,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
        }
    }
}

/// Is a struct implementing [`Display`] that represents a displayable object with a style applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WithStyle<T> {
    /// The style applied to the displayable object.
    pub style: Style,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for WithStyle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{RESET}", self.style.code(), self.display)
    }
}

/// Represents a foreground color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Cyan,
}

impl Color {
    /// Applies the color to the given displayable object.
    pub fn with<T>(self, display: T) -> WithColor<T> {
        WithColor {
            color: self,
            display,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1B[31m",
            Self::Cyan => "\x1B[36m",
        }
    }
}

/// Is a struct implementing [`Display`] that represents a displayable object with a color applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WithColor<T> {
    /// The color applied to the displayable object.
    pub color: Color,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for WithColor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{RESET}", self.color.code(), self.display)
    }
}
