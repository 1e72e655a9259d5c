//! Semantic color palette for terminal output.

use owo_colors::{OwoColorize, Style};

/// Semantic roles a piece of text can play.
#[derive(Debug, Clone, Copy)]
pub enum Role {
    Success,
    Error,
    Warning,
    Info,
    Muted,
    Header,
}

impl Role {
    pub fn style(self) -> Style {
        match self {
            Self::Success => Style::new().green().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().cyan(),
            Self::Muted => Style::new().dimmed(),
            Self::Header => Style::new().bold(),
        }
    }
}

/// Applies a [`Role`] unless colors are disabled.
pub trait SemanticStyle: std::fmt::Display + Sized {
    fn paint(&self, role: Role) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.style(role.style()).to_string()
        }
    }

    fn success(&self) -> String {
        self.paint(Role::Success)
    }

    fn error(&self) -> String {
        self.paint(Role::Error)
    }

    fn warning(&self) -> String {
        self.paint(Role::Warning)
    }

    fn info(&self) -> String {
        self.paint(Role::Info)
    }

    fn muted(&self) -> String {
        self.paint(Role::Muted)
    }

    fn header(&self) -> String {
        self.paint(Role::Header)
    }
}

impl<T: std::fmt::Display> SemanticStyle for T {}
