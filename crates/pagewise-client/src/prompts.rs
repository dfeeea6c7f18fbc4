//! Context-menu actions and the prompts they send.

/// Translation target offered under "AI: Translate to...".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Menu id, e.g. `translate-spanish`.
    pub id: &'static str,
    /// Menu label.
    pub title: &'static str,
    /// Name used inside the prompt.
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        id: "translate-english",
        title: "English",
        name: "English",
    },
    Language {
        id: "translate-spanish",
        title: "Spanish (Español)",
        name: "Spanish",
    },
    Language {
        id: "translate-french",
        title: "French (Français)",
        name: "French",
    },
    Language {
        id: "translate-german",
        title: "German (Deutsch)",
        name: "German",
    },
    Language {
        id: "translate-italian",
        title: "Italian (Italiano)",
        name: "Italian",
    },
    Language {
        id: "translate-portuguese",
        title: "Portuguese (Português)",
        name: "Portuguese",
    },
    Language {
        id: "translate-chinese",
        title: "Chinese (中文)",
        name: "Chinese",
    },
    Language {
        id: "translate-japanese",
        title: "Japanese (日本語)",
        name: "Japanese",
    },
    Language {
        id: "translate-korean",
        title: "Korean (한국어)",
        name: "Korean",
    },
    Language {
        id: "translate-arabic",
        title: "Arabic (العربية)",
        name: "Arabic",
    },
    Language {
        id: "translate-hindi",
        title: "Hindi (हिन्दी)",
        name: "Hindi",
    },
    Language {
        id: "translate-russian",
        title: "Russian (Русский)",
        name: "Russian",
    },
];

/// Top-level menu entries as `(id, title)`.
pub const MENU_ITEMS: &[(&str, &str)] = &[
    ("ai-summarize", "AI: Summarize"),
    ("ai-explain", "AI: Explain"),
    ("ai-rewrite", "AI: Rewrite"),
    ("ai-translate", "AI: Translate to..."),
    ("ai-improve", "AI: Improve Writing"),
];

/// One thing the user can ask for on a text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Summarize,
    Explain,
    Rewrite,
    Improve,
    Translate(Language),
}

impl MenuAction {
    /// Parse a menu id. `ai-translate` itself is only a submenu parent and
    /// has no prompt.
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            "ai-summarize" => Some(Self::Summarize),
            "ai-explain" => Some(Self::Explain),
            "ai-rewrite" => Some(Self::Rewrite),
            "ai-improve" => Some(Self::Improve),
            _ => LANGUAGES
                .iter()
                .find(|lang| lang.id == id)
                .map(|lang| Self::Translate(*lang)),
        }
    }

    pub fn menu_id(&self) -> &'static str {
        match self {
            Self::Summarize => "ai-summarize",
            Self::Explain => "ai-explain",
            Self::Rewrite => "ai-rewrite",
            Self::Improve => "ai-improve",
            Self::Translate(lang) => lang.id,
        }
    }

    /// Prompt sent to the relay for `selection`.
    pub fn prompt(&self, selection: &str) -> String {
        let instruction = match self {
            Self::Summarize => "Summarize this text concisely:".to_string(),
            Self::Explain => "Explain this text in simple terms:".to_string(),
            Self::Rewrite => {
                "Rewrite this text to make it clearer and more professional:".to_string()
            }
            Self::Improve => "Improve the writing quality of this text \
                 (fix grammar, enhance clarity, improve flow):"
                .to_string(),
            Self::Translate(lang) => format!("Translate this text to {}:", lang.name),
        };
        format!("{}\n\n{}", instruction, selection)
    }
}
