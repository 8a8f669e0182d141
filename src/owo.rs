//! The owo transform — ordered substitutions, random affixes, link
//! stripping, all under the platform's 280-character post budget.

use rand::Rng;
use regex::Regex;

/// Hard per-post character budget on the target platform.
pub const MAX_POST_CHARS: usize = 280;

/// Substitution table, applied top to bottom over the whole running
/// string. Uppercase and lowercase rules are distinct entries.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("r", "w"),
    ("l", "w"),
    ("R", "W"),
    ("L", "W"),
    ("no", "nu"),
    ("has", "haz"),
    ("have", "haz"),
    ("you", "uu"),
    ("the ", "da "),
    ("The ", "Da "),
];

/// Prefixes drawn uniformly at random per transform.
const PREFIXES: &[&str] = &[
    "<3 ",
    "H-hewwo?? ",
    "HIIII! ",
    "Haiiii! ",
    "Huohhhh. ",
    "OWO ",
    "OwO ",
    "UwU ",
];

/// Suffixes drawn uniformly at random per transform.
const SUFFIXES: &[&str] = &[
    " :3",
    " UwU",
    " ʕʘ‿ʘʔ",
    " >_>",
    " ^_^",
    "..",
    " Huoh.",
    " ^-^",
    " ;_;",
    " ;-;",
    " xD",
    " x3",
    " :D",
    " :P",
    " ;3",
    " XDDD",
    ", fwendo",
    " ㅇㅅㅇ",
    " (人◕ω◕)",
    "（＾ｖ＾）",
    " Sigh.",
    " ._.",
    " >_<",
];

/// Applies the owo transform to raw post text.
///
/// Link stripping and substitution are deterministic; affix choice is
/// driven by a caller-supplied [`Rng`] so outputs can be reproduced
/// under a fixed seed.
pub struct Owoifier {
    link: Regex,
}

impl Owoifier {
    pub fn new() -> Self {
        Self {
            link: Regex::new(
                r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*(), ]|%[0-9a-fA-F][0-9a-fA-F])+",
            )
            .unwrap(),
        }
    }

    /// Deterministic core: strip the first link, then run the
    /// substitution table in order.
    ///
    /// Byte-identical across calls for the same input — thread
    /// resolution recomputes this form to match against posted text.
    pub fn unaffixed(&self, text: &str) -> String {
        let mut owo = self.strip_link(text);
        for (from, to) in SUBSTITUTIONS {
            owo = owo.replace(from, to);
        }
        owo
    }

    /// Full transform: the deterministic core plus one random prefix
    /// and one random suffix, each kept only if the running text stays
    /// within [`MAX_POST_CHARS`]. Affixes are never truncated, only
    /// dropped.
    pub fn owoify(&self, text: &str, rng: &mut impl Rng) -> String {
        let mut owo = self.unaffixed(text);

        let prefix = PREFIXES[rng.gen_range(0..PREFIXES.len())];
        let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];

        if prefix.chars().count() + owo.chars().count() <= MAX_POST_CHARS {
            owo = format!("{prefix}{owo}");
        }

        // The suffix check runs against the possibly-prefixed text
        if owo.chars().count() + suffix.chars().count() <= MAX_POST_CHARS {
            owo.push_str(suffix);
        }

        owo
    }

    /// Everything from the first link onward is cut, along with the
    /// single character before it (usually the separating space). A
    /// link at the very start leaves the empty string.
    fn strip_link(&self, text: &str) -> String {
        match self.link.find(text) {
            Some(m) => {
                let head = &text[..m.start()];
                match head.char_indices().next_back() {
                    Some((idx, _)) => head[..idx].to_string(),
                    None => String::new(),
                }
            }
            None => text.to_string(),
        }
    }
}

impl Default for Owoifier {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
