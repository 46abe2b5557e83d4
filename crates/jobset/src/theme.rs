// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Themed two-word name generation, for jobs a job-set leaves unnamed.
//!
//! Mirrors the original's `NameGenerator(name=None, theme=Theme.Lovecraft)`:
//! an explicit name always wins; otherwise a name is drawn from an
//! adjective/noun word-pair dictionary keyed by theme.

use nanoid::nanoid;

const LOVECRAFT_ADJECTIVES: &[&str] =
    &["eldritch", "cyclopean", "unspeakable", "noneuclidean", "abyssal", "nameless", "sunken", "furtive"];
const LOVECRAFT_NOUNS: &[&str] =
    &["cultist", "tentacle", "obelisk", "madness", "whisper", "idol", "tide", "rune"];

const NAUTICAL_ADJECTIVES: &[&str] = &["briny", "weathered", "windward", "listing", "barnacled", "tarred"];
const NAUTICAL_NOUNS: &[&str] = &["skiff", "anchor", "tideway", "gull", "reef", "ballast"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Lovecraft,
    Nautical,
}

impl Theme {
    fn words(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            Theme::Lovecraft => (LOVECRAFT_ADJECTIVES, LOVECRAFT_NOUNS),
            Theme::Nautical => (NAUTICAL_ADJECTIVES, NAUTICAL_NOUNS),
        }
    }
}

/// Generates a job name: the explicit `name` if given, otherwise a
/// `<adjective>-<noun>-<suffix>` triple drawn from `theme`, unique enough
/// that two unnamed jobs in the same set never collide.
pub struct NameGenerator {
    theme: Theme,
}

impl NameGenerator {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn generate(&self, explicit: Option<&str>) -> String {
        if let Some(name) = explicit {
            return name.to_string();
        }
        let (adjectives, nouns) = self.theme.words();
        let adjective = pick(adjectives);
        let noun = pick(nouns);
        let suffix = nanoid!(4, &['a', 'b', 'c', 'd', 'e', 'f', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
        format!("{adjective}-{noun}-{suffix}")
    }
}

fn pick(words: &'static [&'static str]) -> &'static str {
    let idx_seed = nanoid!(6, &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
    let idx: usize = idx_seed.bytes().map(|b| b as usize).sum::<usize>() % words.len();
    words[idx]
}

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
