//! 模型输出的名称后处理
//!
//! 原始模式只清理噪声并校验剩余文本；flare 模式从候选词中挑选一个，
//! 再随机加上前缀和后缀。

use rand::Rng;
use std::fmt;
use unicode_categories::UnicodeCategories;

use super::rule_based::{pick, PREFIXES, SUFFIXES};

/// Substrings removed in both modes, in this order.
const RAW_DENYLIST: [&str; 5] = ["'", "\"", "_", "Blizzard", "copyright"];

/// Extra substrings removed in flared mode, after [`RAW_DENYLIST`].
const FLARE_DENYLIST: [&str; 12] = [
    "image", "rights", "history", "sites", "started", "building", "fire", "curse", "monster",
    "original", "mantis", "kodoku",
];

const STOP_WORDS: [&str; 31] = [
    "the", "a", "an", "and", "is", "name", "this", "have", "rights", "important", "take", "ground",
    "families", "image", "history", "sites", "started", "building", "fire", "think", "just",
    "journey", "magic", "sorcery", "really", "simple", "curse", "monster", "original", "mantis",
    "kodoku",
];

const FORBIDDEN_CHARS: &str = "_-©[]{}|⁄ˈ";

const MIN_LEN: usize = 4;

/// Why cleaned text could not be used as a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooShort,
    NotAlphanumeric,
    NoCandidateWords,
    ForbiddenCharacter,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "cleaned text is empty"),
            Rejection::TooShort => write!(f, "cleaned text is too short"),
            Rejection::NotAlphanumeric => write!(f, "cleaned text is not alphanumeric"),
            Rejection::NoCandidateWords => write!(f, "no candidate words survived filtering"),
            Rejection::ForbiddenCharacter => write!(f, "cleaned text contains a forbidden character"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flared {
    Name(String),
    Rejected(Rejection),
}

fn strip_all(text: &str, prompt: &str, denylists: &[&[&str]]) -> String {
    let without_prompt = if prompt.is_empty() { text.to_string() } else { text.replace(prompt, "") };
    let cleaned = denylists
        .iter()
        .flat_map(|list| list.iter())
        .fold(without_prompt, |acc, junk| acc.replace(junk, ""));
    cleaned.trim().to_string()
}

fn is_alphanumeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphanumeric)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Removes the prompt and raw-mode junk, then validates the remainder.
pub fn clean_raw(raw: &str, prompt: &str) -> Flared {
    let cleaned = strip_all(raw, prompt, &[&RAW_DENYLIST]);
    if cleaned.is_empty() {
        Flared::Rejected(Rejection::Empty)
    } else if cleaned.chars().count() <= MIN_LEN {
        Flared::Rejected(Rejection::TooShort)
    } else if !is_alphanumeric(&cleaned) {
        Flared::Rejected(Rejection::NotAlphanumeric)
    } else {
        Flared::Name(cleaned)
    }
}

/// Words of the cleaned text that could serve as a name stem.
pub fn candidate_words(cleaned: &str) -> Vec<&str> {
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_LEN)
        .filter(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .filter(|w| is_alphanumeric(w))
        .collect()
}

fn has_forbidden_char(text: &str) -> bool {
    text.chars().any(|c| FORBIDDEN_CHARS.contains(c) || c.is_number_decimal_digit())
}

/// Restyles one candidate word as `prefix + Word + suffix`.
pub fn flare_words<R: Rng + ?Sized>(raw: &str, prompt: &str, rng: &mut R) -> Flared {
    let cleaned = strip_all(raw, prompt, &[&RAW_DENYLIST, &FLARE_DENYLIST]);
    let words = candidate_words(&cleaned);
    if words.is_empty() {
        return Flared::Rejected(Rejection::NoCandidateWords);
    }
    if has_forbidden_char(&cleaned) {
        return Flared::Rejected(Rejection::ForbiddenCharacter);
    }

    let target = capitalize(pick(rng, &words));
    Flared::Name(format!("{}{}{}", pick(rng, &PREFIXES), target, pick(rng, &SUFFIXES)))
}

pub fn flare<R: Rng + ?Sized>(raw: &str, prompt: &str, use_flare: bool, rng: &mut R) -> Flared {
    if use_flare {
        flare_words(raw, prompt, rng)
    } else {
        clean_raw(raw, prompt)
    }
}
