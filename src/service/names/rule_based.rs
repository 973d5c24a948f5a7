use rand::seq::SliceRandom;
use rand::Rng;

pub const PREFIXES: [&str; 9] = ["Thal-", "Ely-", "Vor-", "Zar-", "Drak-", "Sylv-", "Kor-", "Ael-", "Zyr-"];

pub const SUFFIXES: [&str; 9] = ["-dor", "-lyn", "-thar", "-vax", "-mir", "-ion", "-el", "-or", "-is"];

pub const BASES: [&str; 20] = [
    "Eldrin", "Sylvar", "Zorath", "Kael", "Liora", "Valthor", "Aeloria", "Draven", "Thalor",
    "Elyndra", "Zephyra", "Sylvana", "Korvath", "Aelric", "Zyra", "Eldora", "Varn", "Lorien",
    "Mythra", "Zandor",
];

/// Picks one entry uniformly; the affix lists are never empty.
pub(crate) fn pick<'a, R: Rng + ?Sized>(rng: &mut R, list: &[&'a str]) -> &'a str {
    list.choose(rng).copied().unwrap_or_default()
}

/// Builds `prefix + base + suffix` from the fixed word lists.
pub fn rule_based_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = pick(rng, &PREFIXES);
    let base = pick(rng, &BASES);
    let suffix = pick(rng, &SUFFIXES);
    format!("{}{}{}", prefix, base, suffix)
}

/// True when `name` has the `prefix + letters + suffix` shape of an affixed name.
pub fn is_affixed_name(name: &str) -> bool {
    PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix).is_some_and(|rest| {
            SUFFIXES.iter().any(|suffix| {
                rest.strip_suffix(suffix).is_some_and(|core| {
                    !core.is_empty() && core.chars().all(|c| c.is_ascii_alphabetic())
                })
            })
        })
    })
}
