//! Name templates.
//!
//! A template is a plain string with `{...}` groups in it. Every character in
//! a group is a key naming a [`CharSource`], and is replaced by one value drawn
//! from that source. Keys are case-insensitive, so `{WWWW}` and `{wwww}` mean
//! the same thing.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use regex::Regex;

use crate::error::{Error, Result};

pub const DIGIT: &str = "1234567890";
pub const WORD: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Where the replacement for one placeholder character comes from.
#[derive(Clone)]
pub enum CharSource {
    /// Sampled uniformly by index.
    Alphabet(Vec<char>),
    /// Invoked once per placeholder character.
    Generator(Arc<dyn Fn() -> String + Send + Sync>),
}

impl CharSource {
    pub fn alphabet(chars: &str) -> Self {
        CharSource::Alphabet(chars.chars().collect())
    }

    pub fn generator<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        CharSource::Generator(Arc::new(f))
    }

    /// One alphanumeric character drawn from the operating system's entropy source.
    pub fn secure() -> Self {
        CharSource::generator(|| (OsRng.sample(Alphanumeric) as char).to_string())
    }

    fn sample<R: Rng + ?Sized>(&self, key: char, rng: &mut R, out: &mut String) -> Result<()> {
        match self {
            CharSource::Alphabet(chars) => {
                if chars.is_empty() {
                    return Err(Error::EmptyAlphabet { key });
                }
                out.push(chars[rng.gen_range(0..chars.len())]);
            }
            CharSource::Generator(f) => out.push_str(&f()),
        }

        Ok(())
    }
}

impl fmt::Debug for CharSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CharSource::Alphabet(chars) => {
                write!(f, "Alphabet({:?})", chars.iter().collect::<String>())
            }
            CharSource::Generator(_) => write!(f, "Generator"),
        }
    }
}

/// A set of placeholder keys and the sources they expand to.
#[derive(Debug, Clone)]
pub struct Template {
    sources: BTreeMap<char, CharSource>,
}

impl Default for Template {
    /// `d` for digits, `w` for ASCII letters and `x` for OS-random alphanumerics.
    fn default() -> Self {
        Self::empty()
            .with_source('d', CharSource::alphabet(DIGIT))
            .with_source('w', CharSource::alphabet(WORD))
            .with_source('x', CharSource::secure())
    }
}

impl Template {
    pub fn empty() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    pub fn with_source(mut self, key: char, source: CharSource) -> Self {
        self.insert(key, source);

        self
    }

    pub fn insert(&mut self, key: char, source: CharSource) -> Option<CharSource> {
        self.sources.insert(fold(key), source)
    }

    pub fn get(&self, key: char) -> Option<&CharSource> {
        self.sources.get(&fold(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.sources.keys().copied()
    }

    pub fn expand(&self, pattern: &str) -> Result<String> {
        self.expand_with(&mut rand::thread_rng(), pattern)
    }

    /// Expands `pattern` drawing alphabet indices from `rng`.
    pub fn expand_with<R: Rng + ?Sized>(&self, rng: &mut R, pattern: &str) -> Result<String> {
        let mut out = String::with_capacity(pattern.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(pattern) {
            let (group, tokens) = match (caps.get(0), caps.get(1)) {
                (Some(group), Some(tokens)) => (group, tokens),
                _ => continue,
            };
            out.push_str(&pattern[last..group.start()]);
            for key in tokens.as_str().chars() {
                let source = self.get(key).ok_or_else(|| self.unknown(key))?;
                source.sample(key, rng, &mut out)?;
            }
            last = group.end();
        }
        out.push_str(&pattern[last..]);

        tracing::trace!(pattern, expanded = %out, "Expanded name template");

        Ok(out)
    }

    fn unknown(&self, found: char) -> Error {
        let expected = self
            .keys()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(", ");

        Error::UnknownPlaceholder { found, expected }
    }
}

fn fold(key: char) -> char {
    key.to_lowercase().next().unwrap_or(key)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_word(c: char) -> bool {
        WORD.contains(c)
    }

    fn is_digit(c: char) -> bool {
        DIGIT.contains(c)
    }

    #[test]
    fn expand_keeps_shape() {
        let template = Template::default();
        for _ in 0..200 {
            let name = template.expand("abc-{wdwd}").unwrap();
            let chars: Vec<char> = name.chars().collect();
            assert_eq!(chars.len(), 8, "{}", name);
            assert!(name.starts_with("abc-"));
            assert!(is_word(chars[4]) && is_digit(chars[5]));
            assert!(is_word(chars[6]) && is_digit(chars[7]));
        }
    }

    #[test]
    fn keys_are_case_insensitive() {
        let name = Template::default().expand("{WWWWDDDD}").unwrap();
        assert_eq!(name.len(), 8);
        assert!(name[..4].chars().all(is_word));
        assert!(name[4..].chars().all(is_digit));
    }

    #[test]
    fn text_outside_groups_is_untouched() {
        let template = Template::default();
        assert_eq!(template.expand("plain.txt").unwrap(), "plain.txt");
        assert_eq!(template.expand("a{}b").unwrap(), "a{}b");
        assert_eq!(template.expand("open{d").unwrap(), "open{d");

        let name = template.expand("{d}-mid-{d}").unwrap();
        assert_eq!(&name[1..6], "-mid-");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Template::default().expand("test-{abc}").unwrap_err();
        match &err {
            Error::UnknownPlaceholder { found, expected } => {
                assert_eq!(*found, 'a');
                assert_eq!(expected, "d, w, x");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("Received a"));
    }

    #[test]
    fn secure_source_stays_alphanumeric() {
        let name = Template::default().expand("{xxxxxxxxxxxxxxxx}").unwrap();
        assert_eq!(name.len(), 16);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn every_alphabet_index_is_reachable() {
        let template = Template::empty().with_source('b', CharSource::alphabet("01"));
        let mut rng = StdRng::seed_from_u64(7);
        let name = template
            .expand_with(&mut rng, "{bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb}")
            .unwrap();
        assert!(name.contains('0'));
        assert!(name.contains('1'));
        assert_eq!(name.len(), 32);
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let template = Template::empty().with_source('e', CharSource::alphabet(""));
        let err = template.expand("name-{E}").unwrap_err();
        assert!(matches!(err, Error::EmptyAlphabet { key: 'E' }));
        assert!(template.expand("plain").is_ok());
    }

    #[test]
    fn generator_source_is_invoked_per_key() {
        let template = Template::empty().with_source('Z', CharSource::generator(|| "zz".into()));
        assert_eq!(template.expand("{zz}").unwrap(), "zzzz");
    }
}
