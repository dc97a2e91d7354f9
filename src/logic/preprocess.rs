//! Review text preprocessing
//!
//! Normalizes raw review text into the token stream the embedding model was
//! trained on: lower-cased, symbols spelled out, contractions expanded, tags
//! and stop-words removed, every token stemmed.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

// ============================================================================
// TABLES
// ============================================================================

const SYMBOL_WORDS: &[(&str, &str)] = &[
    ("%", " percent"),
    ("$", " dollar "),
    ("₹", " rupee "),
    ("€", " euro "),
    ("@", " at "),
    (",000,000,000 ", "b "),
    (",000,000 ", "m "),
    (",000 ", "k "),
];

const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"), ("aren't", "are not"), ("can't", "can not"),
    ("can't've", "can not have"), ("cause", "because"), ("could've", "could have"),
    ("couldn't", "could not"), ("couldn't've", "could not have"), ("didn't", "did not"),
    ("doesn't", "does not"), ("don't", "do not"), ("hadn't", "had not"),
    ("hasn't", "has not"), ("haven't", "have not"), ("he's", "he is"),
    ("how's", "how is"), ("i'm", "i am"), ("i've", "i have"), ("isn't", "is not"),
    ("it's", "it is"), ("let's", "let us"), ("should've", "should have"),
    ("shouldn't", "should not"), ("that's", "that is"), ("there's", "there is"),
    ("they're", "they are"), ("they've", "they have"), ("wasn't", "was not"),
    ("we're", "we are"), ("we've", "we have"), ("weren't", "were not"),
    ("what's", "what is"), ("where's", "where is"), ("who's", "who is"),
    ("why's", "why is"), ("won't", "will not"), ("would've", "would have"),
    ("wouldn't", "would not"), ("you're", "you are"), ("you've", "you have"),
];

/// NLTK english stop-word list
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
    "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

// ============================================================================
// STATE
// ============================================================================

static BILLIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)000000000").unwrap());
static MILLIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)000000").unwrap());
static THOUSANDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)000").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_']+|[^\p{L}\p{N}_'\s]").unwrap());

static CONTRACTION_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CONTRACTIONS.iter().copied().collect());
static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());
static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

// ============================================================================
// PIPELINE
// ============================================================================

/// Full preprocessing pipeline, returns space-joined stemmed tokens
pub fn preprocess_text(raw: &str) -> String {
    let mut text = raw.to_lowercase().trim().to_string();

    for (symbol, word) in SYMBOL_WORDS {
        text = text.replace(symbol, word);
    }

    text = BILLIONS.replace_all(&text, "${1}b").into_owned();
    text = MILLIONS.replace_all(&text, "${1}m").into_owned();
    text = THOUSANDS.replace_all(&text, "${1}k").into_owned();

    text = expand_contractions(&text);
    text = HTML_TAG.replace_all(&text, "").into_owned();
    text = demojize(&text);

    stem_tokens(&text)
}

/// Per whitespace token; also collapses runs of whitespace
pub fn expand_contractions(text: &str) -> String {
    text.split_whitespace()
        .map(|word| CONTRACTION_MAP.get(word).copied().unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace emoji characters with `:shortcode:` text
pub fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u8; 4];

    for c in text.chars() {
        // variation selector / zero width joiner carry no meaning on their own
        if c == '\u{FE0F}' || c == '\u{200D}' {
            continue;
        }

        match emojis::get(c.encode_utf8(&mut buf)) {
            Some(emoji) => {
                let name = emoji
                    .shortcode()
                    .map(str::to_string)
                    .unwrap_or_else(|| emoji.name().replace(' ', "_"));
                out.push(':');
                out.push_str(&name);
                out.push(':');
            }
            None => out.push(c),
        }
    }

    out
}

/// Tokenize, drop stop-words and stem what is left
pub fn stem_tokens(text: &str) -> String {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORD_SET.contains(token))
        .map(|token| STEMMER.stem(token).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
