//! Seeded synthetic comments.
//!
//! Popularity is a known linear function of the metadata plus Gaussian noise,
//! so the solvers have a real signal to recover. Text is drawn from a small
//! lexicon with a skew toward the first words, which gives the vocabulary a
//! long-tailed frequency profile similar to real comment threads.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Comment;
use crate::error::AppError;

const LEXICON: [&str; 32] = [
    "the", "i", "to", "a", "and", "is", "it", "you", "that", "of", "this", "in", "not", "for",
    "lol", "just", "people", "what", "like", "post", "why", "good", "thanks", "really", "game",
    "actually", "source", "agree", "wrong", "funny", "edit", "deleted",
];

const TRAILING_PUNCTUATION: [&str; 4] = [".", "!", "?", ","];

/// Standard deviation of the additive noise on popularity.
const NOISE_SIGMA: f64 = 0.3;

/// Largest accepted `count`.
pub const MAX_SYNTHETIC_COMMENTS: usize = 10_000_000;

/// Generate `count` comments deterministically from `seed`.
pub fn generate_comments(count: usize, seed: u64) -> Result<Vec<Comment>, AppError> {
    if count == 0 {
        return Err(AppError::invalid_config("Synthetic comment count must be > 0."));
    }
    if count > MAX_SYNTHETIC_COMMENTS {
        return Err(AppError::invalid_config(format!(
            "Synthetic comment count must be at most {MAX_SYNTHETIC_COMMENTS} (got {count})."
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, NOISE_SIGMA)
        .map_err(|e| AppError::invalid_config(format!("Noise distribution error: {e}")))?;

    let mut comments = Vec::with_capacity(count);
    for _ in 0..count {
        let is_root = rng.gen_bool(0.4);
        let children: u32 = if rng.gen_bool(0.6) { 0 } else { rng.gen_range(1..=12) };
        // Mostly zero; otherwise a fractional score so c² is not a linear function of c.
        let controversiality = if rng.gen_bool(0.85) {
            0.0
        } else {
            (rng.gen_range(0.05..0.95_f64) * 100.0).round() / 100.0
        };

        let n_words = rng.gen_range(0..=25usize);
        let text = random_text(&mut rng, n_words);

        let popularity_score = 0.8 + 0.6 * f64::from(u8::from(is_root)) + 0.35 * f64::from(children)
            - 0.9 * controversiality
            + 0.04 * n_words as f64
            + noise.sample(&mut rng);

        comments.push(Comment {
            text,
            popularity_score,
            children,
            controversiality,
            is_root,
        });
    }

    Ok(comments)
}

fn random_text(rng: &mut StdRng, n_words: usize) -> String {
    let mut words = Vec::with_capacity(n_words);
    for _ in 0..n_words {
        // u² skews toward the start of the lexicon.
        let u: f64 = rng.r#gen();
        let idx = ((u * u) * LEXICON.len() as f64) as usize;
        let mut word = LEXICON[idx.min(LEXICON.len() - 1)].to_string();
        if rng.gen_bool(0.1) {
            word.push_str(TRAILING_PUNCTUATION[rng.gen_range(0..TRAILING_PUNCTUATION.len())]);
        }
        if rng.gen_bool(0.05) {
            word = word.to_uppercase();
        }
        words.push(word);
    }
    words.join(" ")
}
