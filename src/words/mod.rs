use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A named, build-time-embedded list of challenge words. Immutable for a
/// given build; each round draws its own working copy.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct WordPool {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordPool {
    pub fn new(file_name: &str) -> Self {
        read_pool_from_file(format!("{}.json", file_name)).unwrap()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A freshly shuffled working copy for one round. Words are removed from
    /// the copy as they are presented, so no word repeats within a round.
    pub fn round_copy(&self) -> Vec<String> {
        let mut copy = self.words.clone();
        copy.shuffle(&mut rand::thread_rng());
        copy
    }
}

fn read_pool_from_file(file_name: String) -> Result<WordPool, Box<dyn Error>> {
    let file = WORDS_DIR.get_file(file_name).expect("Word list not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let pool = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(pool)
}
