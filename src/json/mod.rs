//! Hand-rolled JSON codec for city maps
//!
//! The tokenizer produces a flat, index-addressed token pool; the loader
//! pulls segments out of it by hand and the writer emits the one layout the
//! loader expects.

mod fields;
mod loader;
mod tokenizer;
mod writer;

pub use fields::{token_equals_str, token_to_f64, token_to_i32};
pub use loader::{load_from_bytes, load_from_path, load_from_str};
pub use tokenizer::{
    token_capacity_for, tokenize, tokenize_with_capacity, Token, TokenKind,
};
pub use writer::{save_to_path, to_json_string, write_city_map};
